//! # Fingerprint Subcommand
//!
//! Prints the cache key of a schema document.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use schemagate::Fingerprint;

use crate::document::read_schema_text;

/// Arguments for the `schemagate fingerprint` subcommand.
#[derive(Args, Debug)]
pub struct FingerprintArgs {
    /// Schema file.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

pub fn run_fingerprint(args: &FingerprintArgs) -> Result<u8> {
    let text = read_schema_text(&args.path)?;
    println!("{}", Fingerprint::of(&text));
    Ok(0)
}
