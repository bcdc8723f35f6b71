//! # schemagate CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use schemagate_cli::check::{run_check, CheckArgs};
use schemagate_cli::fingerprint::{run_fingerprint, FingerprintArgs};
use schemagate_cli::load_config;
use schemagate_cli::types::run_types;

/// Validate loosely-typed data against field-definition maps or JSON
/// Schema documents.
#[derive(Parser, Debug)]
#[command(name = "schemagate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a data file against a schema file.
    Check(CheckArgs),

    /// Print the cache fingerprint of a schema file.
    Fingerprint(FingerprintArgs),

    /// List the field types the configured registry validates.
    Types,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins unless -v was given.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = load_config(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Check(args) => run_check(args, &config),
        Commands::Fingerprint(args) => run_fingerprint(args),
        Commands::Types => run_types(&config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
