//! # Check Subcommand
//!
//! Validates one data file against one schema file and prints `OK` or
//! `FAIL` followed by the violations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use schemagate::{Gate, GateConfig, SchemaInput, Verdict};

use crate::document::{read_data, read_map_schema, read_schema_text};

/// How the schema file is interpreted.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// A mapping of field name to field definition.
    Map,
    /// A JSON Schema document.
    Document,
}

impl Mode {
    /// `*.schema.json` files are JSON Schema documents; anything else is a
    /// field-definition map.
    pub fn infer(schema_path: &Path) -> Self {
        let is_document = schema_path
            .file_name()
            .and_then(|f| f.to_str())
            .is_some_and(|name| name.ends_with(".schema.json"));
        if is_document {
            Mode::Document
        } else {
            Mode::Map
        }
    }
}

/// Arguments for the `schemagate check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema file.
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Data file (JSON, or YAML by extension).
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// Schema kind; inferred from the schema file name when omitted.
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 when the data is valid, 1 when it is not.
pub fn run_check(args: &CheckArgs, config: &GateConfig) -> Result<u8> {
    let mode = args.mode.unwrap_or_else(|| Mode::infer(&args.schema));
    tracing::debug!(schema = %args.schema.display(), ?mode, "checking");

    let gate = Gate::from_config(config).context("invalid gate configuration")?;
    let data = read_data(&args.data)?;

    let verdict = match mode {
        Mode::Map => {
            let schema = read_map_schema(&args.schema)?;
            gate.check(SchemaInput::Map(&schema), &data)
        }
        Mode::Document => {
            let text = read_schema_text(&args.schema)?;
            gate.check(SchemaInput::Document(&text), &data)
        }
    }
    .with_context(|| format!("failed to apply schema {}", args.schema.display()))?;

    match verdict {
        Verdict::Valid => {
            println!("OK: {}", args.data.display());
            Ok(0)
        }
        Verdict::Invalid(rejection) => {
            println!("FAIL: {}", args.data.display());
            println!("{rejection}");
            Ok(1)
        }
    }
}
