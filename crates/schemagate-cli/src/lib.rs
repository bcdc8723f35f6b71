//! # schemagate-cli — Command-Line Interface
//!
//! Provides the `schemagate` binary:
//!
//! - `schemagate check --schema <file> --data <file> [--mode map|document]`
//! - `schemagate fingerprint <file>`
//! - `schemagate types`
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs` and the `*Args` structs; handlers
//!   take parsed arguments and return an exit code.
//! - Exit codes: 0 valid, 1 invalid, 2 operational error.
//! - This is the only schemagate crate that touches the filesystem.

pub mod check;
pub mod document;
pub mod fingerprint;
pub mod types;

use std::path::Path;

use anyhow::{Context, Result};
use schemagate::GateConfig;

/// Load the gate configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<GateConfig> {
    let Some(path) = path else {
        return Ok(GateConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = GateConfig::from_yaml_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
