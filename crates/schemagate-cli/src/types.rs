//! # Types Subcommand
//!
//! Lists the field types the configured registry can validate.

use anyhow::{Context, Result};
use schemagate::{GateConfig, ValidatorRegistry};

pub fn run_types(config: &GateConfig) -> Result<u8> {
    let registry = ValidatorRegistry::from_type_names(config.validators.as_slice())
        .context("invalid validator selection")?;
    for name in registry.type_names() {
        println!("{name}");
    }
    Ok(0)
}
