//! Fixed-width integer validators.
//!
//! The width is checked exactly: an `int64` field rejects an `Int32` value
//! and vice versa. There is no widening.

use schemagate_core::{types, FieldDefinition, FieldValue, Violation};

use super::{check_bounds, require_present, type_mismatch, FieldValidator};

/// Validates `int32` fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Int32Validator;

impl FieldValidator for Int32Validator {
    fn supported_type(&self) -> &str {
        types::INT32
    }

    fn validate(
        &self,
        key: &str,
        value: Option<&FieldValue>,
        definition: &FieldDefinition,
    ) -> Result<(), Violation> {
        tracing::debug!(field = key, type_name = types::INT32, "validate field");
        let Some(value) = require_present(key, value, definition)? else {
            return Ok(());
        };
        match value {
            // Bounds are i64; compare in i64 so out-of-i32 bounds stay meaningful.
            FieldValue::Int32(n) => check_bounds(key, i64::from(*n), definition, |b| b),
            other => Err(type_mismatch(key, types::INT32, other)),
        }
    }
}

/// Validates `int64` fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Int64Validator;

impl FieldValidator for Int64Validator {
    fn supported_type(&self) -> &str {
        types::INT64
    }

    fn validate(
        &self,
        key: &str,
        value: Option<&FieldValue>,
        definition: &FieldDefinition,
    ) -> Result<(), Violation> {
        tracing::debug!(field = key, type_name = types::INT64, "validate field");
        let Some(value) = require_present(key, value, definition)? else {
            return Ok(());
        };
        match value {
            FieldValue::Int64(n) => check_bounds(key, *n, definition, |b| b),
            other => Err(type_mismatch(key, types::INT64, other)),
        }
    }
}
