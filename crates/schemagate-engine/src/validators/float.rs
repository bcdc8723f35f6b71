use schemagate_core::{types, FieldDefinition, FieldValue, Violation};

use super::{check_bounds, require_present, type_mismatch, FieldValidator};

/// Validates `float64` fields. Integral values are compared against the
/// bounds as `i64`, everything else as `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Float64Validator;

impl FieldValidator for Float64Validator {
    fn supported_type(&self) -> &str {
        types::FLOAT64
    }

    fn validate(
        &self,
        key: &str,
        value: Option<&FieldValue>,
        definition: &FieldDefinition,
    ) -> Result<(), Violation> {
        tracing::debug!(field = key, type_name = types::FLOAT64, "validate field");
        let Some(value) = require_present(key, value, definition)? else {
            return Ok(());
        };
        match value {
            // Bounds past 2^53 do not survive `as f64`, so integral values
            // inside the i64 range are compared as integers.
            FieldValue::Float64(f) if is_integral_i64(*f) => {
                check_bounds(key, *f as i64, definition, |b| b)
            }
            FieldValue::Float64(f) => check_bounds(key, *f, definition, |b| b as f64),
            other => Err(type_mismatch(key, types::FLOAT64, other)),
        }
    }
}

fn is_integral_i64(f: f64) -> bool {
    // -2^63 is exact in f64; 2^63 is not an i64.
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < -(i64::MIN as f64)
}
