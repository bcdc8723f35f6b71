//! Arbitrary-precision decimal validator.
//!
//! Accepts several representations and converts each to a
//! [`bigdecimal::BigDecimal`] before comparing against the bounds:
//!
//! | Representation | Conversion |
//! |----------------|------------|
//! | `String`       | parsed exactly (plain or scientific notation) |
//! | `Decimal`      | as is |
//! | `Int32`/`Int64`| exact |
//! | `Float64`      | lossy; logged at `warn` |
//!
//! Decimal strings are the preferred wire form.

use std::str::FromStr;

use bigdecimal::{BigDecimal, FromPrimitive};
use schemagate_core::{types, FieldDefinition, FieldValue, Violation};

use super::{check_bounds, require_present, type_mismatch, FieldValidator};

/// Validates `decimal` fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalValidator;

impl DecimalValidator {
    fn to_decimal(key: &str, value: &FieldValue) -> Result<BigDecimal, Violation> {
        let unparsable = |value: String| Violation::UnparsableDecimal {
            field: key.to_string(),
            value,
        };
        match value {
            FieldValue::String(s) => BigDecimal::from_str(s).map_err(|_| unparsable(s.clone())),
            FieldValue::Decimal(d) => Ok(d.clone()),
            FieldValue::Int32(n) => Ok(BigDecimal::from(*n)),
            FieldValue::Int64(n) => Ok(BigDecimal::from(*n)),
            FieldValue::Float64(f) => {
                tracing::warn!(
                    field = key,
                    "decimal field supplied as float64; use a string representation to avoid precision loss"
                );
                // None for NaN and the infinities.
                BigDecimal::from_f64(*f).ok_or_else(|| unparsable(f.to_string()))
            }
            other => Err(type_mismatch(key, types::DECIMAL, other)),
        }
    }
}

impl FieldValidator for DecimalValidator {
    fn supported_type(&self) -> &str {
        types::DECIMAL
    }

    fn validate(
        &self,
        key: &str,
        value: Option<&FieldValue>,
        definition: &FieldDefinition,
    ) -> Result<(), Violation> {
        tracing::debug!(field = key, type_name = types::DECIMAL, "validate field");
        let Some(value) = require_present(key, value, definition)? else {
            return Ok(());
        };
        let decimal = Self::to_decimal(key, value)?;
        check_bounds(key, decimal, definition, |b| BigDecimal::from(b))
    }
}
