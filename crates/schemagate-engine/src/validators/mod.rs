//! # Field Validators
//!
//! The [`FieldValidator`] capability and the built-in implementations, one
//! per type identifier in [`schemagate_core::types`].
//!
//! Every validator follows the same prologue: an absent or null value
//! passes when the definition permits absence and is a
//! [`Violation::MissingField`] otherwise. A present value whose variant
//! does not match the validator's representation is a
//! [`Violation::TypeMismatch`].

use std::fmt;
use std::sync::Arc;

use schemagate_core::{FieldDefinition, FieldValue, Violation};

mod decimal;
mod float;
mod integer;
mod string;

pub use decimal::DecimalValidator;
pub use float::Float64Validator;
pub use integer::{Int32Validator, Int64Validator};
pub use string::StringValidator;

/// Validates a single value against a field definition.
///
/// Implementations must be stateless with respect to validation: the
/// verdict is the only effect.
pub trait FieldValidator: Send + Sync + fmt::Debug {
    /// The type identifier this validator is registered under.
    fn supported_type(&self) -> &str;

    /// Check `value` (`None` when the key is absent from the data) against
    /// `definition`. `key` is the dotted path used in violations.
    fn validate(
        &self,
        key: &str,
        value: Option<&FieldValue>,
        definition: &FieldDefinition,
    ) -> Result<(), Violation>;
}

/// The built-in validator set: string, int32, int64, float64, decimal.
pub fn default_validators() -> Vec<Arc<dyn FieldValidator>> {
    vec![
        Arc::new(StringValidator),
        Arc::new(Int32Validator),
        Arc::new(Int64Validator),
        Arc::new(Float64Validator),
        Arc::new(DecimalValidator),
    ]
}

/// Resolve absent and null to `None`, enforcing nullability.
///
/// Returns `Ok(None)` when the field may be skipped, `Ok(Some(value))` when
/// the value must be checked.
pub(crate) fn require_present<'a>(
    key: &str,
    value: Option<&'a FieldValue>,
    definition: &FieldDefinition,
) -> Result<Option<&'a FieldValue>, Violation> {
    match value {
        Some(v) if !v.is_null() => Ok(Some(v)),
        _ if definition.permits_absence() => Ok(None),
        _ => Err(Violation::MissingField {
            field: key.to_string(),
        }),
    }
}

pub(crate) fn type_mismatch(key: &str, expected: &str, actual: &FieldValue) -> Violation {
    Violation::TypeMismatch {
        field: key.to_string(),
        expected: expected.to_string(),
        actual: actual.kind().to_string(),
    }
}

/// Inclusive bound check; `bound` lifts an `i64` bound into the value's
/// own numeric type so the comparison happens in that representation.
pub(crate) fn check_bounds<T>(
    key: &str,
    value: T,
    definition: &FieldDefinition,
    bound: impl Fn(i64) -> T,
) -> Result<(), Violation>
where
    T: PartialOrd + fmt::Display,
{
    if let Some(min) = definition.min_value() {
        if value < bound(min) {
            return Err(Violation::BelowMinimum {
                field: key.to_string(),
                value: value.to_string(),
                min,
            });
        }
    }
    if let Some(max) = definition.max_value() {
        if value > bound(max) {
            return Err(Violation::AboveMaximum {
                field: key.to_string(),
                value: value.to_string(),
                max,
            });
        }
    }
    Ok(())
}
