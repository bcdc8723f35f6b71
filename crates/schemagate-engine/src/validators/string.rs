use schemagate_core::{types, FieldDefinition, FieldValue, Violation};

use super::{require_present, type_mismatch, FieldValidator};

/// Validates `string` fields: representation, `not_blank`, and `pattern`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

impl FieldValidator for StringValidator {
    fn supported_type(&self) -> &str {
        types::STRING
    }

    fn validate(
        &self,
        key: &str,
        value: Option<&FieldValue>,
        definition: &FieldDefinition,
    ) -> Result<(), Violation> {
        tracing::debug!(field = key, type_name = types::STRING, "validate field");
        let Some(value) = require_present(key, value, definition)? else {
            return Ok(());
        };
        let FieldValue::String(s) = value else {
            return Err(type_mismatch(key, types::STRING, value));
        };

        if definition.not_blank() && s.trim().is_empty() {
            return Err(Violation::Blank {
                field: key.to_string(),
            });
        }
        if let Some(pattern) = definition.pattern() {
            if !pattern.is_full_match(s) {
                return Err(Violation::PatternMismatch {
                    field: key.to_string(),
                    pattern: pattern.as_str().to_string(),
                });
            }
        }
        Ok(())
    }
}
