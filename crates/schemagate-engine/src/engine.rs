//! # Recursive Validation Engine (map mode)
//!
//! Walks a [`DataMap`] against a [`Schema`], field by field, in schema
//! order. For each schema entry:
//!
//! 1. A field with `nullable: false` must be present and non-null.
//! 2. An `object` field recurses into its nested schema. The value must be
//!    a map; absent or null is accepted when the field permits absence.
//! 3. Any other field is handed to the validator registered for its type.
//!
//! Validation stops at the first violation. Keys present in the data but
//! not in the schema are ignored.

use schemagate_core::{DataMap, FieldDefinition, FieldValue, Schema, Violation};

use crate::registry::ValidatorRegistry;

/// Map-mode validator bound to a registry.
#[derive(Debug, Clone, Copy)]
pub struct MapValidator<'r> {
    registry: &'r ValidatorRegistry,
}

impl<'r> MapValidator<'r> {
    pub fn new(registry: &'r ValidatorRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ValidatorRegistry {
        self.registry
    }

    /// Validate `data` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Violation`] found, in schema order. Field paths
    /// in the violation are dotted from the root (`nested.test`).
    pub fn validate(&self, schema: &Schema, data: &DataMap) -> Result<(), Violation> {
        self.validate_at("", schema, data)
    }

    fn validate_at(&self, prefix: &str, schema: &Schema, data: &DataMap) -> Result<(), Violation> {
        for (key, definition) in schema {
            let path = join_path(prefix, key);
            self.validate_field(&path, definition, data.get(key))?;
        }
        Ok(())
    }

    fn validate_field(
        &self,
        path: &str,
        definition: &FieldDefinition,
        value: Option<&FieldValue>,
    ) -> Result<(), Violation> {
        let absent = value.map_or(true, FieldValue::is_null);
        if absent && !definition.permits_absence() {
            return Err(Violation::MissingField {
                field: path.to_string(),
            });
        }

        if definition.is_object() {
            return self.validate_nested(path, definition, value);
        }

        let validator = self
            .registry
            .lookup(definition.type_name())
            .ok_or_else(|| Violation::NoValidator {
                field: path.to_string(),
                type_name: definition.type_name().to_string(),
            })?;
        validator.validate(path, value, definition)
    }

    fn validate_nested(
        &self,
        path: &str,
        definition: &FieldDefinition,
        value: Option<&FieldValue>,
    ) -> Result<(), Violation> {
        let value = match value {
            None | Some(FieldValue::Null) => return Ok(()),
            Some(v) => v,
        };
        let Some(map) = value.as_map() else {
            return Err(Violation::TypeMismatch {
                field: path.to_string(),
                expected: "map".to_string(),
                actual: value.kind().to_string(),
            });
        };
        tracing::debug!(field = path, "validate nested object");
        match definition.nested() {
            Some(nested) => self.validate_at(path, nested, map),
            // Construction guarantees object fields carry a nested schema.
            None => Ok(()),
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Validate `data` against `schema` using `registry`.
///
/// Shorthand for `MapValidator::new(registry).validate(schema, data)`.
pub fn validate_map(
    registry: &ValidatorRegistry,
    schema: &Schema,
    data: &DataMap,
) -> Result<(), Violation> {
    MapValidator::new(registry).validate(schema, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::validators::StringValidator;

    fn schema(entries: Vec<(&str, FieldDefinition)>) -> Schema {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn data(entries: Vec<(&str, FieldValue)>) -> DataMap {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a", "b"), "a.b");
    }

    #[test]
    fn test_missing_required_field() {
        let registry = ValidatorRegistry::with_defaults();
        let s = schema(vec![("age", FieldDefinition::int32().nullable(false).build().unwrap())]);
        let err = validate_map(&registry, &s, &DataMap::new()).unwrap_err();
        assert_eq!(
            err,
            Violation::MissingField {
                field: "age".to_string()
            }
        );
    }

    #[test]
    fn test_explicit_null_treated_as_missing() {
        let registry = ValidatorRegistry::with_defaults();
        let s = schema(vec![("age", FieldDefinition::int32().nullable(false).build().unwrap())]);
        let d = data(vec![("age", FieldValue::Null)]);
        assert!(matches!(
            validate_map(&registry, &s, &d),
            Err(Violation::MissingField { .. })
        ));
    }

    #[test]
    fn test_extra_data_keys_ignored() {
        let registry = ValidatorRegistry::with_defaults();
        let s = schema(vec![("name", FieldDefinition::string().build().unwrap())]);
        let d = data(vec![("name", "x".into()), ("other", FieldValue::Int32(1))]);
        validate_map(&registry, &s, &d).unwrap();
    }

    #[test]
    fn test_no_validator_for_type() {
        let registry = ValidatorRegistry::new(vec![Arc::new(StringValidator)]).unwrap();
        let s = schema(vec![("age", FieldDefinition::int32().build().unwrap())]);
        let d = data(vec![("age", FieldValue::Int32(30))]);
        let err = validate_map(&registry, &s, &d).unwrap_err();
        assert_eq!(
            err,
            Violation::NoValidator {
                field: "age".to_string(),
                type_name: "int32".to_string(),
            }
        );
    }

    #[test]
    fn test_scalar_where_object_expected() {
        let registry = ValidatorRegistry::with_defaults();
        let nested = schema(vec![("test", FieldDefinition::string().build().unwrap())]);
        let s = schema(vec![("nested", FieldDefinition::object(nested).build().unwrap())]);
        let d = data(vec![("nested", "not a map".into())]);
        let err = validate_map(&registry, &s, &d).unwrap_err();
        assert_eq!(
            err,
            Violation::TypeMismatch {
                field: "nested".to_string(),
                expected: "map".to_string(),
                actual: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_absent_optional_object_passes() {
        let registry = ValidatorRegistry::with_defaults();
        let nested = schema(vec![(
            "test",
            FieldDefinition::string().not_blank(true).build().unwrap(),
        )]);
        let s = schema(vec![("nested", FieldDefinition::object(nested).build().unwrap())]);
        validate_map(&registry, &s, &DataMap::new()).unwrap();
    }

    #[test]
    fn test_required_object_missing() {
        let registry = ValidatorRegistry::with_defaults();
        let nested = schema(vec![("test", FieldDefinition::string().build().unwrap())]);
        let s = schema(vec![(
            "nested",
            FieldDefinition::object(nested).nullable(false).build().unwrap(),
        )]);
        assert!(matches!(
            validate_map(&registry, &s, &DataMap::new()),
            Err(Violation::MissingField { field }) if field == "nested"
        ));
    }

    #[test]
    fn test_nested_violation_has_dotted_path() {
        let registry = ValidatorRegistry::with_defaults();
        let inner = schema(vec![(
            "leaf",
            FieldDefinition::string().not_blank(true).build().unwrap(),
        )]);
        let middle = schema(vec![("inner", FieldDefinition::object(inner).build().unwrap())]);
        let s = schema(vec![("outer", FieldDefinition::object(middle).build().unwrap())]);
        let d = data(vec![(
            "outer",
            FieldValue::Map(data(vec![(
                "inner",
                FieldValue::Map(data(vec![("leaf", "".into())])),
            )])),
        )]);
        let err = validate_map(&registry, &s, &d).unwrap_err();
        assert_eq!(
            err,
            Violation::Blank {
                field: "outer.inner.leaf".to_string()
            }
        );
    }

    #[test]
    fn test_stops_at_first_violation_in_key_order() {
        let registry = ValidatorRegistry::with_defaults();
        let s = schema(vec![
            ("a", FieldDefinition::int32().nullable(false).build().unwrap()),
            ("b", FieldDefinition::int32().nullable(false).build().unwrap()),
        ]);
        let err = validate_map(&registry, &s, &DataMap::new()).unwrap_err();
        assert_eq!(err.field(), "a");
    }

    #[test]
    fn test_unknown_type_absent_optional_still_needs_validator() {
        // The registry lookup precedes the validator's null check, so a
        // misconfigured type is reported even without data.
        let registry = ValidatorRegistry::with_defaults();
        let s = schema(vec![("id", FieldDefinition::builder("uuid").build().unwrap())]);
        assert!(matches!(
            validate_map(&registry, &s, &DataMap::new()),
            Err(Violation::NoValidator { .. })
        ));
    }
}
