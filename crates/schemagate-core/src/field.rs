//! # Field Definitions — The Schema Model
//!
//! A [`Schema`] maps field names to [`FieldDefinition`]s. A field definition
//! describes the expected type of one data key and the constraints on its
//! value. Fields of type [`types::OBJECT`] carry a nested schema and make the
//! tree recursive.
//!
//! ## Invariants
//!
//! Enforced at construction by [`FieldDefinitionBuilder::build`], and by
//! deserialization, which runs through the same builder:
//!
//! - The type name is never blank.
//! - A pattern, when present, is non-empty and compiles.
//! - `not_blank = true` forces `nullable = false`, whatever order the two
//!   settings were applied in.
//! - Only `object` fields carry a nested schema, and they always do.
//!
//! Fields are private; a built definition cannot be mutated, so trees can be
//! shared read-only across threads.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Stable type identifiers understood by the built-in validators.
pub mod types {
    /// UTF-8 string.
    pub const STRING: &str = "string";
    /// 32-bit signed integer.
    pub const INT32: &str = "int32";
    /// 64-bit signed integer.
    pub const INT64: &str = "int64";
    /// IEEE 754 double.
    pub const FLOAT64: &str = "float64";
    /// Arbitrary-precision decimal.
    pub const DECIMAL: &str = "decimal";
    /// Nested object; the sentinel that triggers recursion.
    pub const OBJECT: &str = "object";
}

/// A schema: field name to field definition, enumerated in key order.
pub type Schema = BTreeMap<String, FieldDefinition>;

/// A compiled, whole-string regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    fn compile(source: String) -> Result<Self, SchemaError> {
        if source.is_empty() {
            return Err(SchemaError::EmptyPattern);
        }
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| {
            SchemaError::InvalidPattern {
                pattern: source.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { source, regex })
    }

    /// The pattern as written in the schema.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if `value` matches the pattern in full.
    pub fn is_full_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// One node of a schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FieldSpec", into = "FieldSpec")]
pub struct FieldDefinition {
    type_name: String,
    nested: Option<Schema>,
    nullable: Option<bool>,
    not_blank: Option<bool>,
    pattern: Option<Pattern>,
    min_value: Option<i64>,
    max_value: Option<i64>,
}

impl FieldDefinition {
    /// Start building a field of the given type.
    pub fn builder(type_name: impl Into<String>) -> FieldDefinitionBuilder {
        FieldDefinitionBuilder {
            type_name: type_name.into(),
            ..FieldDefinitionBuilder::default()
        }
    }

    /// Start building a `string` field.
    pub fn string() -> FieldDefinitionBuilder {
        Self::builder(types::STRING)
    }

    /// Start building an `int32` field.
    pub fn int32() -> FieldDefinitionBuilder {
        Self::builder(types::INT32)
    }

    /// Start building an `int64` field.
    pub fn int64() -> FieldDefinitionBuilder {
        Self::builder(types::INT64)
    }

    /// Start building a `float64` field.
    pub fn float64() -> FieldDefinitionBuilder {
        Self::builder(types::FLOAT64)
    }

    /// Start building a `decimal` field.
    pub fn decimal() -> FieldDefinitionBuilder {
        Self::builder(types::DECIMAL)
    }

    /// Start building an `object` field with the given nested schema.
    pub fn object(nested: Schema) -> FieldDefinitionBuilder {
        Self::builder(types::OBJECT).nested(nested)
    }

    /// The declared type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// True for the nested-object sentinel type.
    pub fn is_object(&self) -> bool {
        self.type_name == types::OBJECT
    }

    /// The nested schema of an `object` field.
    pub fn nested(&self) -> Option<&Schema> {
        self.nested.as_ref()
    }

    /// The tri-state nullability setting.
    pub fn nullable(&self) -> Option<bool> {
        self.nullable
    }

    /// Unset and `true` both permit an absent or null value.
    pub fn permits_absence(&self) -> bool {
        self.nullable != Some(false)
    }

    pub fn not_blank(&self) -> bool {
        self.not_blank == Some(true)
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn min_value(&self) -> Option<i64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<i64> {
        self.max_value
    }
}

/// Builder for [`FieldDefinition`]. Nothing is checked until [`build`].
///
/// [`build`]: FieldDefinitionBuilder::build
#[derive(Debug, Clone, Default)]
pub struct FieldDefinitionBuilder {
    type_name: String,
    nested: Option<Schema>,
    nullable: Option<bool>,
    not_blank: Option<bool>,
    pattern: Option<String>,
    min_value: Option<i64>,
    max_value: Option<i64>,
}

impl FieldDefinitionBuilder {
    pub fn nested(mut self, nested: Schema) -> Self {
        self.nested = Some(nested);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// `true` also forces `nullable(false)` at build time.
    pub fn not_blank(mut self, not_blank: bool) -> Self {
        self.not_blank = Some(not_blank);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn min_value(mut self, min_value: i64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn max_value(mut self, max_value: i64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    /// Validate the settings and produce an immutable field definition.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for a blank type name, an empty or
    /// uncompilable pattern, an `object` field without a nested schema, or
    /// a nested schema on any other type.
    pub fn build(self) -> Result<FieldDefinition, SchemaError> {
        if self.type_name.trim().is_empty() {
            return Err(SchemaError::BlankType(self.type_name));
        }

        let is_object = self.type_name == types::OBJECT;
        match (&self.nested, is_object) {
            (None, true) => return Err(SchemaError::MissingNested),
            (Some(_), false) => return Err(SchemaError::UnexpectedNested(self.type_name)),
            _ => {}
        }

        let pattern = self.pattern.map(Pattern::compile).transpose()?;

        let nullable = if self.not_blank == Some(true) {
            Some(false)
        } else {
            self.nullable
        };

        Ok(FieldDefinition {
            type_name: self.type_name,
            nested: self.nested,
            nullable,
            not_blank: self.not_blank,
            pattern,
            min_value: self.min_value,
            max_value: self.max_value,
        })
    }
}

/// Serialized form of a field definition, as written in JSON or YAML schema
/// files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_blank: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
}

impl TryFrom<FieldSpec> for FieldDefinition {
    type Error = SchemaError;

    fn try_from(spec: FieldSpec) -> Result<Self, Self::Error> {
        FieldDefinitionBuilder {
            type_name: spec.type_name,
            nested: spec.nested,
            nullable: spec.nullable,
            not_blank: spec.not_blank,
            pattern: spec.pattern,
            min_value: spec.min_value,
            max_value: spec.max_value,
        }
        .build()
    }
}

impl From<FieldDefinition> for FieldSpec {
    fn from(def: FieldDefinition) -> Self {
        Self {
            type_name: def.type_name,
            nested: def.nested,
            nullable: def.nullable,
            not_blank: def.not_blank,
            pattern: def.pattern.map(|p| p.source),
            min_value: def.min_value,
            max_value: def.max_value,
        }
    }
}
