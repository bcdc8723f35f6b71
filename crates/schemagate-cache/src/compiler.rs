//! # Schema Compilation
//!
//! The cache never interprets a schema language itself. It talks to an
//! external engine through two traits:
//!
//! - [`SchemaCompiler`] turns schema text into a compiled artifact.
//! - [`CompiledSchema`] checks a JSON document and lists the violations.
//!
//! [`JsonSchemaCompiler`] implements both on top of the `jsonschema` crate.
//!
//! ## Reference Resolution
//!
//! Schemas are compiled offline. Any `$ref` that points outside the schema
//! document is refused by [`OfflineRetriever`] and the compilation fails;
//! internal `$ref`s (`#/definitions/...`) are resolved by `jsonschema`
//! natively.

use std::fmt;

use jsonschema::{Draft, Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

/// Schema text could not be compiled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The text is not valid JSON.
    #[error("schema is not valid JSON: {reason}")]
    InvalidJson {
        /// Parser diagnostic.
        reason: String,
    },

    /// The JSON is not a valid schema, or references cannot be resolved.
    #[error("schema could not be compiled: {reason}")]
    InvalidSchema {
        /// Compiler diagnostic.
        reason: String,
    },
}

/// A single violation reported by a compiled schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentViolation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for DocumentViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of document violations, in the order the engine reported
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentViolations {
    violations: Vec<DocumentViolation>,
}

impl DocumentViolations {
    pub fn new(violations: Vec<DocumentViolation>) -> Self {
        Self { violations }
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[DocumentViolation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<DocumentViolation> {
        self.violations
    }
}

impl fmt::Display for DocumentViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled schema, ready to check documents.
pub trait CompiledSchema: Send + Sync {
    /// Check `document`; an empty result means the document is valid.
    fn validate(&self, document: &Value) -> DocumentViolations;
}

/// Compiles schema text into a [`CompiledSchema`].
pub trait SchemaCompiler: Send + Sync {
    type Artifact: CompiledSchema;

    /// # Errors
    ///
    /// Returns a [`CompileError`] if the text is not a valid schema.
    fn compile(&self, schema_text: &str) -> Result<Self::Artifact, CompileError>;
}

/// Refuses every external reference so compilation never touches the
/// network or the filesystem.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external reference {} is not permitted", uri.as_str()).into())
    }
}

/// [`SchemaCompiler`] backed by the `jsonschema` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaCompiler {
    draft: Option<Draft>,
}

impl JsonSchemaCompiler {
    /// A compiler that detects the draft from each schema's `$schema`
    /// keyword, falling back to the `jsonschema` default.
    pub fn new() -> Self {
        Self::default()
    }

    /// A compiler pinned to one draft regardless of `$schema`.
    pub fn with_draft(draft: Draft) -> Self {
        Self { draft: Some(draft) }
    }

    pub fn draft(&self) -> Option<Draft> {
        self.draft
    }
}

impl SchemaCompiler for JsonSchemaCompiler {
    type Artifact = JsonSchema;

    fn compile(&self, schema_text: &str) -> Result<JsonSchema, CompileError> {
        let schema: Value = serde_json::from_str(schema_text).map_err(|e| {
            CompileError::InvalidJson {
                reason: e.to_string(),
            }
        })?;

        let mut opts = jsonschema::options();
        if let Some(draft) = self.draft {
            opts.with_draft(draft);
        }
        opts.with_retriever(OfflineRetriever);

        let validator = opts.build(&schema).map_err(|e| CompileError::InvalidSchema {
            reason: e.to_string(),
        })?;
        Ok(JsonSchema { validator })
    }
}

/// A schema compiled by [`JsonSchemaCompiler`].
pub struct JsonSchema {
    validator: Validator,
}

impl CompiledSchema for JsonSchema {
    fn validate(&self, document: &Value) -> DocumentViolations {
        let violations = self
            .validator
            .iter_errors(document)
            .map(|e| DocumentViolation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();
        DocumentViolations::new(violations)
    }
}

impl fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema").finish_non_exhaustive()
    }
}

/// Parse a draft name as used in configuration files.
///
/// Accepts `4`, `6`, `7`, `2019-09`, and `2020-12`, with or without a
/// `draft` prefix.
pub fn parse_draft(name: &str) -> Option<Draft> {
    let name = name.trim();
    let name = name
        .strip_prefix("draft")
        .map(|rest| rest.trim_start_matches(['-', '_', ' ']))
        .unwrap_or(name);
    match name {
        "4" | "04" => Some(Draft::Draft4),
        "6" | "06" => Some(Draft::Draft6),
        "7" | "07" => Some(Draft::Draft7),
        "2019-09" => Some(Draft::Draft201909),
        "2020-12" => Some(Draft::Draft202012),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PERSON: &str = r#"{
        "type": "object",
        "required": ["name", "age"],
        "properties": {
            "name": { "type": "string", "minLength": 1 },
            "age": { "type": "integer", "minimum": 0 }
        }
    }"#;

    #[test]
    fn test_compile_and_validate() {
        let schema = JsonSchemaCompiler::new().compile(PERSON).unwrap();
        assert!(schema.validate(&json!({"name": "stefan", "age": 30})).is_empty());

        let violations = schema.validate(&json!({"name": "", "age": -1}));
        assert_eq!(violations.len(), 2);
        let paths: Vec<&str> = violations
            .violations()
            .iter()
            .map(|v| v.instance_path.as_str())
            .collect();
        assert!(paths.contains(&"/name"));
        assert!(paths.contains(&"/age"));
    }

    #[test]
    fn test_missing_required_reported_at_root() {
        let schema = JsonSchemaCompiler::new().compile(PERSON).unwrap();
        let violations = schema.validate(&json!({"name": "stefan"}));
        assert_eq!(violations.len(), 1);
        let v = &violations.violations()[0];
        assert!(v.instance_path.is_empty());
        assert!(v.message.contains("age"));
        assert!(v.to_string().contains("(root)"));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = JsonSchemaCompiler::new().compile("{not json").unwrap_err();
        assert!(matches!(err, CompileError::InvalidJson { .. }));
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let err = JsonSchemaCompiler::new()
            .compile(r#"{"type": "no-such-type"}"#)
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidSchema { .. }));
    }

    #[test]
    fn test_external_ref_refused() {
        let err = JsonSchemaCompiler::new()
            .compile(r#"{"$ref": "https://example.com/other.schema.json"}"#)
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidSchema { .. }));
    }

    #[test]
    fn test_internal_ref_resolved() {
        let schema = JsonSchemaCompiler::new()
            .compile(
                r##"{
                    "definitions": { "positive": { "type": "integer", "minimum": 1 } },
                    "type": "object",
                    "properties": { "n": { "$ref": "#/definitions/positive" } }
                }"##,
            )
            .unwrap();
        assert!(schema.validate(&json!({"n": 1})).is_empty());
        assert_eq!(schema.validate(&json!({"n": 0})).len(), 1);
    }

    #[test]
    fn test_parse_draft() {
        assert_eq!(parse_draft("4"), Some(Draft::Draft4));
        assert_eq!(parse_draft("draft-07"), Some(Draft::Draft7));
        assert_eq!(parse_draft("2020-12"), Some(Draft::Draft202012));
        assert_eq!(parse_draft("draft2019-09"), Some(Draft::Draft201909));
        assert_eq!(parse_draft("5"), None);
    }

    #[test]
    fn test_violations_display_joins_lines() {
        let violations = DocumentViolations::new(vec![
            DocumentViolation {
                instance_path: "/a".to_string(),
                schema_path: "/properties/a/type".to_string(),
                message: "1 is not of type \"string\"".to_string(),
            },
            DocumentViolation {
                instance_path: String::new(),
                schema_path: "/required".to_string(),
                message: "\"b\" is a required property".to_string(),
            },
        ]);
        let display = violations.to_string();
        assert_eq!(display.lines().count(), 2);
        assert!(display.starts_with("  /a: "));
    }
}
