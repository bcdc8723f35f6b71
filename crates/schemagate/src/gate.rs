//! # Validation Entry Point
//!
//! [`Gate`] owns a [`ValidatorRegistry`] and a [`SchemaCache`] and routes
//! each request by the kind of schema it carries:
//!
//! - [`SchemaInput::Map`] runs the recursive field-definition engine and
//!   stops at the first [`Violation`].
//! - [`SchemaInput::Document`] compiles (or reuses) the schema text through
//!   the cache and reports every [`DocumentViolation`](schemagate_cache::DocumentViolation).
//!
//! Data problems are a [`Verdict::Invalid`]. Problems with the request
//! itself (blank or uncompilable schema text) are a [`GateError`].

use std::borrow::Cow;
use std::fmt;

use schemagate_cache::{
    parse_draft, CacheError, CompiledSchema, DocumentViolations, JsonSchemaCompiler, SchemaCache,
    SchemaCompiler,
};
use schemagate_core::{map_to_json, ConfigError, DataMap, Schema, Violation};
use schemagate_engine::{registry, MapValidator, ValidatorRegistry};
use serde_json::Value;
use thiserror::Error;

use crate::config::GateConfig;

/// The schema half of a validation request.
#[derive(Debug, Clone, Copy)]
pub enum SchemaInput<'a> {
    /// A field-definition tree.
    Map(&'a Schema),
    /// Schema text in the external schema language.
    Document(&'a str),
}

/// Why data was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// The first field-level violation in map mode.
    Field(Violation),
    /// Every violation reported in document mode.
    Document(DocumentViolations),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Field(violation) => write!(f, "  {}: {violation}", violation.field()),
            Rejection::Document(violations) => write!(f, "{violations}"),
        }
    }
}

/// Outcome of a validation request that could be carried out.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Valid,
    Invalid(Rejection),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(rejection) => Some(rejection),
        }
    }
}

/// A validation request that could not be carried out, or a gate that
/// could not be built.
#[derive(Error, Debug)]
pub enum GateError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Registry(#[from] ConfigError),

    #[error("unknown JSON Schema draft {0:?}")]
    UnknownDraft(String),

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Validation entry point.
pub struct Gate<C: SchemaCompiler = JsonSchemaCompiler> {
    registry: Cow<'static, ValidatorRegistry>,
    cache: SchemaCache<C>,
}

impl Gate {
    /// A gate with the built-in validators and a default cache.
    pub fn new() -> Self {
        Self::with_parts(
            ValidatorRegistry::with_defaults(),
            SchemaCache::new(JsonSchemaCompiler::new()),
        )
    }

    /// Build a gate from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::UnknownDraft`] for an unrecognised draft name
    /// and [`GateError::Registry`] for an unknown or repeated validator
    /// type name.
    pub fn from_config(config: &GateConfig) -> Result<Self, GateError> {
        let compiler = match config.draft.as_deref() {
            None => JsonSchemaCompiler::new(),
            Some(name) => parse_draft(name)
                .map(JsonSchemaCompiler::with_draft)
                .ok_or_else(|| GateError::UnknownDraft(name.to_string()))?,
        };
        let registry = ValidatorRegistry::from_type_names(config.validators.as_slice())?;
        tracing::debug!(
            types = ?registry.type_names(),
            ttl_secs = config.cache.ttl_secs,
            draft = ?compiler.draft(),
            "gate configured"
        );
        Ok(Self::with_parts(
            registry,
            SchemaCache::with_config(compiler, config.cache),
        ))
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SchemaCompiler> Gate<C> {
    pub fn with_parts(registry: ValidatorRegistry, cache: SchemaCache<C>) -> Self {
        Self {
            registry: Cow::Owned(registry),
            cache,
        }
    }

    /// A gate that uses the process-wide registry, initializing it with
    /// the defaults if nothing has installed one yet.
    pub fn with_global_registry(cache: SchemaCache<C>) -> Self {
        Self {
            registry: Cow::Borrowed(registry::global()),
            cache,
        }
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &SchemaCache<C> {
        &self.cache
    }

    /// Validate `data` against `schema`.
    ///
    /// # Errors
    ///
    /// Document mode only: [`GateError::Cache`] if the schema text is blank
    /// or does not compile. Map-mode problems, including a type with no
    /// registered validator, are reported in the verdict.
    pub fn check(&self, schema: SchemaInput<'_>, data: &DataMap) -> Result<Verdict, GateError> {
        match schema {
            SchemaInput::Map(schema) => {
                let verdict = match MapValidator::new(&self.registry).validate(schema, data) {
                    Ok(()) => Verdict::Valid,
                    Err(violation) => Verdict::Invalid(Rejection::Field(violation)),
                };
                Ok(verdict)
            }
            SchemaInput::Document(text) => {
                let compiled = self.cache.get_or_add(text)?;
                let document = Value::Object(map_to_json(data));
                let violations = compiled.validate(&document);
                tracing::debug!(violations = violations.len(), "document checked");
                if violations.is_empty() {
                    Ok(Verdict::Valid)
                } else {
                    Ok(Verdict::Invalid(Rejection::Document(violations)))
                }
            }
        }
    }

    /// Like [`check`](Self::check), collapsed to pass/fail. Errors count as
    /// failure and are logged.
    pub fn is_valid(&self, schema: SchemaInput<'_>, data: &DataMap) -> bool {
        match self.check(schema, data) {
            Ok(Verdict::Valid) => true,
            Ok(Verdict::Invalid(rejection)) => {
                tracing::debug!(%rejection, "data rejected");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "validation could not be performed");
                false
            }
        }
    }
}

impl<C: SchemaCompiler + fmt::Debug> fmt::Debug for Gate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("registry", &*self.registry)
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemagate_core::{FieldDefinition, FieldValue};

    fn age_schema() -> Schema {
        let mut schema = Schema::new();
        schema.insert(
            "age".to_string(),
            FieldDefinition::int32().nullable(false).min_value(0).build().unwrap(),
        );
        schema
    }

    fn age(value: i32) -> DataMap {
        let mut data = DataMap::new();
        data.insert("age".to_string(), FieldValue::Int32(value));
        data
    }

    const AGE_DOCUMENT: &str =
        r#"{"type": "object", "required": ["age"], "properties": {"age": {"type": "integer", "minimum": 0}}}"#;

    #[test]
    fn test_map_mode_verdicts() {
        let gate = Gate::new();
        let schema = age_schema();
        assert_eq!(gate.check(SchemaInput::Map(&schema), &age(1)).unwrap(), Verdict::Valid);

        let verdict = gate.check(SchemaInput::Map(&schema), &age(-1)).unwrap();
        assert!(matches!(
            verdict.rejection(),
            Some(Rejection::Field(Violation::BelowMinimum { .. }))
        ));
    }

    #[test]
    fn test_document_mode_verdicts() {
        let gate = Gate::new();
        assert!(gate.is_valid(SchemaInput::Document(AGE_DOCUMENT), &age(1)));

        let verdict = gate.check(SchemaInput::Document(AGE_DOCUMENT), &age(-1)).unwrap();
        match verdict {
            Verdict::Invalid(Rejection::Document(violations)) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations.violations()[0].instance_path, "/age");
            }
            other => panic!("expected document rejection, got {other:?}"),
        }
        assert_eq!(gate.cache().len(), 1);
    }

    #[test]
    fn test_blank_document_is_an_error() {
        let gate = Gate::new();
        let err = gate.check(SchemaInput::Document("  "), &age(1)).unwrap_err();
        assert!(matches!(err, GateError::Cache(CacheError::BlankSchema)));
        assert!(!gate.is_valid(SchemaInput::Document("  "), &age(1)));
    }

    #[test]
    fn test_uncompilable_document_is_not_valid() {
        let gate = Gate::new();
        assert!(!gate.is_valid(SchemaInput::Document("{"), &age(1)));
    }

    #[test]
    fn test_from_config_applies_draft_and_validators() {
        let config = GateConfig {
            draft: Some("7".to_string()),
            validators: vec!["string".to_string()],
            ..GateConfig::default()
        };
        let gate = Gate::from_config(&config).unwrap();
        assert_eq!(gate.registry().type_names(), ["string"]);
        assert!(gate.cache().compiler().draft().is_some());
    }

    #[test]
    fn test_from_config_rejects_unknown_draft() {
        let config = GateConfig {
            draft: Some("5".to_string()),
            ..GateConfig::default()
        };
        assert!(matches!(
            Gate::from_config(&config),
            Err(GateError::UnknownDraft(d)) if d == "5"
        ));
    }

    #[test]
    fn test_from_config_rejects_unknown_validator() {
        let config = GateConfig {
            validators: vec!["uuid".to_string()],
            ..GateConfig::default()
        };
        assert!(matches!(
            Gate::from_config(&config),
            Err(GateError::Registry(ConfigError::UnknownValidator(_)))
        ));
    }

    #[test]
    fn test_rejection_display_names_field() {
        let rejection = Rejection::Field(Violation::Blank {
            field: "name".to_string(),
        });
        assert!(rejection.to_string().starts_with("  name: "));
    }
}
