//! # schemagate — Runtime Validation of Loosely-Typed Data
//!
//! Checks nested key-value data against a declarative schema and reports
//! pass/fail with the specific violation. Two schema kinds are supported
//! behind one entry point, [`Gate`]:
//!
//! - **Map mode**: a tree of [`FieldDefinition`]s, checked by the recursive
//!   engine in `schemagate-engine` with a pluggable [`ValidatorRegistry`].
//! - **Document mode**: JSON Schema text, compiled once and kept in a
//!   time-expiring [`SchemaCache`] keyed by its [`Fingerprint`].
//!
//! ## Example
//!
//! ```
//! use schemagate::{DataMap, FieldDefinition, FieldValue, Gate, Schema, SchemaInput};
//!
//! let mut schema = Schema::new();
//! schema.insert(
//!     "name".to_string(),
//!     FieldDefinition::string().not_blank(true).build().unwrap(),
//! );
//!
//! let mut data = DataMap::new();
//! data.insert("name".to_string(), FieldValue::from(""));
//!
//! let gate = Gate::new();
//! assert!(!gate.is_valid(SchemaInput::Map(&schema), &data));
//! assert!(gate.is_valid(
//!     SchemaInput::Document(r#"{"type": "object"}"#),
//!     &data,
//! ));
//! ```

pub mod config;
pub mod gate;

pub use config::GateConfig;
pub use gate::{Gate, GateError, Rejection, SchemaInput, Verdict};

pub use schemagate_cache::{
    CacheConfig, CacheError, Clock, CompileError, CompiledSchema, DocumentViolation,
    DocumentViolations, JsonSchemaCompiler, ManualClock, SchemaCache, SchemaCompiler, SystemClock,
};
pub use schemagate_core::{
    map_from_json, map_to_json, types, ConfigError, DataMap, FieldDefinition,
    FieldDefinitionBuilder, FieldValue, Fingerprint, Schema, SchemaError, Violation,
};
pub use schemagate_engine::{
    default_validators, validate_map, FieldValidator, MapValidator, ValidatorRegistry,
};
