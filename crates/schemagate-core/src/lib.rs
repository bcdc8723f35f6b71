//! # schemagate-core — Foundational Types
//!
//! Defines the types every other schemagate crate depends on:
//!
//! - [`FieldDefinition`] and [`Schema`]: the declarative constraint tree.
//!   Built once through a validating builder, immutable afterwards.
//! - [`FieldValue`] and [`DataMap`]: the loosely-typed data being checked,
//!   as a closed sum type over the accepted representations.
//! - [`Violation`], [`SchemaError`], [`ConfigError`]: the error taxonomy.
//! - [`Fingerprint`]: SHA-256 of a schema text, the compiled-schema cache key.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `schemagate-*` crates.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod fingerprint;
pub mod value;

pub use error::{ConfigError, SchemaError, Violation};
pub use field::{types, FieldDefinition, FieldDefinitionBuilder, FieldSpec, Pattern, Schema};
pub use fingerprint::Fingerprint;
pub use value::{map_from_json, map_to_json, DataMap, FieldValue};
