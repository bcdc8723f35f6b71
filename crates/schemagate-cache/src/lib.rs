//! # schemagate-cache — Schema-Document Mode
//!
//! Validates JSON documents against schemas written in an external schema
//! language (JSON Schema), keeping the compiled form of each schema text in
//! a time-expiring cache.
//!
//! - [`compiler`]: the [`SchemaCompiler`] / [`CompiledSchema`] seam and the
//!   `jsonschema`-backed [`JsonSchemaCompiler`].
//! - [`cache`]: [`SchemaCache`], keyed by [`Fingerprint`](schemagate_core::Fingerprint).
//! - [`clock`]: the [`Clock`] used for expiry.

pub mod cache;
pub mod clock;
pub mod compiler;

pub use cache::{CacheConfig, CacheError, SchemaCache, DEFAULT_CAPACITY, DEFAULT_TTL_SECS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use compiler::{
    parse_draft, CompileError, CompiledSchema, DocumentViolation, DocumentViolations, JsonSchema,
    JsonSchemaCompiler, SchemaCompiler,
};
pub use jsonschema::Draft;
