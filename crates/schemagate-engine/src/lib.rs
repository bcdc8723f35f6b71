//! # schemagate-engine — Map-Mode Validation
//!
//! Validates a loosely-typed [`DataMap`](schemagate_core::DataMap) against a
//! [`Schema`](schemagate_core::Schema) of field definitions.
//!
//! - [`validators`]: the [`FieldValidator`] capability and the built-in
//!   string, int32, int64, float64, and decimal validators.
//! - [`registry`]: [`ValidatorRegistry`], type name to validator, plus an
//!   optional write-once process-wide instance.
//! - [`engine`]: [`MapValidator`], the recursive walk over the schema tree.
//!
//! ## Example
//!
//! ```
//! use schemagate_core::{DataMap, FieldDefinition, FieldValue, Schema};
//! use schemagate_engine::{validate_map, ValidatorRegistry};
//!
//! let mut schema = Schema::new();
//! schema.insert(
//!     "age".to_string(),
//!     FieldDefinition::int32().nullable(false).min_value(0).build().unwrap(),
//! );
//!
//! let mut data = DataMap::new();
//! data.insert("age".to_string(), FieldValue::Int32(-1));
//!
//! let registry = ValidatorRegistry::with_defaults();
//! assert!(validate_map(&registry, &schema, &data).is_err());
//! ```

pub mod engine;
pub mod registry;
pub mod validators;

pub use engine::{validate_map, MapValidator};
pub use registry::{global, initialize, ValidatorRegistry};
pub use validators::{
    default_validators, DecimalValidator, FieldValidator, Float64Validator, Int32Validator,
    Int64Validator, StringValidator,
};
