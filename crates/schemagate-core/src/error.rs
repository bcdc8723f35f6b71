//! # Error Types
//!
//! Defines the error types shared across schemagate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Schema construction errors are raised while a schema is being built,
//!   never while data is being validated.
//! - Configuration errors are raised while a validator registry is built.
//! - Violations describe one mismatch between data and schema and carry the
//!   dotted path of the offending field.

use thiserror::Error;

/// A malformed field definition, detected at schema-build time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The field type name was empty or whitespace.
    #[error("invalid type: {0:?}")]
    BlankType(String),

    /// A pattern was supplied but it is empty.
    #[error("invalid pattern: pattern must not be empty")]
    EmptyPattern,

    /// A pattern was supplied but does not compile as a regular expression.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The pattern source as supplied.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// An `object` field was declared without a nested schema.
    #[error("field of type \"object\" requires a nested schema")]
    MissingNested,

    /// A nested schema was attached to a non-object field.
    #[error("nested schema is only allowed on \"object\" fields, got type {0:?}")]
    UnexpectedNested(String),
}

/// A malformed validator registry configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Two validators claimed the same type name.
    #[error("duplicate validator for type {0:?}")]
    DuplicateValidator(String),

    /// A configured type name matches no built-in validator.
    #[error("unknown validator type {0:?}")]
    UnknownValidator(String),
}

/// A single mismatch between a data document and its schema.
///
/// The map engine reports exactly one violation per call: the first one
/// encountered in schema order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    /// A field declared `nullable: false` is absent or null.
    #[error("data is missing required field {field}")]
    MissingField {
        /// Dotted path of the field.
        field: String,
    },

    /// The value's runtime representation does not match the declared type.
    #[error("value of {field} is {actual}, expected {expected}")]
    TypeMismatch {
        /// Dotted path of the field.
        field: String,
        /// Type name the validator expects.
        expected: String,
        /// Representation actually supplied.
        actual: String,
    },

    /// A `not_blank` string field holds an empty or whitespace-only string.
    #[error("value of {field} must not be blank")]
    Blank {
        /// Dotted path of the field.
        field: String,
    },

    /// A string does not match the field pattern in full.
    #[error("value of {field} does not match pattern {pattern}")]
    PatternMismatch {
        /// Dotted path of the field.
        field: String,
        /// Pattern source.
        pattern: String,
    },

    /// A numeric value is smaller than `min_value`.
    #[error("value of {field} ({value}) is smaller than min value of {min}")]
    BelowMinimum {
        /// Dotted path of the field.
        field: String,
        /// The offending value, rendered.
        value: String,
        /// The inclusive lower bound.
        min: i64,
    },

    /// A numeric value is bigger than `max_value`.
    #[error("value of {field} ({value}) is bigger than max value of {max}")]
    AboveMaximum {
        /// Dotted path of the field.
        field: String,
        /// The offending value, rendered.
        value: String,
        /// The inclusive upper bound.
        max: i64,
    },

    /// A string supplied for a decimal field does not parse as a decimal.
    #[error("value of {field} ({value:?}) is not parsable to decimal")]
    UnparsableDecimal {
        /// Dotted path of the field.
        field: String,
        /// The string as supplied.
        value: String,
    },

    /// The registry holds no validator for the declared type.
    #[error("no validator for type {type_name} (field {field})")]
    NoValidator {
        /// Dotted path of the field.
        field: String,
        /// The declared type name.
        type_name: String,
    },
}

impl Violation {
    /// Dotted path of the field the violation refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field }
            | Self::TypeMismatch { field, .. }
            | Self::Blank { field }
            | Self::PatternMismatch { field, .. }
            | Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. }
            | Self::UnparsableDecimal { field, .. }
            | Self::NoValidator { field, .. } => field,
        }
    }
}
