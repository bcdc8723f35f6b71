//! # Field Values — The Loosely-Typed Data Model
//!
//! Data arrives untyped (typically deserialized JSON or YAML). [`FieldValue`]
//! is the closed set of representations the validators understand; they
//! pattern-match on the variant rather than inspecting runtime types.
//!
//! ## Integer Width
//!
//! Integer widths are part of the data, not inferred by the validators. An
//! `Int32(5)` and an `Int64(5)` are different values: an `int64` field
//! rejects the former. When converting from JSON, integers are given the
//! narrowest width that holds them (`i32`, then `i64`); integers beyond
//! `i64` and all non-integral numbers become `Float64`.

use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, ToPrimitive};
use serde_json::{Number, Value};

/// A data document: field name to value.
pub type DataMap = BTreeMap<String, FieldValue>;

/// One value of a data document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Decimal(BigDecimal),
    String(String),
    List(Vec<FieldValue>),
    Map(DataMap),
}

impl FieldValue {
    /// Name of the representation, used in type-mismatch violations.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Float64(_) => "float64",
            Self::Decimal(_) => "decimal",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_map(&self) -> Option<&DataMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Convert to the JSON form consumed by schema-document validation.
    ///
    /// Integral decimals that fit in `i64` become JSON integers; other
    /// decimals become the nearest `f64`, so document-mode `minimum` and
    /// `maximum` see a number. Non-finite floats have no JSON
    /// representation and become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int32(n) => Value::Number(Number::from(*n)),
            Self::Int64(n) => Value::Number(Number::from(*n)),
            Self::Float64(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Decimal(d) => decimal_to_json(d),
            Self::String(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => Value::Object(map_to_json(map)),
        }
    }
}

fn decimal_to_json(d: &BigDecimal) -> Value {
    if *d == d.with_scale(0) {
        if let Some(n) = d.to_i64() {
            return Value::Number(Number::from(n));
        }
    }
    // Beyond f64 range the digits are kept as a string.
    let text = d.to_string();
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or(Value::String(text), Value::Number)
}

/// Convert a whole data document to a JSON object.
pub fn map_to_json(map: &DataMap) -> serde_json::Map<String, Value> {
    map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()
}

/// Convert a JSON object into a data document.
pub fn map_from_json(object: serde_json::Map<String, Value>) -> DataMap {
    object
        .into_iter()
        .map(|(k, v)| (k, FieldValue::from(v)))
        .collect()
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => number_to_field_value(&n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(object) => Self::Map(map_from_json(object)),
        }
    }
}

fn number_to_field_value(n: &Number) -> FieldValue {
    if let Some(i) = n.as_i64() {
        match i32::try_from(i) {
            Ok(narrow) => FieldValue::Int32(narrow),
            Err(_) => FieldValue::Int64(i),
        }
    } else {
        // u64 beyond i64::MAX, or a float.
        FieldValue::Float64(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Int32(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int64(n)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float64(f)
    }
}

impl From<BigDecimal> for FieldValue {
    fn from(d: BigDecimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<DataMap> for FieldValue {
    fn from(map: DataMap) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        Self::List(items)
    }
}
