//! Reading schema and data files.
//!
//! Files ending in `.yaml` or `.yml` are parsed as YAML and converted to
//! JSON values; everything else is parsed as JSON.

use std::path::Path;

use anyhow::{bail, Context, Result};
use schemagate::{map_from_json, DataMap, Schema};
use serde_json::Value;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Read a JSON or YAML file into a JSON value.
pub fn read_value(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if is_yaml(path) {
        let yaml: serde_yaml::Value = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse YAML {}", path.display()))?;
        yaml_to_json_value(&yaml).with_context(|| format!("failed to convert {}", path.display()))
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse JSON {}", path.display()))
    }
}

/// Read a data file. The top level must be a mapping.
pub fn read_data(path: &Path) -> Result<DataMap> {
    match read_value(path)? {
        Value::Object(object) => Ok(map_from_json(object)),
        other => bail!(
            "data file {} must contain a mapping at the top level, found {}",
            path.display(),
            json_kind(&other)
        ),
    }
}

/// Read a map-mode schema: a mapping of field name to field definition.
pub fn read_map_schema(path: &Path) -> Result<Schema> {
    let value = read_value(path)?;
    serde_json::from_value(value)
        .with_context(|| format!("invalid field-definition schema {}", path.display()))
}

/// Read a schema document as text, unparsed.
pub fn read_schema_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped. Mapping keys must be strings, numbers, or booleans.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value> {
    Ok(match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else if let Some(f) = n.as_f64() {
                match serde_json::Number::from_f64(f) {
                    Some(number) => Value::Number(number),
                    None => bail!("cannot represent {f} in JSON"),
                }
            } else {
                bail!("unsupported YAML number: {n:?}")
            }
        }
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Value::Array(
            seq.iter()
                .map(yaml_to_json_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => bail!("unsupported YAML mapping key: {other:?}"),
                };
                object.insert(key, yaml_to_json_value(v)?);
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value)?,
    })
}
