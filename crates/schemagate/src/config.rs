//! # Gate Configuration
//!
//! Every field has a default, so an empty document is a valid
//! configuration:
//!
//! ```yaml
//! cache:
//!   capacity: 128
//!   ttl_secs: 3600
//! draft: 7            # 4, 6, 7, 2019-09, 2020-12; omit to auto-detect
//! validators:         # omit or leave empty for all built-in types
//!   - string
//!   - int32
//! ```

use schemagate_cache::CacheConfig;
use serde::{Deserialize, Deserializer, Serialize};

use crate::gate::GateError;

/// Configuration for [`Gate::from_config`](crate::Gate::from_config).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    pub cache: CacheConfig,

    /// JSON Schema draft to pin for document mode.
    #[serde(
        deserialize_with = "deserialize_draft",
        skip_serializing_if = "Option::is_none"
    )]
    pub draft: Option<String>,

    /// Built-in validator type names to enable.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<String>,
}

impl GateConfig {
    /// Parse a YAML (or JSON) configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidConfig`] if the document does not match
    /// the configuration shape.
    pub fn from_yaml_str(text: &str) -> Result<Self, GateError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| GateError::InvalidConfig {
            reason: e.to_string(),
        })
    }
}

/// Draft names are often written unquoted (`draft: 7`), which YAML reads
/// as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum DraftRepr {
    Number(u64),
    Text(String),
}

fn deserialize_draft<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<DraftRepr>::deserialize(deserializer)?.map(|repr| match repr {
            DraftRepr::Number(n) => n.to_string(),
            DraftRepr::Text(s) => s,
        }),
    )
}
