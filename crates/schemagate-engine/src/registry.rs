//! # Validator Registry
//!
//! Maps a declared type identifier to the [`FieldValidator`] that checks it.
//!
//! A [`ValidatorRegistry`] is an ordinary value: build it once at startup
//! and pass it by reference to the engine. Different parts of a process may
//! hold differently-configured registries.
//!
//! For hosts that want a single process-wide registry, [`initialize`] and
//! [`global`] provide one. It is written at most once; the first successful
//! initialization wins and later calls return the installed registry
//! unchanged. Concurrent first initializations are serialized by
//! `OnceCell`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use schemagate_core::ConfigError;

use crate::validators::{default_validators, FieldValidator};

/// Immutable mapping from type identifier to validator.
#[derive(Clone)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Arc<dyn FieldValidator>>,
}

impl ValidatorRegistry {
    /// Build a registry from the given validators.
    ///
    /// An empty list installs the built-in defaults; a non-empty list
    /// replaces them entirely.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateValidator`] if two validators declare
    /// the same supported type.
    pub fn new(validators: Vec<Arc<dyn FieldValidator>>) -> Result<Self, ConfigError> {
        let validators = if validators.is_empty() {
            tracing::debug!("using default validators");
            default_validators()
        } else {
            tracing::debug!(count = validators.len(), "using provided validators");
            validators
        };

        let mut map = HashMap::with_capacity(validators.len());
        for validator in validators {
            let type_name = validator.supported_type().to_string();
            if map.contains_key(&type_name) {
                return Err(ConfigError::DuplicateValidator(type_name));
            }
            map.insert(type_name, validator);
        }
        Ok(Self { validators: map })
    }

    /// A registry holding the built-in validators.
    pub fn with_defaults() -> Self {
        let validators = default_validators()
            .into_iter()
            .map(|v| (v.supported_type().to_string(), v))
            .collect();
        Self { validators }
    }

    /// Build a registry from a subset of the built-in validators, selected
    /// by type name. An empty selection installs all defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownValidator`] for a name with no built-in
    /// validator and [`ConfigError::DuplicateValidator`] for a repeated name.
    pub fn from_type_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        let builtins = default_validators();
        let selected = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                builtins
                    .iter()
                    .find(|v| v.supported_type() == name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownValidator(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(selected)
    }

    /// Find the validator registered for `type_name`.
    pub fn lookup(&self, type_name: &str) -> Option<&dyn FieldValidator> {
        self.validators.get(type_name).map(|v| v.as_ref())
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

static GLOBAL: OnceCell<ValidatorRegistry> = OnceCell::new();

/// Install the process-wide registry.
///
/// The first call that succeeds wins. Every later call, whatever its
/// arguments, returns the registry installed by that first call. A failing
/// call installs nothing, so a later call may still succeed.
///
/// # Errors
///
/// Returns [`ConfigError::DuplicateValidator`] when this call is the one
/// performing initialization and its validator list is invalid.
pub fn initialize(
    validators: Vec<Arc<dyn FieldValidator>>,
) -> Result<&'static ValidatorRegistry, ConfigError> {
    GLOBAL.get_or_try_init(|| {
        tracing::debug!("init map validators");
        ValidatorRegistry::new(validators)
    })
}

/// The process-wide registry, initialized with the defaults if
/// [`initialize`] has not been called.
pub fn global() -> &'static ValidatorRegistry {
    GLOBAL.get_or_init(|| {
        tracing::debug!("init map validators with defaults");
        ValidatorRegistry::with_defaults()
    })
}
