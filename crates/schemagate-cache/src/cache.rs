//! # Compiled-Schema Cache
//!
//! Compiling a schema document is expensive relative to checking a
//! document against it, and the same schema text is usually checked many
//! times. [`SchemaCache`] keeps compiled artifacts keyed by the
//! [`Fingerprint`] of their source text, for a fixed time-to-live.
//!
//! ## Expiry
//!
//! Each entry records `expires_at = insertion time + ttl`. Every [`add`],
//! [`get`], and [`get_or_add`] first sweeps the whole store and drops every
//! entry whose `expires_at` is at or before the clock's current time.
//!
//! ## Locking
//!
//! One mutex guards the store. Sweep, lookup, compilation, and insertion
//! all happen under a single acquisition, so two concurrent
//! `get_or_add` calls with the same text compile it once.
//!
//! [`add`]: SchemaCache::add
//! [`get`]: SchemaCache::get
//! [`get_or_add`]: SchemaCache::get_or_add

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use schemagate_core::Fingerprint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use crate::compiler::{CompileError, SchemaCompiler};

pub const DEFAULT_CAPACITY: usize = 128;
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Cache sizing and expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Initial capacity of the store. A hint, not a limit.
    pub capacity: usize,
    /// Seconds an entry lives after it was added.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Errors from cache operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("schema text must not be blank")]
    BlankSchema,

    #[error(transparent)]
    Compile(#[from] CompileError),
}

struct CacheEntry<A> {
    expires_at: DateTime<Utc>,
    artifact: Arc<A>,
}

/// Time-expiring cache of compiled schemas.
pub struct SchemaCache<C: SchemaCompiler> {
    compiler: C,
    clock: Box<dyn Clock>,
    ttl: Duration,
    entries: Mutex<HashMap<Fingerprint, CacheEntry<C::Artifact>>>,
}

impl<C: SchemaCompiler> SchemaCache<C> {
    /// A cache with the default capacity and TTL, on the system clock.
    pub fn new(compiler: C) -> Self {
        Self::with_config(compiler, CacheConfig::default())
    }

    pub fn with_config(compiler: C, config: CacheConfig) -> Self {
        Self {
            compiler,
            clock: Box::new(SystemClock),
            ttl: config.ttl(),
            entries: Mutex::new(HashMap::with_capacity(config.capacity)),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries currently stored, expired ones included until the
    /// next sweep.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compile `schema_text` and store it, replacing any entry with the
    /// same fingerprint.
    ///
    /// # Errors
    ///
    /// [`CacheError::BlankSchema`] for blank text, [`CacheError::Compile`]
    /// if the compiler rejects it. Nothing is stored on error.
    pub fn add(&self, schema_text: &str) -> Result<Arc<C::Artifact>, CacheError> {
        require_text(schema_text)?;
        let fingerprint = Fingerprint::of(schema_text);
        let mut entries = self.entries.lock();
        let now = self.clock.now();
        sweep(&mut entries, now);
        self.compile_into(&mut entries, fingerprint, schema_text, now)
    }

    /// Look up a live entry.
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Arc<C::Artifact>> {
        let mut entries = self.entries.lock();
        sweep(&mut entries, self.clock.now());
        let hit = entries.get(fingerprint).map(|e| Arc::clone(&e.artifact));
        tracing::debug!(%fingerprint, hit = hit.is_some(), "schema cache lookup");
        hit
    }

    /// Return the live artifact for `schema_text`, compiling and storing it
    /// on a miss.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn get_or_add(&self, schema_text: &str) -> Result<Arc<C::Artifact>, CacheError> {
        require_text(schema_text)?;
        let fingerprint = Fingerprint::of(schema_text);
        let mut entries = self.entries.lock();
        let now = self.clock.now();
        sweep(&mut entries, now);
        if let Some(entry) = entries.get(&fingerprint) {
            tracing::debug!(%fingerprint, "schema cache hit");
            return Ok(Arc::clone(&entry.artifact));
        }
        tracing::debug!(%fingerprint, "schema cache miss");
        self.compile_into(&mut entries, fingerprint, schema_text, now)
    }

    fn compile_into(
        &self,
        entries: &mut HashMap<Fingerprint, CacheEntry<C::Artifact>>,
        fingerprint: Fingerprint,
        schema_text: &str,
        now: DateTime<Utc>,
    ) -> Result<Arc<C::Artifact>, CacheError> {
        let artifact = Arc::new(self.compiler.compile(schema_text)?);
        entries.insert(
            fingerprint,
            CacheEntry {
                expires_at: self.expiry(now),
                artifact: Arc::clone(&artifact),
            },
        );
        tracing::debug!(%fingerprint, size = entries.len(), "schema compiled and cached");
        Ok(artifact)
    }

    fn expiry(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl<C: SchemaCompiler + std::fmt::Debug> std::fmt::Debug for SchemaCache<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaCache")
            .field("compiler", &self.compiler)
            .field("ttl", &self.ttl)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

fn require_text(schema_text: &str) -> Result<(), CacheError> {
    if schema_text.trim().is_empty() {
        return Err(CacheError::BlankSchema);
    }
    Ok(())
}

fn sweep<A>(entries: &mut HashMap<Fingerprint, CacheEntry<A>>, now: DateTime<Utc>) {
    let before = entries.len();
    entries.retain(|_, e| e.expires_at > now);
    let removed = before - entries.len();
    if removed > 0 {
        tracing::debug!(removed, remaining = entries.len(), "expired schemas swept");
    }
}
