//! Integration test: the cache in front of the real JSON Schema compiler.

use std::sync::Arc;

use chrono::Duration;
use schemagate_cache::{
    CacheConfig, CacheError, CompileError, CompiledSchema, Draft, JsonSchemaCompiler, ManualClock,
    SchemaCache,
};
use schemagate_core::Fingerprint;
use serde_json::json;

const PERSON: &str = r#"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "required": ["name"],
    "properties": {
        "name": { "type": "string", "minLength": 1 },
        "salary": { "type": "number", "minimum": 0, "maximum": 10000 }
    }
}"#;

fn cache(ttl_secs: u64) -> (SchemaCache<JsonSchemaCompiler>, ManualClock) {
    let clock = ManualClock::default();
    let cache = SchemaCache::with_config(
        JsonSchemaCompiler::new(),
        CacheConfig {
            ttl_secs,
            ..CacheConfig::default()
        },
    )
    .with_clock(clock.clone());
    (cache, clock)
}

#[test]
fn test_cached_schema_validates_documents() {
    let (cache, _clock) = cache(60);
    let schema = cache.get_or_add(PERSON).unwrap();
    assert!(schema.validate(&json!({"name": "stefan", "salary": 2549.5})).is_empty());

    let violations = schema.validate(&json!({"name": "", "salary": 20000}));
    assert_eq!(violations.len(), 2);
}

#[test]
fn test_same_text_shares_compiled_schema() {
    let (cache, _clock) = cache(60);
    let a = cache.get_or_add(PERSON).unwrap();
    let b = cache.get_or_add(PERSON).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_expired_schema_is_gone() {
    let (cache, clock) = cache(1);
    cache.add(PERSON).unwrap();
    clock.advance(Duration::seconds(2));
    assert!(cache.get(&Fingerprint::of(PERSON)).is_none());
}

#[test]
fn test_malformed_schema_is_an_error_not_a_panic() {
    let (cache, _clock) = cache(60);
    assert!(matches!(
        cache.get_or_add("{\"type\": "),
        Err(CacheError::Compile(CompileError::InvalidJson { .. }))
    ));
    assert!(matches!(
        cache.get_or_add(r#"{"minimum": "zero"}"#),
        Err(CacheError::Compile(CompileError::InvalidSchema { .. }))
    ));
    assert!(cache.is_empty());
}

#[test]
fn test_pinned_draft_applies() {
    // `exclusiveMinimum` is a boolean in draft 4 and a number afterwards.
    let schema = r#"{"type": "number", "minimum": 0, "exclusiveMinimum": true}"#;
    let cache = SchemaCache::new(JsonSchemaCompiler::with_draft(Draft::Draft4));
    let compiled = cache.get_or_add(schema).unwrap();
    assert_eq!(compiled.validate(&json!(0)).len(), 1);
    assert!(compiled.validate(&json!(1)).is_empty());
}
