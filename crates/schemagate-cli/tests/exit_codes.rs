//! # CLI Exit Code Tests
//!
//! Runs the `schemagate` binary and checks the exit-code contract:
//! 0 valid, 1 invalid, 2 operational error.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn schemagate(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schemagate"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn check_valid_data_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "s.json", r#"{"name": {"type": "string", "notBlank": true}}"#);
    let data = write(dir.path(), "d.yaml", "name: stefan\n");
    let out = schemagate(&["check", "--schema", path_str(&schema), "--data", path_str(&data)]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("OK: "));
}

#[test]
fn check_invalid_data_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "s.json", r#"{"name": {"type": "string", "notBlank": true}}"#);
    let data = write(dir.path(), "d.json", r#"{"name": "  "}"#);
    let out = schemagate(&["check", "--schema", path_str(&schema), "--data", path_str(&data)]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("FAIL: "));
    assert!(stdout.contains("must not be blank"));
}

#[test]
fn check_missing_data_file_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "s.schema.json", r#"{"type": "object"}"#);
    let missing = dir.path().join("absent.json");
    let out = schemagate(&["check", "--schema", path_str(&schema), "--data", path_str(&missing)]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn bad_config_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "gate.yaml", "draft: 5\n");
    let schema = write(dir.path(), "s.schema.json", r#"{"type": "object"}"#);
    let data = write(dir.path(), "d.json", "{}");
    let out = schemagate(&[
        "--config",
        path_str(&config),
        "check",
        "--schema",
        path_str(&schema),
        "--data",
        path_str(&data),
    ]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn fingerprint_prints_sha256() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "s.schema.json", "{}");
    let out = schemagate(&["fingerprint", path_str(&schema)]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "sha256:44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
    );
}

#[test]
fn types_lists_configured_registry() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "gate.yaml", "validators: [int64, string]\n");
    let out = schemagate(&["types", "--config", path_str(&config)]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), ["int64", "string"]);
}
