//! Tests for config functionality.

use crate::config::types::default_scan_globs;
use crate::config::{CONFIG_FILE_NAME, CollisionPolicy, Config};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.collision_policy, CollisionPolicy::Error);
    assert!(!config.fail_on_unresolved);
    assert_eq!(config.output_dir, "out");
    assert_eq!(config.output_extension, "md");
    assert_eq!(config.scan_globs, default_scan_globs());
    assert!(config.events_log.is_none());
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.collision_policy, CollisionPolicy::Error);
    assert_eq!(config.output_dir, "out");
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
collision_policy: warn
output_dir: docs
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.collision_policy, CollisionPolicy::Warn);
    assert_eq!(config.output_dir, "docs");
    assert_eq!(config.output_extension, "md");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
collision_policy: overwrite
fail_on_unresolved: true
output_dir: build/commands
output_extension: txt
scan_globs:
  - "**/*.txt"
events_log: .edict/events.ndjson
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.collision_policy, CollisionPolicy::Overwrite);
    assert!(config.fail_on_unresolved);
    assert_eq!(config.output_dir, "build/commands");
    assert_eq!(config.output_extension, "txt");
    assert_eq!(config.scan_globs, vec!["**/*.txt"]);
    assert_eq!(config.events_log.as_deref(), Some(".edict/events.ndjson"));
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = r#"
collision_policy: warn
future_option: 42
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.collision_policy, CollisionPolicy::Warn);
}

#[test]
fn test_invalid_policy_rejected() {
    let result = Config::from_yaml("collision_policy: explode\n");
    assert!(result.is_err());
}

#[test]
fn test_leading_dot_extension_rejected() {
    let err = Config::from_yaml("output_extension: .md\n").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("leading dot"));
    assert!(msg.contains("Use 'md' instead"));
}

#[test]
fn test_empty_output_dir_rejected() {
    assert!(Config::from_yaml("output_dir: \"\"\n").is_err());
}

#[test]
fn test_invalid_scan_glob_rejected() {
    let err = Config::from_yaml("scan_globs: [\"a[\"]\n").unwrap_err();
    assert!(err.to_string().contains("invalid scan glob"));
}

#[test]
fn test_collision_policy_values() {
    for (text, expected) in [
        ("error", CollisionPolicy::Error),
        ("warn", CollisionPolicy::Warn),
        ("overwrite", CollisionPolicy::Overwrite),
    ] {
        let config = Config::from_yaml(&format!("collision_policy: {}\n", text)).unwrap();
        assert_eq!(config.collision_policy, expected);
    }
}

#[test]
fn test_unknown_collision_policy_rejected() {
    let err = Config::from_yaml("collision_policy: other\n").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_resolve_prefers_explicit_path() {
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("custom.yaml");
    fs::write(&explicit, "output_dir: custom\n").unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "output_dir: local\n").unwrap();

    let config = Config::resolve(Some(&explicit), dir.path()).unwrap();
    assert_eq!(config.output_dir, "custom");
}

#[test]
fn test_resolve_uses_local_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "output_dir: local\n").unwrap();

    let config = Config::resolve(None, dir.path()).unwrap();
    assert_eq!(config.output_dir, "local");
}

#[test]
fn test_resolve_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::resolve(None, dir.path()).unwrap();
    assert_eq!(config.output_dir, "out");
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");
    let err = Config::resolve(Some(&missing), dir.path()).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}
