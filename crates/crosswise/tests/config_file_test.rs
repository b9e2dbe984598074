//! Tests for loading configuration files.

use crosswise::GameConfig;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "input_timeout_secs = 10").unwrap();
    writeln!(file, "header_foreground = \"#00ff00\"").unwrap();

    let config = GameConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.input_timeout(), Some(Duration::from_secs(10)));
    assert_eq!(*config.max_attempts(), 3);
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_attempts = \"three\"").unwrap();

    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_overrides_apply() {
    let mut config = GameConfig::default();
    config.apply_overrides(Some(5), Some(9));
    assert_eq!(config.input_timeout(), Some(Duration::from_secs(5)));
    assert_eq!(*config.max_attempts(), 9);
}
