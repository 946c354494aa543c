//! Unit tests for the TOML application configuration.

use std::path::PathBuf;
use trailtrek::storage::{AppConfig, ConfigError, Units};

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.units, Units::Metric);
    assert!(config.database_path.is_none());
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = AppConfig {
        database_path: Some(PathBuf::from("/tmp/hikes.db")),
        units: Units::Imperial,
    };
    config.save_to(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "units = [not toml").unwrap();

    assert!(matches!(
        AppConfig::load_from(&path),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_database_path_prefers_override() {
    let config = AppConfig {
        database_path: Some(PathBuf::from("/tmp/custom.db")),
        units: Units::Metric,
    };
    assert_eq!(
        config.database_path().unwrap(),
        PathBuf::from("/tmp/custom.db")
    );
}

#[test]
fn test_unknown_keys_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "units = \"imperial\"\nfuture_knob = 3\n").unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.units, Units::Imperial);
}
