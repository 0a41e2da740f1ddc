//! Tests for loading and saving configuration files

use pixelpong_settings::{Config, SettingsError};
use tempfile::tempdir;

#[test]
fn test_toml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.connection.base_url = "http://grid.local:9000/api".to_string();
    config.polling.interval_ms = 200;
    config.render.grid_overlay = false;
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = Config::default();
    config.polling.sample_size = 500;
    config.save_to_file(&path).unwrap();

    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_unknown_extension_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let err = Config::default().save_to_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::UnsupportedFormat(ext) if ext == "yaml"));
}

#[test]
fn test_invalid_file_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[render]\nbudget = 0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert_eq!(err.to_string(), "Invalid setting 'render.budget': must be > 0");
}

#[test]
fn test_malformed_file_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::JsonError(_))
    ));
}
