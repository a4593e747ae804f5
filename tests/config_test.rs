//! Integration tests for Settings config loading.
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use reacs_onto::application::ApplicationError;
use reacs_onto::config::{local_config_path, Settings};

/// Sets an environment variable for the lifetime of the guard.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        std::env::set_var(key, value);
        Self(key)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        std::env::remove_var(self.0);
    }
}

#[test]
#[serial]
fn given_no_local_config_when_load_then_defaults_resolve_against_project_dir() {
    // Arrange
    let project = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(project.path()).expect("load settings");

    // Assert
    assert_eq!(settings.data_dir, project.path().join("data"));
    assert_eq!(settings.build_dir, project.path().join("build"));
    assert_eq!(
        settings.input_path(),
        project.path().join("data/manual_reacs_mapping.csv")
    );
    assert_eq!(settings.delimiter, ';');
}

#[test]
#[serial]
fn given_local_config_when_load_then_scalars_override_defaults() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        r#"
data_dir = "input"
json_file = "tree.json"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(project.path()).expect("load settings");

    // Assert
    assert_eq!(settings.data_dir, project.path().join("input"));
    assert_eq!(settings.json_path(), project.path().join("build/tree.json"));
    // Unspecified values keep their defaults
    assert_eq!(settings.turtle_file, "reacs-ontology.ttl");
}

#[test]
#[serial]
fn given_absolute_build_dir_when_load_then_kept_as_is() {
    // Arrange
    let project = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        format!("build_dir = {:?}\n", elsewhere.path().display().to_string()),
    )
    .unwrap();

    // Act
    let settings = Settings::load(project.path()).expect("load settings");

    // Assert
    assert_eq!(settings.build_dir, elsewhere.path().to_path_buf());
}

#[test]
#[serial]
fn given_invalid_toml_when_load_then_config_error() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "data_dir = [unclosed").unwrap();

    // Act
    let result = Settings::load(project.path());

    // Assert
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_input_override_when_applied_then_splits_dir_and_file() {
    // Arrange
    let mut settings = Settings::default();

    // Act
    settings.override_input(&PathBuf::from("/tmp/reacs/table.csv"));

    // Assert
    assert_eq!(settings.input_path(), PathBuf::from("/tmp/reacs/table.csv"));
    assert_eq!(settings.input_file, "table.csv");
}

#[test]
fn given_settings_when_serialized_then_round_trips_through_toml() {
    // Arrange
    let settings = Settings::default();

    // Act
    let text = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&text).unwrap();

    // Assert
    assert_eq!(parsed, settings);
}

#[test]
#[serial]
fn given_env_and_local_config_when_load_then_env_wins_over_local_over_default() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "build_dir = \"local-out\"\njson_file = \"tree.json\"\n",
    )
    .unwrap();
    let _build = EnvGuard::set("REACS_BUILD_DIR", "env-out");

    // Act
    let settings = Settings::load(project.path()).expect("load settings");

    // Assert
    assert_eq!(settings.build_dir, project.path().join("env-out"));
    assert_eq!(settings.json_path(), project.path().join("env-out/tree.json"));
    assert_eq!(settings.data_dir, project.path().join("data"));
}

#[test]
#[serial]
fn given_env_delimiter_when_load_then_single_character_is_used() {
    // Arrange
    let project = TempDir::new().unwrap();
    let _delimiter = EnvGuard::set("REACS_DELIMITER", ",");

    // Act
    let settings = Settings::load(project.path()).expect("load settings");

    // Assert
    assert_eq!(settings.delimiter, ',');
}

#[test]
#[serial]
fn given_multi_character_env_delimiter_when_load_then_config_error() {
    // Arrange
    let project = TempDir::new().unwrap();
    let _delimiter = EnvGuard::set("REACS_DELIMITER", ";;");

    // Act
    let result = Settings::load(project.path());

    // Assert
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}
