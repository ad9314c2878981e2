//! Integration tests for Settings config loading with layered precedence.
//!
//! These tests only use temp directories and explicit files, so a global
//! config on the host would still be layered underneath; assertions stick
//! to values the local or explicit file sets.

use std::fs;

use tempfile::TempDir;

use tie::config::{local_config_path, OutputFormat, Settings};

#[test]
fn given_local_config_when_loading_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".tie.toml"),
        "default_locale = \"ru\"\noutput_format = \"outline\"\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.default_locale, "ru");
    assert_eq!(settings.output_format, OutputFormat::Outline);
}

#[test]
fn given_explicit_config_file_when_loading_then_values_applied() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "locale = \"pt-BR\"\ncheck_version = false\n").unwrap();

    let settings = Settings::load_file(&path).expect("load settings");

    assert_eq!(settings.locale.as_deref(), Some("pt-BR"));
    assert!(!settings.check_version);
}

#[test]
fn given_invalid_toml_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "default_locale = [").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().starts_with("config error"), "got: {err}");
}

#[test]
fn given_missing_explicit_file_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load_file(&dir.path().join("absent.toml"));

    assert!(result.is_err());
}

#[test]
fn given_settings_when_rendering_toml_then_round_trips() {
    let settings = Settings {
        default_locale: "de".to_string(),
        output_format: OutputFormat::Yaml,
        ..Settings::default()
    };

    let text = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&text).unwrap();

    assert_eq!(parsed, settings);
}
