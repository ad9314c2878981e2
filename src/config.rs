//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tie/tie.toml`
//! 3. Local config: `<document_dir>/.tie.toml` (or an explicit `--config` file)
//! 4. Environment variables: `TIE_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, TieOptions, FALLBACK_LOCALE};

/// How `tie tree` prints a rendered tree.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    /// Indented outline of keys and texts
    Outline,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_locale: Option<String>,
    pub locale: Option<String>,
    pub check_version: Option<bool>,
    pub output_format: Option<OutputFormat>,
}

/// Unified configuration for tie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default locale when the document does not declare one (default: "en")
    pub default_locale: String,
    /// Initial current locale (default: the default locale)
    pub locale: Option<String>,
    /// Reject documents requiring a newer library version
    pub check_version: bool,
    /// Output format for rendered trees
    pub output_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_locale: FALLBACK_LOCALE.to_string(),
            locale: None,
            check_version: true,
            output_format: OutputFormat::default(),
        }
    }
}

/// Get the XDG config directory for tie.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tie").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tie.toml"))
}

/// Get the path to the local config file next to a translation document.
pub fn local_config_path(document_dir: &Path) -> PathBuf {
    document_dir.join(".tie.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_locale: overlay
                .default_locale
                .clone()
                .unwrap_or_else(|| self.default_locale.clone()),
            locale: overlay.locale.clone().or_else(|| self.locale.clone()),
            check_version: overlay.check_version.unwrap_or(self.check_version),
            output_format: overlay.output_format.unwrap_or(self.output_format),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `document_dir` - Optional directory of the translation file for local config
    pub fn load(document_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Local config next to the document
        if let Some(dir) = document_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Load defaults, then an explicit config file, then environment variables.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        let current = Self::default().merge_with(&load_raw_settings(path)?);
        Self::apply_env_overrides(current)
    }

    /// Apply TIE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TIE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_locale") {
            settings.default_locale = val;
        }
        if let Ok(val) = config.get_string("locale") {
            settings.locale = Some(val);
        }
        if let Ok(val) = config.get_bool("check_version") {
            settings.check_version = val;
        }
        if let Ok(val) = config.get_string("output_format") {
            settings.output_format =
                OutputFormat::parse(&val).ok_or_else(|| ApplicationError::Config {
                    message: format!("unknown output format '{val}'"),
                })?;
        }

        Ok(settings)
    }

    /// Construction options for a `Tie`, with explicit caller choices on top.
    pub fn tie_options(&self, default_locale: Option<&str>, locale: Option<&str>) -> TieOptions {
        TieOptions {
            default_locale: default_locale.map(str::to_string),
            fallback_locale: self.default_locale.clone(),
            locale: locale.map(str::to_string).or_else(|| self.locale.clone()),
            check_version: self.check_version,
        }
    }

    /// Render settings as TOML (for `tie config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}
