//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (`data/manual_reacs_mapping.csv` → `build/`)
//! 2. Global config: `$XDG_CONFIG_HOME/reacs-onto/reacs-onto.toml`
//! 3. Local config: `<project_dir>/reacs-onto.toml`
//! 4. Environment variables: `REACS_*` prefix
//!
//! Command-line overrides are applied by the CLI on top of the loaded settings.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

pub const APP_NAME: &str = "reacs-onto";
pub const LOCAL_CONFIG_FILE: &str = "reacs-onto.toml";

/// Unified configuration for a conversion run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the input table (relative to the project dir)
    pub data_dir: PathBuf,
    /// Directory receiving the artifacts (relative to the project dir)
    pub build_dir: PathBuf,
    /// Input table file name
    pub input_file: String,
    /// JSON tree file name
    pub json_file: String,
    /// Turtle ontology file name
    pub turtle_file: String,
    /// Column delimiter of the input table
    pub delimiter: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            build_dir: PathBuf::from("build"),
            input_file: "manual_reacs_mapping.csv".into(),
            json_file: "reacs_mappped.json".into(),
            turtle_file: "reacs-ontology.ttl".into(),
            delimiter: ';',
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub input_file: Option<String>,
    pub json_file: Option<String>,
    pub turtle_file: Option<String>,
    pub delimiter: Option<char>,
}

/// Get the XDG config directory for reacs-onto.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(format!("{APP_NAME}.toml")))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(LOCAL_CONFIG_FILE)
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

impl Settings {
    /// Path of the input table.
    pub fn input_path(&self) -> PathBuf {
        self.data_dir.join(&self.input_file)
    }

    /// Path of the JSON tree artifact.
    pub fn json_path(&self) -> PathBuf {
        self.build_dir.join(&self.json_file)
    }

    /// Path of the Turtle ontology artifact.
    pub fn turtle_path(&self) -> PathBuf {
        self.build_dir.join(&self.turtle_file)
    }

    /// Read the table from an explicit file instead of `data_dir/input_file`.
    pub fn override_input(&mut self, path: &Path) {
        self.data_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if let Some(name) = path.file_name() {
            self.input_file = name.to_string_lossy().into_owned();
        }
    }

    /// Delimiter as a single byte for the CSV reader.
    pub fn delimiter_byte(&self) -> Result<u8, ApplicationError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| ApplicationError::Config {
                message: format!("delimiter must be a single ASCII character, got {:?}", self.delimiter),
            })
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay.data_dir.clone().unwrap_or_else(|| self.data_dir.clone()),
            build_dir: overlay
                .build_dir
                .clone()
                .unwrap_or_else(|| self.build_dir.clone()),
            input_file: overlay
                .input_file
                .clone()
                .unwrap_or_else(|| self.input_file.clone()),
            json_file: overlay
                .json_file
                .clone()
                .unwrap_or_else(|| self.json_file.clone()),
            turtle_file: overlay
                .turtle_file
                .clone()
                .unwrap_or_else(|| self.turtle_file.clone()),
            delimiter: overlay.delimiter.unwrap_or(self.delimiter),
        }
    }

    /// Expand `~` and `$VAR`, then anchor relative dirs at the project dir.
    fn resolve_paths(&mut self, project_dir: &Path) {
        self.data_dir = resolve_path(project_dir, &self.data_dir);
        self.build_dir = resolve_path(project_dir, &self.build_dir);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Directory holding `reacs-onto.toml`; relative data and
    ///   build dirs are resolved against it
    pub fn load(project_dir: &Path) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        let local_path = local_config_path(project_dir);
        if local_path.exists() {
            let raw = load_raw_settings(&local_path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.resolve_paths(project_dir);

        Ok(current)
    }

    /// Apply REACS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("REACS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("build_dir") {
            settings.build_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("input_file") {
            settings.input_file = val;
        }
        if let Ok(val) = config.get_string("json_file") {
            settings.json_file = val;
        }
        if let Ok(val) = config.get_string("turtle_file") {
            settings.turtle_file = val;
        }
        if let Ok(val) = config.get_string("delimiter") {
            let mut chars = val.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => settings.delimiter = c,
                _ => {
                    return Err(ApplicationError::Config {
                        message: format!("REACS_DELIMITER must be one character, got {val:?}"),
                    })
                }
            }
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# reacs-onto configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/reacs-onto/reacs-onto.toml
#   Local:  <project_dir>/reacs-onto.toml
#   Env:    REACS_* environment variables (e.g. REACS_BUILD_DIR)

# Directory holding the input table (relative paths resolve against the project dir)
# data_dir = "data"

# Directory receiving the JSON tree and the Turtle ontology
# build_dir = "build"

# Input table file name
# input_file = "manual_reacs_mapping.csv"

# Output file names
# json_file = "reacs_mappped.json"
# turtle_file = "reacs-ontology.ttl"

# Column delimiter of the input table
# delimiter = ";"
"#
        .to_string()
    }
}

/// Expand `~` and `$VAR` in a path and anchor it at the project dir unless absolute.
pub fn resolve_path(project_dir: &Path, path: &Path) -> PathBuf {
    let expanded = shellexpand::full(&path.to_string_lossy())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf());
    if expanded.is_absolute() {
        expanded
    } else {
        project_dir.join(expanded)
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
