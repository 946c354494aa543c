//! Application configuration loaded from TOML.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unit system preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Metric units (km/h, m, kcal)
    #[default]
    Metric,
    /// Imperial units (mph, ft, kcal)
    Imperial,
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Units::Metric => write!(f, "Metric"),
            Units::Imperial => write!(f, "Imperial"),
        }
    }
}

/// Application settings, stored as TOML in the platform config directory.
///
/// Unknown and missing keys fall back to defaults, so the file can be
/// hand-edited or absent entirely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Override for the SQLite database location
    pub database_path: Option<PathBuf>,
    /// Unit preference for display
    pub units: Units,
}

impl AppConfig {
    /// Load the configuration from the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_config_path()?)
    }

    /// Load the configuration from an explicit path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Write the configuration to an explicit path, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let text =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, text).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// The database location: the configured override, or the platform
    /// data directory default.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        Ok(project_dirs()?.data_dir().join("trailtrek.db"))
    }

    /// Default location of the config file.
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("com", "trailtrek", "trailtrek").ok_or(ConfigError::NoHomeDirectory)
}

/// Errors loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home directory to resolve platform paths against
    #[error("no home directory available for config paths")]
    NoHomeDirectory,

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(String),

    /// The TOML file did not parse
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// The configuration did not serialize
    #[error("failed to serialize config: {0}")]
    Serialize(String),
}
