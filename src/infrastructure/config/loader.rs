//! Configuration file loading.

use super::app_config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory could be determined.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// The file exists but could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration TOML.
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Reads `AppConfig` from a TOML file.
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader for the platform default config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path = AppConfig::default_config_path().ok_or(ConfigError::ConfigDirNotFound)?;
        Ok(Self { config_path })
    }

    /// Creates a loader for a specific file.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Returns the configuration file path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns true if the configuration file exists.
    #[must_use]
    pub fn file_exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Loads the application configuration.
    ///
    /// A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.file_exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)?;
        Ok(toml::from_str::<AppConfig>(&content)?)
    }
}
