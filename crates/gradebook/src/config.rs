//! Configuration management for gradebook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults. With no
//! file and no environment overrides the data file is `DAlumnos.json` in the
//! working directory and the course list is [`DEFAULT_COURSES`].
//!
//! [`DEFAULT_COURSES`]: crate::catalog::DEFAULT_COURSES

use std::collections::HashSet;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::catalog::CourseCatalog;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "gradebook";

/// Default data file, relative to the working directory.
pub const DATA_FILE_NAME: &str = "DAlumnos.json";

/// Prefix of environment variable overrides.
const ENV_PREFIX: &str = "GRADEBOOK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `GRADEBOOK_`, `__` between sections)
/// 2. TOML config file at `<config dir>/gradebook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Course configuration.
    pub courses: CoursesConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the JSON data file.
    pub data_file: PathBuf,
    /// Save through a temporary file renamed into place.
    pub atomic_writes: bool,
}

/// Course-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoursesConfig {
    /// Recognized courses, in grid column order.
    pub names: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DATA_FILE_NAME),
            atomic_writes: true,
        }
    }
}

impl Default for CoursesConfig {
    fn default() -> Self {
        Self {
            names: CourseCatalog::default().names().to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing config file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage.data_file cannot be empty".to_string(),
            });
        }

        if self.courses.names.is_empty() {
            return Err(Error::ConfigValidation {
                message: "courses.names must list at least one course".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for name in &self.courses.names {
            if name.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "courses.names contains a blank course name".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::ConfigValidation {
                    message: format!("courses.names lists '{name}' more than once"),
                });
            }
        }

        Ok(())
    }

    /// The configured course catalog.
    #[must_use]
    pub fn catalog(&self) -> CourseCatalog {
        CourseCatalog::new(self.courses.names.iter().cloned())
    }

    /// Get the data file path.
    #[must_use]
    pub fn data_file(&self) -> &PathBuf {
        &self.storage.data_file
    }
}
