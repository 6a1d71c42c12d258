//! Configuration schema types
//!
//! Every section and every field has a default, so an empty file (or no file
//! at all) is a valid configuration.

use crate::anonymization::config::AnonymizationConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main convoscrub configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrubConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Redaction pipeline settings
    #[serde(default)]
    pub anonymization: AnonymizationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Directory run settings
    #[serde(default)]
    pub batch: BatchConfig,
}

impl ScrubConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid field
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.anonymization.validate()?;
        self.logging.validate()?;
        self.batch.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: PathBuf,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.as_os_str().is_empty() {
            return Err("logging.local_path must be set when local_enabled = true".to_string());
        }
        Ok(())
    }
}

/// Directory run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Files processed concurrently
    #[serde(default = "default_parallel_files")]
    pub parallel_files: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_files: default_parallel_files(),
        }
    }
}

impl BatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.parallel_files == 0 || self.parallel_files > 64 {
            return Err(format!(
                "batch.parallel_files must be between 1 and 64, got {}",
                self.parallel_files
            ));
        }
        Ok(())
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_parallel_files() -> usize {
    4
}
