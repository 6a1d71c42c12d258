//! Anonymization configuration

use crate::domain::{Result, ScrubError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the redaction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Run the person-name recognizer after the pattern detectors
    #[serde(default = "default_true")]
    pub aggressive_mode: bool,

    /// Names appended to the built-in name dictionary
    #[serde(default)]
    pub extra_names: Vec<String>,

    /// Name recognizer model selection
    #[serde(default)]
    pub recognizer: RecognizerConfig,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            aggressive_mode: true,
            extra_names: Vec::new(),
            recognizer: RecognizerConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.extra_names.iter().any(|name| name.trim().is_empty()) {
            return Err("anonymization.extra_names must not contain empty names".to_string());
        }
        self.recognizer.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(val) = env_bool("CONVOSCRUB_ANONYMIZATION_AGGRESSIVE_MODE")? {
            self.aggressive_mode = val;
        }

        if let Ok(val) = std::env::var("CONVOSCRUB_ANONYMIZATION_EXTRA_NAMES") {
            self.extra_names = val
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }

        self.recognizer.apply_env_overrides();
        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Name recognizer model selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Language tried first
    #[serde(default = "default_primary_language")]
    pub primary_language: String,

    /// Language tried when the primary model is unavailable
    #[serde(default = "default_fallback_language")]
    pub fallback_language: Option<String>,

    /// Directory holding `<language>.toml` models; bundled models when unset
    #[serde(default)]
    pub models_dir: Option<PathBuf>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            primary_language: default_primary_language(),
            fallback_language: default_fallback_language(),
            models_dir: None,
        }
    }
}

impl RecognizerConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if !is_language_code(&self.primary_language) {
            return Err(format!(
                "Invalid anonymization.recognizer.primary_language '{}'. Must be a two-letter language code",
                self.primary_language
            ));
        }
        if let Some(ref fallback) = self.fallback_language {
            if !is_language_code(fallback) {
                return Err(format!(
                    "Invalid anonymization.recognizer.fallback_language '{fallback}'. Must be a two-letter language code"
                ));
            }
        }
        if let Some(ref dir) = self.models_dir {
            if !dir.is_dir() {
                return Err(format!(
                    "anonymization.recognizer.models_dir is not a directory: {}",
                    dir.display()
                ));
            }
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CONVOSCRUB_RECOGNIZER_PRIMARY_LANGUAGE") {
            self.primary_language = val;
        }
        if let Ok(val) = std::env::var("CONVOSCRUB_RECOGNIZER_FALLBACK_LANGUAGE") {
            self.fallback_language = if val.is_empty() { None } else { Some(val) };
        }
        if let Ok(val) = std::env::var("CONVOSCRUB_RECOGNIZER_MODELS_DIR") {
            self.models_dir = Some(PathBuf::from(val));
        }
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON lines for audit entries
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

impl AuditConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("anonymization.audit.log_path must be set when audit is enabled".to_string());
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(val) = env_bool("CONVOSCRUB_AUDIT_ENABLED")? {
            self.enabled = val;
        }
        if let Ok(val) = std::env::var("CONVOSCRUB_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }
        if let Some(val) = env_bool("CONVOSCRUB_AUDIT_JSON_FORMAT")? {
            self.json_format = val;
        }
        Ok(())
    }
}

fn env_bool(name: &str) -> Result<Option<bool>> {
    match std::env::var(name) {
        Ok(val) => val
            .parse()
            .map(Some)
            .map_err(|_| ScrubError::Configuration(format!("Invalid {name} value: {val}"))),
        Err(_) => Ok(None),
    }
}

fn is_language_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_lowercase())
}

fn default_true() -> bool {
    true
}

fn default_primary_language() -> String {
    "es".to_string()
}

fn default_fallback_language() -> Option<String> {
    Some("en".to_string())
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/anonymization.log")
}
