//! Domain error types
//!
//! This module defines the error hierarchy for convoscrub. Every variant
//! carries a message that is safe to print: callers put file paths and
//! field names in it, never message text.

use thiserror::Error;

/// Main convoscrub error type
#[derive(Debug, Error)]
pub enum ScrubError {
    /// Unusable configuration: an uncompilable detector pattern, an
    /// unreadable recognizer model or an invalid config value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Corpus root is neither a conversation nor a list of conversations
    #[error("Unexpected data structure in {0}")]
    UnexpectedStructure(String),

    /// Source unreadable or destination unwritable
    #[error("I/O error: {0}")]
    Io(String),

    /// Malformed JSON input or output encoding failure
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ScrubError {
    /// Attach the offending file to an error raised without one
    pub fn in_file(self, path: &std::path::Path) -> Self {
        match self {
            ScrubError::Io(msg) => ScrubError::Io(format!("{}: {msg}", path.display())),
            ScrubError::Serialization(msg) => {
                ScrubError::Serialization(format!("{}: {msg}", path.display()))
            }
            ScrubError::UnexpectedStructure(_) => {
                ScrubError::UnexpectedStructure(path.display().to_string())
            }
            other => other,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ScrubError {
    fn from(err: std::io::Error) -> Self {
        ScrubError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ScrubError {
    fn from(err: serde_json::Error) -> Self {
        ScrubError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ScrubError {
    fn from(err: toml::de::Error) -> Self {
        ScrubError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from regex compile errors
impl From<regex::Error> for ScrubError {
    fn from(err: regex::Error) -> Self {
        ScrubError::Configuration(format!("Invalid detector pattern: {err}"))
    }
}
