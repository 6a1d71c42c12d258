//! Configuration management for convoscrub.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! convoscrub reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CONVOSCRUB_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation that names the first invalid field
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use convoscrub::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("convoscrub.toml")?;
//! println!("Aggressive mode: {}", config.anonymization.aggressive_mode);
//! println!("Parallel files: {}", config.batch.parallel_files);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`AnonymizationConfig`] - Redaction pipeline, recognizer and audit settings
//! - [`LoggingConfig`] - Local file logging
//! - [`BatchConfig`] - Directory runs
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! aggressive_mode = true
//! extra_names = ["Xochitl"]
//!
//! [anonymization.recognizer]
//! primary_language = "es"
//! fallback_language = "en"
//!
//! [anonymization.audit]
//! enabled = true
//! log_path = "${CONVOSCRUB_AUDIT_DIR}/anonymization.log"
//!
//! [batch]
//! parallel_files = 4
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::anonymization::config::{AnonymizationConfig, AuditConfig, RecognizerConfig};
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, BatchConfig, LoggingConfig, ScrubConfig};
