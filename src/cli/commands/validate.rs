//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the convoscrub configuration and the recognizer model it selects.

use super::{EXIT_CONFIG_ERROR, EXIT_OK};
use crate::anonymization::recognizer::select_recognizer;
use crate::config::ScrubConfig;
use crate::domain::Result;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(
        &self,
        config_path: Option<&Path>,
        loaded: &Result<ScrubConfig>,
    ) -> anyhow::Result<i32> {
        let shown = config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string());
        tracing::info!(config_path = %shown, "Validating configuration");

        println!("🔍 Validating configuration: {shown}");
        println!();

        let config = match loaded {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let anonymization = &config.anonymization;
        let recognizer = match select_recognizer(anonymization.aggressive_mode, &anonymization.recognizer) {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Recognizer model could not be loaded");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Aggressive Mode: {}", anonymization.aggressive_mode);
        println!("  Extra Names: {}", anonymization.extra_names.len());
        println!(
            "  Recognizer: {} (primary {}, fallback {})",
            recognizer.model_name(),
            anonymization.recognizer.primary_language,
            anonymization
                .recognizer
                .fallback_language
                .as_deref()
                .unwrap_or("none")
        );
        if anonymization.audit.enabled {
            println!("  Audit Log: {}", anonymization.audit.log_path.display());
        } else {
            println!("  Audit Log: disabled");
        }
        println!("  File Logging: {}", config.logging.local_enabled);
        println!("  Parallel Files: {}", config.batch.parallel_files);
        println!();
        Ok(EXIT_OK)
    }
}
