//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_OK, EXIT_PROCESSING_ERROR};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "convoscrub.toml")]
    pub output: PathBuf,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output.display(), "Initializing configuration file");

        println!("📝 Initializing convoscrub configuration");
        println!();

        if self.output.exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output.display());
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output.display());
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output.display());
                println!("  2. Validate configuration: convoscrub --config {} validate-config", self.output.display());
                println!("  3. Anonymize a file: convoscrub --config {} anonymize -i raw.json -o clean.json", self.output.display());
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_PROCESSING_ERROR)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# convoscrub Configuration File
# Structure-preserving PII redaction for conversation corpora

[application]
log_level = "info"

[anonymization]
aggressive_mode = true

[anonymization.recognizer]
primary_language = "es"
fallback_language = "en"

[anonymization.audit]
enabled = true
log_path = "./audit/anonymization.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"

[batch]
parallel_files = 4
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# convoscrub Configuration File
# Structure-preserving PII redaction for conversation corpora
#
# Every setting is optional. Values can reference environment variables
# with ${VAR_NAME}, and CONVOSCRUB_<SECTION>_<KEY> variables override them.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
log_level = "info"

# ============================================================================
# Anonymization
# ============================================================================
[anonymization]
# Run the person-name recognizer after the pattern detectors.
# The --no-ner flag turns this off for a single run.
aggressive_mode = true

# Names added to the built-in first/last name dictionary.
# Two consecutive dictionary names are redacted as one name.
extra_names = []

[anonymization.recognizer]
# Model tried first, then the fallback. Without a model the recognizer is
# skipped and only the pattern detectors run.
primary_language = "es"
fallback_language = "en"

# Directory with <language>.toml lexicon models. When unset, the bundled
# Spanish and English models are used.
# models_dir = "${CONVOSCRUB_MODELS_DIR}"

[anonymization.audit]
# One entry per redacted message (id and count only) plus one per file
enabled = true
log_path = "./audit/anonymization.log"

# JSON lines (true) or plain text (false)
json_format = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging in addition to the console
local_enabled = false

# Directory for log files
local_path = "./logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"

# ============================================================================
# Batch Runs
# ============================================================================
[batch]
# Files anonymized concurrently by the batch command (1-64)
parallel_files = 4
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrubConfig;
    use tempfile::tempdir;

    #[test]
    fn test_generated_configs_parse_and_validate() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: ScrubConfig = toml::from_str(&content).unwrap();
            assert!(config.validate().is_ok());
            assert!(config.anonymization.aggressive_mode);
        }
    }

    #[tokio::test]
    async fn test_init_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("convoscrub.toml");
        std::fs::write(&output, "# mine").unwrap();

        let args = InitArgs {
            output: output.clone(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG_ERROR);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "# mine");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), EXIT_OK);
        assert!(std::fs::read_to_string(&output).unwrap().contains("[anonymization]"));
    }
}
