//! Anonymize command implementation
//!
//! This module implements the `anonymize` command for redacting a single
//! corpus file.

use super::{audit_sink, config_for_run, EXIT_CONFIG_ERROR, EXIT_OK, EXIT_PROCESSING_ERROR};
use crate::anonymization::{CorpusWalker, MessageRedactor};
use crate::config::ScrubConfig;
use crate::domain::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Corpus file to redact
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination for the redacted corpus
    #[arg(short, long, required_unless_present = "dry_run")]
    pub output: Option<PathBuf>,

    /// Skip the person-name recognizer (pattern detectors only)
    #[arg(long)]
    pub no_ner: bool,

    /// Count what would be removed without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, loaded: &Result<ScrubConfig>) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), dry_run = self.dry_run, "Starting anonymize command");

        let Some(config) = config_for_run(loaded, self.no_ner) else {
            return Ok(EXIT_CONFIG_ERROR);
        };

        if !self.input.is_file() {
            tracing::error!(input = %self.input.display(), "Input file not found");
            eprintln!("❌ Input file not found: {}", self.input.display());
            return Ok(EXIT_PROCESSING_ERROR);
        }

        let redactor = match MessageRedactor::new(&config.anonymization) {
            Ok(redactor) => Arc::new(redactor),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build redactor");
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };
        let audit = audit_sink(&config.anonymization.audit, self.dry_run)?;

        if self.dry_run {
            println!("🔍 DRY RUN MODE - No output will be written");
        }

        let input = self.input.clone();
        let output = self.output.clone();
        let dry_run = self.dry_run;
        let result = tokio::task::spawn_blocking(move || {
            let mut walker = CorpusWalker::new(redactor, audit);
            match output {
                Some(ref output) if !dry_run => walker.process_file(&input, output),
                _ => walker.dry_run(&input),
            }
        })
        .await?;

        match result {
            Ok(summary) => {
                println!("{}", summary.format_console());
                println!(
                    "✅ Anonymization complete: {} PII items removed",
                    summary.statistics.total_pii_removed
                );
                Ok(EXIT_OK)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Anonymization failed");
                eprintln!("❌ Anonymization failed: {e}");
                Ok(EXIT_PROCESSING_ERROR)
            }
        }
    }
}
