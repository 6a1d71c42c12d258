//! Batch command implementation
//!
//! This module implements the `batch` command, which redacts every `*.json`
//! file of a directory. Each file gets its own walker; the redactor and the
//! audit sink are shared. At most `parallel` files are in flight, and a
//! shutdown signal stops new files from being scheduled while the running
//! ones finish.

use super::{audit_sink, config_for_run, EXIT_CONFIG_ERROR, EXIT_OK, EXIT_PROCESSING_ERROR};
use crate::anonymization::report::BatchReport;
use crate::anonymization::{CorpusWalker, MessageRedactor};
use crate::config::ScrubConfig;
use crate::domain::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinSet;

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory holding the raw corpus files
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Directory for the redacted files (created if missing)
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Files processed concurrently (overrides batch.parallel_files)
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Skip the person-name recognizer (pattern detectors only)
    #[arg(long)]
    pub no_ner: bool,

    /// Also write the batch report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl BatchArgs {
    /// Execute the batch command
    pub async fn execute(
        &self,
        loaded: &Result<ScrubConfig>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(
            input_dir = %self.input_dir.display(),
            output_dir = %self.output_dir.display(),
            "Starting batch command"
        );

        let Some(mut config) = config_for_run(loaded, self.no_ner) else {
            return Ok(EXIT_CONFIG_ERROR);
        };
        if let Some(parallel) = self.parallel {
            tracing::info!(parallel, "Overriding parallel files from CLI");
            config.batch.parallel_files = parallel;
        }
        if let Err(e) = config.validate() {
            eprintln!("❌ Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        if same_directory(&self.input_dir, &self.output_dir) {
            tracing::error!(
                input_dir = %self.input_dir.display(),
                output_dir = %self.output_dir.display(),
                "Output directory is the input directory"
            );
            eprintln!(
                "❌ Output directory {} is the input directory; redacted files would replace the raw corpus",
                self.output_dir.display()
            );
            return Ok(EXIT_CONFIG_ERROR);
        }

        let files = match collect_input_files(&self.input_dir) {
            Ok(files) => files,
            Err(e) => {
                tracing::error!(error = %e, "Cannot read input directory");
                eprintln!("❌ Cannot read input directory {}: {e}", self.input_dir.display());
                return Ok(EXIT_PROCESSING_ERROR);
            }
        };
        if files.is_empty() {
            println!("⚠️  No .json files found in {}", self.input_dir.display());
            return Ok(EXIT_OK);
        }
        std::fs::create_dir_all(&self.output_dir)?;

        let redactor = match MessageRedactor::new(&config.anonymization) {
            Ok(redactor) => Arc::new(redactor),
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };
        let audit = audit_sink(&config.anonymization.audit, false)?;

        println!(
            "🚀 Anonymizing {} files ({} at a time)...",
            files.len(),
            config.batch.parallel_files
        );

        let started = Instant::now();
        let mut report = BatchReport::new();
        let mut tasks = JoinSet::new();
        let mut pending = files.into_iter();

        loop {
            while tasks.len() < config.batch.parallel_files && !*shutdown_signal.borrow() {
                let Some(input) = pending.next() else {
                    break;
                };
                let output = self.output_dir.join(input.file_name().unwrap_or_default());
                let redactor = Arc::clone(&redactor);
                let audit = Arc::clone(&audit);
                tasks.spawn_blocking(move || {
                    let mut walker = CorpusWalker::new(redactor, audit);
                    let result = walker.process_file(&input, &output);
                    (input, result)
                });
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };
            let (input, result) = joined?;
            match result {
                Ok(summary) => report.add_success(summary),
                Err(e) => {
                    crate::log_error_with_context!(&e, "File anonymization failed");
                    report.add_failure(input, e.to_string());
                }
            }
        }

        let skipped: Vec<PathBuf> = pending.collect();
        if !skipped.is_empty() {
            tracing::warn!(skipped = skipped.len(), "Shutdown requested, files skipped");
            for input in skipped {
                report.add_failure(input, "Skipped: shutdown requested".to_string());
            }
        }

        report.processing_time_ms = started.elapsed().as_millis() as u64;
        report.sort();
        tracing::info!(
            files = report.files.len(),
            failures = report.failures.len(),
            total_pii_removed = report.totals.total_pii_removed,
            "Batch completed"
        );

        println!("{}", report.format_console());
        if let Some(ref path) = self.report {
            std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
            println!("📝 Batch report written to {}", path.display());
        }

        if report.is_success() {
            println!(
                "✅ Batch complete: {} PII items removed",
                report.totals.total_pii_removed
            );
            Ok(EXIT_OK)
        } else {
            println!("❌ Batch finished with {} failed files", report.failures.len());
            Ok(EXIT_PROCESSING_ERROR)
        }
    }
}

/// True when both paths resolve to the same existing directory
fn same_directory(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// `*.json` files directly inside `dir`, sorted by path
fn collect_input_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
