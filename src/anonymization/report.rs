//! Run reporting
//!
//! A [`RunSummary`] describes one processed file; a [`BatchReport`] collects
//! the summaries and failures of a directory run.

use crate::anonymization::models::Statistics;
use serde::Serialize;
use std::path::PathBuf;

const RULE: &str = "═══════════════════════════════════════════════════════════════\n";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────\n";

/// Outcome of processing one corpus file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Source file
    pub input_file: PathBuf,

    /// Destination file, `None` for dry runs
    pub output_file: Option<PathBuf>,

    /// PII removed during this run
    pub statistics: Statistics,

    /// Conversations in the corpus
    pub conversations: usize,

    /// Messages visited
    pub messages: usize,

    /// Messages whose text changed
    pub messages_modified: usize,

    /// SHA-256 of the written output, hex encoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_sha256: Option<String>,

    /// Wall time for the file
    pub processing_time_ms: u64,
}

impl RunSummary {
    /// True when nothing was written
    pub fn is_dry_run(&self) -> bool {
        self.output_file.is_none()
    }

    /// Format summary for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE);
        if self.is_dry_run() {
            output.push_str("                 ANONYMIZATION DRY-RUN REPORT                  \n");
        } else {
            output.push_str("                    ANONYMIZATION SUMMARY                      \n");
        }
        output.push_str(RULE);
        output.push('\n');

        output.push_str("📄 FILES\n");
        output.push_str(THIN_RULE);
        output.push_str(&format!("  Input:               {}\n", self.input_file.display()));
        match self.output_file {
            Some(ref path) => output.push_str(&format!("  Output:              {}\n", path.display())),
            None => output.push_str("  Output:              (dry run, nothing written)\n"),
        }
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str(THIN_RULE);
        output.push_str(&format!("  Conversations:       {}\n", self.conversations));
        output.push_str(&format!("  Messages:            {}\n", self.messages));
        output.push_str(&format!("  Messages Modified:   {}\n", self.messages_modified));
        output.push_str(&format!("  Processing Time:     {} ms\n", self.processing_time_ms));
        output.push('\n');

        output.push_str(&format_statistics(&self.statistics));

        if let Some(ref digest) = self.output_sha256 {
            output.push_str(&format!("🔒 Output SHA-256: {digest}\n\n"));
        }

        output.push_str(RULE);
        output
    }
}

/// A file that could not be processed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    /// Source file
    pub input_file: PathBuf,
    /// Error message (never contains message text)
    pub error: String,
}

/// Results of a directory run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Per-file summaries, sorted by input path
    pub files: Vec<RunSummary>,

    /// Files that failed
    pub failures: Vec<FileFailure>,

    /// Statistics summed over every successful file
    pub totals: Statistics,

    /// Wall time for the whole batch
    pub processing_time_ms: u64,
}

impl BatchReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful file
    pub fn add_success(&mut self, summary: RunSummary) {
        self.totals.merge(&summary.statistics);
        self.files.push(summary);
    }

    /// Record a failed file
    pub fn add_failure(&mut self, input_file: PathBuf, error: String) {
        self.failures.push(FileFailure { input_file, error });
    }

    /// Sort entries by input path so output does not depend on completion order
    pub fn sort(&mut self) {
        self.files.sort_by(|a, b| a.input_file.cmp(&b.input_file));
        self.failures.sort_by(|a, b| a.input_file.cmp(&b.input_file));
    }

    /// True when every file succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE);
        output.push_str("                 BATCH ANONYMIZATION REPORT                    \n");
        output.push_str(RULE);
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str(THIN_RULE);
        output.push_str(&format!(
            "  Files Processed:     {}\n",
            self.files.len() + self.failures.len()
        ));
        output.push_str(&format!("  Successful:          {}\n", self.files.len()));
        output.push_str(&format!("  Failed:              {}\n", self.failures.len()));
        output.push_str(&format!("  Processing Time:     {} ms\n", self.processing_time_ms));
        output.push('\n');

        if !self.files.is_empty() {
            output.push_str("📄 FILES\n");
            output.push_str(THIN_RULE);
            for summary in &self.files {
                output.push_str(&format!(
                    "  {:45} {:>5} removed\n",
                    summary.input_file.display().to_string(),
                    summary.statistics.total_pii_removed
                ));
            }
            output.push('\n');
        }

        output.push_str(&format_statistics(&self.totals));

        if !self.failures.is_empty() {
            output.push_str("❌ FAILURES\n");
            output.push_str(THIN_RULE);
            for failure in &self.failures {
                output.push_str(&format!(
                    "  • {}: {}\n",
                    failure.input_file.display(),
                    failure.error
                ));
            }
            output.push('\n');
        }

        output.push_str(RULE);
        output
    }
}

fn format_statistics(stats: &Statistics) -> String {
    let mut output = String::new();
    output.push_str("🔍 PII REMOVED BY CATEGORY\n");
    output.push_str(THIN_RULE);
    for (label, count) in [
        ("Names", stats.names_removed),
        ("Emails", stats.emails_removed),
        ("Phones", stats.phones_removed),
        ("Social Handles", stats.socials_removed),
        ("Addresses", stats.addresses_removed),
    ] {
        output.push_str(&format!("  {label:30} {count:>5}\n"));
    }
    output.push_str(&format!("  {:30} {:>5}\n", "Total", stats.total_pii_removed));
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, emails: usize) -> RunSummary {
        RunSummary {
            input_file: PathBuf::from(name),
            output_file: Some(PathBuf::from(format!("out/{name}"))),
            statistics: Statistics {
                emails_removed: emails,
                total_pii_removed: emails,
                ..Default::default()
            },
            conversations: 1,
            messages: 3,
            messages_modified: 1,
            output_sha256: Some("ab12".to_string()),
            processing_time_ms: 4,
        }
    }

    #[test]
    fn test_summary_serializes_contract_fields() {
        let value = serde_json::to_value(summary("a.json", 2)).unwrap();
        assert_eq!(value["input_file"], "a.json");
        assert_eq!(value["output_file"], "out/a.json");
        assert_eq!(value["statistics"]["emails_removed"], 2);
        assert_eq!(value["statistics"]["total_pii_removed"], 2);
    }

    #[test]
    fn test_format_console() {
        let output = summary("a.json", 2).format_console();
        assert!(output.contains("ANONYMIZATION SUMMARY"));
        assert!(output.contains("Messages Modified:   1"));
        assert!(output.contains("Output SHA-256: ab12"));
    }

    #[test]
    fn test_dry_run_console() {
        let mut dry = summary("a.json", 0);
        dry.output_file = None;
        dry.output_sha256 = None;
        assert!(dry.is_dry_run());
        let output = dry.format_console();
        assert!(output.contains("DRY-RUN REPORT"));
        assert!(!output.contains("SHA-256"));
    }

    #[test]
    fn test_batch_totals_and_failures() {
        let mut report = BatchReport::new();
        report.add_success(summary("b.json", 1));
        report.add_success(summary("a.json", 2));
        report.add_failure(PathBuf::from("c.json"), "Unexpected data structure in c.json".into());
        report.sort();

        assert_eq!(report.totals.emails_removed, 3);
        assert!(report.totals.is_consistent());
        assert!(!report.is_success());
        assert_eq!(report.files[0].input_file, PathBuf::from("a.json"));

        let output = report.format_console();
        assert!(output.contains("Failed:              1"));
        assert!(output.contains("c.json: Unexpected data structure"));
    }
}
