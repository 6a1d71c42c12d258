//! Audit logger for redaction runs

use super::AuditSink;
use crate::anonymization::config::AuditConfig;
use crate::anonymization::models::Statistics;
use crate::anonymization::report::RunSummary;
use crate::domain::{Result, ScrubError};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Audit log entry
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum AuditLogEntry<'a> {
    MessageRedacted {
        timestamp: String,
        source: &'a str,
        message_id: &'a str,
        pii_removed_count: usize,
    },
    FileCompleted {
        timestamp: String,
        input_file: &'a Path,
        #[serde(skip_serializing_if = "Option::is_none")]
        output_file: Option<&'a Path>,
        messages_modified: usize,
        statistics: &'a Statistics,
        #[serde(skip_serializing_if = "Option::is_none")]
        output_sha256: Option<&'a str>,
    },
}

/// Audit logger writing to an append-only file
///
/// Every entry is also emitted as a `tracing` event on the `audit` target.
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ScrubError::Io(format!(
                        "Failed to create audit log directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            write_lock: Mutex::new(()),
        })
    }

    /// Build the sink described by `config`: a file logger, or `None` when
    /// audit is disabled
    pub fn from_config(config: &AuditConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }
        Self::new(config.log_path.clone(), config.json_format).map(Some)
    }

    /// Path of the audit log
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry<'_>) -> Result<()> {
        let line = if self.json_format {
            serde_json::to_string(entry)?
        } else {
            format_plain(entry)
        };

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ScrubError::Io("Audit log lock poisoned".to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                ScrubError::Io(format!(
                    "Failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;
        writeln!(file, "{line}")?;

        Ok(())
    }
}

fn format_plain(entry: &AuditLogEntry<'_>) -> String {
    match entry {
        AuditLogEntry::MessageRedacted {
            timestamp,
            source,
            message_id,
            pii_removed_count,
        } => format!(
            "[{timestamp}] Message: {message_id} | Source: {source} | PII removed: {pii_removed_count}"
        ),
        AuditLogEntry::FileCompleted {
            timestamp,
            input_file,
            messages_modified,
            statistics,
            ..
        } => format!(
            "[{timestamp}] File: {} | Modified: {messages_modified} | Names: {} | Emails: {} | Phones: {} | Socials: {} | Addresses: {} | Total: {}",
            input_file.display(),
            statistics.names_removed,
            statistics.emails_removed,
            statistics.phones_removed,
            statistics.socials_removed,
            statistics.addresses_removed,
            statistics.total_pii_removed
        ),
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl AuditSink for AuditLogger {
    fn message_redacted(&self, source: &str, message_id: &str, removed: usize) -> Result<()> {
        tracing::info!(
            target: "audit",
            source,
            message_id,
            pii_removed_count = removed,
            "Message redacted"
        );

        self.write_entry(&AuditLogEntry::MessageRedacted {
            timestamp: now(),
            source,
            message_id,
            pii_removed_count: removed,
        })
    }

    fn file_completed(&self, summary: &RunSummary) -> Result<()> {
        let stats = &summary.statistics;
        tracing::info!(
            target: "audit",
            input_file = %summary.input_file.display(),
            messages_modified = summary.messages_modified,
            names_removed = stats.names_removed,
            emails_removed = stats.emails_removed,
            phones_removed = stats.phones_removed,
            socials_removed = stats.socials_removed,
            addresses_removed = stats.addresses_removed,
            total_pii_removed = stats.total_pii_removed,
            "File anonymized"
        );

        self.write_entry(&AuditLogEntry::FileCompleted {
            timestamp: now(),
            input_file: &summary.input_file,
            output_file: summary.output_file.as_deref(),
            messages_modified: summary.messages_modified,
            statistics: stats,
            output_sha256: summary.output_sha256.as_deref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn summary() -> RunSummary {
        RunSummary {
            input_file: PathBuf::from("raw/chat.json"),
            output_file: Some(PathBuf::from("clean/chat.json")),
            statistics: Statistics {
                names_removed: 1,
                emails_removed: 1,
                total_pii_removed: 2,
                ..Default::default()
            },
            conversations: 1,
            messages: 2,
            messages_modified: 1,
            output_sha256: Some("deadbeef".to_string()),
            processing_time_ms: 3,
        }
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested/audit/anonymization.log");
        let logger = AuditLogger::new(log_path.clone(), true).unwrap();
        assert_eq!(logger.log_path(), log_path);
        assert!(log_path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_json_entries() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true).unwrap();

        logger.message_redacted("raw/chat.json", "msg-7", 2).unwrap();
        logger.file_completed(&summary()).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "message_redacted");
        assert_eq!(lines[0]["message_id"], "msg-7");
        assert_eq!(lines[0]["pii_removed_count"], 2);
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(lines[1]["event"], "file_completed");
        assert_eq!(lines[1]["statistics"]["total_pii_removed"], 2);
        assert_eq!(lines[1]["output_sha256"], "deadbeef");
    }

    #[test]
    fn test_plain_entries() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), false).unwrap();

        logger.message_redacted("raw/chat.json", "msg-7", 2).unwrap();
        logger.file_completed(&summary()).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Message: msg-7 | Source: raw/chat.json | PII removed: 2"));
        assert!(content.contains("File: raw/chat.json | Modified: 1"));
        assert!(content.contains("Total: 2"));
    }

    #[test]
    fn test_disabled_config_builds_nothing() {
        let config = AuditConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(AuditLogger::from_config(&config).unwrap().is_none());
    }
}
