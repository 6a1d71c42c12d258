//! Audit logging module
//!
//! Redaction runs report to an [`AuditSink`]. Entries carry message ids,
//! counts and file totals only; message text never reaches the audit trail.

pub mod logger;

use crate::anonymization::report::RunSummary;
use crate::domain::Result;

pub use logger::AuditLogger;

/// Receiver of audit events
pub trait AuditSink: Send + Sync {
    /// A message's text changed
    fn message_redacted(&self, source: &str, message_id: &str, removed: usize) -> Result<()>;

    /// A file was fully processed
    fn file_completed(&self, summary: &RunSummary) -> Result<()>;
}

/// Sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn message_redacted(&self, _source: &str, _message_id: &str, _removed: usize) -> Result<()> {
        Ok(())
    }

    fn file_completed(&self, _summary: &RunSummary) -> Result<()> {
        Ok(())
    }
}
