//! Corpus traversal and persistence
//!
//! A [`CorpusWalker`] owns the statistics of one run. It validates the root
//! shape before touching any message, redacts every message in order and
//! writes the result atomically: the document is serialized next to the
//! destination and renamed into place, so a failed run leaves no partial
//! output behind.
//!
//! Parallel runs use one walker each and share the redactor through `Arc`.

use crate::anonymization::audit::AuditSink;
use crate::anonymization::models::Statistics;
use crate::anonymization::redactor::MessageRedactor;
use crate::anonymization::report::RunSummary;
use crate::domain::corpus::{self, Conversation, Corpus, MESSAGES_FIELD};
use crate::domain::{Result, ScrubError};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tempfile::NamedTempFile;

#[derive(Debug, Default)]
struct WalkCounters {
    conversations: usize,
    messages: usize,
    messages_modified: usize,
    /// Message id and removed count of every modified message, in order
    redacted: Vec<(String, usize)>,
}

/// Drives the message redactor over a whole corpus
pub struct CorpusWalker {
    redactor: Arc<MessageRedactor>,
    audit: Arc<dyn AuditSink>,
    stats: Statistics,
}

impl CorpusWalker {
    /// Create a walker with zeroed statistics
    pub fn new(redactor: Arc<MessageRedactor>, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            redactor,
            audit,
            stats: Statistics::new(),
        }
    }

    /// Statistics of the last run
    pub fn statistics(&self) -> Statistics {
        self.stats
    }

    /// Redact an already parsed corpus
    ///
    /// `source` names the corpus in errors and audit entries.
    ///
    /// # Errors
    ///
    /// [`ScrubError::UnexpectedStructure`] when the root shape is not
    /// accepted, or an I/O error from the audit sink.
    pub fn anonymize_value(&mut self, value: Value, source: &str) -> Result<Value> {
        self.stats.reset();
        let (value, counters) = self.walk(value, source)?;
        self.audit_messages(source, &counters)?;
        Ok(value)
    }

    /// Redact `input` and write the result to `output`
    ///
    /// # Errors
    ///
    /// Fails without creating `output` when the input cannot be read or
    /// parsed, has an unexpected shape, or the output cannot be written.
    pub fn process_file(&mut self, input: &Path, output: &Path) -> Result<RunSummary> {
        let started = Instant::now();
        self.stats.reset();
        crate::log_file_start!(input, output);

        let source = input.display().to_string();
        let value = read_corpus(input)?;
        let (value, counters) = self.walk(value, &source)?;
        let digest = write_atomically(&value, output)?;
        self.audit_messages(&source, &counters)?;

        let elapsed = started.elapsed();
        crate::log_file_complete!(input, &self.stats, elapsed);

        let summary = RunSummary {
            input_file: input.to_path_buf(),
            output_file: Some(output.to_path_buf()),
            statistics: self.stats,
            conversations: counters.conversations,
            messages: counters.messages,
            messages_modified: counters.messages_modified,
            output_sha256: Some(digest),
            processing_time_ms: elapsed.as_millis() as u64,
        };
        self.audit.file_completed(&summary)?;

        Ok(summary)
    }

    /// Count what [`process_file`](Self::process_file) would remove without
    /// writing output or audit entries
    pub fn dry_run(&mut self, input: &Path) -> Result<RunSummary> {
        let started = Instant::now();
        self.stats.reset();

        let source = input.display().to_string();
        let value = read_corpus(input)?;
        let (_, counters) = self.walk(value, &source)?;

        let elapsed = started.elapsed();
        tracing::info!(
            input_file = %input.display(),
            total_pii_removed = self.stats.total_pii_removed,
            "Dry run completed"
        );

        Ok(RunSummary {
            input_file: input.to_path_buf(),
            output_file: None,
            statistics: self.stats,
            conversations: counters.conversations,
            messages: counters.messages,
            messages_modified: counters.messages_modified,
            output_sha256: None,
            processing_time_ms: elapsed.as_millis() as u64,
        })
    }

    /// Audit entries are only emitted once the run has produced its result
    fn audit_messages(&self, source: &str, counters: &WalkCounters) -> Result<()> {
        for (id, removed) in &counters.redacted {
            self.audit.message_redacted(source, id, *removed)?;
        }
        Ok(())
    }

    fn walk(&mut self, value: Value, source: &str) -> Result<(Value, WalkCounters)> {
        let corpus = Corpus::from_value(value, source)?;
        tracing::debug!(
            source,
            shape = ?corpus.shape(),
            conversations = corpus.conversations().len(),
            "Corpus shape detected"
        );

        let mut counters = WalkCounters::default();
        let corpus = corpus
            .map_conversations(|conversation| self.redact_conversation(conversation, &mut counters));

        debug_assert!(self.stats.is_consistent());
        Ok((corpus.into_value(), counters))
    }

    fn redact_conversation(
        &mut self,
        mut conversation: Conversation,
        counters: &mut WalkCounters,
    ) -> Conversation {
        counters.conversations += 1;

        let Some(Value::Array(messages)) = conversation.get_mut(MESSAGES_FIELD) else {
            return conversation;
        };

        for message in messages.iter_mut() {
            counters.messages += 1;
            let outcome = self.redactor.redact(message);
            if outcome.modified {
                counters.messages_modified += 1;
                self.stats.record(&outcome.counts);

                let id = message
                    .as_object()
                    .map(corpus::message_id)
                    .unwrap_or_else(|| "unknown".to_string());
                crate::log_message_redacted!(id, outcome.removed);
                counters.redacted.push((id, outcome.removed));
            }
            *message = outcome.message;
        }

        conversation
    }
}

fn read_corpus(input: &Path) -> Result<Value> {
    if !input.is_file() {
        return Err(ScrubError::Io(format!(
            "Input file not found: {}",
            input.display()
        )));
    }
    let content = std::fs::read_to_string(input).map_err(|e| ScrubError::from(e).in_file(input))?;
    serde_json::from_str(&content).map_err(|e| ScrubError::from(e).in_file(input))
}

/// Serialize with two-space indentation and rename into place; returns the
/// SHA-256 of the written bytes
fn write_atomically(value: &Value, output: &Path) -> Result<String> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| ScrubError::from(e).in_file(output))?;

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| ScrubError::from(e).in_file(dir))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| ScrubError::from(e).in_file(dir))?;
    temp.write_all(&bytes)
        .and_then(|_| temp.flush())
        .map_err(|e| ScrubError::from(e).in_file(output))?;
    temp.persist(output)
        .map_err(|e| ScrubError::from(e.error).in_file(output))?;

    let digest = Sha256::digest(&bytes);
    Ok(format!("{digest:x}"))
}
