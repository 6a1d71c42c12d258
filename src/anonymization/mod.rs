//! Anonymization module for convoscrub
//!
//! This module finds and replaces personally identifiable content in
//! conversation corpora while keeping every other field, the key order and
//! the root shape intact.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Detection**: an ordered registry of regex detectors ([`detector`])
//! - **Recognition**: an optional person-name recognizer ([`recognizer`])
//! - **Redaction**: per-message substitution and audit fields ([`redactor`])
//! - **Traversal**: shape validation, statistics and persistence ([`walker`])
//! - **Audit**: message ids and counts, never text ([`audit`])
//!
//! # Usage
//!
//! ```rust,no_run
//! use convoscrub::anonymization::{
//!     audit::NoopAuditSink, AnonymizationConfig, CorpusWalker, MessageRedactor,
//! };
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn example() -> convoscrub::domain::Result<()> {
//! let redactor = Arc::new(MessageRedactor::new(&AnonymizationConfig::default())?);
//! let mut walker = CorpusWalker::new(redactor, Arc::new(NoopAuditSink));
//! let summary = walker.process_file(Path::new("raw.json"), Path::new("clean.json"))?;
//! println!("Removed {} items", summary.statistics.total_pii_removed);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod config;
pub mod detector;
pub mod models;
pub mod recognizer;
pub mod redactor;
pub mod report;
pub mod walker;

// Re-export main types
pub use config::AnonymizationConfig;
pub use models::{CategoryCounts, PiiCategory, Statistics};
pub use redactor::{MessageRedactor, RedactionOutcome};
pub use report::{BatchReport, RunSummary};
pub use walker::CorpusWalker;
