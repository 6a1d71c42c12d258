// Convoscrub - Structure-preserving PII redaction for conversation corpora
// Copyright (c) 2025 Convoscrub Contributors
// Licensed under the MIT License

//! # Convoscrub - PII redaction for conversation corpora
//!
//! Convoscrub removes personally identifiable information from the free-text
//! field of every message in a JSON conversation corpus while leaving the
//! surrounding structure, keys and ordering untouched.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** emails, phone numbers, social handles, street addresses,
//!   URLs and titled person names with ordered pattern detectors
//! - **Recognizing** bare person names with a language-specific lexicon model
//! - **Redacting** each message in place with a category placeholder and
//!   recording audit fields on it
//! - **Reporting** per-category statistics, an audit trail and an output digest
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Detectors, recognizer, redactor and corpus walker
//! - [`domain`] - Corpus shapes and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use convoscrub::anonymization::audit::NoopAuditSink;
//! use convoscrub::anonymization::{AnonymizationConfig, CorpusWalker, MessageRedactor};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let redactor = MessageRedactor::new(&AnonymizationConfig::default())?;
//!     let mut walker = CorpusWalker::new(Arc::new(redactor), Arc::new(NoopAuditSink));
//!
//!     let summary = walker.process_file("raw.json".as_ref(), "clean.json".as_ref())?;
//!     println!("Removed {} PII items", summary.statistics.total_pii_removed);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All library operations return [`domain::ScrubError`]:
//!
//! ```rust,no_run
//! use convoscrub::domain::ScrubError;
//!
//! fn example() -> Result<(), ScrubError> {
//!     let config = convoscrub::config::load_config("convoscrub.toml")?;
//!     println!("aggressive mode: {}", config.anonymization.aggressive_mode);
//!     Ok(())
//! }
//! ```

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
