//! Person-name recognition
//!
//! The recognizer is an optional second name pass that only runs in
//! aggressive mode. Which implementation is used is decided once, when the
//! pipeline is built: the primary language model, then the fallback
//! language model, then [`DisabledRecognizer`]. A missing model is never an
//! error.

pub mod lexicon;

use crate::anonymization::config::RecognizerConfig;
use crate::anonymization::models::PiiCategory;
use crate::domain::Result;
use regex::{NoExpand, Regex};
use std::sync::Arc;

pub use lexicon::{LexiconModel, LexiconRecognizer};

/// A person name found in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// The name as written
    pub text: String,
}

/// Trait for person-name recognizers
pub trait EntityRecognizer: Send + Sync {
    /// Identifier of the loaded model, for logs
    fn model_name(&self) -> &str;

    /// Find person-name spans in `text`
    fn find_person_names(&self, text: &str) -> Vec<EntitySpan>;

    /// Whether this recognizer can find anything at all
    fn is_available(&self) -> bool {
        true
    }
}

/// Recognizer used when no model is available
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRecognizer;

impl EntityRecognizer for DisabledRecognizer {
    fn model_name(&self) -> &str {
        "disabled"
    }

    fn find_person_names(&self, _text: &str) -> Vec<EntitySpan> {
        Vec::new()
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Pick a recognizer for the configured languages
///
/// Returns [`DisabledRecognizer`] without loading anything when aggressive
/// mode is off.
///
/// # Errors
///
/// Only a model file that exists but is unreadable or malformed fails.
pub fn select_recognizer(
    aggressive_mode: bool,
    config: &RecognizerConfig,
) -> Result<Arc<dyn EntityRecognizer>> {
    if !aggressive_mode {
        tracing::debug!("Aggressive mode off, skipping recognizer model load");
        return Ok(Arc::new(DisabledRecognizer));
    }

    let languages = std::iter::once(config.primary_language.as_str())
        .chain(config.fallback_language.as_deref());

    for language in languages {
        match LexiconModel::load(language, config.models_dir.as_deref())? {
            Some(model) => {
                let recognizer = LexiconRecognizer::new(model)?;
                tracing::info!(
                    language,
                    model = recognizer.model_name(),
                    "Loaded name recognizer model"
                );
                return Ok(Arc::new(recognizer));
            }
            None => {
                tracing::warn!(language, "No name recognizer model for language");
            }
        }
    }

    tracing::warn!("No name recognizer model found, using pattern detectors only");
    Ok(Arc::new(DisabledRecognizer))
}

/// Replace every name the recognizer finds with the name placeholder
///
/// Names are deduplicated and replaced longest first, so a full name is
/// consumed before any shorter name it contains. Returns the redacted text
/// and the number of distinct names actually replaced.
pub fn redact_names(recognizer: &dyn EntityRecognizer, text: &str) -> (String, usize) {
    let mut names: Vec<String> = recognizer
        .find_person_names(text)
        .into_iter()
        .map(|span| span.text)
        .filter(|name| !name.trim().is_empty())
        .collect();

    if names.is_empty() {
        return (text.to_string(), 0);
    }

    names.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    names.dedup();

    let placeholder = PiiCategory::Name.placeholder();
    let mut redacted = text.to_string();
    let mut replaced = 0;
    for name in &names {
        let pattern = match whole_word_pattern(name) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping recognized name that cannot be matched");
                continue;
            }
        };
        if pattern.is_match(&redacted) {
            redacted = pattern
                .replace_all(&redacted, NoExpand(placeholder))
                .into_owned();
            replaced += 1;
        }
    }

    (redacted, replaced)
}

/// Match `name` only where it is not part of a longer word
fn whole_word_pattern(name: &str) -> std::result::Result<Regex, regex::Error> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if name.starts_with(is_word) { r"\b" } else { "" };
    let trail = if name.ends_with(is_word) { r"\b" } else { "" };
    Regex::new(&format!("{lead}{}{trail}", regex::escape(name)))
}
