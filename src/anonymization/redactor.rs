//! Single-message redaction
//!
//! Runs the detector registry and then, in aggressive mode, the name
//! recognizer over a message's `text`. The caller's message is never
//! mutated; a new value is returned with `text` in its original position and
//! the audit fields appended after the existing keys.

use crate::anonymization::config::AnonymizationConfig;
use crate::anonymization::detector::DetectorRegistry;
use crate::anonymization::models::{CategoryCounts, PiiCategory};
use crate::anonymization::recognizer::{self, EntityRecognizer};
use crate::domain::corpus::{
    ANONYMIZED_FIELD, PII_REMOVED_COUNT_FIELD, TEST_PROVENANCE_FIELD, TEXT_FIELD,
};
use crate::domain::Result;
use serde_json::Value;
use std::sync::Arc;

/// Result of redacting one message
#[derive(Debug, Clone, PartialEq)]
pub struct RedactionOutcome {
    /// The redacted message
    pub message: Value,
    /// Per-category counts; empty when the text did not change
    pub counts: CategoryCounts,
    /// Whether the text changed
    pub modified: bool,
    /// Value written to `_pii_removed_count` (URLs excluded)
    pub removed: usize,
}

impl RedactionOutcome {
    fn unchanged(message: Value) -> Self {
        Self {
            message,
            counts: CategoryCounts::new(),
            modified: false,
            removed: 0,
        }
    }
}

/// Applies the detectors and the recognizer to messages
pub struct MessageRedactor {
    registry: Arc<DetectorRegistry>,
    recognizer: Arc<dyn EntityRecognizer>,
    aggressive: bool,
}

impl MessageRedactor {
    /// Build the registry and pick the recognizer from configuration
    ///
    /// # Errors
    ///
    /// Fails when a detector pattern does not compile or a recognizer model
    /// file exists but cannot be loaded.
    pub fn new(config: &AnonymizationConfig) -> Result<Self> {
        let registry = DetectorRegistry::with_extra_names(&config.extra_names)?;
        let recognizer = recognizer::select_recognizer(config.aggressive_mode, &config.recognizer)?;

        tracing::info!(
            detectors = registry.len(),
            recognizer = recognizer.model_name(),
            aggressive = config.aggressive_mode,
            "Message redactor ready"
        );

        Ok(Self::from_parts(
            Arc::new(registry),
            recognizer,
            config.aggressive_mode,
        ))
    }

    /// Assemble a redactor from already built parts
    pub fn from_parts(
        registry: Arc<DetectorRegistry>,
        recognizer: Arc<dyn EntityRecognizer>,
        aggressive: bool,
    ) -> Self {
        Self {
            registry,
            recognizer,
            aggressive,
        }
    }

    /// Whether the recognizer pass will run
    pub fn uses_recognizer(&self) -> bool {
        self.aggressive && self.recognizer.is_available()
    }

    /// Redact a bare text
    pub fn redact_text(&self, text: &str) -> (String, CategoryCounts) {
        let (mut redacted, mut counts) = self.registry.apply(text);

        if self.uses_recognizer() {
            let (named, found) = recognizer::redact_names(self.recognizer.as_ref(), &redacted);
            counts.add(PiiCategory::Name, found);
            redacted = named;
        }

        (redacted, counts)
    }

    /// Redact one message
    ///
    /// Non-object messages are returned as they are. Messages without a
    /// non-empty string `text` only lose the test provenance field.
    pub fn redact(&self, message: &Value) -> RedactionOutcome {
        let Some(fields) = message.as_object() else {
            return RedactionOutcome::unchanged(message.clone());
        };

        let mut fields = fields.clone();
        fields.shift_remove(TEST_PROVENANCE_FIELD);

        let text = match fields.get(TEXT_FIELD) {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            _ => return RedactionOutcome::unchanged(Value::Object(fields)),
        };

        let (redacted, counts) = self.redact_text(&text);
        if redacted == text {
            return RedactionOutcome::unchanged(Value::Object(fields));
        }

        let removed = counts.total_removed();
        fields.insert(TEXT_FIELD.to_string(), Value::String(redacted));
        fields.insert(ANONYMIZED_FIELD.to_string(), Value::Bool(true));
        fields.insert(PII_REMOVED_COUNT_FIELD.to_string(), Value::from(removed));

        RedactionOutcome {
            message: Value::Object(fields),
            counts,
            modified: true,
            removed,
        }
    }
}
