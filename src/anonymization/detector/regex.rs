//! Regex-based PII detector

use super::{DetectorOutcome, PiiDetector};
use crate::anonymization::models::PiiCategory;
use crate::domain::{Result, ScrubError};
use regex::{NoExpand, Regex};
use std::borrow::Cow;

/// Detector backed by one compiled pattern
#[derive(Debug, Clone)]
pub struct RegexDetector {
    category: PiiCategory,
    regex: Regex,
}

impl RegexDetector {
    /// Compile `pattern` for `category`
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Configuration`] if the pattern does not compile.
    pub fn new(category: PiiCategory, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            ScrubError::Configuration(format!(
                "Invalid regex for detector '{}': {e}",
                category.tag()
            ))
        })?;
        Ok(Self { category, regex })
    }
}

impl PiiDetector for RegexDetector {
    fn category(&self) -> PiiCategory {
        self.category
    }

    fn count_matches(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    fn redact<'t>(&self, text: &'t str) -> DetectorOutcome<'t> {
        let matches = self.count_matches(text);
        if matches == 0 {
            return DetectorOutcome {
                text: Cow::Borrowed(text),
                matches,
            };
        }

        tracing::debug!(
            category = self.category.tag(),
            matches,
            "Found PII matches in text"
        );

        DetectorOutcome {
            text: self
                .regex
                .replace_all(text, NoExpand(self.category.placeholder())),
            matches,
        }
    }
}
