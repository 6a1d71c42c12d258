//! PII detection module
//!
//! Provides the trait-based detector interface and the ordered registry the
//! message redactor runs over each text.
//!
//! Detectors run in registration order over the current text, so each one
//! sees the placeholders left by the ones before it. The default order is
//! name, email, phone, social, address, url: names go first so an adjacent
//! email or phone literal cannot split them, and the broad address pattern
//! runs after email and phone have already become placeholders.

pub mod patterns;
pub mod regex;

use crate::anonymization::models::{CategoryCounts, PiiCategory};
use crate::domain::Result;
use std::borrow::Cow;

pub use self::regex::RegexDetector;

/// Result of running one detector over a text
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorOutcome<'t> {
    /// Text with every match replaced by the category placeholder
    pub text: Cow<'t, str>,
    /// Raw number of matches found before substitution
    pub matches: usize,
}

/// Trait for PII detection strategies
pub trait PiiDetector: Send + Sync {
    /// Category this detector reports
    fn category(&self) -> PiiCategory;

    /// Count matches without substituting
    fn count_matches(&self, text: &str) -> usize;

    /// Count matches and replace each with the category placeholder
    fn redact<'t>(&self, text: &'t str) -> DetectorOutcome<'t>;
}

/// Ordered set of detectors
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn PiiDetector>>,
}

impl DetectorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Built-in detectors with the built-in name dictionary
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a built-in pattern fails to compile.
    pub fn default_registry() -> Result<Self> {
        Self::with_extra_names(&[])
    }

    /// Built-in detectors with `extra_names` appended to the name dictionary
    pub fn with_extra_names(extra_names: &[String]) -> Result<Self> {
        let mut names: Vec<&str> = patterns::COMMON_NAMES.to_vec();
        for name in extra_names {
            let name = name.trim();
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }

        let mut registry = Self::new();
        for category in PiiCategory::ALL {
            let pattern = patterns::pattern_for(category, &names);
            registry.push(Box::new(RegexDetector::new(category, &pattern)?));
        }
        Ok(registry)
    }

    /// Append a detector; it runs after every detector already registered
    pub fn push(&mut self, detector: Box<dyn PiiDetector>) {
        self.detectors.push(detector);
    }

    /// Categories in run order
    pub fn categories(&self) -> Vec<PiiCategory> {
        self.detectors.iter().map(|d| d.category()).collect()
    }

    /// Number of registered detectors
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// True when no detector is registered
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Run every detector in order over `text`
    pub fn apply(&self, text: &str) -> (String, CategoryCounts) {
        let mut current = text.to_string();
        let mut counts = CategoryCounts::new();

        for detector in &self.detectors {
            let outcome = detector.redact(&current);
            counts.add(detector.category(), outcome.matches);
            let replaced = match outcome.text {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                current = replaced;
            }
        }

        (current, counts)
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn registry() -> DetectorRegistry {
        DetectorRegistry::default_registry().unwrap()
    }

    #[test]
    fn test_default_order() {
        assert_eq!(registry().categories(), PiiCategory::ALL.to_vec());
    }

    #[test]
    fn test_name_and_email() {
        let (text, counts) = registry().apply("Hi, I'm John Smith, email me at john.smith@gmail.com");
        assert_eq!(text, "Hi, I'm [NAME_REMOVED], email me at [EMAIL_REMOVED]");
        assert_eq!(counts.get(PiiCategory::Name), 1);
        assert_eq!(counts.get(PiiCategory::Email), 1);
        assert_eq!(counts.total_removed(), 2);
    }

    #[test]
    fn test_two_phone_formats() {
        let (text, counts) = registry().apply("Call me at 555-123-4567 or (867) 555-0123");
        assert_eq!(text, "Call me at [PHONE_REMOVED] or [PHONE_REMOVED]");
        assert_eq!(counts.get(PiiCategory::Phone), 2);
    }

    #[test_case("Follow me @username or Instagram: @myprofile", PiiCategory::Social, 2 ; "handle and labeled platform")]
    #[test_case("Visit us at 123 Main Street, Suite 200", PiiCategory::Address, 1 ; "street address")]
    #[test_case("Contact María García at +52 867 123 4567", PiiCategory::Phone, 1 ; "international phone")]
    #[test_case("Contact María García at +52 867 123 4567", PiiCategory::Name, 1 ; "spanish name")]
    #[test_case("WhatsApp: 867 123 4567", PiiCategory::Phone, 1 ; "labeled phone")]
    #[test_case("text 8671234567 now", PiiCategory::Phone, 1 ; "bare ten digits")]
    #[test_case("link https://fanvue.com/me", PiiCategory::Url, 1 ; "url")]
    fn test_category_detected(text: &str, category: PiiCategory, expected: usize) {
        let (redacted, counts) = registry().apply(text);
        assert_eq!(counts.get(category), expected);
        assert!(redacted.contains(category.placeholder()));
    }

    #[test]
    fn test_url_excluded_from_total() {
        let (_, counts) = registry().apply("see https://example.org/page");
        assert_eq!(counts.get(PiiCategory::Url), 1);
        assert_eq!(counts.total_removed(), 0);
    }

    #[test]
    fn test_name_runs_before_other_detectors() {
        let (text, counts) = registry().apply("James Thompson@home");
        assert_eq!(text, "[NAME_REMOVED][SOCIAL_REMOVED]");
        assert_eq!(counts.get(PiiCategory::Name), 1);
    }

    #[test]
    fn test_overlapping_name_single_placeholder() {
        let (text, counts) = registry().apply("Dr. James Thompson will see you");
        assert_eq!(text, "Dr. [NAME_REMOVED] will see you");
        assert_eq!(counts.get(PiiCategory::Name), 1);
    }

    #[test_case("Hi, I'm John Smith, email me at john.smith@gmail.com" ; "name and email")]
    #[test_case("Call me at 555-123-4567 or (867) 555-0123" ; "phones")]
    #[test_case("Follow me @username or Instagram: @myprofile" ; "socials")]
    #[test_case("Visit us at 123 Main Street, Suite 200" ; "address")]
    #[test_case("Tel: 555-1234 and https://example.org" ; "labeled phone and url")]
    fn test_redaction_is_idempotent(text: &str) {
        let registry = registry();
        let (once, _) = registry.apply(text);
        let (twice, counts) = registry.apply(&once);
        assert_eq!(once, twice);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_extra_names() {
        let registry =
            DetectorRegistry::with_extra_names(&["Xochitl".to_string(), " ".to_string()]).unwrap();
        let (text, counts) = registry.apply("soy Xochitl García");
        assert_eq!(text, "soy [NAME_REMOVED]");
        assert_eq!(counts.get(PiiCategory::Name), 1);
    }

    #[test]
    fn test_custom_detector_appended() {
        let mut registry = DetectorRegistry::new();
        registry.push(Box::new(
            RegexDetector::new(PiiCategory::Social, r"(?i)tiktok:\s*\S+").unwrap(),
        ));
        assert_eq!(registry.len(), 1);
        let (text, _) = registry.apply("TikTok: chica99");
        assert_eq!(text, "[SOCIAL_REMOVED]");
    }
}
