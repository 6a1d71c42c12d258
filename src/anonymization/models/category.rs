//! PII categories and per-message counts

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// PII category handled by the redaction pipeline
///
/// Variant order is the order detectors run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PiiCategory {
    /// Person names
    Name,
    /// Email addresses
    Email,
    /// Telephone numbers
    Phone,
    /// Social media handles
    Social,
    /// Street addresses
    Address,
    /// Web URLs
    Url,
}

impl PiiCategory {
    /// Every category, in detector order
    pub const ALL: [PiiCategory; 6] = [
        PiiCategory::Name,
        PiiCategory::Email,
        PiiCategory::Phone,
        PiiCategory::Social,
        PiiCategory::Address,
        PiiCategory::Url,
    ];

    /// Lowercase tag used in configs and logs
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Social => "social",
            Self::Address => "address",
            Self::Url => "url",
        }
    }

    /// Literal token substituted for a match of this category
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "[NAME_REMOVED]",
            Self::Email => "[EMAIL_REMOVED]",
            Self::Phone => "[PHONE_REMOVED]",
            Self::Social => "[SOCIAL_REMOVED]",
            Self::Address => "[ADDRESS_REMOVED]",
            Self::Url => "[URL_REMOVED]",
        }
    }

    /// URLs are redacted but never counted as removed PII.
    pub fn counts_toward_total(&self) -> bool {
        !matches!(self, Self::Url)
    }
}

impl std::fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Raw match counts for one message, keyed by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCounts(BTreeMap<PiiCategory, usize>);

impl CategoryCounts {
    /// Create empty counts
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` matches to `category`
    pub fn add(&mut self, category: PiiCategory, count: usize) {
        if count > 0 {
            *self.0.entry(category).or_insert(0) += count;
        }
    }

    /// Matches recorded for `category`
    pub fn get(&self, category: PiiCategory) -> usize {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// Sum over the categories that count toward the total
    pub fn total_removed(&self) -> usize {
        self.0
            .iter()
            .filter(|(category, _)| category.counts_toward_total())
            .map(|(_, count)| count)
            .sum()
    }

    /// True when nothing was matched
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|count| *count == 0)
    }

    /// Iterate non-zero counts in detector order
    pub fn iter(&self) -> impl Iterator<Item = (PiiCategory, usize)> + '_ {
        self.0.iter().map(|(category, count)| (*category, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(PiiCategory::Name.placeholder(), "[NAME_REMOVED]");
        assert_eq!(PiiCategory::Url.placeholder(), "[URL_REMOVED]");
    }

    #[test]
    fn test_all_is_sorted_in_detector_order() {
        let mut sorted = PiiCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, PiiCategory::ALL);
        assert_eq!(PiiCategory::ALL[0], PiiCategory::Name);
    }

    #[test]
    fn test_total_excludes_urls() {
        let mut counts = CategoryCounts::new();
        counts.add(PiiCategory::Email, 2);
        counts.add(PiiCategory::Url, 3);
        counts.add(PiiCategory::Name, 1);
        assert_eq!(counts.total_removed(), 3);
        assert_eq!(counts.get(PiiCategory::Url), 3);
    }

    #[test]
    fn test_zero_counts_not_stored() {
        let mut counts = CategoryCounts::new();
        counts.add(PiiCategory::Phone, 0);
        assert!(counts.is_empty());
        assert_eq!(counts.iter().count(), 0);
    }

    #[test]
    fn test_serializes_with_tags() {
        let mut counts = CategoryCounts::new();
        counts.add(PiiCategory::Social, 1);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"social":1}"#);
    }
}
