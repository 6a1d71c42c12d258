//! Per-run redaction statistics

use super::category::{CategoryCounts, PiiCategory};
use serde::{Deserialize, Serialize};

/// Counters for one file or corpus run
///
/// `total_pii_removed` always equals the sum of the five category counters;
/// URLs have no counter and never reach the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Email addresses removed
    pub emails_removed: usize,
    /// Phone numbers removed
    pub phones_removed: usize,
    /// Names removed (dictionary and recognizer)
    pub names_removed: usize,
    /// Social handles removed
    pub socials_removed: usize,
    /// Street addresses removed
    pub addresses_removed: usize,
    /// Sum of the counters above
    pub total_pii_removed: usize,
}

impl Statistics {
    /// Create zeroed statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add one message's counts
    pub fn record(&mut self, counts: &CategoryCounts) {
        for (category, count) in counts.iter() {
            match category {
                PiiCategory::Name => self.names_removed += count,
                PiiCategory::Email => self.emails_removed += count,
                PiiCategory::Phone => self.phones_removed += count,
                PiiCategory::Social => self.socials_removed += count,
                PiiCategory::Address => self.addresses_removed += count,
                PiiCategory::Url => {}
            }
        }
        self.total_pii_removed += counts.total_removed();
    }

    /// Fold another run's statistics into this one (batch totals)
    pub fn merge(&mut self, other: &Statistics) {
        self.emails_removed += other.emails_removed;
        self.phones_removed += other.phones_removed;
        self.names_removed += other.names_removed;
        self.socials_removed += other.socials_removed;
        self.addresses_removed += other.addresses_removed;
        self.total_pii_removed += other.total_pii_removed;
    }

    /// Check the total against the category counters
    pub fn is_consistent(&self) -> bool {
        self.total_pii_removed
            == self.emails_removed
                + self.phones_removed
                + self.names_removed
                + self.socials_removed
                + self.addresses_removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(PiiCategory, usize)]) -> CategoryCounts {
        let mut counts = CategoryCounts::new();
        for (category, count) in pairs {
            counts.add(*category, *count);
        }
        counts
    }

    #[test]
    fn test_record_keeps_total_consistent() {
        let mut stats = Statistics::new();
        stats.record(&counts(&[
            (PiiCategory::Email, 1),
            (PiiCategory::Phone, 2),
            (PiiCategory::Url, 4),
        ]));
        stats.record(&counts(&[(PiiCategory::Name, 1), (PiiCategory::Address, 1)]));

        assert_eq!(stats.emails_removed, 1);
        assert_eq!(stats.phones_removed, 2);
        assert_eq!(stats.total_pii_removed, 5);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_reset() {
        let mut stats = Statistics::new();
        stats.record(&counts(&[(PiiCategory::Social, 3)]));
        stats.reset();
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn test_merge() {
        let mut a = Statistics::new();
        a.record(&counts(&[(PiiCategory::Email, 1)]));
        let mut b = Statistics::new();
        b.record(&counts(&[(PiiCategory::Phone, 2)]));
        a.merge(&b);
        assert_eq!(a.total_pii_removed, 3);
        assert!(a.is_consistent());
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(Statistics::new()).unwrap();
        for key in [
            "emails_removed",
            "phones_removed",
            "names_removed",
            "socials_removed",
            "addresses_removed",
            "total_pii_removed",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
