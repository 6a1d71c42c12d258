//! Pattern library for PII detection
//!
//! Every pattern is compiled case-insensitively. The name pattern is built
//! from a bilingual dictionary and matches two consecutive dictionary words.

use crate::anonymization::models::PiiCategory;

/// Common English and Spanish first and last names
pub const COMMON_NAMES: &[&str] = &[
    // English names
    "John", "Mary", "David", "Jennifer", "Michael", "Sarah", "Robert", "Lisa",
    "James", "Emily", "Andrew", "Jessica", "Smith", "Johnson", "Brown", "Davis",
    "Wilson", "Miller", "Taylor", "Anderson", "Thompson", "White", "Martinez", "Garcia",
    // Spanish names
    "Juan", "María", "Carlos", "Ana", "Pedro", "Laura", "Miguel", "Isabel",
    "Pérez", "García", "López", "Martínez", "Sánchez", "Rodríguez", "Hernández", "González",
];

/// local-part@domain.tld with at least two letters of TLD
pub const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b";

/// Union of the supported phone layouts
pub const PHONE_PATTERN: &str = concat!(
    r"(?:",
    r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b|",             // 555-123-4567 or 555.123.4567
    r"\(\d{3}\)\s*\d{3}[-.]?\d{4}|",               // (555) 123-4567
    r"\+\d{1,3}\s?\d{3}\s?\d{3}\s?\d{4}|",         // +52 867 123 4567
    r"\b\d{10}\b|",                                // 5551234567
    r"(?:Tel|Cel|Cell|Phone|WhatsApp):\s*[\d\s\-\+\(\)]+\b", // Tel: 555-1234
    r")",
);

/// Bare @handle or a labeled platform reference
pub const SOCIAL_PATTERN: &str = concat!(
    r"(?:",
    r"@[A-Za-z0-9_]+|",
    r"(?:IG|Instagram|Twitter|FB|Facebook|Snap|Snapchat):\s*@?[A-Za-z0-9_.]+",
    r")",
);

/// House number, words, street type (English or Spanish), rest of the
/// sentence and an optional postal code
pub const ADDRESS_PATTERN: &str = concat!(
    r"\b\d+\s+[A-Za-z\s]+",
    r"(?:Street|St|Avenue|Ave|Drive|Dr|Road|Rd|Boulevard|Blvd|Lane|Ln|Way|Court|Ct|",
    r"Plaza|Place|Pl|Calle|Avenida|Av|Privada|Col\.|Colonia)",
    r"\b[^.]*(?:\b\d{5}\b)?",
);

/// http(s) URI up to whitespace, a bracket or a quote
pub const URL_PATTERN: &str = r#"https?://[^\s<>"\{\}|\\^`\[\]]+"#;

/// Build the two-token name pattern from a dictionary
pub fn name_pattern<S: AsRef<str>>(names: &[S]) -> String {
    let alternation = names
        .iter()
        .map(|name| regex::escape(name.as_ref()))
        .collect::<Vec<_>>()
        .join("|");
    format!(r"\b(?:{alternation})\s+(?:{alternation})\b")
}

/// Case-insensitive source for a category's pattern
///
/// `names` is only consulted for [`PiiCategory::Name`].
pub fn pattern_for<S: AsRef<str>>(category: PiiCategory, names: &[S]) -> String {
    let body = match category {
        PiiCategory::Name => name_pattern(names),
        PiiCategory::Email => EMAIL_PATTERN.to_string(),
        PiiCategory::Phone => PHONE_PATTERN.to_string(),
        PiiCategory::Social => SOCIAL_PATTERN.to_string(),
        PiiCategory::Address => ADDRESS_PATTERN.to_string(),
        PiiCategory::Url => URL_PATTERN.to_string(),
    };
    format!("(?i){body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn compiled(category: PiiCategory) -> Regex {
        Regex::new(&pattern_for(category, COMMON_NAMES)).unwrap()
    }

    #[test]
    fn test_all_patterns_compile() {
        for category in PiiCategory::ALL {
            assert!(Regex::new(&pattern_for(category, COMMON_NAMES)).is_ok());
        }
    }

    #[test]
    fn test_email_pattern() {
        let re = compiled(PiiCategory::Email);
        assert!(re.is_match("test@example.com"));
        assert!(re.is_match("John.Smith@GMAIL.COM"));
        assert!(!re.is_match("not-an-email"));
        assert!(!re.is_match("user@host.c"));
    }

    #[test]
    fn test_name_pattern_needs_two_dictionary_words() {
        let re = compiled(PiiCategory::Name);
        assert!(re.is_match("Hi, I'm John Smith"));
        assert!(re.is_match("contact maría garcía"));
        assert!(!re.is_match("John went home"));
        assert!(!re.is_match("Johnny Smithers"));
    }

    #[test]
    fn test_name_pattern_escapes_dictionary() {
        let pattern = name_pattern(&["O.Neil", "Ray"]);
        let re = Regex::new(&pattern).unwrap();
        assert!(re.is_match("O.Neil Ray"));
        assert!(!re.is_match("OxNeil Ray"));
    }

    #[test]
    fn test_url_pattern_stops_at_brackets() {
        let re = compiled(PiiCategory::Url);
        let found = re.find("see <https://fanvue.com/me> now").unwrap();
        assert_eq!(found.as_str(), "https://fanvue.com/me");
    }

    #[test]
    fn test_address_pattern_spanish() {
        let re = compiled(PiiCategory::Address);
        assert!(re.is_match("Vivo en 45 Privada Calle Hidalgo 88000"));
        assert!(re.is_match("123 Main Street"));
    }
}
