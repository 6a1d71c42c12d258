//! Lexicon-backed person-name recognizer
//!
//! A model is a TOML file listing given names, surnames, honorifics and
//! surname connectors for one language. Spanish and English models ship with
//! the binary; a models directory can override or add languages.
//!
//! A name starts at a capitalized given name, or at a capitalized surname
//! directly after an honorific, and extends over following capitalized
//! given names and surnames. Connector runs ("de la") are kept when a
//! capitalized surname follows them.

use super::{EntityRecognizer, EntitySpan};
use crate::domain::{Result, ScrubError};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const BUNDLED_EN: &str = include_str!("../../../models/en.toml");
const BUNDLED_ES: &str = include_str!("../../../models/es.toml");

/// Recognizer model definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconModel {
    /// ISO 639-1 language code
    pub language: String,
    /// Titles that may precede a name ("Dr", "Sra")
    #[serde(default)]
    pub honorifics: Vec<String>,
    /// Lowercase particles joining surnames ("de", "van")
    #[serde(default)]
    pub connectors: Vec<String>,
    /// First names
    pub given_names: Vec<String>,
    /// Family names
    #[serde(default)]
    pub surnames: Vec<String>,
}

impl LexiconModel {
    /// Parse a model from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let model: LexiconModel = toml::from_str(content)
            .map_err(|e| ScrubError::Configuration(format!("Invalid recognizer model: {e}")))?;
        if model.given_names.is_empty() {
            return Err(ScrubError::Configuration(format!(
                "Recognizer model '{}' has no given names",
                model.language
            )));
        }
        Ok(model)
    }

    /// TOML source of a model shipped with the binary
    pub fn bundled(language: &str) -> Option<&'static str> {
        match language {
            "en" => Some(BUNDLED_EN),
            "es" => Some(BUNDLED_ES),
            _ => None,
        }
    }

    /// Load the model for `language`
    ///
    /// With a models directory, `<dir>/<language>.toml` is used and a missing
    /// file means the model is unavailable. Without one, the bundled model is
    /// used if there is one.
    ///
    /// # Errors
    ///
    /// A model file that exists but cannot be read or parsed is a
    /// configuration error.
    pub fn load(language: &str, models_dir: Option<&Path>) -> Result<Option<Self>> {
        match models_dir {
            Some(dir) => {
                let path = dir.join(format!("{language}.toml"));
                if !path.exists() {
                    return Ok(None);
                }
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    ScrubError::Configuration(format!(
                        "Failed to read recognizer model {}: {e}",
                        path.display()
                    ))
                })?;
                Self::from_toml(&content).map(Some)
            }
            None => Self::bundled(language).map(Self::from_toml).transpose(),
        }
    }
}

#[derive(Debug)]
struct Token {
    start: usize,
    end: usize,
    lower: String,
    capitalized: bool,
}

/// Person-name recognizer driven by a [`LexiconModel`]
#[derive(Debug)]
pub struct LexiconRecognizer {
    model_name: String,
    given_names: HashSet<String>,
    surnames: HashSet<String>,
    honorifics: HashSet<String>,
    connectors: HashSet<String>,
    tokenizer: Regex,
}

impl LexiconRecognizer {
    /// Build a recognizer from a loaded model
    pub fn new(model: LexiconModel) -> Result<Self> {
        let lower_set = |words: &[String]| -> HashSet<String> {
            words.iter().map(|w| w.trim().to_lowercase()).collect()
        };

        Ok(Self {
            model_name: format!("lexicon-{}", model.language),
            given_names: lower_set(&model.given_names),
            surnames: lower_set(&model.surnames),
            honorifics: lower_set(&model.honorifics),
            connectors: lower_set(&model.connectors),
            tokenizer: Regex::new(r"[\p{L}\p{M}][\p{L}\p{M}'’-]*")?,
        })
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenizer
            .find_iter(text)
            .map(|m| Token {
                start: m.start(),
                end: m.end(),
                lower: m.as_str().to_lowercase(),
                capitalized: m.as_str().chars().next().is_some_and(char::is_uppercase),
            })
            .collect()
    }

    fn is_name_part(&self, token: &Token) -> bool {
        token.capitalized
            && (self.given_names.contains(&token.lower) || self.surnames.contains(&token.lower))
    }

    fn is_honorific(&self, text: &str, prev: &Token, token: &Token) -> bool {
        if !prev.capitalized || !self.honorifics.contains(&prev.lower) {
            return false;
        }
        let gap = &text[prev.end..token.start];
        let rest = gap.strip_prefix('.').unwrap_or(gap);
        !rest.is_empty() && rest.chars().all(char::is_whitespace)
    }
}

/// True when only whitespace separates two tokens
fn adjacent(text: &str, left: &Token, right: &Token) -> bool {
    let gap = &text[left.end..right.start];
    !gap.is_empty() && gap.chars().all(char::is_whitespace)
}

impl EntityRecognizer for LexiconRecognizer {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn find_person_names(&self, text: &str) -> Vec<EntitySpan> {
        let tokens = self.tokenize(text);
        let mut spans = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            let honorific = i > 0 && self.is_honorific(text, &tokens[i - 1], token);
            let starts = token.capitalized
                && (self.given_names.contains(&token.lower)
                    || (honorific && self.surnames.contains(&token.lower)));
            if !starts {
                i += 1;
                continue;
            }

            let mut last = i;
            let mut j = i + 1;
            while j < tokens.len() && adjacent(text, &tokens[last], &tokens[j]) {
                if self.is_name_part(&tokens[j]) {
                    last = j;
                    j += 1;
                    continue;
                }

                let mut k = j;
                while k < tokens.len()
                    && self.connectors.contains(&tokens[k].lower)
                    && adjacent(text, &tokens[k - 1], &tokens[k])
                {
                    k += 1;
                }
                if k > j
                    && k < tokens.len()
                    && adjacent(text, &tokens[k - 1], &tokens[k])
                    && tokens[k].capitalized
                    && self.surnames.contains(&tokens[k].lower)
                {
                    last = k;
                    j = k + 1;
                    continue;
                }
                break;
            }

            let start = if honorific {
                tokens[i - 1].start
            } else {
                token.start
            };
            let end = tokens[last].end;
            spans.push(EntitySpan {
                start,
                end,
                text: text[start..end].to_string(),
            });
            i = last + 1;
        }

        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer(language: &str) -> LexiconRecognizer {
        let model = LexiconModel::load(language, None).unwrap().unwrap();
        LexiconRecognizer::new(model).unwrap()
    }

    fn names(recognizer: &LexiconRecognizer, text: &str) -> Vec<String> {
        recognizer
            .find_person_names(text)
            .into_iter()
            .map(|span| span.text)
            .collect()
    }

    #[test]
    fn test_honorific_and_full_name() {
        let found = names(&recognizer("en"), "Dr. James Thompson will call you");
        assert_eq!(found, vec!["Dr. James Thompson"]);
    }

    #[test]
    fn test_single_given_name() {
        let found = names(&recognizer("en"), "Thanks James, see you later");
        assert_eq!(found, vec!["James"]);
    }

    #[test]
    fn test_spanish_surname_after_honorific_and_connectors() {
        let found = names(
            &recognizer("es"),
            "Hablé con la Sra. Pérez y con José Luis de la Cruz ayer",
        );
        assert_eq!(found, vec!["Sra. Pérez", "José Luis de la Cruz"]);
    }

    #[test]
    fn test_lowercase_and_placeholders_ignored() {
        let r = recognizer("en");
        assert!(names(&r, "james said hi").is_empty());
        assert!(names(&r, "Hi [NAME_REMOVED], I'm [NAME_REMOVED]").is_empty());
    }

    #[test]
    fn test_span_offsets_match_text() {
        let text = "Llámale a María mañana";
        for span in recognizer("es").find_person_names(text) {
            assert_eq!(&text[span.start..span.end], span.text);
        }
    }

    #[test]
    fn test_unknown_language_has_no_bundled_model() {
        assert!(LexiconModel::load("fr", None).unwrap().is_none());
    }

    #[test]
    fn test_models_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("fr.toml"),
            "language = \"fr\"\ngiven_names = [\"Amélie\"]\n",
        )
        .unwrap();

        let model = LexiconModel::load("fr", Some(dir.path())).unwrap().unwrap();
        let found = names(&LexiconRecognizer::new(model).unwrap(), "Bonjour Amélie");
        assert_eq!(found, vec!["Amélie"]);

        // Missing file in an explicit directory means unavailable
        assert!(LexiconModel::load("en", Some(dir.path())).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_model_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.toml"), "language = ").unwrap();
        let err = LexiconModel::load("en", Some(dir.path())).unwrap_err();
        assert!(matches!(err, ScrubError::Configuration(_)));
    }
}
