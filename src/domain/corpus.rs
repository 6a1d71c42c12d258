//! Corpus shape model
//!
//! A corpus is either a single conversation object or an array of
//! conversation objects. Conversations and messages stay as raw JSON maps so
//! that every field we do not understand passes through untouched and in its
//! original key order.

use super::errors::ScrubError;
use super::result::Result;
use serde_json::{Map, Value};

/// Field holding a conversation's ordered messages
pub const MESSAGES_FIELD: &str = "messages";
/// Field holding a message's free text
pub const TEXT_FIELD: &str = "text";
/// Field used to identify a message in audit entries
pub const MESSAGE_ID_FIELD: &str = "message_id";
/// Audit flag stamped on messages whose text changed
pub const ANONYMIZED_FIELD: &str = "_anonymized";
/// Audit count stamped on messages whose text changed
pub const PII_REMOVED_COUNT_FIELD: &str = "_pii_removed_count";
/// Provenance field written by the PII injection fixtures
pub const TEST_PROVENANCE_FIELD: &str = "_test_pii_added";

/// A conversation object
pub type Conversation = Map<String, Value>;

/// Root shape of a corpus document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusShape {
    /// A single conversation object
    Single,
    /// An array of conversation objects
    Collection,
}

/// A parsed corpus, validated against the two accepted root shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Corpus {
    /// Root object with a `messages` field
    Single(Conversation),
    /// Root array of conversations
    Collection(Vec<Conversation>),
}

impl Corpus {
    /// Classify a parsed JSON document
    ///
    /// `source` names the document in the error (a path, or `<inline>`).
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::UnexpectedStructure`] when the root is a scalar,
    /// an object without `messages`, an array holding anything other than
    /// objects, or when a `messages` field is not an array.
    pub fn from_value(value: Value, source: &str) -> Result<Self> {
        let unexpected = || ScrubError::UnexpectedStructure(source.to_string());

        match value {
            Value::Array(items) => {
                let mut conversations = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(map) => {
                            if !messages_well_formed(&map) {
                                return Err(unexpected());
                            }
                            conversations.push(map);
                        }
                        _ => return Err(unexpected()),
                    }
                }
                Ok(Corpus::Collection(conversations))
            }
            Value::Object(map) if map.contains_key(MESSAGES_FIELD) => {
                if !messages_well_formed(&map) {
                    return Err(unexpected());
                }
                Ok(Corpus::Single(map))
            }
            _ => Err(unexpected()),
        }
    }

    /// Root shape of this corpus
    pub fn shape(&self) -> CorpusShape {
        match self {
            Corpus::Single(_) => CorpusShape::Single,
            Corpus::Collection(_) => CorpusShape::Collection,
        }
    }

    /// All conversations, in order
    pub fn conversations(&self) -> &[Conversation] {
        match self {
            Corpus::Single(conversation) => std::slice::from_ref(conversation),
            Corpus::Collection(conversations) => conversations,
        }
    }

    /// Transform every conversation in order while keeping the root shape
    pub fn map_conversations<F>(self, mut f: F) -> Corpus
    where
        F: FnMut(Conversation) -> Conversation,
    {
        match self {
            Corpus::Single(conversation) => Corpus::Single(f(conversation)),
            Corpus::Collection(conversations) => {
                Corpus::Collection(conversations.into_iter().map(f).collect())
            }
        }
    }

    /// Convert back into a JSON document of the same shape
    pub fn into_value(self) -> Value {
        match self {
            Corpus::Single(conversation) => Value::Object(conversation),
            Corpus::Collection(conversations) => {
                Value::Array(conversations.into_iter().map(Value::Object).collect())
            }
        }
    }
}

/// A missing `messages` field is tolerated; a non-array one is not.
fn messages_well_formed(conversation: &Conversation) -> bool {
    match conversation.get(MESSAGES_FIELD) {
        None => true,
        Some(messages) => messages.is_array(),
    }
}

/// Identifier of a message for audit entries, `unknown` when absent
pub fn message_id(message: &Map<String, Value>) -> String {
    match message.get(MESSAGE_ID_FIELD) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    }
}
