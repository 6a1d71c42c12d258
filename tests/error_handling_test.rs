//! Error handling tests for corpus processing

use convoscrub::anonymization::audit::NoopAuditSink;
use convoscrub::anonymization::{AnonymizationConfig, CorpusWalker, MessageRedactor};
use convoscrub::domain::{Corpus, ScrubError};
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;
use test_case::test_case;

fn walker() -> CorpusWalker {
    let config = AnonymizationConfig {
        aggressive_mode: false,
        ..Default::default()
    };
    CorpusWalker::new(
        Arc::new(MessageRedactor::new(&config).unwrap()),
        Arc::new(NoopAuditSink),
    )
}

#[test_case("\"hello\"" ; "bare string")]
#[test_case("42" ; "number")]
#[test_case("null" ; "null")]
#[test_case(r#"{"conversation_id": "c1"}"# ; "object without messages")]
#[test_case(r#"{"messages": "hi"}"# ; "messages not an array")]
#[test_case(r#"[{"messages": []}, "stray"]"# ; "array with scalar")]
fn test_unexpected_root_writes_nothing(content: &str) {
    let dir = tempdir().unwrap();
    let input = dir.path().join("raw.json");
    let output = dir.path().join("clean.json");
    std::fs::write(&input, content).unwrap();

    let err = walker().process_file(&input, &output).unwrap_err();

    assert!(matches!(err, ScrubError::UnexpectedStructure(_)));
    assert!(err.to_string().contains("raw.json"));
    assert!(!output.exists());
    // No temp file left behind either
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_invalid_json_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("raw.json");
    let output = dir.path().join("clean.json");
    std::fs::write(&input, "{\"messages\": [{\"text\": ").unwrap();

    let err = walker().process_file(&input, &output).unwrap_err();
    assert!(matches!(err, ScrubError::Serialization(_)));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    let err = walker()
        .process_file(&dir.path().join("missing.json"), &dir.path().join("out.json"))
        .unwrap_err();
    assert!(matches!(err, ScrubError::Io(_)));
    assert!(err.to_string().contains("Input file not found"));
}

#[test]
fn test_unwritable_output_location() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("raw.json");
    std::fs::write(&input, r#"{"messages": []}"#).unwrap();

    // A regular file where the output directory should be
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    let err = walker()
        .process_file(&input, &blocker.join("clean.json"))
        .unwrap_err();
    assert!(matches!(err, ScrubError::Io(_)));
}

#[test]
fn test_error_messages_never_carry_text() {
    let err = Corpus::from_value(json!("john.smith@gmail.com"), "<inline>").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected data structure in <inline>");
}

#[test]
fn test_inline_scalar_root() {
    let err = walker().anonymize_value(json!(3.5), "<inline>").unwrap_err();
    assert!(matches!(err, ScrubError::UnexpectedStructure(ref source) if source == "<inline>"));
}
