//! Domain models and types for convoscrub.
//!
//! The domain layer provides:
//! - **Corpus model** ([`Corpus`], [`CorpusShape`]) with root-shape detection
//! - **Error types** ([`ScrubError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible core operations return [`Result<T, ScrubError>`]:
//!
//! ```rust
//! use convoscrub::domain::{Corpus, Result};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let corpus = Corpus::from_value(json!({"messages": []}), "<inline>")?;
//!     assert_eq!(corpus.conversations().len(), 1);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod corpus;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use corpus::{Conversation, Corpus, CorpusShape};
pub use errors::ScrubError;
pub use result::Result;
