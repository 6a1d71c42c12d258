//! Data models shared by the detectors, the redactor and the walker

pub mod category;
pub mod statistics;

pub use category::{CategoryCounts, PiiCategory};
pub use statistics::Statistics;
