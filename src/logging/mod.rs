//! Logging and observability
//!
//! This module provides structured logging with:
//! - Console output on stderr
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use convoscrub::logging::init_logging;
//! use convoscrub::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a file run
///
/// # Example
///
/// ```no_run
/// use convoscrub::log_file_start;
/// use std::path::Path;
///
/// log_file_start!(Path::new("raw/chats.json"), Path::new("clean/chats.json"));
/// ```
#[macro_export]
macro_rules! log_file_start {
    ($input:expr, $output:expr) => {
        tracing::info!(
            input_file = %$input.display(),
            output_file = %$output.display(),
            "Starting anonymization"
        );
    };
}

/// Log the completion of a file run
///
/// # Example
///
/// ```no_run
/// use convoscrub::log_file_complete;
/// use convoscrub::anonymization::models::Statistics;
/// use std::path::Path;
/// use std::time::Duration;
///
/// let stats = Statistics::default();
/// log_file_complete!(Path::new("raw/chats.json"), &stats, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_file_complete {
    ($input:expr, $stats:expr, $duration:expr) => {
        tracing::info!(
            input_file = %$input.display(),
            total_pii_removed = $stats.total_pii_removed,
            names_removed = $stats.names_removed,
            emails_removed = $stats.emails_removed,
            phones_removed = $stats.phones_removed,
            socials_removed = $stats.socials_removed,
            addresses_removed = $stats.addresses_removed,
            duration_ms = $duration.as_millis() as u64,
            "Anonymization completed"
        );
    };
}

/// Log one redacted message, by id only
///
/// # Example
///
/// ```no_run
/// use convoscrub::log_message_redacted;
///
/// log_message_redacted!("msg-42", 3);
/// ```
#[macro_export]
macro_rules! log_message_redacted {
    ($message_id:expr, $removed:expr) => {
        tracing::debug!(
            message_id = %$message_id,
            pii_removed_count = $removed,
            "Message redacted"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use convoscrub::log_error_with_context;
/// use convoscrub::domain::ScrubError;
///
/// let error = ScrubError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::anonymization::models::Statistics;
    use crate::domain::ScrubError;
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn test_macros_expand() {
        let input = Path::new("raw/chats.json");
        let stats = Statistics::default();
        log_file_start!(input, Path::new("clean/chats.json"));
        log_file_complete!(input, &stats, Duration::from_millis(5));
        log_message_redacted!("msg-1", 2usize);
        log_error_with_context!(&ScrubError::Io("disk full".into()), "write failed");
    }
}
