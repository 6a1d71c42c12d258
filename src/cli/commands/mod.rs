//! CLI command implementations
//!
//! Exit codes: 0 success, 1 a file could not be processed, 2 configuration
//! error.

pub mod anonymize;
pub mod batch;
pub mod init;
pub mod validate;

use crate::anonymization::audit::{AuditLogger, AuditSink, NoopAuditSink};
use crate::anonymization::config::AuditConfig;
use crate::config::ScrubConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Exit code for a successful run
pub const EXIT_OK: i32 = 0;
/// Exit code when at least one file failed
pub const EXIT_PROCESSING_ERROR: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Copy the loaded configuration and apply the `--no-ner` switch
///
/// Prints the error and returns `None` when the configuration is unusable.
fn config_for_run(loaded: &Result<ScrubConfig>, no_ner: bool) -> Option<ScrubConfig> {
    let mut config = match loaded {
        Ok(config) => config.clone(),
        Err(e) => {
            tracing::error!(error = %e, "Configuration load failed");
            eprintln!("❌ {e}");
            return None;
        }
    };

    if no_ner {
        tracing::info!("Name recognizer disabled from CLI");
        config.anonymization.aggressive_mode = false;
    }

    Some(config)
}

/// Audit sink for a run; dry runs and disabled audit get a no-op sink
fn audit_sink(config: &AuditConfig, dry_run: bool) -> Result<Arc<dyn AuditSink>> {
    if dry_run {
        return Ok(Arc::new(NoopAuditSink));
    }
    Ok(match AuditLogger::from_config(config)? {
        Some(logger) => {
            tracing::info!(log_path = %logger.log_path().display(), "Audit logging enabled");
            Arc::new(logger)
        }
        None => Arc::new(NoopAuditSink),
    })
}
