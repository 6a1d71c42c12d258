// Convoscrub - Structure-preserving PII redaction for conversation corpora
// Copyright (c) 2025 Convoscrub Contributors
// Licensed under the MIT License

use clap::Parser;
use convoscrub::cli::commands::EXIT_PROCESSING_ERROR;
use convoscrub::cli::{Cli, Commands};
use convoscrub::config::{load_config_or_default, LoggingConfig, ScrubConfig};
use convoscrub::domain::Result;
use convoscrub::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Loaded once and handed to the command; commands report config errors
    // themselves, so a broken file falls back to console logging here.
    let loaded = load_config_or_default(cli.config.as_deref());
    let (config_level, logging_config) = match &loaded {
        Ok(config) => (
            Some(config.application.log_level.clone()),
            config.logging.clone(),
        ),
        Err(_) => (None, LoggingConfig::default()),
    };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_PROCESSING_ERROR);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Convoscrub - PII redaction for conversation corpora"
    );

    // Create shutdown signal channel for graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to create SIGTERM handler");
                    if tokio::signal::ctrl_c().await.is_ok() {
                        notify_shutdown(&shutdown_tx, "SIGINT");
                    }
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => notify_shutdown(&shutdown_tx, "SIGINT"),
                _ = sigterm.recv() => notify_shutdown(&shutdown_tx, "SIGTERM"),
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                notify_shutdown(&shutdown_tx, "SIGINT");
            }
        }
    });

    let exit_code = match execute_command(&cli, &loaded, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            convoscrub::log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_PROCESSING_ERROR
        }
    };

    // Flush file logs before exiting
    drop(guard);
    process::exit(exit_code);
}

fn notify_shutdown(shutdown_tx: &watch::Sender<bool>, signal: &str) {
    tracing::info!(signal, "Shutdown signal received, finishing files in flight");
    println!("\n⚠️  Shutdown signal received, finishing files in flight...");
    let _ = shutdown_tx.send(true);
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    loaded: &Result<ScrubConfig>,
    shutdown_signal: watch::Receiver<bool>,
) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Anonymize(args) => args.execute(loaded).await,
        Commands::Batch(args) => args.execute(loaded, shutdown_signal).await,
        Commands::ValidateConfig(args) => args.execute(cli.config.as_deref(), loaded).await,
        Commands::Init(args) => args.execute().await,
    }
}
