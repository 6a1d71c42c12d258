//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for convoscrub using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// convoscrub - structure-preserving PII redaction for conversation corpora
#[derive(Parser, Debug)]
#[command(name = "convoscrub")]
#[command(version, about, long_about = None)]
#[command(author = "Convoscrub Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, env = "CONVOSCRUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CONVOSCRUB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redact one corpus file
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Redact every .json file in a directory
    Batch(commands::batch::BatchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from([
            "convoscrub",
            "anonymize",
            "--input",
            "raw.json",
            "--output",
            "clean.json",
            "--no-ner",
        ]);
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.input, Path::new("raw.json"));
                assert_eq!(args.output.as_deref(), Some(Path::new("clean.json")));
                assert!(args.no_ner);
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_anonymize_requires_output_unless_dry_run() {
        assert!(Cli::try_parse_from(["convoscrub", "anonymize", "-i", "raw.json"]).is_err());
        let cli = Cli::try_parse_from(["convoscrub", "anonymize", "-i", "raw.json", "--dry-run"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Anonymize(ref a) if a.dry_run && a.output.is_none()));
    }

    #[test]
    fn test_cli_parse_batch() {
        let cli = Cli::parse_from([
            "convoscrub",
            "batch",
            "--input-dir",
            "data/raw",
            "--output-dir",
            "data/clean",
            "--parallel",
            "8",
        ]);
        match cli.command {
            Commands::Batch(args) => {
                assert_eq!(args.input_dir, Path::new("data/raw"));
                assert_eq!(args.output_dir, Path::new("data/clean"));
                assert_eq!(args.parallel, Some(8));
                assert!(!args.no_ner);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config_and_log_level() {
        let cli = Cli::parse_from([
            "convoscrub",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "validate-config",
        ]);
        assert_eq!(cli.config.as_deref(), Some(Path::new("custom.toml")));
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["convoscrub", "init"]);
        assert!(matches!(cli.command, Commands::Init(ref a) if a.output == Path::new("convoscrub.toml")));
    }
}
