//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ScrubConfig;
use crate::domain::errors::ScrubError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ScrubConfig
/// 4. Applies environment variable overrides (CONVOSCRUB_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use convoscrub::config::loader::load_config;
///
/// let config = load_config("convoscrub.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ScrubConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ScrubError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ScrubError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: ScrubConfig = toml::from_str(&contents)
        .map_err(|e| ScrubError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

/// Loads `path` when given, otherwise starts from defaults
///
/// Environment overrides and validation apply either way.
pub fn load_config_or_default(path: Option<&Path>) -> Result<ScrubConfig> {
    match path {
        Some(path) => load_config(path),
        None => finish(ScrubConfig::default()),
    }
}

fn finish(mut config: ScrubConfig) -> Result<ScrubConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ScrubError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ScrubError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using CONVOSCRUB_* prefix
///
/// Environment variables follow the pattern: CONVOSCRUB_<SECTION>_<KEY>
/// For example: CONVOSCRUB_APPLICATION_LOG_LEVEL, CONVOSCRUB_BATCH_PARALLEL_FILES
fn apply_env_overrides(config: &mut ScrubConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("CONVOSCRUB_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Anonymization overrides
    config.anonymization.apply_env_overrides()?;

    // Logging overrides
    if let Ok(val) = std::env::var("CONVOSCRUB_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CONVOSCRUB_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val.into();
    }
    if let Ok(val) = std::env::var("CONVOSCRUB_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    // Batch overrides
    if let Ok(val) = std::env::var("CONVOSCRUB_BATCH_PARALLEL_FILES") {
        config.batch.parallel_files = val.parse().map_err(|_| {
            ScrubError::Configuration(format!("Invalid CONVOSCRUB_BATCH_PARALLEL_FILES value: {val}"))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CONVOSCRUB_TEST_AUDIT_DIR", "/tmp/audit");
        let input = "log_path = \"${CONVOSCRUB_TEST_AUDIT_DIR}/anonymization.log\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "log_path = \"/tmp/audit/anonymization.log\"\n");
        std::env::remove_var("CONVOSCRUB_TEST_AUDIT_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CONVOSCRUB_TEST_MISSING_VAR");
        let input = "models_dir = \"${CONVOSCRUB_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CONVOSCRUB_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("CONVOSCRUB_TEST_COMMENTED");
        let input = "# models_dir = \"${CONVOSCRUB_TEST_COMMENTED}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[anonymization]
aggressive_mode = false
extra_names = ["Xochitl", "Itzel"]

[anonymization.recognizer]
primary_language = "en"
fallback_language = "es"

[anonymization.audit]
enabled = false

[batch]
parallel_files = 2
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert!(!config.anonymization.aggressive_mode);
        assert_eq!(config.anonymization.extra_names, vec!["Xochitl", "Itzel"]);
        assert_eq!(config.anonymization.recognizer.primary_language, "en");
        assert!(!config.anonymization.audit.enabled);
        assert_eq!(config.batch.parallel_files, 2);
    }

    #[test]
    fn test_load_config_invalid_value() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[batch]\nparallel_files = 0\n")
            .unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(matches!(err, ScrubError::Configuration(ref msg) if msg.contains("parallel_files")));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = load_config_or_default(None).unwrap();
        assert_eq!(config.batch.parallel_files, 4);
        assert!(config.anonymization.aggressive_mode);
    }
}
