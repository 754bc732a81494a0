//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PrismConfig;
use crate::domain::errors::PrismError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PrismConfig
/// 4. Applies environment variable overrides (PRISM_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// The validated `PrismConfig`
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsing or substitution fails,
/// or validation fails.
///
/// # Examples
///
/// ```no_run
/// use prism::config::loader::load_config;
///
/// let config = load_config("prism.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PrismConfig> {
    let path = path.as_ref();

    // Read file
    if !path.exists() {
        return Err(PrismError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PrismError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Substitute ${VAR} references before parsing
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: PrismConfig = toml::from_str(&contents)
        .map_err(|e| PrismError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    // PRISM_* overrides, then validation
    apply_env_overrides(&mut config);
    validate(&config)?;

    Ok(config)
}

/// Loads configuration from `path`, or built-in defaults when the file is absent
///
/// Environment overrides and validation apply in both cases. The CLI uses this so
/// `prism export` works without running `prism init` first.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file, which may not exist
///
/// # Errors
///
/// Returns an error if an existing file fails to load, or if the defaults with
/// overrides applied fail validation.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<PrismConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(
        path = %path.display(),
        "Configuration file not found, using defaults"
    );
    let mut config = PrismConfig::default();
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

fn validate(config: &PrismConfig) -> Result<()> {
    config.validate().map_err(|e| {
        PrismError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Arguments
///
/// * `input` - Raw TOML text
///
/// # Returns
///
/// The text with every placeholder replaced, one trailing newline per line
///
/// # Errors
///
/// Returns an error naming every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PrismError::Other(format!("Invalid substitution pattern: {e}")))?;
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
        return Err(PrismError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using PRISM_* prefix
///
/// Environment variables follow the pattern: PRISM_<SECTION>_<KEY>
/// For example: PRISM_API_BASE_URL, PRISM_EXPORT_OUTPUT_DIR
///
/// Numeric values that fail to parse are ignored. `PRISM_PRINT_COMMAND` is
/// split on whitespace.
fn apply_env_overrides(config: &mut PrismConfig) {
    // Application
    if let Ok(val) = std::env::var("PRISM_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API
    if let Ok(val) = std::env::var("PRISM_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("PRISM_API_SUMMARY_PATH") {
        config.api.summary_path = val;
    }
    if let Ok(val) = std::env::var("PRISM_API_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.api.timeout_seconds = timeout;
        }
    }

    // Export
    if let Ok(val) = std::env::var("PRISM_EXPORT_FILENAME_BASE") {
        config.export.filename_base = val;
    }
    if let Ok(val) = std::env::var("PRISM_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("PRISM_EXPORT_STRICT_SUMMARY") {
        config.export.strict_summary = val.parse().unwrap_or(false);
    }

    // Document
    if let Ok(val) = std::env::var("PRISM_DOCUMENT_ENGINE") {
        match val.to_lowercase().as_str() {
            "builtin" => config.document.engine = super::schema::DocumentEngineKind::Builtin,
            "disabled" => config.document.engine = super::schema::DocumentEngineKind::Disabled,
            other => tracing::warn!(value = %other, "Ignoring unknown PRISM_DOCUMENT_ENGINE"),
        }
    }
    if let Ok(val) = std::env::var("PRISM_DOCUMENT_LOAD_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.document.load_timeout_seconds = timeout;
        }
    }

    // Print
    if let Ok(val) = std::env::var("PRISM_PRINT_SPOOL_DIR") {
        config.print.spool_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("PRISM_PRINT_COMMAND") {
        config.print.command = val.split_whitespace().map(str::to_string).collect();
    }

    // Notifications
    if let Ok(val) = std::env::var("PRISM_NOTIFICATIONS_AUTO_DISMISS_SECS") {
        if let Ok(secs) = val.parse() {
            config.notifications.auto_dismiss_secs = secs;
        }
    }

    // Logging
    if let Ok(val) = std::env::var("PRISM_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PRISM_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PRISM_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("PRISM_LOADER_TEST_VAR", "test_value");
        let input = "base_url = \"${PRISM_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "base_url = \"test_value\"\n");
        std::env::remove_var("PRISM_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("PRISM_LOADER_MISSING_VAR");
        let input = "base_url = \"${PRISM_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("PRISM_LOADER_COMMENTED_VAR");
        let input = "# base_url = \"${PRISM_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-prism.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[api]
base_url = "https://metrics.example.com"

[export]
filename_base = "rapport_qualite"
output_dir = "/tmp/prism-exports"

[notifications]
auto_dismiss_secs = 3
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.api.base_url, "https://metrics.example.com");
        assert_eq!(config.export.filename_base, "rapport_qualite");
        assert_eq!(config.notifications.auto_dismiss_secs, 3);
    }

    #[test]
    fn test_load_config_invalid_values() {
        let toml_content = r#"
[application]
log_level = "loud"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }
}
