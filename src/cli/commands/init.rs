//! Init command implementation
//!
//! Writes a starter `prism.toml`.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "prism.toml")]
    pub output: String,

    /// Include commented optional settings
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Prism configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [api].base_url at your metrics API");
                println!("  2. Validate configuration: prism validate-config");
                println!("  3. Run an export: prism export --format pdf --fetch");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# Prism Configuration File
# Data-quality report export engine

[application]
log_level = "info"

[api]
base_url = "http://localhost:5001"
summary_path = "/api/quality-summary"
timeout_seconds = 10

[export]
filename_base = "data_quality_report"
output_dir = "./exports"
strict_summary = false

[document]
engine = "builtin"
load_timeout_seconds = 10

[print]
spool_dir = "./exports/print"

[notifications]
auto_dismiss_secs = 5

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# Prism Configuration File
# Data-quality report export engine
#
# Values may reference environment variables with ${VAR_NAME}.
# Every key can also be overridden with PRISM_<SECTION>_<KEY>,
# e.g. PRISM_API_BASE_URL or PRISM_EXPORT_OUTPUT_DIR.

[application]
# trace | debug | info | warn | error (RUST_LOG takes precedence)
log_level = "info"

[api]
# Metrics API serving {"success": bool, "summary": {...}}
base_url = "http://localhost:5001"
# base_url = "${PRISM_METRICS_URL}"
summary_path = "/api/quality-summary"
timeout_seconds = 10

[export]
# Artifacts are named <filename_base>_<YYYY-MM-DD>.<ext>
filename_base = "data_quality_report"
output_dir = "./exports"
# true: fail when no summary is available instead of using default values
strict_summary = false

[document]
# builtin | disabled (disabled always uses the print fallback)
engine = "builtin"
# 0 disables the limit
load_timeout_seconds = 10

[print]
# Print fallback jobs are written here as <name>.html
spool_dir = "./exports/print"
# Optional command run with the spooled file appended
# command = ["lp", "-d", "office"]

[notifications]
auto_dismiss_secs = 5

[logging]
# JSON log files with rotation (daily | hourly | never)
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrismConfig;
    use tempfile::TempDir;

    #[test]
    fn test_templates_parse_and_validate() {
        for template in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: PrismConfig = toml::from_str(&template).unwrap();
            assert!(config.validate().is_ok());
            assert_eq!(config.export.filename_base, "data_quality_report");
        }
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prism.toml");
        fs::write(&path, "# existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# existing");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[export]"));
    }
}
