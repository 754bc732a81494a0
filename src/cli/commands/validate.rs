//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after applying overrides
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Metrics API: {}{} (timeout {}s)",
            config.api.base_url.trim_end_matches('/'),
            config.api.summary_path,
            config.api.timeout_seconds
        );
        println!("  Filename Base: {}", config.export.filename_base);
        println!("  Output Directory: {}", config.export.output_dir.display());
        println!("  Strict Summary: {}", config.export.strict_summary);
        println!("  Document Engine: {:?}", config.document.engine);
        println!(
            "  Engine Load Timeout: {}",
            config
                .document
                .load_timeout()
                .map(|t| format!("{}s", t.as_secs()))
                .unwrap_or_else(|| "none".to_string())
        );
        println!("  Print Spool: {}", config.print.spool_dir.display());
        if !config.print.command.is_empty() {
            println!("  Print Command: {}", config.print.command.join(" "));
        }
        println!(
            "  Notification Dismissal: {}s",
            config.notifications.auto_dismiss_secs
        );
        println!();
        Ok(0)
    }
}
