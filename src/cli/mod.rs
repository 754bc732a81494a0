//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Prism using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Prism - Data-Quality Report Export Engine
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(version, about, long_about = None)]
#[command(author = "Prism Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "prism.toml", env = "PRISM_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PRISM_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the quality report as PDF, spreadsheet CSV or flat CSV
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
