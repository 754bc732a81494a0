// Prism - Data-Quality Report Export Engine
// Copyright (c) 2025 Prism Contributors
// Licensed under the MIT License

//! # Prism - Data-Quality Report Export Engine
//!
//! Prism turns a data-quality summary into a downloadable report in one of three
//! formats, falling back to an alternative renderer when the primary one is
//! unavailable, and reports every export with a single user-facing notification.
//!
//! ## Overview
//!
//! - **Document**: single-page PDF from a dynamically loaded document engine,
//!   falling back to a printable HTML page handed to the print pipeline
//! - **Spreadsheet**: `;`-separated rows with a qualitative status column
//! - **FlatText**: `;`-separated rows with a date column
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Renderers, fallback coordination, orchestration, notifications
//! - [`adapters`] - Metrics API, download location, print pipeline
//! - [`domain`] - Summaries, requests, outcomes and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prism::adapters::metrics_api::{MetricsApiClient, SummaryProvider};
//! use prism::config::load_config_or_default;
//! use prism::core::export::create_orchestrator;
//! use prism::core::notify::ConsoleNotifier;
//! use prism::domain::{ExportFormat, ExportRequest};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("prism.toml")?;
//!
//!     let summary = MetricsApiClient::new(&config.api)?.fetch_summary().await?;
//!     let orchestrator = create_orchestrator(&config, Arc::new(ConsoleNotifier));
//!
//!     let request = ExportRequest::new(ExportFormat::Document).with_partial_summary(summary);
//!     let outcome = orchestrator.export(&request).await?;
//!
//!     println!("{outcome}");
//!     Ok(())
//! }
//! ```
//!
//! ## Outcomes
//!
//! Every accepted export ends in exactly one [`domain::ExportOutcome`]:
//! `Success` when the primary renderer produced the artifact, `Degraded` when a
//! fallback did, and `Failure` otherwise. A call made while another export is
//! running is rejected with [`domain::ExportRejected`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
