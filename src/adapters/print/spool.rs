//! Spool-directory print pipeline

use super::{PrintJob, PrintPipeline, PrintReceipt};
use crate::config::PrintConfig;
use crate::domain::{PrismError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Writes each job to `<spool_dir>/<job-stem>.html` and optionally runs a print
/// command with the spooled path appended
#[derive(Debug, Clone)]
pub struct SpoolPrintPipeline {
    spool_dir: PathBuf,
    command: Vec<String>,
}

impl SpoolPrintPipeline {
    pub fn new(spool_dir: impl Into<PathBuf>) -> Self {
        Self {
            spool_dir: spool_dir.into(),
            command: Vec::new(),
        }
    }

    pub fn from_config(config: &PrintConfig) -> Self {
        Self::new(config.spool_dir.clone()).with_command(config.command.clone())
    }

    /// Program and leading arguments, e.g. `["lp", "-d", "office"]`
    pub fn with_command(mut self, command: Vec<String>) -> Self {
        self.command = command;
        self
    }

    async fn run_command(&self, path: &Path) -> Result<()> {
        let Some((program, args)) = self.command.split_first() else {
            return Ok(());
        };

        let output = Command::new(program)
            .args(args)
            .arg(path)
            .output()
            .await
            .map_err(|e| {
                PrismError::Io(format!("failed to start print command '{program}': {e}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PrismError::Io(format!(
                "print command '{program}' exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl PrintPipeline for SpoolPrintPipeline {
    async fn submit(&self, job: &PrintJob) -> Result<PrintReceipt> {
        tokio::fs::create_dir_all(&self.spool_dir).await?;

        let path = self.spool_dir.join(format!("{}.html", job.stem()));
        tokio::fs::write(&path, job.html.as_bytes()).await?;

        tracing::info!(
            job = %job.name,
            path = %path.display(),
            "Print job spooled"
        );

        self.run_command(&path).await?;

        Ok(PrintReceipt {
            spooled_path: Some(path),
        })
    }
}
