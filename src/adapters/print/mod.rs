//! Print pipeline adapter
//!
//! The print pipeline is the environment's "open for printing" facility. The
//! document fallback renderer hands it an HTML page; what happens next (spooling,
//! a print dialog, a system print command) is up to the implementation.

pub mod spool;

pub use spool::SpoolPrintPipeline;

use crate::domain::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// A document submitted for printing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    /// Job name shown to the user, e.g. `data_quality_report_2024-06-01.pdf`
    pub name: String,

    /// Complete HTML page to print
    pub html: String,
}

impl PrintJob {
    pub fn new(name: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            html: html.into(),
        }
    }

    /// Job name without its extension
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }
}

/// Where a print job ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintReceipt {
    /// Spooled file, when the pipeline writes one
    pub spooled_path: Option<PathBuf>,
}

/// Print pipeline abstraction
#[async_trait]
pub trait PrintPipeline: Send + Sync {
    /// Submit a job
    ///
    /// # Errors
    ///
    /// Returns an error if the job could not be handed to the printing facility.
    async fn submit(&self, job: &PrintJob) -> Result<PrintReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_stem() {
        assert_eq!(PrintJob::new("report_2024-06-01.pdf", "").stem(), "report_2024-06-01");
        assert_eq!(PrintJob::new("report", "").stem(), "report");
        assert_eq!(PrintJob::new(".pdf", "").stem(), ".pdf");
    }
}
