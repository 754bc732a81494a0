//! Download delivery adapter
//!
//! The download sink is the environment's download mechanism: it receives the
//! finished artifact bytes under the suggested file name.

pub mod filesystem;

pub use filesystem::FileSystemDownloads;

use crate::core::render::Artifact;
use crate::domain::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Proof of a completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Location of the delivered file
    pub path: PathBuf,

    /// Number of bytes written
    pub bytes: usize,

    /// Hex-encoded SHA-256 of the content
    pub sha256: String,
}

/// Download mechanism abstraction
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Deliver an artifact
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact could not be stored.
    async fn deliver(&self, artifact: &Artifact) -> Result<DeliveryReceipt>;
}
