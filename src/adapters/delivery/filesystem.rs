//! Download sink backed by a local directory

use super::{DeliveryReceipt, DownloadSink};
use crate::core::render::Artifact;
use crate::domain::{PrismError, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Writes artifacts into an output directory, creating it on demand
///
/// An existing file with the same name is overwritten, like a browser download
/// would be by a second export on the same day.
#[derive(Debug, Clone)]
pub struct FileSystemDownloads {
    output_dir: PathBuf,
}

impl FileSystemDownloads {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl DownloadSink for FileSystemDownloads {
    async fn deliver(&self, artifact: &Artifact) -> Result<DeliveryReceipt> {
        if artifact.filename.contains(['/', '\\']) {
            return Err(PrismError::Validation(format!(
                "artifact filename '{}' must not contain path separators",
                artifact.filename
            )));
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(&artifact.filename);
        tokio::fs::write(&path, &artifact.bytes).await?;

        let sha256 = format!("{:x}", Sha256::digest(&artifact.bytes));

        tracing::debug!(
            path = %path.display(),
            bytes = artifact.len(),
            sha256 = %sha256,
            "Artifact written"
        );

        Ok(DeliveryReceipt {
            path,
            bytes: artifact.len(),
            sha256,
        })
    }
}
