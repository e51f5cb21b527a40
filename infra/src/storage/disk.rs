//! Disk-backed BlobStorage
//!
//! Layout: `<root>/<user_id>/<filename>`. Writes go to a uniquely named file
//! under `<root>/.staging/` first and are renamed into place, so readers never
//! see a partial blob. User directories are numeric, so the staging directory
//! cannot be addressed as a user's blob.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use lb_core::errors::DomainError;
use lb_core::repositories::BlobStorage;
use lb_core::services::blob::validate_filename;

use crate::InfrastructureError;

const STAGING_DIR: &str = ".staging";

/// Blob storage rooted at a directory
#[derive(Debug, Clone)]
pub struct DiskBlobStorage {
    root: PathBuf,
}

impl DiskBlobStorage {
    /// Create storage rooted at `root`, creating the directory if needed
    ///
    /// # Returns
    /// * `Ok(DiskBlobStorage)` - Root directory exists
    /// * `Err(InfrastructureError::Io)` - Directory could not be created
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, InfrastructureError> {
        let root = root.into();
        tokio::fs::create_dir_all(root.join(STAGING_DIR)).await?;
        tracing::info!(root = %root.display(), "Blob storage ready");
        Ok(Self { root })
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn user_dir(&self, user_id: i64) -> PathBuf {
        self.root.join(user_id.to_string())
    }

    fn staging_path(&self, user_id: i64) -> PathBuf {
        self.root
            .join(STAGING_DIR)
            .join(format!("{}-{}", user_id, uuid::Uuid::new_v4().simple()))
    }

    fn blob_path(&self, user_id: i64, filename: &str) -> Result<PathBuf, DomainError> {
        validate_filename(filename)?;
        Ok(self.user_dir(user_id).join(filename))
    }
}

fn io_error(context: &str, e: std::io::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

async fn discard_staging(staging: &Path) {
    if let Err(e) = tokio::fs::remove_file(staging).await {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(error = %e, "Failed to remove staging file");
        }
    }
}

#[async_trait]
impl BlobStorage for DiskBlobStorage {
    async fn save(&self, user_id: i64, filename: &str, data: &[u8]) -> Result<(), DomainError> {
        let path = self.blob_path(user_id, filename)?;
        let staging = self.staging_path(user_id);

        tokio::fs::create_dir_all(self.user_dir(user_id))
            .await
            .map_err(|e| io_error("Failed to create user blob directory", e))?;
        tokio::fs::create_dir_all(self.root.join(STAGING_DIR))
            .await
            .map_err(|e| io_error("Failed to create staging directory", e))?;

        if let Err(e) = tokio::fs::write(&staging, data).await {
            discard_staging(&staging).await;
            return Err(io_error("Failed to write blob", e));
        }
        if let Err(e) = tokio::fs::rename(&staging, &path).await {
            discard_staging(&staging).await;
            return Err(io_error("Failed to move blob into place", e));
        }

        tracing::debug!(user_id, bytes = data.len(), "Blob written to disk");
        Ok(())
    }

    async fn read(&self, user_id: i64, filename: &str) -> Result<Vec<u8>, DomainError> {
        let path = self.blob_path(user_id, filename)?;

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(DomainError::NotFound {
                resource: format!("file {}", filename),
            }),
            Err(e) => Err(io_error("Failed to read blob", e)),
        }
    }

    async fn delete(&self, user_id: i64, filename: &str) -> Result<(), DomainError> {
        let path = self.blob_path(user_id, filename)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(user_id, "Blob already absent from disk");
                Ok(())
            }
            Err(e) => Err(io_error("Failed to delete blob", e)),
        }
    }
}
