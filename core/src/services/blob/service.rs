//! Blob service implementation

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::blob::BlobMeta;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BlobMetaRepository, BlobStorage};

/// Longest accepted blob name, in bytes
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Check that `filename` is a single safe path component
///
/// # Returns
///
/// * `Ok(())` - Name is usable
/// * `Err(DomainError::Validation)` - Empty, too long, contains a path
///   separator, `..`, or a control character
pub fn validate_filename(filename: &str) -> DomainResult<()> {
    if filename.trim().is_empty() || filename == "." {
        return Err(DomainError::validation("Filename must not be empty"));
    }
    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Filename must be at most {} bytes",
            MAX_FILENAME_LENGTH
        )));
    }
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(DomainError::validation("Filename must not contain path separators or '..'"));
    }
    if filename.chars().any(char::is_control) {
        return Err(DomainError::validation("Filename must not contain control characters"));
    }
    Ok(())
}

/// Upload, list, download and delete of a user's blobs
pub struct BlobService<S, M>
where
    S: BlobStorage,
    M: BlobMetaRepository,
{
    storage: Arc<S>,
    metas: Arc<M>,
}

impl<S, M> BlobService<S, M>
where
    S: BlobStorage,
    M: BlobMetaRepository,
{
    /// Create a new blob service
    pub fn new(storage: Arc<S>, metas: Arc<M>) -> Self {
        Self { storage, metas }
    }

    /// Store `data` under `filename`, overwriting any previous blob of that name
    ///
    /// Content is written before metadata; `created_at` is set only on the
    /// first upload of a name.
    pub async fn upload(&self, user_id: i64, filename: &str, data: &[u8]) -> DomainResult<BlobMeta> {
        validate_filename(filename)?;

        self.storage.save(user_id, filename, data).await?;

        let existed = self.metas.exists(user_id, filename).await?;
        let meta = BlobMeta::new(user_id, filename, Utc::now());
        self.metas.save(&meta).await?;

        tracing::info!(
            user_id = user_id,
            bytes = data.len(),
            overwritten = existed,
            event = "blob_uploaded",
            "Blob stored"
        );
        Ok(meta)
    }

    /// List the user's blobs, newest first
    pub async fn list(&self, user_id: i64) -> DomainResult<Vec<BlobMeta>> {
        let metas = self.metas.list(user_id).await?;
        tracing::debug!(user_id = user_id, count = metas.len(), "Listed blobs");
        Ok(metas)
    }

    /// Read a blob's content
    pub async fn download(&self, user_id: i64, filename: &str) -> DomainResult<Vec<u8>> {
        validate_filename(filename)?;

        if !self.metas.exists(user_id, filename).await? {
            return Err(DomainError::not_found(format!("file {}", filename)));
        }

        self.storage.read(user_id, filename).await
    }

    /// Delete a blob's content and metadata
    pub async fn delete(&self, user_id: i64, filename: &str) -> DomainResult<()> {
        validate_filename(filename)?;

        if !self.metas.exists(user_id, filename).await? {
            return Err(DomainError::not_found(format!("file {}", filename)));
        }

        self.storage.delete(user_id, filename).await?;
        self.metas.delete(user_id, filename).await?;

        tracing::info!(user_id = user_id, event = "blob_deleted", "Blob deleted");
        Ok(())
    }
}
