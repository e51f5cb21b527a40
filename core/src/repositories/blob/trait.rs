//! Blob content storage and blob metadata traits.

use async_trait::async_trait;

use crate::domain::entities::blob::BlobMeta;
use crate::errors::DomainError;

/// Storage of opaque blob bytes, namespaced per user
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Write `data` under `filename`, replacing any previous content
    async fn save(&self, user_id: i64, filename: &str, data: &[u8]) -> Result<(), DomainError>;

    /// Read the content stored under `filename`
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - Blob content
    /// * `Err(DomainError::NotFound)` - Nothing stored under that name
    async fn read(&self, user_id: i64, filename: &str) -> Result<Vec<u8>, DomainError>;

    /// Remove the content stored under `filename`; absence is not an error
    async fn delete(&self, user_id: i64, filename: &str) -> Result<(), DomainError>;
}

/// Repository for blob metadata rows
#[async_trait]
pub trait BlobMetaRepository: Send + Sync {
    /// Check whether metadata exists for the blob
    async fn exists(&self, user_id: i64, filename: &str) -> Result<bool, DomainError>;

    /// Insert or update metadata
    ///
    /// On update only `updated_at` changes; the stored `created_at` is kept.
    async fn save(&self, meta: &BlobMeta) -> Result<(), DomainError>;

    /// List the user's blobs, most recently created first
    async fn list(&self, user_id: i64) -> Result<Vec<BlobMeta>, DomainError>;

    /// Delete metadata
    ///
    /// # Returns
    /// * `Ok(true)` - A row was deleted
    /// * `Ok(false)` - No row existed
    async fn delete(&self, user_id: i64, filename: &str) -> Result<bool, DomainError>;
}
