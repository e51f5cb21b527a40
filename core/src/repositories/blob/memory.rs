//! In-memory blob storage and metadata repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::blob::BlobMeta;
use crate::errors::DomainError;

use super::trait_::{BlobMetaRepository, BlobStorage};

type BlobKey = (i64, String);

/// Blob content held in process memory
#[derive(Clone, Default)]
pub struct InMemoryBlobStorage {
    blobs: Arc<RwLock<HashMap<BlobKey, Vec<u8>>>>,
}

impl InMemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn save(&self, user_id: i64, filename: &str, data: &[u8]) -> Result<(), DomainError> {
        let mut blobs = self.blobs.write().await;
        blobs.insert((user_id, filename.to_string()), data.to_vec());
        Ok(())
    }

    async fn read(&self, user_id: i64, filename: &str) -> Result<Vec<u8>, DomainError> {
        let blobs = self.blobs.read().await;
        blobs
            .get(&(user_id, filename.to_string()))
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("file {}", filename)))
    }

    async fn delete(&self, user_id: i64, filename: &str) -> Result<(), DomainError> {
        let mut blobs = self.blobs.write().await;
        blobs.remove(&(user_id, filename.to_string()));
        Ok(())
    }
}

/// Blob metadata held in process memory
#[derive(Clone, Default)]
pub struct InMemoryBlobMetaRepository {
    metas: Arc<RwLock<HashMap<BlobKey, BlobMeta>>>,
}

impl InMemoryBlobMetaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobMetaRepository for InMemoryBlobMetaRepository {
    async fn exists(&self, user_id: i64, filename: &str) -> Result<bool, DomainError> {
        let metas = self.metas.read().await;
        Ok(metas.contains_key(&(user_id, filename.to_string())))
    }

    async fn save(&self, meta: &BlobMeta) -> Result<(), DomainError> {
        let mut metas = self.metas.write().await;
        metas
            .entry((meta.user_id, meta.filename.clone()))
            .and_modify(|existing| existing.updated_at = meta.updated_at)
            .or_insert_with(|| meta.clone());
        Ok(())
    }

    async fn list(&self, user_id: i64) -> Result<Vec<BlobMeta>, DomainError> {
        let metas = self.metas.read().await;
        let mut owned: Vec<BlobMeta> = metas
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn delete(&self, user_id: i64, filename: &str) -> Result<bool, DomainError> {
        let mut metas = self.metas.write().await;
        Ok(metas.remove(&(user_id, filename.to_string())).is_some())
    }
}
