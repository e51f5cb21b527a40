//! In-memory implementation of RefreshTokenRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::trait_::RefreshTokenRepository;

#[derive(Default)]
struct Store {
    // keyed by user id: one live record per user
    records: HashMap<i64, RefreshTokenRecord>,
    last_id: i64,
}

/// Refresh token store held in process memory
///
/// `put` runs inside a single write-lock critical section, so concurrent
/// writers for the same user are serialized and the last one wins.
#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenRepository {
    inner: Arc<RwLock<Store>>,
}

impl InMemoryRefreshTokenRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Returns `true` when no record is stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn put(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut store = self.inner.write().await;
        store.last_id += 1;
        let record = RefreshTokenRecord {
            id: store.last_id,
            user_id,
            token: token.to_string(),
            expires_at,
        };
        store.records.insert(user_id, record);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<RefreshTokenRecord, DomainError> {
        let store = self.inner.read().await;
        let now = Utc::now();
        store
            .records
            .values()
            .find(|r| r.token == token && !r.is_expired_at(now))
            .cloned()
            .ok_or_else(|| DomainError::not_found("refresh token"))
    }

    async fn delete(&self, token: &str) -> Result<(), DomainError> {
        let mut store = self.inner.write().await;
        store.records.retain(|_, r| r.token != token);
        Ok(())
    }
}
