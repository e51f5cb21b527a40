//! Test doubles for session service tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;
use crate::repositories::{InMemoryRefreshTokenRepository, RefreshTokenRepository};
use crate::services::password::PasswordHasher;

/// Refresh token store whose `delete` and `put` can be made to fail
#[derive(Default)]
pub struct FlakyRefreshTokenRepository {
    pub inner: InMemoryRefreshTokenRepository,
    pub fail_delete: AtomicBool,
    pub fail_put: AtomicBool,
}

#[async_trait]
impl RefreshTokenRepository for FlakyRefreshTokenRepository {
    async fn put(&self, user_id: i64, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(DomainError::internal("store unavailable"));
        }
        self.inner.put(user_id, token, expires_at).await
    }

    async fn get(&self, token: &str) -> Result<RefreshTokenRecord, DomainError> {
        self.inner.get(token).await
    }

    async fn delete(&self, token: &str) -> Result<(), DomainError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(DomainError::internal("store unavailable"));
        }
        self.inner.delete(token).await
    }
}

/// Plaintext "hasher" that counts verifications
#[derive(Default)]
pub struct CountingHasher {
    pub verifications: AtomicUsize,
}

#[async_trait]
impl PasswordHasher for CountingHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", plaintext))
    }

    async fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, DomainError> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        Ok(hash == format!("plain:{}", plaintext))
    }
}
