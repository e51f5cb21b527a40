//! Refresh token store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Persistent store of live refresh tokens
///
/// The store holds at most one record per user. Every read goes to the
/// backing storage; implementations must not cache.
///
/// # Security Considerations
/// - Implementations must never log token values
/// - A record whose `expires_at` has passed must behave as absent
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Store `token` as the live refresh token of `user_id`
    ///
    /// Replaces any existing record for the user in one atomic step.
    ///
    /// # Arguments
    /// * `user_id` - Owner of the token
    /// * `token` - The refresh token string
    /// * `expires_at` - Expiry taken from the token's `exp` claim
    async fn put(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Look up a live record by token string
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - A record matches and has not expired
    /// * `Err(DomainError::NotFound)` - No match, or the match has expired
    /// * `Err(DomainError)` - Storage error
    async fn get(&self, token: &str) -> Result<RefreshTokenRecord, DomainError>;

    /// Remove the record holding `token`
    ///
    /// Removing a token that is not stored succeeds.
    async fn delete(&self, token: &str) -> Result<(), DomainError>;
}
