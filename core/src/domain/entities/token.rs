//! Token entities for JWT-based sessions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for the JWT payload
///
/// Access and refresh tokens share this shape; they differ only in the
/// signing secret and lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Numeric user id
    pub user_id: i64,

    /// Subject, always `user_id` rendered as a string
    pub sub: String,

    /// Issued at timestamp (seconds)
    pub iat: i64,

    /// Expiration timestamp (seconds)
    pub exp: i64,

    /// JWT ID, unique per issued token
    pub jti: String,
}

impl Claims {
    /// Creates claims for a token issued at `issued_at` and valid for `ttl`
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's id
    /// * `issued_at` - Issue instant
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    ///
    /// A new `Claims` instance with a fresh `jti`
    pub fn new(user_id: i64, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            user_id,
            sub: user_id.to_string(),
            iat,
            exp: iat + ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks whether the claims are expired at `now`
    ///
    /// A token whose `exp` equals `now` is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    /// Checks that `sub` agrees with `user_id`
    pub fn is_consistent(&self) -> bool {
        self.sub == self.user_id.to_string()
    }

    /// Expiration instant as a `DateTime`
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Persisted refresh token; at most one per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Row identifier
    pub id: i64,

    /// Owner of the token
    pub user_id: i64,

    /// The refresh token string as issued
    pub token: String,

    /// Instant after which the record no longer matches lookups
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Checks if the record is expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
