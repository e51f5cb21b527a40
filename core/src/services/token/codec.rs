//! HS256 token codec

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenCodecConfig;

/// Signing and verification keys for one token kind
struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Issues and parses access and refresh tokens
///
/// The codec is immutable after construction and safe to share between
/// tasks.
pub struct TokenCodec {
    access: KeyPair,
    refresh: KeyPair,
    access_ttl: Duration,
    refresh_ttl: Duration,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a new codec
    ///
    /// # Arguments
    ///
    /// * `config` - Secrets and lifetimes
    ///
    /// # Returns
    ///
    /// A new `TokenCodec`, or `DomainError::Validation` if a secret is empty,
    /// the access lifetime is negative or the refresh lifetime is under an hour
    pub fn new(config: TokenCodecConfig) -> Result<Self, DomainError> {
        if config.access_secret.is_empty() {
            return Err(DomainError::validation("Access token secret must not be empty"));
        }
        if config.refresh_secret.is_empty() {
            return Err(DomainError::validation("Refresh token secret must not be empty"));
        }
        if config.access_token_expiry_minutes < 0 {
            return Err(DomainError::validation("Access token lifetime must not be negative"));
        }
        // A refresh token has to outlive the moment it is stored.
        if config.refresh_token_expiry_hours < 1 {
            return Err(DomainError::validation("Refresh token lifetime must be at least one hour"));
        }

        // Expiry is checked by the codec itself, without leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            access: KeyPair::from_secret(&config.access_secret),
            refresh: KeyPair::from_secret(&config.refresh_secret),
            access_ttl: Duration::minutes(config.access_token_expiry_minutes),
            refresh_ttl: Duration::hours(config.refresh_token_expiry_hours),
            validation,
        })
    }

    /// Access token lifetime
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Refresh token lifetime
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issues an access token for `user_id`
    pub fn issue_access(&self, user_id: i64) -> DomainResult<String> {
        self.issue_access_at(user_id, Utc::now())
    }

    /// Issues a refresh token for `user_id`
    pub fn issue_refresh(&self, user_id: i64) -> DomainResult<String> {
        self.issue_refresh_at(user_id, Utc::now())
    }

    /// Issues an access and a refresh token for `user_id`
    pub fn issue_pair(&self, user_id: i64) -> DomainResult<TokenPair> {
        let now = Utc::now();
        Ok(TokenPair::new(
            self.issue_access_at(user_id, now)?,
            self.issue_refresh_at(user_id, now)?,
        ))
    }

    /// Issues an access token as if the current time were `now`
    pub fn issue_access_at(&self, user_id: i64, now: DateTime<Utc>) -> DomainResult<String> {
        let claims = Claims::new(user_id, now, self.access_ttl);
        Self::encode_jwt(&claims, &self.access.encoding)
    }

    /// Issues a refresh token as if the current time were `now`
    pub fn issue_refresh_at(&self, user_id: i64, now: DateTime<Utc>) -> DomainResult<String> {
        let claims = Claims::new(user_id, now, self.refresh_ttl);
        Self::encode_jwt(&claims, &self.refresh.encoding)
    }

    /// Verifies an access token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid and not expired
    /// * `Err(TokenError::Expired)` - Signature valid but `exp` has passed
    /// * `Err(TokenError::Invalid)` - Anything else
    pub fn parse_access(&self, token: &str) -> DomainResult<Claims> {
        self.parse_access_at(token, Utc::now())
    }

    /// Verifies a refresh token and returns its claims
    ///
    /// Same outcomes as [`TokenCodec::parse_access`], using the refresh secret.
    pub fn parse_refresh(&self, token: &str) -> DomainResult<Claims> {
        self.parse_refresh_at(token, Utc::now())
    }

    /// Verifies an access token against an explicit clock
    pub fn parse_access_at(&self, token: &str, now: DateTime<Utc>) -> DomainResult<Claims> {
        self.decode_jwt(token, &self.access.decoding, now)
    }

    /// Verifies a refresh token against an explicit clock
    pub fn parse_refresh_at(&self, token: &str, now: DateTime<Utc>) -> DomainResult<Claims> {
        self.decode_jwt(token, &self.refresh.decoding, now)
    }

    fn encode_jwt(claims: &Claims, key: &EncodingKey) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))
    }

    fn decode_jwt(&self, token: &str, key: &DecodingKey, now: DateTime<Utc>) -> DomainResult<Claims> {
        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "Token rejected");
                TokenError::Invalid
            })?
            .claims;

        if !claims.is_consistent() {
            tracing::debug!(user_id = claims.user_id, "Token subject does not match user id");
            return Err(TokenError::Invalid.into());
        }

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired.into());
        }

        Ok(claims)
    }
}
