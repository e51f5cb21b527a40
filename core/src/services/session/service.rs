//! Session service implementation

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{RefreshTokenRepository, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenCodec;

use super::AccessTokenIdentifier;

// Verified against when the email is unknown so both login failures cost a hash check.
const DUMMY_PASSWORD: &str = "lockbox-dummy-password";

/// Orchestrates the credential and session lifecycle
pub struct SessionService<U, T, H>
where
    U: UserRepository,
    T: RefreshTokenRepository,
    H: PasswordHasher,
{
    /// User directory
    users: Arc<U>,
    /// Refresh token store, one live token per user
    refresh_tokens: Arc<T>,
    /// Password hasher
    hasher: Arc<H>,
    /// Token codec
    codec: Arc<TokenCodec>,
    /// Hash of `DUMMY_PASSWORD`, computed on first use
    dummy_hash: OnceCell<String>,
}

impl<U, T, H> SessionService<U, T, H>
where
    U: UserRepository,
    T: RefreshTokenRepository,
    H: PasswordHasher,
{
    /// Create a new session service
    ///
    /// # Arguments
    ///
    /// * `users` - User directory
    /// * `refresh_tokens` - Refresh token store
    /// * `hasher` - Password hasher
    /// * `codec` - Token codec holding secrets and lifetimes
    pub fn new(users: Arc<U>, refresh_tokens: Arc<T>, hasher: Arc<H>, codec: Arc<TokenCodec>) -> Self {
        Self {
            users,
            refresh_tokens,
            hasher,
            codec,
            dummy_hash: OnceCell::new(),
        }
    }

    /// The token codec used by this service
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Register a new user and start a session
    ///
    /// # Returns
    ///
    /// * `Ok((User, TokenPair))` - The created user and its first token pair
    /// * `Err(AuthError::UserAlreadyExists)` - Email already registered
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<(User, TokenPair)> {
        if self.users.find_by_email(email).await?.is_some() {
            tracing::info!(event = "registration_rejected", "Email already registered");
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.hasher.hash(password).await?;
        let user = self.users.create(NewUser::new(email, password_hash)).await?;

        let pair = self.start_session(user.id).await?;

        tracing::info!(user_id = user.id, event = "user_registered", "User registered");
        Ok((user, pair))
    }

    /// Authenticate with email and password and start a session
    ///
    /// Unknown email and wrong password fail with the same
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(User, TokenPair)> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                self.verify_dummy(password).await?;
                tracing::info!(event = "login_failed", "Login rejected");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.hasher.verify(&user.password_hash, password).await? {
            tracing::info!(user_id = user.id, event = "login_failed", "Login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        let pair = self.start_session(user.id).await?;

        tracing::info!(user_id = user.id, event = "login_succeeded", "User logged in");
        Ok((user, pair))
    }

    /// Exchange a refresh token for a new pair, rotating the stored token
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New pair; the presented token is no longer valid
    /// * `Err(TokenError::Invalid)` - Token unparseable, expired, or not the
    ///   user's live refresh token
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self
            .codec
            .parse_refresh(refresh_token)
            .map_err(|_| TokenError::Invalid)?;

        let record = match self.refresh_tokens.get(refresh_token).await {
            Ok(record) => record,
            Err(e) if e.is_not_found() => {
                tracing::info!(user_id = claims.user_id, event = "refresh_rejected", "Refresh token not live");
                return Err(TokenError::Invalid.into());
            }
            Err(e) => return Err(e),
        };

        if record.user_id != claims.user_id {
            tracing::warn!(user_id = claims.user_id, event = "refresh_rejected", "Refresh token owner mismatch");
            return Err(TokenError::Invalid.into());
        }

        let user = self
            .users
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| DomainError::internal(format!("User {} of a live refresh token is missing", claims.user_id)))?;

        let pair = self.codec.issue_pair(user.id)?;

        if let Err(e) = self.refresh_tokens.delete(refresh_token).await {
            tracing::warn!(user_id = user.id, error = %e, "Failed to delete rotated refresh token");
        }

        self.persist_refresh(user.id, &pair.refresh_token).await?;

        tracing::info!(user_id = user.id, event = "session_refreshed", "Refresh token rotated");
        Ok(pair)
    }

    /// Revoke a refresh token; succeeds whether or not it was stored
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        self.refresh_tokens.delete(refresh_token).await?;
        tracing::info!(event = "logout", "Refresh token revoked");
        Ok(())
    }

    /// Resolve an access token to its user
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - Token valid and user present
    /// * `Err(TokenError::Expired)` / `Err(TokenError::Invalid)` - From the codec
    /// * `Err(AuthError::UserNotFound)` - Token valid but the user is gone
    pub async fn identify_by_access_token(&self, access_token: &str) -> DomainResult<User> {
        let claims = self.codec.parse_access(access_token)?;

        self.users
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Issue a pair and store its refresh token as the user's live token
    async fn start_session(&self, user_id: i64) -> DomainResult<TokenPair> {
        let pair = self.codec.issue_pair(user_id)?;
        self.persist_refresh(user_id, &pair.refresh_token).await?;
        Ok(pair)
    }

    async fn persist_refresh(&self, user_id: i64, refresh_token: &str) -> DomainResult<()> {
        let expires_at = self
            .codec
            .parse_refresh(refresh_token)
            .ok()
            .and_then(|claims| claims.expires_at())
            .ok_or_else(|| DomainError::internal("Freshly issued refresh token could not be parsed"))?;

        self.refresh_tokens.put(user_id, refresh_token, expires_at).await
    }

    async fn verify_dummy(&self, password: &str) -> DomainResult<()> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| self.hasher.hash(DUMMY_PASSWORD))
            .await?;
        self.hasher.verify(hash, password).await?;
        Ok(())
    }
}

#[async_trait]
impl<U, T, H> AccessTokenIdentifier for SessionService<U, T, H>
where
    U: UserRepository,
    T: RefreshTokenRepository,
    H: PasswordHasher,
{
    async fn identify(&self, access_token: &str) -> DomainResult<User> {
        self.identify_by_access_token(access_token).await
    }
}
