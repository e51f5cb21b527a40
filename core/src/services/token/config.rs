//! Configuration for the token codec

use std::fmt;

use lb_shared::JwtConfig;

/// Immutable codec configuration
///
/// Built once at startup and handed to `TokenCodec::new`; the codec never
/// reads configuration from the environment itself.
#[derive(Clone)]
pub struct TokenCodecConfig {
    /// HMAC secret for access tokens
    pub access_secret: String,
    /// HMAC secret for refresh tokens
    pub refresh_secret: String,
    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token lifetime in hours
    pub refresh_token_expiry_hours: i64,
}

impl TokenCodecConfig {
    /// Create a configuration with the default lifetimes (15 minutes, 168 hours)
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_hours: 168,
        }
    }

    /// Set the access token lifetime
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set the refresh token lifetime
    pub fn with_refresh_expiry_hours(mut self, hours: i64) -> Self {
        self.refresh_token_expiry_hours = hours;
        self
    }
}

impl From<&JwtConfig> for TokenCodecConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            access_secret: config.access_token_secret.clone(),
            refresh_secret: config.refresh_token_secret.clone(),
            access_token_expiry_minutes: config.access_token_expiration_minutes,
            refresh_token_expiry_hours: config.refresh_token_expiration_hours,
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for TokenCodecConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodecConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_token_expiry_minutes", &self.access_token_expiry_minutes)
            .field("refresh_token_expiry_hours", &self.refresh_token_expiry_hours)
            .finish()
    }
}
