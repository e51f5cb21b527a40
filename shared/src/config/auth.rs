//! Authentication configuration: JWT secrets and token lifetimes

use serde::{Deserialize, Serialize};

use super::{ConfigError, Environment};

/// JWT configuration for access and refresh tokens
///
/// The two token classes are signed with independent secrets. Neither secret
/// has a default value; [`JwtConfig::validate`] rejects empty secrets.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Access token lifetime in minutes
    #[serde(default = "default_access_expiration_minutes")]
    pub access_token_expiration_minutes: i64,

    /// Refresh token lifetime in hours
    #[serde(default = "default_refresh_expiration_hours")]
    pub refresh_token_expiration_hours: i64,

    /// Secret used to sign access tokens
    #[serde(default)]
    pub access_token_secret: String,

    /// Secret used to sign refresh tokens
    #[serde(default)]
    pub refresh_token_secret: String,
}

impl Default for JwtConfig {
    /// Default lifetimes with empty secrets. The result does not pass validation.
    fn default() -> Self {
        Self {
            access_token_expiration_minutes: default_access_expiration_minutes(),
            refresh_token_expiration_hours: default_refresh_expiration_hours(),
            access_token_secret: String::new(),
            refresh_token_secret: String::new(),
        }
    }
}

impl JwtConfig {
    /// Create a JWT configuration with both secrets and default lifetimes
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_token_secret: access_secret.into(),
            refresh_token_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_expiration_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiration_minutes = minutes;
        self
    }

    /// Set refresh token lifetime in hours
    pub fn with_refresh_expiration_hours(mut self, hours: i64) -> Self {
        self.refresh_token_expiration_hours = hours;
        self
    }

    /// Validate secrets and lifetimes.
    ///
    /// A zero access lifetime is accepted outside production only.
    pub fn validate(&self, environment: Environment) -> Result<(), ConfigError> {
        if self.access_token_secret.trim().is_empty() {
            return Err(ConfigError::Missing("jwt.access_token_secret"));
        }
        if self.refresh_token_secret.trim().is_empty() {
            return Err(ConfigError::Missing("jwt.refresh_token_secret"));
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(ConfigError::Invalid {
                key: "jwt.refresh_token_secret",
                reason: "must differ from jwt.access_token_secret".to_string(),
            });
        }

        let min_access = if environment.is_production() { 1 } else { 0 };
        if self.access_token_expiration_minutes < min_access {
            return Err(ConfigError::Invalid {
                key: "jwt.access_token_expiration_minutes",
                reason: format!("must be at least {}", min_access),
            });
        }
        if self.refresh_token_expiration_hours < 1 {
            return Err(ConfigError::Invalid {
                key: "jwt.refresh_token_expiration_hours",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

// Secrets stay out of debug output.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_token_expiration_minutes", &self.access_token_expiration_minutes)
            .field("refresh_token_expiration_hours", &self.refresh_token_expiration_hours)
            .field("access_token_secret", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .finish()
    }
}

fn default_access_expiration_minutes() -> i64 {
    15
}

fn default_refresh_expiration_hours() -> i64 {
    24 * 7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_defaults() {
        let config = JwtConfig::new("a", "b");
        assert_eq!(config.access_token_expiration_minutes, 15);
        assert_eq!(config.refresh_token_expiration_hours, 168);
    }

    #[test]
    fn test_default_config_is_rejected() {
        let result = JwtConfig::default().validate(Environment::Development);
        assert!(matches!(result, Err(ConfigError::Missing("jwt.access_token_secret"))));
    }

    #[test]
    fn test_equal_secrets_rejected() {
        let result = JwtConfig::new("same", "same").validate(Environment::Development);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_zero_access_ttl_only_outside_production() {
        let config = JwtConfig::new("a", "b").with_access_expiration_minutes(0);
        assert!(config.validate(Environment::Development).is_ok());
        assert!(config.validate(Environment::Production).is_err());
    }

    #[test]
    fn test_zero_refresh_ttl_rejected() {
        let config = JwtConfig::new("a", "b").with_refresh_expiration_hours(0);
        assert!(matches!(config.validate(Environment::Development), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = JwtConfig::new("top-secret-access", "top-secret-refresh");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
