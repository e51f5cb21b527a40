//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT secrets and token lifetimes
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//! - `storage` - Blob storage location

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Prefix for environment variable overrides, e.g. `LOCKBOX_JWT__ACCESS_TOKEN_SECRET`
pub const ENV_PREFIX: &str = "LOCKBOX";

/// Default configuration file name (extension resolved by the loader)
pub const DEFAULT_CONFIG_FILE: &str = "config";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment the process runs in
    #[serde(default = "Environment::from_env")]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// JWT configuration (secrets have no defaults)
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Blob storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration, derived from the environment when absent
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl AppConfig {
    /// Load configuration from an optional TOML file and `LOCKBOX_*` variables.
    ///
    /// Values from the environment override the file. A `.env` file in the
    /// working directory is read first if present. The result is validated
    /// before it is returned, so a missing JWT secret stops startup here.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file = path.unwrap_or(DEFAULT_CONFIG_FILE);
        let settings = config::Config::builder()
            .add_source(config::File::with_name(file).required(path.is_some()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-cutting invariants of the loaded configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate(self.environment)?;

        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Missing("database.url"));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                key: "server.port",
                reason: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    /// Effective logging configuration
    pub fn logging(&self) -> LoggingConfig {
        self.logging
            .clone()
            .unwrap_or_else(|| LoggingConfig::for_environment(self.environment))
    }
}
