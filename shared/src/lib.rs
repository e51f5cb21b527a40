//! Shared configuration and common types for the Lockbox server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types and loading
//! - The JSON error body returned by the API

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    ServerConfig, StorageConfig,
};
pub use errors::{error_codes, ErrorResponse};
