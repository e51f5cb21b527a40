//! # Infrastructure Layer
//!
//! Concrete implementations of the `lb_core` repository traits:
//! - **Database**: MySQL repositories for users, refresh tokens and blob
//!   metadata, built on SQLx
//! - **Storage**: blob content on the local filesystem
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Blob content storage
pub mod storage;

#[cfg(feature = "mysql")]
pub use database::{
    DatabasePool, MySqlBlobMetaRepository, MySqlRefreshTokenRepository, MySqlUserRepository,
    PoolStatistics,
};
pub use storage::DiskBlobStorage;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
