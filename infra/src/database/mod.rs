//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - Repository implementations for users, refresh tokens and blob metadata
//!
//! The schema lives in `infra/migrations`.

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlBlobMetaRepository, MySqlRefreshTokenRepository, MySqlUserRepository};
