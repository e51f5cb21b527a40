//! # Lockbox Core
//!
//! Domain layer of the Lockbox backend. It owns the credential and session
//! lifecycle (registration, login, refresh-token rotation, logout, access
//! token identification) together with the per-user blob service. Storage is
//! reached only through the repository traits defined here; `lb_infra`
//! supplies the MySQL and on-disk implementations.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
