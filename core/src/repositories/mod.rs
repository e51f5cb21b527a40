//! Repository traits and their in-memory implementations.
//!
//! The traits are the seams between the domain and persistence. `lb_infra`
//! implements them over MySQL and the filesystem; the in-memory versions here
//! back the test suites and local experiments.

pub mod blob;
pub mod token;
pub mod user;

pub use blob::{BlobMetaRepository, BlobStorage, InMemoryBlobMetaRepository, InMemoryBlobStorage};
pub use token::{InMemoryRefreshTokenRepository, RefreshTokenRepository};
pub use user::{InMemoryUserRepository, UserRepository};
