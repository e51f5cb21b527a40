//! Domain entities representing core business objects.

pub mod blob;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use blob::BlobMeta;
pub use token::{Claims, RefreshTokenRecord, TokenPair};
pub use user::{NewUser, User};
