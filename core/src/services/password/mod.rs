//! Password hashing
//!
//! The hasher is a trait so the session service can be exercised with a
//! cheap implementation; production uses bcrypt.

mod bcrypt_hasher;


pub use bcrypt_hasher::BcryptPasswordHasher;

use async_trait::async_trait;

use crate::errors::DomainError;

/// One-way password hashing with verification
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    ///
    /// # Returns
    /// * `Ok(String)` - Self-describing hash (algorithm, cost and salt included)
    /// * `Err(DomainError::Internal)` - Hashing failed
    async fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    /// Verify a plaintext password against a stored hash
    ///
    /// A malformed hash verifies as `false` rather than failing.
    async fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, DomainError>;
}
