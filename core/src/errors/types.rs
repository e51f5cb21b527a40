//! Authentication and token error types
//!
//! Several distinct failure causes are deliberately merged into one variant
//! (`InvalidCredentials`, `Invalid`) so callers cannot learn which check
//! failed.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature valid but `exp` has passed
    #[error("Token expired")]
    Expired,

    /// Malformed, wrongly signed, wrong algorithm, inconsistent claims,
    /// or no longer present in the refresh store
    #[error("Invalid token")]
    Invalid,
}
