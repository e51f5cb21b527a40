//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, TokenError};

#[test]
fn test_merged_credential_error_has_single_message() {
    let error = DomainError::from(AuthError::InvalidCredentials);
    assert_eq!(error.to_string(), "Invalid email or password");
    assert!(matches!(error, DomainError::Auth(AuthError::InvalidCredentials)));
}

#[test]
fn test_token_errors_are_transparent() {
    assert_eq!(DomainError::from(TokenError::Expired).to_string(), "Token expired");
    assert_eq!(DomainError::from(TokenError::Invalid).to_string(), "Invalid token");
}

#[test]
fn test_expired_and_invalid_are_distinct() {
    assert_ne!(TokenError::Expired, TokenError::Invalid);
}

#[test]
fn test_helper_constructors() {
    assert!(DomainError::not_found("refresh token").is_not_found());
    assert!(!DomainError::internal("boom").is_not_found());

    match DomainError::validation("bad filename") {
        DomainError::Validation { message } => assert_eq!(message, "bad filename"),
        other => panic!("unexpected error: {other:?}"),
    }
}
