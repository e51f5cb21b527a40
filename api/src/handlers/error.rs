use actix_web::{http::StatusCode, HttpResponse};
use lb_core::errors::{AuthError, DomainError, TokenError};
use validator::ValidationErrors;

use crate::dto::error::{error_codes, ErrorResponse, ErrorResponseExt};

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Internal errors are logged with their detail and answered with a generic
/// message; everything else is expected client behavior and logged at debug.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, code, message) = match &error {
        DomainError::Auth(AuthError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            error_codes::INVALID_CREDENTIALS,
            error.to_string(),
        ),
        DomainError::Auth(AuthError::UserAlreadyExists) => (
            StatusCode::CONFLICT,
            error_codes::USER_ALREADY_EXISTS,
            error.to_string(),
        ),
        // A valid token for a vanished user is treated like any other bad token
        DomainError::Auth(AuthError::UserNotFound) | DomainError::Token(TokenError::Invalid) => (
            StatusCode::UNAUTHORIZED,
            error_codes::INVALID_TOKEN,
            TokenError::Invalid.to_string(),
        ),
        DomainError::Token(TokenError::Expired) => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_EXPIRED,
            error.to_string(),
        ),
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            message.clone(),
        ),
        DomainError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            error.to_string(),
        ),
        DomainError::Internal { .. } => {
            tracing::error!(error = %error, "Request failed with internal error");
            return ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    tracing::debug!(status = status.as_u16(), code, "Request rejected");
    ErrorResponse::new(code, message).to_response(status)
}

/// 400 response listing the failed fields of a request body
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    response.to_response(StatusCode::BAD_REQUEST)
}
