//! MySQL repository implementations

mod blob_meta_repository_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use blob_meta_repository_impl::MySqlBlobMetaRepository;
pub use token_repository_impl::MySqlRefreshTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use lb_core::errors::DomainError;

/// Map a SQLx error to an internal domain error with context
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Whether the error is a unique-key violation
pub(crate) fn is_duplicate_key(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
