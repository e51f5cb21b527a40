//! User directory trait defining the interface for user persistence.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for the user directory
///
/// Implementations own id assignment and the uniqueness of `email`.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use lb_core::repositories::UserRepository;
/// use lb_core::domain::entities::user::{NewUser, User};
/// use lb_core::errors::DomainError;
///
/// struct PostgresUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for PostgresUserRepository {
///     async fn create(&self, user: NewUser) -> Result<User, DomainError> {
///         unimplemented!()
///     }
///
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    ///
    /// # Arguments
    /// * `user` - Email and password hash of the new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user with its assigned id and timestamps
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    /// * `Err(DomainError)` - Storage error
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Find a user by email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given email
    /// * `Err(DomainError)` - Storage error
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Storage error
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
}
