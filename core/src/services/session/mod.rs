//! Session lifecycle management
//!
//! Registration, login, refresh-token rotation, logout and identification
//! of access tokens. The service owns no mutable state; everything lives in
//! the user directory and the refresh token store.

mod service;

#[cfg(test)]
mod tests;

pub use service::SessionService;

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainResult;

/// Resolves an access token to the user it was issued for
///
/// Lets the HTTP layer authenticate requests without knowing the concrete
/// repositories behind the session service.
#[async_trait]
pub trait AccessTokenIdentifier: Send + Sync {
    async fn identify(&self, access_token: &str) -> DomainResult<User>;
}
