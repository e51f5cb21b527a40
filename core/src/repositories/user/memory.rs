//! In-memory implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

#[derive(Default)]
struct Directory {
    users: HashMap<i64, User>,
    last_id: i64,
}

/// User directory held in process memory
///
/// Ids are assigned sequentially from 1. Cloning shares the same directory.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Directory>>,
}

impl InMemoryUserRepository {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    /// Returns `true` when no user is stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut directory = self.inner.write().await;

        if directory.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        directory.last_id += 1;
        let created = user.into_user(directory.last_id, Utc::now());
        directory.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let directory = self.inner.read().await;
        Ok(directory.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let directory = self.inner.read().await;
        Ok(directory.users.get(&id).cloned())
    }
}
