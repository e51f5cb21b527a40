//! MySQL implementation of the RefreshTokenRepository trait.
//!
//! `refresh_tokens.user_id` carries a unique index, so `put` is a single
//! upsert statement and a user never has more than one row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use lb_core::domain::entities::token::RefreshTokenRecord;
use lb_core::errors::DomainError;
use lb_core::repositories::RefreshTokenRepository;

use super::db_error;

/// MySQL implementation of RefreshTokenRepository
pub struct MySqlRefreshTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    /// Create a new MySQL refresh token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshTokenRecord
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        Ok(RefreshTokenRecord {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?,
            user_id: row
                .try_get("user_id")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get user_id: {}", e) })?,
            token: row
                .try_get("token")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get token: {}", e) })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get expires_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn put(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (user_id, token, expires_at)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE
                token = VALUES(token),
                expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(user_id)
            .bind(token)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to store refresh token", e))?;

        Ok(())
    }

    async fn get(&self, token: &str) -> Result<RefreshTokenRecord, DomainError> {
        let query = r#"
            SELECT id, user_id, token, expires_at
            FROM refresh_tokens
            WHERE token = ? AND expires_at > ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(token)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to look up refresh token", e))?
            .ok_or_else(|| DomainError::NotFound {
                resource: "refresh token".to_string(),
            })?;

        Self::row_to_record(&row)
    }

    async fn delete(&self, token: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete refresh token", e))?;

        Ok(())
    }
}
