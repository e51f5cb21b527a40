//! MySQL implementation of the BlobMetaRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use lb_core::domain::entities::blob::BlobMeta;
use lb_core::errors::DomainError;
use lb_core::repositories::BlobMetaRepository;

use super::db_error;

/// MySQL implementation of BlobMetaRepository over `encrypted_files`
pub struct MySqlBlobMetaRepository {
    pool: MySqlPool,
}

impl MySqlBlobMetaRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_meta(row: &sqlx::mysql::MySqlRow) -> Result<BlobMeta, DomainError> {
        Ok(BlobMeta {
            user_id: row
                .try_get("user_id")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get user_id: {}", e) })?,
            filename: row
                .try_get("filename")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get filename: {}", e) })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get updated_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl BlobMetaRepository for MySqlBlobMetaRepository {
    async fn exists(&self, user_id: i64, filename: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS matches FROM encrypted_files WHERE user_id = ? AND filename = ?",
        )
        .bind(user_id)
        .bind(filename)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check blob existence", e))?;

        let matches: i64 = row
            .try_get("matches")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get existence result: {}", e) })?;

        Ok(matches > 0)
    }

    async fn save(&self, meta: &BlobMeta) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO encrypted_files (user_id, filename, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE updated_at = VALUES(updated_at)
        "#;

        sqlx::query(query)
            .bind(meta.user_id)
            .bind(&meta.filename)
            .bind(meta.created_at)
            .bind(meta.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to save blob metadata", e))?;

        Ok(())
    }

    async fn list(&self, user_id: i64) -> Result<Vec<BlobMeta>, DomainError> {
        let query = r#"
            SELECT user_id, filename, created_at, updated_at
            FROM encrypted_files
            WHERE user_id = ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list blob metadata", e))?;

        rows.iter().map(Self::row_to_meta).collect()
    }

    async fn delete(&self, user_id: i64, filename: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM encrypted_files WHERE user_id = ? AND filename = ?")
            .bind(user_id)
            .bind(filename)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete blob metadata", e))?;

        Ok(result.rows_affected() > 0)
    }
}
