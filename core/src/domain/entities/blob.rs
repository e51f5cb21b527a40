//! Metadata for per-user encrypted blobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata row for a stored blob
///
/// The blob content is opaque ciphertext produced by the client; only its
/// name and timestamps are tracked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMeta {
    /// Owner of the blob
    pub user_id: i64,

    /// Name of the blob, unique per user
    pub filename: String,

    /// Timestamp of the first upload
    pub created_at: DateTime<Utc>,

    /// Timestamp of the latest upload
    pub updated_at: DateTime<Utc>,
}

impl BlobMeta {
    /// Creates metadata for a blob uploaded at `now`
    pub fn new(user_id: i64, filename: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            filename: filename.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
