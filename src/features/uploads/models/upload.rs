use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for upload records
#[derive(Debug, Clone, FromRow)]
pub struct Upload {
    pub id: Uuid,
    /// Original file name as supplied by the caller
    pub name: String,
    /// Key under which the bytes would live in an object store
    pub remote_key: String,
    /// Publicly resolvable reference to the stored asset
    pub remote_url: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new upload record.
///
/// `remote_key` and `remote_url` currently mirror `name`: no binary transfer
/// happens yet, so there is no storage backend to produce distinct values.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub name: String,
    pub remote_key: String,
    pub remote_url: String,
}

impl NewUpload {
    pub fn from_file_name(file_name: &str) -> Self {
        Self {
            name: file_name.to_string(),
            remote_key: file_name.to_string(),
            remote_url: file_name.to_string(),
        }
    }
}
