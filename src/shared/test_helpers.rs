use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::features::uploads::models::{NewUpload, Upload};
use crate::features::uploads::repository::UploadRepository;

/// In-memory substitute for the Postgres upload repository.
///
/// Rows live in insertion order; `list` reverses them, matching the
/// newest-first ordering of the real repository.
#[derive(Default)]
pub struct InMemoryUploadRepository {
    rows: Mutex<Vec<Upload>>,
    fail_inserts: bool,
}

impl InMemoryUploadRepository {
    /// Repository whose inserts always fail, for persistence-error paths
    pub fn failing() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_inserts: true,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn rows(&self) -> Vec<Upload> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadRepository for InMemoryUploadRepository {
    async fn insert(&self, new_upload: NewUpload) -> Result<Upload, sqlx::Error> {
        if self.fail_inserts {
            return Err(sqlx::Error::PoolClosed);
        }
        let row = Upload {
            id: Uuid::new_v4(),
            name: new_upload.name,
            remote_key: new_upload.remote_key,
            remote_url: new_upload.remote_url,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Upload>, sqlx::Error> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}
