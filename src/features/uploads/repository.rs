use async_trait::async_trait;
use sqlx::PgPool;

use crate::features::uploads::models::{NewUpload, Upload};

/// Persistence seam for upload records.
///
/// The service takes this as an injected trait object so tests can substitute
/// an in-memory store for the Postgres-backed implementation.
#[async_trait]
pub trait UploadRepository: Send + Sync {
    /// Insert one record and return the persisted row.
    async fn insert(&self, new_upload: NewUpload) -> Result<Upload, sqlx::Error>;

    /// List records, newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Upload>, sqlx::Error>;

    /// Total number of records.
    async fn count(&self) -> Result<i64, sqlx::Error>;
}

/// Postgres-backed repository
pub struct PgUploadRepository {
    pool: PgPool,
}

impl PgUploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadRepository for PgUploadRepository {
    async fn insert(&self, new_upload: NewUpload) -> Result<Upload, sqlx::Error> {
        sqlx::query_as::<_, Upload>(
            r#"
            INSERT INTO uploads (name, remote_key, remote_url)
            VALUES ($1, $2, $3)
            RETURNING id, name, remote_key, remote_url, created_at
            "#,
        )
        .bind(&new_upload.name)
        .bind(&new_upload.remote_key)
        .bind(&new_upload.remote_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Upload>, sqlx::Error> {
        sqlx::query_as::<_, Upload>(
            r#"
            SELECT id, name, remote_key, remote_url, created_at
            FROM uploads
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM uploads")
            .fetch_one(&self.pool)
            .await
    }
}
