use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::uploads::models::Upload;

/// Upload request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Structural shape of the metadata extracted from the multipart request.
///
/// Checked before the content-type allowlist runs, so malformed requests are
/// reported as schema failures rather than format rejections.
#[derive(Debug, Validate)]
pub struct UploadMetadata {
    #[validate(length(min = 1, message = "fileName must not be empty"))]
    pub file_name: String,

    #[validate(length(min = 1, message = "contentType must not be empty"))]
    pub content_type: String,
}

/// Response DTO for a recorded upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    /// URL of the stored asset
    pub url: String,
}

/// Response DTO describing one persisted upload record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadRecordDto {
    /// Unique identifier of the record
    pub id: Uuid,
    /// Original file name as uploaded
    pub name: String,
    /// Object-store key the bytes would live under
    pub remote_key: String,
    /// Publicly resolvable URL of the asset
    pub remote_url: String,
    /// Timestamp when the upload was recorded
    pub created_at: DateTime<Utc>,
}

impl From<Upload> for UploadRecordDto {
    fn from(upload: Upload) -> Self {
        Self {
            id: upload.id,
            name: upload.name,
            remote_key: upload.remote_key,
            remote_url: upload.remote_url,
            created_at: upload.created_at,
        }
    }
}

/// Maximum accepted body size in bytes (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;
