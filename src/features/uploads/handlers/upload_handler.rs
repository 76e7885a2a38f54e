use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{UploadMetadata, UploadRecordDto, UploadResponseDto};
use crate::features::uploads::services::{
    ContentStream, UploadError, UploadImageInput, UploadService,
};
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Wrap already-read multipart bytes as the one-shot stream the service takes.
fn buffered_stream(data: Bytes) -> ContentStream {
    Box::pin(futures::stream::once(async move {
        Ok::<_, std::io::Error>(data)
    }))
}

/// Upload an image
///
/// Accepts multipart/form-data with a single `file` part. The part's filename
/// and declared content type become the upload metadata; the declared type
/// must be one of the allowed image MIME types.
#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "uploads",
    request_body(
        content = crate::features::uploads::dtos::UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image upload form with a single `file` part",
    ),
    responses(
        (status = 201, description = "Upload recorded", body = ApiResponse<UploadResponseDto>),
        (status = 400, description = "Malformed request or disallowed file format"),
        (status = 500, description = "Persistence failure")
    )
)]
pub async fn upload_image(
    State(service): State<Arc<UploadService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponseDto>>)> {
    let mut file_bytes: Option<Bytes> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::Validation(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                content_type = field.content_type().map(|s| s.to_string());
                file_name = field.file_name().map(|s| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::Validation(format!("Failed to read file data: {}", e))
                })?;
                file_bytes = Some(data);
            }
            other => {
                debug!("Ignoring unknown field: {}", other);
            }
        }
    }

    // Schema layer: shape problems are reported here, before the content-type
    // allowlist ever runs.
    let file_bytes =
        file_bytes.ok_or_else(|| AppError::Validation("file part is required".to_string()))?;
    let metadata = UploadMetadata {
        file_name: file_name.unwrap_or_default(),
        content_type: content_type.unwrap_or_default(),
    };
    metadata
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let input = UploadImageInput {
        file_name: metadata.file_name,
        content_type: metadata.content_type,
        content_stream: buffered_stream(file_bytes),
    };

    match service.record(input).await {
        Ok(uploaded) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(UploadResponseDto { url: uploaded.url }),
                None,
                None,
            )),
        )),
        Err(UploadError::InvalidFileFormat(err)) => Err(AppError::BadRequest(err.to_string())),
        Err(UploadError::Persistence(err)) => Err(AppError::Database(err)),
    }
}

/// List recorded uploads
///
/// Returns upload records newest first, paginated.
#[utoipa::path(
    get,
    path = "/api/uploads",
    tag = "uploads",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of upload records", body = ApiResponse<Vec<UploadRecordDto>>),
    )
)]
pub async fn list_uploads(
    State(service): State<Arc<UploadService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<UploadRecordDto>>>> {
    let (uploads, total) = service
        .list(pagination.limit(), pagination.offset())
        .await?;

    let records: Vec<UploadRecordDto> = uploads.into_iter().map(UploadRecordDto::from).collect();

    Ok(Json(ApiResponse::success(
        Some(records),
        None,
        Some(Meta { total }),
    )))
}
