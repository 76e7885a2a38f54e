use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::features::uploads::dtos::MAX_FILE_SIZE;
use crate::features::uploads::handlers::{list_uploads, upload_image};
use crate::features::uploads::services::UploadService;

/// Create routes for the uploads feature
pub fn routes(upload_service: Arc<UploadService>) -> Router {
    Router::new()
        .route("/api/uploads", get(list_uploads).post(upload_image))
        // Allow body size up to MAX_FILE_SIZE + buffer for multipart overhead
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024))
        .with_state(upload_service)
}
