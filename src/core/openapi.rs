use utoipa::{Modify, OpenApi};

use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Uploads
        uploads_handlers::upload_handler::upload_image,
        uploads_handlers::upload_handler::list_uploads,
    ),
    components(
        schemas(
            uploads_dtos::UploadImageDto,
            uploads_dtos::UploadResponseDto,
            uploads_dtos::UploadRecordDto,
            ApiResponse<uploads_dtos::UploadResponseDto>,
            ApiResponse<Vec<uploads_dtos::UploadRecordDto>>,
            Meta,
        )
    ),
    tags(
        (name = "uploads", description = "Image upload and listing endpoints"),
    ),
    info(
        title = "Imagedrop API",
        version = "0.1.0",
        description = "Validated image upload service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
