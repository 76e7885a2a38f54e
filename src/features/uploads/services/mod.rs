pub mod upload_service;

pub use upload_service::{ContentStream, UploadError, UploadImageInput, UploadService, UploadedImage};
