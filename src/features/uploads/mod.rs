pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod validation;

pub use repository::{PgUploadRepository, UploadRepository};
pub use routes::routes;
pub use services::UploadService;
