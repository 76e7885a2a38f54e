pub mod upload_handler;

pub use upload_handler::{list_uploads, upload_image};
