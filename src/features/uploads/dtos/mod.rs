pub mod upload_dto;

pub use upload_dto::{
    UploadImageDto, UploadMetadata, UploadRecordDto, UploadResponseDto, MAX_FILE_SIZE,
};
