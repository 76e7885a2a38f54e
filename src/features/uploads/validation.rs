use thiserror::Error;

/// MIME types accepted for upload. Matching is exact and case-sensitive:
/// browsers send lowercase types, and anything else is treated as untrusted.
pub const ALLOWED_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/jpg", "image/webp"];

/// Rejection returned when a declared content type is not in the allowlist.
///
/// Always handled as a value at the call site, never raised through a panic.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("file format '{content_type}' is not allowed")]
pub struct InvalidFileFormat {
    pub content_type: String,
}

/// Check a declared content type against the allowlist.
///
/// Pure membership test: no I/O, and in particular no sniffing of the file
/// bytes. The declared type is all we validate.
pub fn validate_content_type(content_type: &str) -> Result<(), InvalidFileFormat> {
    if ALLOWED_MIME_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(InvalidFileFormat {
            content_type: content_type.to_string(),
        })
    }
}
