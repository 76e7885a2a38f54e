use std::io;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use futures::Stream;
use thiserror::Error;
use tracing::info;

use crate::features::uploads::models::{NewUpload, Upload};
use crate::features::uploads::repository::UploadRepository;
use crate::features::uploads::validation::{validate_content_type, InvalidFileFormat};

/// Body of the file being uploaded: a finite sequence of byte chunks,
/// readable at most once and owned by a single request.
pub type ContentStream = Pin<Box<dyn Stream<Item = Result<Bytes, io::Error>> + Send + 'static>>;

/// Validated-shape input to the recorder. Structural checks (fields present,
/// file name non-empty) happen in the handler before this is constructed.
pub struct UploadImageInput {
    pub file_name: String,
    pub content_type: String,
    pub content_stream: ContentStream,
}

/// Business-level failures of the upload pipeline. Callers branch on this
/// explicitly; nothing here is ever surfaced through a panic.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    InvalidFileFormat(#[from] InvalidFileFormat),

    #[error("failed to persist upload record: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Success payload of a recorded upload
#[derive(Debug)]
pub struct UploadedImage {
    pub url: String,
}

/// Service recording accepted uploads.
///
/// Validation always runs before any persistence side effect: a rejected
/// upload leaves no trace in the database and its content stream is never
/// polled. One successful call performs exactly one insert; there is no
/// deduplication, so identical inputs produce distinct records.
pub struct UploadService {
    repository: Arc<dyn UploadRepository>,
    legacy_empty_url: bool,
}

impl UploadService {
    pub fn new(repository: Arc<dyn UploadRepository>) -> Self {
        Self {
            repository,
            legacy_empty_url: false,
        }
    }

    /// Return an empty `url` on success instead of the persisted `remote_url`,
    /// matching the behavior of the service this one replaced.
    pub fn with_legacy_empty_url(mut self, enabled: bool) -> Self {
        self.legacy_empty_url = enabled;
        self
    }

    /// Validate the declared content type and persist one upload record.
    ///
    /// The content stream is not consumed: until a storage backend is wired
    /// in, only metadata is persisted and `remote_key`/`remote_url` mirror
    /// the file name.
    pub async fn record(&self, input: UploadImageInput) -> Result<UploadedImage, UploadError> {
        validate_content_type(&input.content_type)?;

        let record = self
            .repository
            .insert(NewUpload::from_file_name(&input.file_name))
            .await?;

        info!(
            "Upload recorded: id={}, name={}, remote_key={}",
            record.id, record.name, record.remote_key
        );

        let url = if self.legacy_empty_url {
            String::new()
        } else {
            record.remote_url
        };

        Ok(UploadedImage { url })
    }

    /// List recorded uploads, newest first, with the total row count.
    pub async fn list(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Upload>, i64), sqlx::Error> {
        let uploads = self.repository.list(limit, offset).await?;
        let total = self.repository.count().await?;
        Ok((uploads, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryUploadRepository;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Stream that flips a flag the first time it is polled
    fn tracked_stream(polled: Arc<AtomicBool>) -> ContentStream {
        Box::pin(futures::stream::once(async move {
            polled.store(true, Ordering::SeqCst);
            Ok::<_, io::Error>(Bytes::from_static(b"\x89PNG\r\n"))
        }))
    }

    fn input(file_name: &str, content_type: &str, polled: Arc<AtomicBool>) -> UploadImageInput {
        UploadImageInput {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            content_stream: tracked_stream(polled),
        }
    }

    #[tokio::test]
    async fn test_allowed_type_inserts_exactly_one_record() {
        let repo = Arc::new(InMemoryUploadRepository::default());
        let service = UploadService::new(repo.clone());

        let result = service
            .record(input("cat.png", "image/png", Arc::new(AtomicBool::new(false))))
            .await;

        assert!(result.is_ok());
        assert_eq!(repo.row_count(), 1);

        let rows = repo.rows();
        assert_eq!(rows[0].name, "cat.png");
        assert_eq!(rows[0].remote_key, "cat.png");
        assert_eq!(rows[0].remote_url, "cat.png");
    }

    #[tokio::test]
    async fn test_rejected_type_writes_nothing() {
        let repo = Arc::new(InMemoryUploadRepository::default());
        let service = UploadService::new(repo.clone());

        let result = service
            .record(input(
                "virus.exe",
                "application/x-msdownload",
                Arc::new(AtomicBool::new(false)),
            ))
            .await;

        match result {
            Err(UploadError::InvalidFileFormat(err)) => {
                assert_eq!(err.content_type, "application/x-msdownload");
            }
            other => panic!("expected InvalidFileFormat, got {:?}", other.map(|u| u.url)),
        }
        assert_eq!(repo.row_count(), 0);
    }

    #[tokio::test]
    async fn test_uppercase_type_rejected() {
        let repo = Arc::new(InMemoryUploadRepository::default());
        let service = UploadService::new(repo.clone());

        let result = service
            .record(input("cat.png", "IMAGE/PNG", Arc::new(AtomicBool::new(false))))
            .await;

        assert!(matches!(result, Err(UploadError::InvalidFileFormat(_))));
        assert_eq!(repo.row_count(), 0);
    }

    #[tokio::test]
    async fn test_rejection_never_polls_the_stream() {
        let repo = Arc::new(InMemoryUploadRepository::default());
        let service = UploadService::new(repo.clone());
        let polled = Arc::new(AtomicBool::new(false));

        let result = service
            .record(input("doc.pdf", "application/pdf", polled.clone()))
            .await;

        assert!(result.is_err());
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_no_deduplication_across_identical_calls() {
        let repo = Arc::new(InMemoryUploadRepository::default());
        let service = UploadService::new(repo.clone());

        for _ in 0..2 {
            service
                .record(input("cat.png", "image/png", Arc::new(AtomicBool::new(false))))
                .await
                .unwrap();
        }

        assert_eq!(repo.row_count(), 2);
        let rows = repo.rows();
        assert_ne!(rows[0].id, rows[1].id);
    }

    #[tokio::test]
    async fn test_success_returns_remote_url_by_default() {
        let repo = Arc::new(InMemoryUploadRepository::default());
        let service = UploadService::new(repo);

        let uploaded = service
            .record(input("cat.png", "image/png", Arc::new(AtomicBool::new(false))))
            .await
            .unwrap();

        assert_eq!(uploaded.url, "cat.png");
    }

    #[tokio::test]
    async fn test_legacy_mode_returns_empty_url() {
        let repo = Arc::new(InMemoryUploadRepository::default());
        let service = UploadService::new(repo.clone()).with_legacy_empty_url(true);

        let uploaded = service
            .record(input("cat.png", "image/png", Arc::new(AtomicBool::new(false))))
            .await
            .unwrap();

        // Legacy behavior hides the URL but the record is still complete.
        assert_eq!(uploaded.url, "");
        assert_eq!(repo.rows()[0].remote_url, "cat.png");
    }

    #[tokio::test]
    async fn test_insert_failure_surfaces_as_persistence_error() {
        let repo = Arc::new(InMemoryUploadRepository::failing());
        let service = UploadService::new(repo.clone());

        let result = service
            .record(input("cat.png", "image/png", Arc::new(AtomicBool::new(false))))
            .await;

        assert!(matches!(result, Err(UploadError::Persistence(_))));
        assert_eq!(repo.row_count(), 0);
    }

    #[tokio::test]
    async fn test_list_returns_newest_first_with_total() {
        let repo = Arc::new(InMemoryUploadRepository::default());
        let service = UploadService::new(repo);

        for name in ["a.png", "b.png", "c.png"] {
            service
                .record(input(name, "image/png", Arc::new(AtomicBool::new(false))))
                .await
                .unwrap();
        }

        let (uploads, total) = service.list(2, 0).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[0].name, "c.png");
        assert_eq!(uploads[1].name, "b.png");
    }
}
