//! File-storage port.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for file-storage operations.
pub type FileStorageResult<T> = Result<T, FileStorageError>;

/// Upload progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// Bytes sent so far.
    pub transferred_bytes: u64,
    /// Size of the whole upload.
    pub total_bytes: u64,
}

impl UploadProgress {
    /// Returns `true` once every byte has been sent.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.transferred_bytes >= self.total_bytes
    }
}

/// A file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload<'a> {
    /// Object path inside the bucket.
    pub path: String,
    /// File contents.
    pub bytes: &'a [u8],
    /// MIME type stored as the object's content type.
    pub mime_type: String,
    /// Custom object metadata.
    pub metadata: BTreeMap<String, String>,
}

/// File storage contract.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Uploads a file and returns its download URL.
    ///
    /// `on_progress` is invoked as bytes are transferred.
    ///
    /// # Errors
    ///
    /// Returns [`FileStorageError::Upload`] when the transfer fails and
    /// [`FileStorageError::DownloadUrl`] when the URL cannot be retrieved.
    async fn upload(
        &self,
        upload: FileUpload<'_>,
        on_progress: Option<&(dyn Fn(UploadProgress) + Send + Sync)>,
    ) -> FileStorageResult<String>;
}

/// Errors returned by file-storage implementations.
#[derive(Debug, Clone, Error)]
pub enum FileStorageError {
    /// The transfer failed.
    #[error("upload failed: {0}")]
    Upload(Arc<dyn std::error::Error + Send + Sync>),

    /// The object was stored but its download URL could not be retrieved.
    #[error("download url unavailable: {0}")]
    DownloadUrl(Arc<dyn std::error::Error + Send + Sync>),
}

impl FileStorageError {
    /// Wraps a transfer error.
    pub fn upload(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Upload(Arc::new(err))
    }

    /// Wraps a download-URL error.
    pub fn download_url(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::DownloadUrl(Arc::new(err))
    }
}
