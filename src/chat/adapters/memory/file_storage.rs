//! In-memory file storage.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::chat::ports::{
    FileStorage, FileStorageError, FileStorageResult, FileUpload, UploadProgress,
};

const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Object held by [`InMemoryFileStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// File contents.
    pub bytes: Vec<u8>,
    /// Content type.
    pub mime_type: String,
    /// Custom metadata supplied with the upload.
    pub metadata: BTreeMap<String, String>,
}

/// Thread-safe in-memory object store.
///
/// Uploads are "transferred" in fixed-size chunks so progress callbacks
/// observe several snapshots for larger files. Download URLs are the
/// configured base URL joined with the object path.
#[derive(Debug, Clone)]
pub struct InMemoryFileStorage {
    base_url: String,
    chunk_size: usize,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl InMemoryFileStorage {
    /// Creates an empty store serving URLs under `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Sets the transfer chunk size. Zero is treated as one byte.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = if chunk_size == 0 { 1 } else { chunk_size };
        self
    }

    /// Returns the object stored at `path`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`FileStorageError::Upload`] when the lock is poisoned.
    pub fn object(&self, path: &str) -> FileStorageResult<Option<StoredObject>> {
        let objects = self
            .objects
            .read()
            .map_err(|err| FileStorageError::upload(std::io::Error::other(err.to_string())))?;
        Ok(objects.get(path).cloned())
    }

    fn download_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn byte_count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn upload(
        &self,
        upload: FileUpload<'_>,
        on_progress: Option<&(dyn Fn(UploadProgress) + Send + Sync)>,
    ) -> FileStorageResult<String> {
        let total_bytes = byte_count(upload.bytes.len());
        let mut transferred_bytes = 0_u64;
        for chunk in upload.bytes.chunks(self.chunk_size) {
            transferred_bytes = transferred_bytes.saturating_add(byte_count(chunk.len()));
            if let Some(callback) = on_progress {
                callback(UploadProgress {
                    transferred_bytes,
                    total_bytes,
                });
            }
        }

        let url = self.download_url(&upload.path);
        let mut objects = self
            .objects
            .write()
            .map_err(|err| FileStorageError::upload(std::io::Error::other(err.to_string())))?;
        objects.insert(
            upload.path,
            StoredObject {
                bytes: upload.bytes.to_vec(),
                mime_type: upload.mime_type,
                metadata: upload.metadata,
            },
        );
        Ok(url)
    }
}
