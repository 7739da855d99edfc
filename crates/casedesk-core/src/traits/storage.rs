//! File storage boundary for complaint attachments.
//!
//! The core only records attachment *metadata*; materializing and deleting
//! the underlying bytes is delegated to a [`FileStore`] implementation
//! (local disk in this workspace, anything object-store-shaped elsewhere).

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Metadata describing a stored upload, as returned by the file store.
///
/// Field names line up with the attachment metadata a complaint records, so
/// a `StoredUpload` can be recorded on the aggregate without translation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoredUpload {
    /// Storage-assigned file name (unique within the store).
    pub filename: String,
    /// The client-supplied original file name.
    pub original_name: String,
    /// Public URL the file is served from.
    pub url: String,
    /// Storage path used for later deletion.
    pub path: String,
    /// MIME type of the upload.
    pub mimetype: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

/// Trait for attachment file storage backends.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Store raw upload bytes and return the resulting file metadata.
    async fn store(
        &self,
        data: Bytes,
        original_name: &str,
        mimetype: &str,
    ) -> AppResult<StoredUpload>;

    /// Delete the stored file at the given path.
    async fn delete(&self, path: &str) -> AppResult<()>;
}
