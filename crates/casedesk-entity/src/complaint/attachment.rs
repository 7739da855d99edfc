//! Attachment metadata embedded in a complaint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casedesk_core::traits::storage::StoredUpload;
use casedesk_core::types::AttachmentId;

/// Maximum number of attachments per complaint.
pub const MAX_ATTACHMENTS: usize = 10;
/// Maximum size of a single attachment in bytes (10 MiB).
pub const MAX_ATTACHMENT_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Metadata for one uploaded file attached to a complaint.
///
/// The bytes live in the file store; the complaint records only this
/// metadata, including the storage path needed for later deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique attachment identifier.
    pub id: AttachmentId,
    /// Storage-assigned file name.
    pub filename: String,
    /// The client-supplied original file name.
    pub original_name: String,
    /// Public URL the file is served from.
    pub url: String,
    /// Storage path used for deletion.
    pub path: String,
    /// MIME type of the upload.
    pub mimetype: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// When the file was uploaded. Immutable.
    pub uploaded_at: DateTime<Utc>,
}

impl Attachment {
    /// Record stored-upload metadata as a new attachment entry.
    pub fn from_upload(upload: StoredUpload) -> Self {
        Self {
            id: AttachmentId::new(),
            filename: upload.filename,
            original_name: upload.original_name,
            url: upload.url,
            path: upload.path,
            mimetype: upload.mimetype,
            size_bytes: upload.size_bytes,
            uploaded_at: Utc::now(),
        }
    }
}
