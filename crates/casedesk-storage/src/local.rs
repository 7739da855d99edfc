//! Local filesystem attachment storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use casedesk_core::config::storage::StorageConfig;
use casedesk_core::error::{AppError, ErrorKind};
use casedesk_core::result::AppResult;
use casedesk_core::traits::storage::{FileStore, StoredUpload};

/// Local filesystem file store for complaint attachments.
///
/// Uploads are written under a configured root with a UUID-prefixed file
/// name so client-supplied names can never collide or escape the root.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    /// Root directory for stored files.
    root: PathBuf,
    /// Public base URL files are served from.
    base_url: String,
}

impl LocalFileStore {
    /// Create a new local file store from configuration.
    ///
    /// Creates the upload root if it does not exist yet.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.upload_root);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Derive a unique on-disk name, keeping the original extension.
    fn unique_filename(original_name: &str) -> String {
        let stem = Uuid::new_v4();
        match Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
        {
            Some(ext) if !ext.is_empty() => format!("{stem}.{ext}"),
            _ => stem.to_string(),
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(
        &self,
        data: Bytes,
        original_name: &str,
        mimetype: &str,
    ) -> AppResult<StoredUpload> {
        let filename = Self::unique_filename(original_name);
        let full_path = self.root.join(&filename);

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write upload: {}", full_path.display()),
                e,
            )
        })?;

        debug!(filename, bytes = data.len(), "Stored upload");

        Ok(StoredUpload {
            url: format!("{}/{filename}", self.base_url),
            path: full_path.to_string_lossy().into_owned(),
            filename,
            original_name: original_name.to_string(),
            mimetype: mimetype.to_string(),
            size_bytes: data.len() as u64,
        })
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = PathBuf::from(path);
        if full_path.exists() {
            fs::remove_file(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete file: {path}"),
                    e,
                )
            })?;
            debug!(path, "Deleted stored file");
        }
        Ok(())
    }
}
