//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// File storage configuration for complaint attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for stored upload files.
    #[serde(default = "default_upload_root")]
    pub upload_root: String,
    /// Public base URL that stored files are served from.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum upload size in bytes (default 10 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_root: default_upload_root(),
            base_url: default_base_url(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_upload_root() -> String {
    "./data/uploads/complaints".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080/uploads/complaints".to_string()
}

fn default_max_upload() -> u64 {
    10 * 1024 * 1024
}
