//! Configuration for the storage module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Object storage backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Google Cloud Storage; credentials from the environment.
    #[default]
    Gcs,
    /// Amazon S3 or compatible; credentials from the environment.
    S3,
    /// Directories on the local filesystem, one per bucket.
    Local,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gcs => "gcs",
            Self::S3 => "s3",
            Self::Local => "local",
        }
    }
}

/// Buckets and backend used by the storage gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Bucket raw uploads land in.
    #[serde(default = "default_raw_bucket")]
    pub raw_bucket: String,

    /// Bucket processed videos are written to.
    #[serde(default = "default_processed_bucket")]
    pub processed_bucket: String,

    /// Root directory for the local backend (required when backend = "local").
    #[serde(default)]
    pub local_root: Option<PathBuf>,
}

fn default_raw_bucket() -> String {
    "raw-videos".to_string()
}

fn default_processed_bucket() -> String {
    "processed-videos".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            raw_bucket: default_raw_bucket(),
            processed_bucket: default_processed_bucket(),
            local_root: None,
        }
    }
}

impl StorageConfig {
    /// Local backend rooted at `root`.
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::Local,
            local_root: Some(root.into()),
            ..Default::default()
        }
    }
}
