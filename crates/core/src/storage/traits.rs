//! Trait definitions for the storage module.

use async_trait::async_trait;
use std::path::PathBuf;

use super::error::StorageError;
use super::types::StagedFile;

/// Moves videos between object storage and local staged files.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Returns the name of this gateway implementation.
    fn name(&self) -> &str;

    /// Downloads the raw object `staged.name()` to `staged.local_path()`.
    ///
    /// Nothing is left at the local path when this fails.
    async fn download_raw(&self, staged: &StagedFile) -> Result<PathBuf, StorageError>;

    /// Uploads `staged.local_path()` as the processed object `staged.name()`.
    async fn upload_processed(&self, staged: &StagedFile) -> Result<(), StorageError>;

    /// Deletes the local raw copy. Succeeds if it does not exist.
    async fn delete_raw_local(&self, staged: &StagedFile) -> Result<(), StorageError>;

    /// Deletes the local processed copy. Succeeds if it does not exist.
    async fn delete_processed_local(&self, staged: &StagedFile) -> Result<(), StorageError>;
}
