//! Mock storage gateway for testing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

use crate::storage::{remove_staged, StagedFile, StorageError, StorageGateway};

use super::call_log::{Call, CallLog};

/// Bytes written to the local path by a mocked download.
pub const MOCK_RAW_CONTENT: &[u8] = b"raw video bytes";

/// Mock implementation of the StorageGateway trait.
///
/// Provides controllable behavior for testing:
/// - Record every call in a (possibly shared) `CallLog`
/// - Inject a failure per operation
/// - Stage real files so local cleanup is observable
///
/// Clones share state, so a test can keep one handle and give another to
/// the orchestrator.
///
/// # Example
///
/// ```rust,ignore
/// use vidproc_core::testing::MockStorageGateway;
///
/// let storage = MockStorageGateway::new();
/// storage.set_upload_error(StorageError::Config("bucket gone".into())).await;
///
/// let orchestrator = PipelineOrchestrator::new(config, Arc::new(storage.clone()), transcoder);
/// orchestrator.process(&body).await;
///
/// assert_eq!(storage.delete_count().await, 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockStorageGateway {
    log: CallLog,
    /// Processed objects uploaded so far, by name.
    uploaded: Arc<RwLock<Vec<(String, Vec<u8>)>>>,
    uploaded_paths: Arc<RwLock<Vec<PathBuf>>>,
    downloaded_paths: Arc<RwLock<Vec<PathBuf>>>,
    download_error: Arc<RwLock<Option<StorageError>>>,
    upload_error: Arc<RwLock<Option<StorageError>>>,
    delete_raw_error: Arc<RwLock<Option<StorageError>>>,
    delete_processed_error: Arc<RwLock<Option<StorageError>>>,
}

impl Default for MockStorageGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStorageGateway {
    /// Create a new mock with its own call log.
    pub fn new() -> Self {
        Self::with_log(CallLog::new())
    }

    /// Create a new mock recording into `log`.
    pub fn with_log(log: CallLog) -> Self {
        Self {
            log,
            uploaded: Arc::new(RwLock::new(Vec::new())),
            uploaded_paths: Arc::new(RwLock::new(Vec::new())),
            downloaded_paths: Arc::new(RwLock::new(Vec::new())),
            download_error: Arc::new(RwLock::new(None)),
            upload_error: Arc::new(RwLock::new(None)),
            delete_raw_error: Arc::new(RwLock::new(None)),
            delete_processed_error: Arc::new(RwLock::new(None)),
        }
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }

    /// Configure the next download to fail.
    pub async fn set_download_error(&self, error: StorageError) {
        *self.download_error.write().await = Some(error);
    }

    /// Configure the next upload to fail.
    pub async fn set_upload_error(&self, error: StorageError) {
        *self.upload_error.write().await = Some(error);
    }

    /// Configure the next raw delete to fail.
    pub async fn set_delete_raw_error(&self, error: StorageError) {
        *self.delete_raw_error.write().await = Some(error);
    }

    /// Configure the next processed delete to fail.
    pub async fn set_delete_processed_error(&self, error: StorageError) {
        *self.delete_processed_error.write().await = Some(error);
    }

    /// Local paths downloads were written to, in order.
    pub async fn downloaded_paths(&self) -> Vec<PathBuf> {
        self.downloaded_paths.read().await.clone()
    }

    /// Names and contents of every uploaded object.
    pub async fn uploaded(&self) -> Vec<(String, Vec<u8>)> {
        self.uploaded.read().await.clone()
    }

    /// Local paths uploads were read from, in order.
    pub async fn uploaded_paths(&self) -> Vec<PathBuf> {
        self.uploaded_paths.read().await.clone()
    }

    pub async fn upload_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Upload(_))).await
    }

    /// Raw plus processed delete calls.
    pub async fn delete_count(&self) -> usize {
        self.count(|c| matches!(c, Call::DeleteRaw(_) | Call::DeleteProcessed(_)))
            .await
    }

    async fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.log.calls().await.iter().filter(|c| predicate(*c)).count()
    }

    async fn delete(
        &self,
        staged: &StagedFile,
        error: &RwLock<Option<StorageError>>,
    ) -> Result<(), StorageError> {
        if let Some(err) = error.write().await.take() {
            return Err(err);
        }
        remove_staged(staged)
            .await
            .map(|_| ())
            .map_err(|e| StorageError::io(staged.local_path(), e))
    }
}

#[async_trait]
impl StorageGateway for MockStorageGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn download_raw(&self, staged: &StagedFile) -> Result<PathBuf, StorageError> {
        self.log.record(Call::Download(staged.name().to_string())).await;
        if let Some(err) = self.download_error.write().await.take() {
            return Err(err);
        }

        let path = staged.local_path().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent, e))?;
        }
        fs::write(&path, MOCK_RAW_CONTENT)
            .await
            .map_err(|e| StorageError::io(&path, e))?;

        self.downloaded_paths.write().await.push(path.clone());
        Ok(path)
    }

    async fn upload_processed(&self, staged: &StagedFile) -> Result<(), StorageError> {
        self.log.record(Call::Upload(staged.name().to_string())).await;
        if let Some(err) = self.upload_error.write().await.take() {
            return Err(err);
        }

        let data = fs::read(staged.local_path())
            .await
            .map_err(|e| StorageError::io(staged.local_path(), e))?;
        self.uploaded
            .write()
            .await
            .push((staged.name().to_string(), data));
        self.uploaded_paths
            .write()
            .await
            .push(staged.local_path().to_path_buf());
        Ok(())
    }

    async fn delete_raw_local(&self, staged: &StagedFile) -> Result<(), StorageError> {
        self.log.record(Call::DeleteRaw(staged.name().to_string())).await;
        self.delete(staged, &self.delete_raw_error).await
    }

    async fn delete_processed_local(&self, staged: &StagedFile) -> Result<(), StorageError> {
        self.log
            .record(Call::DeleteProcessed(staged.name().to_string()))
            .await;
        self.delete(staged, &self.delete_processed_error).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_download_stages_file_and_delete_removes_it() {
        let dir = TempDir::new().unwrap();
        let storage = MockStorageGateway::new();
        let staged = StagedFile::new("a.mp4", dir.path().join("raw").join("a.mp4"));

        let path = storage.download_raw(&staged).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), MOCK_RAW_CONTENT);

        storage.delete_raw_local(&staged).await.unwrap();
        assert!(!path.exists());
        assert_eq!(storage.delete_count().await, 1);
    }

    #[tokio::test]
    async fn test_error_injection_is_consumed() {
        let dir = TempDir::new().unwrap();
        let storage = MockStorageGateway::new();
        let staged = StagedFile::new("a.mp4", dir.path().join("a.mp4"));
        storage
            .set_download_error(StorageError::NotFound {
                name: "a.mp4".to_string(),
            })
            .await;

        assert!(storage.download_raw(&staged).await.unwrap_err().is_not_found());
        assert!(storage.download_raw(&staged).await.is_ok());
        assert_eq!(storage.downloaded_paths().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_file_succeeds() {
        let storage = MockStorageGateway::new();
        let staged = StagedFile::new("gone.mp4", "/nonexistent/gone.mp4");
        assert!(storage.delete_processed_local(&staged).await.is_ok());
    }
}
