//! Storage gateway backed by the `object_store` crate.

use async_trait::async_trait;
use futures::StreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::buffered::BufWriter;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, ObjectStoreExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use super::config::{StorageBackend, StorageConfig};
use super::error::StorageError;
use super::traits::StorageGateway;
use super::types::{remove_staged, StagedFile};

/// Gateway reading raw videos from one bucket and writing processed videos to another.
pub struct ObjectStoreGateway {
    raw: Arc<dyn ObjectStore>,
    processed: Arc<dyn ObjectStore>,
    backend: StorageBackend,
}

impl ObjectStoreGateway {
    /// Creates a gateway over two already built stores.
    pub fn new(raw: Arc<dyn ObjectStore>, processed: Arc<dyn ObjectStore>) -> Self {
        Self {
            raw,
            processed,
            backend: StorageBackend::Local,
        }
    }

    /// Builds both stores from configuration.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let raw = build_store(config, &config.raw_bucket)?;
        let processed = build_store(config, &config.processed_bucket)?;
        Ok(Self {
            raw,
            processed,
            backend: config.backend,
        })
    }

    async fn fetch_to(&self, staged: &StagedFile, dest: &Path) -> Result<u64, StorageError> {
        let location = ObjectPath::from(staged.name());
        let result = self
            .raw
            .get(&location)
            .await
            .map_err(|e| StorageError::from_store(staged.name(), e))?;

        let mut file = File::create(dest)
            .await
            .map_err(|e| StorageError::io(dest, e))?;

        let mut stream = result.into_stream();
        let mut total = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| StorageError::from_store(staged.name(), e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| StorageError::io(dest, e))?;
            total += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| StorageError::io(dest, e))?;
        Ok(total)
    }
}

fn build_store(config: &StorageConfig, bucket: &str) -> Result<Arc<dyn ObjectStore>, StorageError> {
    let store: Arc<dyn ObjectStore> = match config.backend {
        StorageBackend::Gcs => Arc::new(
            GoogleCloudStorageBuilder::from_env()
                .with_bucket_name(bucket)
                .build()
                .map_err(|e| StorageError::Config(format!("GCS bucket {}: {}", bucket, e)))?,
        ),
        StorageBackend::S3 => Arc::new(
            AmazonS3Builder::from_env()
                .with_bucket_name(bucket)
                .build()
                .map_err(|e| StorageError::Config(format!("S3 bucket {}: {}", bucket, e)))?,
        ),
        StorageBackend::Local => {
            let root = config
                .local_root
                .as_ref()
                .ok_or_else(|| {
                    StorageError::Config("local backend requires storage.local_root".to_string())
                })?
                .join(bucket);
            std::fs::create_dir_all(&root).map_err(|e| StorageError::io(&root, e))?;
            Arc::new(
                LocalFileSystem::new_with_prefix(&root)
                    .map_err(|e| StorageError::Config(format!("local bucket {}: {}", bucket, e)))?,
            )
        }
    };
    Ok(store)
}

#[async_trait]
impl StorageGateway for ObjectStoreGateway {
    fn name(&self) -> &str {
        self.backend.as_str()
    }

    #[tracing::instrument(skip(self, staged), fields(object = %staged.name()))]
    async fn download_raw(&self, staged: &StagedFile) -> Result<PathBuf, StorageError> {
        let start = Instant::now();
        let local = staged.local_path();

        if let Some(parent) = local.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent, e))?;
        }

        let partial = staged.partial_path();
        match self.fetch_to(staged, &partial).await {
            Ok(size_bytes) => {
                fs::rename(&partial, local)
                    .await
                    .map_err(|e| StorageError::io(local, e))?;
                info!(
                    size_bytes,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Raw video downloaded"
                );
                Ok(local.to_path_buf())
            }
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&partial).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        warn!(path = %partial.display(), error = %cleanup, "Failed to remove partial download");
                    }
                }
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip(self, staged), fields(object = %staged.name()))]
    async fn upload_processed(&self, staged: &StagedFile) -> Result<(), StorageError> {
        let start = Instant::now();
        let local = staged.local_path();

        let mut file = File::open(local)
            .await
            .map_err(|e| StorageError::io(local, e))?;

        let location = ObjectPath::from(staged.name());
        let mut writer = BufWriter::new(Arc::clone(&self.processed), location);

        let size_bytes = match tokio::io::copy(&mut file, &mut writer).await {
            Ok(n) => n,
            Err(e) => {
                if let Err(abort) = writer.abort().await {
                    warn!(error = %abort, "Failed to abort upload");
                }
                return Err(StorageError::Transfer {
                    name: staged.name().to_string(),
                    source: e,
                });
            }
        };

        writer
            .shutdown()
            .await
            .map_err(|e| StorageError::Transfer {
                name: staged.name().to_string(),
                source: e,
            })?;

        info!(
            size_bytes,
            duration_ms = start.elapsed().as_millis() as u64,
            "Processed video uploaded"
        );
        Ok(())
    }

    async fn delete_raw_local(&self, staged: &StagedFile) -> Result<(), StorageError> {
        remove_staged(staged)
            .await
            .map(|_| ())
            .map_err(|e| StorageError::io(staged.local_path(), e))
    }

    async fn delete_processed_local(&self, staged: &StagedFile) -> Result<(), StorageError> {
        remove_staged(staged)
            .await
            .map(|_| ())
            .map_err(|e| StorageError::io(staged.local_path(), e))
    }
}
