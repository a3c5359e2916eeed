use super::{types::Config, ConfigError};
use crate::storage::StorageBackend;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Bucket names are set and distinct
/// - Local backend has a root directory
/// - Transcode profile height and timeout are usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let storage = &config.storage;
    if storage.raw_bucket.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.raw_bucket cannot be empty".to_string(),
        ));
    }
    if storage.processed_bucket.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.processed_bucket cannot be empty".to_string(),
        ));
    }
    // Uploads to the raw bucket would trigger another notification.
    if storage.raw_bucket == storage.processed_bucket {
        return Err(ConfigError::ValidationError(
            "storage.raw_bucket and storage.processed_bucket must differ".to_string(),
        ));
    }
    if storage.backend == StorageBackend::Local && storage.local_root.is_none() {
        return Err(ConfigError::ValidationError(
            "storage.local_root is required for the local backend".to_string(),
        ));
    }

    let profile = &config.pipeline.profile;
    if profile.height == 0 || profile.height % 2 != 0 {
        return Err(ConfigError::ValidationError(format!(
            "pipeline.profile.height must be a positive even number, got {}",
            profile.height
        )));
    }
    if config.transcoder.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "transcoder.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
