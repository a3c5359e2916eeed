//! Error types for the storage module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a storage gateway.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested object does not exist in the bucket.
    #[error("Object not found: {name}")]
    NotFound { name: String },

    /// The object store rejected the request.
    #[error("Storage backend error for {name}: {source}")]
    Backend {
        name: String,
        #[source]
        source: object_store::Error,
    },

    /// Streaming bytes to or from the object store failed.
    #[error("Transfer failed for {name}: {source}")]
    Transfer {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A local staged file could not be read, written or removed.
    #[error("Local file error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The gateway could not be built from configuration.
    #[error("Invalid storage configuration: {0}")]
    Config(String),
}

impl StorageError {
    /// Maps an object store error for `name`, keeping not-found distinct.
    pub fn from_store(name: impl Into<String>, error: object_store::Error) -> Self {
        match error {
            object_store::Error::NotFound { .. } => Self::NotFound { name: name.into() },
            source => Self::Backend {
                name: name.into(),
                source,
            },
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure is the object being absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_not_found() {
        let err = StorageError::from_store(
            "a.mp4",
            object_store::Error::NotFound {
                path: "a.mp4".to_string(),
                source: "missing".into(),
            },
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Object not found: a.mp4");
    }

    #[test]
    fn test_io_error_message() {
        let err = StorageError::io(
            "/scratch/a.mp4",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Local file error at /scratch/a.mp4: denied");
    }
}
