//! Storage module: object storage access and local staging.
//!
//! The `StorageGateway` trait moves videos between buckets and staged local
//! files. `ObjectStoreGateway` implements it on top of `object_store`, so the
//! same code serves Google Cloud Storage, S3 and a local directory backend.
//! `ScratchSpace` hands each pipeline invocation its own directory.

mod config;
mod error;
mod gateway;
mod traits;
mod types;

pub use config::{StorageBackend, StorageConfig};
pub use error::StorageError;
pub use gateway::ObjectStoreGateway;
pub use traits::StorageGateway;
pub use types::{remove_staged, InvocationScratch, ScratchSpace, StagedFile};
