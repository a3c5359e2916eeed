//! Trait definitions for the transcoder module.

use async_trait::async_trait;

use super::error::TranscodeError;
use super::types::{TranscodeJob, TranscodeResult};

/// Converts one local input video into one local output video.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Transcodes the job's input into its output path.
    async fn convert(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscodeError>;

    /// Validates that the transcoder is properly configured and ready.
    async fn validate(&self) -> Result<(), TranscodeError>;
}
