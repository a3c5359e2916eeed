//! Mock transcoder for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

use crate::transcoder::{TranscodeError, TranscodeJob, TranscodeResult, Transcoder};

use super::call_log::{Call, CallLog};

/// Bytes written to the output path by a mocked conversion.
pub const MOCK_PROCESSED_CONTENT: &[u8] = b"processed video bytes";

/// A recorded transcode job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTranscode {
    pub job: TranscodeJob,
    pub success: bool,
}

/// Mock implementation of the Transcoder trait.
///
/// Successful conversions write `MOCK_PROCESSED_CONTENT` to the job's output
/// path. A configured error is returned once, after which the mock succeeds
/// again.
#[derive(Debug, Clone)]
pub struct MockTranscoder {
    log: CallLog,
    conversions: Arc<RwLock<Vec<RecordedTranscode>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<TranscodeError>>>,
    /// Whether a failed conversion still leaves a partial output file behind.
    leave_partial_output: Arc<RwLock<bool>>,
}

impl Default for MockTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscoder {
    pub fn new() -> Self {
        Self::with_log(CallLog::new())
    }

    /// Create a new mock recording into `log`.
    pub fn with_log(log: CallLog) -> Self {
        Self {
            log,
            conversions: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            leave_partial_output: Arc::new(RwLock::new(false)),
        }
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: TranscodeError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make failed conversions write a partial output file first.
    pub async fn set_leave_partial_output(&self, leave: bool) {
        *self.leave_partial_output.write().await = leave;
    }

    pub async fn recorded_conversions(&self) -> Vec<RecordedTranscode> {
        self.conversions.read().await.clone()
    }

    /// Jobs submitted so far, successful or not.
    pub async fn recorded_jobs(&self) -> Vec<TranscodeJob> {
        self.conversions
            .read()
            .await
            .iter()
            .map(|c| c.job.clone())
            .collect()
    }

    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    async fn write_output(job: &TranscodeJob) -> Result<u64, TranscodeError> {
        if let Some(parent) = job.output_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&job.output_path, MOCK_PROCESSED_CONTENT).await?;
        Ok(MOCK_PROCESSED_CONTENT.len() as u64)
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscodeError> {
        self.log
            .record(Call::Convert {
                input: job.input_path.clone(),
                output: job.output_path.clone(),
            })
            .await;

        if let Some(err) = self.next_error.write().await.take() {
            if *self.leave_partial_output.read().await {
                Self::write_output(&job).await?;
            }
            self.conversions.write().await.push(RecordedTranscode {
                job,
                success: false,
            });
            return Err(err);
        }

        let output_size_bytes = Self::write_output(&job).await?;
        self.conversions.write().await.push(RecordedTranscode {
            job: job.clone(),
            success: true,
        });

        Ok(TranscodeResult {
            job_id: job.job_id,
            output_path: job.output_path,
            output_size_bytes,
            duration_ms: 0,
        })
    }

    async fn validate(&self) -> Result<(), TranscodeError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcoder::TranscodeProfile;
    use tempfile::TempDir;

    fn job(dir: &TempDir, id: &str) -> TranscodeJob {
        TranscodeJob {
            job_id: id.to_string(),
            input_path: dir.path().join("raw").join("a.mp4"),
            output_path: dir.path().join("processed").join("processed-a.mp4"),
            profile: TranscodeProfile::default(),
        }
    }

    #[tokio::test]
    async fn test_convert_writes_output() {
        let dir = TempDir::new().unwrap();
        let transcoder = MockTranscoder::new();

        let result = transcoder.convert(job(&dir, "job-1")).await.unwrap();
        assert_eq!(result.job_id, "job-1");
        assert_eq!(
            std::fs::read(&result.output_path).unwrap(),
            MOCK_PROCESSED_CONTENT
        );
    }

    #[tokio::test]
    async fn test_error_injection() {
        let dir = TempDir::new().unwrap();
        let transcoder = MockTranscoder::new();
        transcoder
            .set_next_error(TranscodeError::encode_failed("bad codec", None))
            .await;

        let err = transcoder.convert(job(&dir, "fail")).await.unwrap_err();
        assert_eq!(err.to_string(), "bad codec");
        assert!(!dir.path().join("processed").join("processed-a.mp4").exists());

        let conversions = transcoder.recorded_conversions().await;
        assert_eq!(conversions.len(), 1);
        assert!(!conversions[0].success);

        // Error is consumed.
        assert!(transcoder.convert(job(&dir, "ok")).await.is_ok());
    }

    #[tokio::test]
    async fn test_partial_output_on_failure() {
        let dir = TempDir::new().unwrap();
        let transcoder = MockTranscoder::new();
        transcoder.set_leave_partial_output(true).await;
        transcoder
            .set_next_error(TranscodeError::encode_failed("killed", None))
            .await;

        assert!(transcoder.convert(job(&dir, "partial")).await.is_err());
        assert!(dir.path().join("processed").join("processed-a.mp4").exists());
    }
}
