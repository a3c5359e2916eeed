use thiserror::Error;

use crate::notification::PayloadError;
use crate::storage::StorageError;
use crate::transcoder::TranscodeError;

use super::types::OutcomeStatus;

/// Primary failure of a pipeline invocation.
///
/// The display text is the response message returned to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Bad request: missing filename.\n{0}")]
    InvalidPayload(#[from] PayloadError),

    #[error("Download failed: {0}")]
    Download(#[source] StorageError),

    #[error("Processing failed: {0}")]
    Transcode(#[from] TranscodeError),

    #[error("Upload failed: {0}")]
    Upload(#[source] StorageError),
}

impl PipelineError {
    /// Status class reported for this failure.
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::InvalidPayload(_) => OutcomeStatus::BadRequest,
            Self::Download(_) | Self::Transcode(_) | Self::Upload(_) => OutcomeStatus::ServerError,
        }
    }

    /// Metrics label for this failure.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "invalid_payload",
            Self::Download(_) => "download_failed",
            Self::Transcode(_) => "transcode_failed",
            Self::Upload(_) => "upload_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_payload_message() {
        let err = PipelineError::from(PayloadError::MissingName);
        assert_eq!(err.status(), OutcomeStatus::BadRequest);
        assert_eq!(
            err.to_string(),
            "Bad request: missing filename.\nInvalid message payload"
        );
    }

    #[test]
    fn test_transcode_message_carries_reason() {
        let err = PipelineError::from(TranscodeError::encode_failed("bad codec", None));
        assert_eq!(err.status(), OutcomeStatus::ServerError);
        assert_eq!(err.to_string(), "Processing failed: bad codec");
        assert_eq!(err.label(), "transcode_failed");
    }

    #[test]
    fn test_storage_failures_are_server_errors() {
        let download = PipelineError::Download(StorageError::NotFound {
            name: "a.mp4".to_string(),
        });
        assert_eq!(download.status(), OutcomeStatus::ServerError);
        assert_eq!(download.to_string(), "Download failed: Object not found: a.mp4");

        let upload = PipelineError::Upload(StorageError::Config("x".to_string()));
        assert!(upload.to_string().starts_with("Upload failed: "));
    }
}
