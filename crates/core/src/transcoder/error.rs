//! Error types for the transcoder module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while transcoding a staged video.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// Input file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Output directory does not exist and could not be created.
    #[error("Failed to create output directory: {path}")]
    OutputDirectoryFailed { path: PathBuf },

    /// The encoder reported a failure. Displays only the reason so callers
    /// can surface it verbatim.
    #[error("{reason}")]
    EncodeFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// Encoder exited cleanly but produced no output file.
    #[error("Output file not created: {path}")]
    OutputMissing { path: PathBuf },

    /// Transcoding timed out.
    #[error("Transcoding timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error during transcoding.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscodeError {
    /// Creates a new encode failure with optional stderr output.
    pub fn encode_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::EncodeFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Captured encoder diagnostics, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::EncodeFailed { stderr, .. } => stderr.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_failed_displays_reason_only() {
        let err = TranscodeError::encode_failed("bad codec", Some("x".to_string()));
        assert_eq!(err.to_string(), "bad codec");
        assert_eq!(err.stderr(), Some("x"));
    }

    #[test]
    fn test_timeout_message() {
        let err = TranscodeError::Timeout { timeout_secs: 30 };
        assert_eq!(err.to_string(), "Transcoding timed out after 30 seconds");
        assert!(err.stderr().is_none());
    }
}
