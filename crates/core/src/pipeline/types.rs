//! Types for pipeline invocations.

use serde::Serialize;

use super::error::PipelineError;

/// Message returned when every stage succeeded.
pub const SUCCESS_MESSAGE: &str = "Processing finished successfully";

/// Status class of an invocation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    BadRequest,
    ServerError,
}

impl OutcomeStatus {
    /// HTTP status code for this outcome.
    pub fn http_code(&self) -> u16 {
        match self {
            Self::Success => 200,
            Self::BadRequest => 400,
            Self::ServerError => 500,
        }
    }
}

/// Lifecycle of one invocation.
///
/// `Received -> Decoded -> Downloaded -> Transcoded -> Uploaded -> CleanedUp -> Done`,
/// or `Failed` from any stage before `CleanedUp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Received,
    Decoded,
    Downloaded,
    Transcoded,
    Uploaded,
    CleanedUp,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Decoded => "decoded",
            Self::Downloaded => "downloaded",
            Self::Transcoded => "transcoded",
            Self::Uploaded => "uploaded",
            Self::CleanedUp => "cleaned_up",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// What happened to the two staged files at the end of an invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_error: Option<String>,
}

impl CleanupReport {
    /// Whether both local deletes succeeded.
    pub fn is_clean(&self) -> bool {
        self.raw_error.is_none() && self.processed_error.is_none()
    }
}

/// Result of one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    /// `Done` or `Failed`.
    pub stage: PipelineStage,
    /// Last stage completed before the invocation ended.
    pub last_completed: PipelineStage,
    /// Absent when nothing was staged (payload rejected).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<CleanupReport>,
}

impl ProcessOutcome {
    pub(crate) fn success(cleanup: CleanupReport) -> Self {
        Self {
            status: OutcomeStatus::Success,
            message: SUCCESS_MESSAGE.to_string(),
            stage: PipelineStage::Done,
            last_completed: PipelineStage::CleanedUp,
            cleanup: Some(cleanup),
        }
    }

    pub(crate) fn failed(
        error: &PipelineError,
        last_completed: PipelineStage,
        cleanup: Option<CleanupReport>,
    ) -> Self {
        Self {
            status: error.status(),
            message: error.to_string(),
            stage: PipelineStage::Failed,
            last_completed,
            cleanup,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    pub fn http_code(&self) -> u16 {
        self.status.http_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcoder::TranscodeError;

    #[test]
    fn test_http_codes() {
        assert_eq!(OutcomeStatus::Success.http_code(), 200);
        assert_eq!(OutcomeStatus::BadRequest.http_code(), 400);
        assert_eq!(OutcomeStatus::ServerError.http_code(), 500);
    }

    #[test]
    fn test_success_outcome() {
        let outcome = ProcessOutcome::success(CleanupReport::default());
        assert!(outcome.is_success());
        assert_eq!(outcome.message, "Processing finished successfully");
        assert!(outcome.stage.is_terminal());
        assert!(outcome.cleanup.unwrap().is_clean());
    }

    #[test]
    fn test_failed_outcome_keeps_stage() {
        let error = PipelineError::from(TranscodeError::encode_failed("bad codec", None));
        let outcome = ProcessOutcome::failed(&error, PipelineStage::Downloaded, None);
        assert_eq!(outcome.http_code(), 500);
        assert_eq!(outcome.stage, PipelineStage::Failed);
        assert_eq!(outcome.last_completed, PipelineStage::Downloaded);
    }

    #[test]
    fn test_cleanup_report_serialization_skips_clean_files() {
        let report = CleanupReport {
            raw_error: Some("denied".to_string()),
            processed_error: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["raw_error"], "denied");
        assert!(json.get("processed_error").is_none());
        assert!(!report.is_clean());
    }
}
