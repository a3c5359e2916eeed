//! Pipeline orchestrator implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, field, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::metrics::{observe_stage, CLEANUP_FAILURES, INVOCATIONS_TOTAL};
use crate::notification::{decode_notification, ProcessRequest};
use crate::storage::{ScratchSpace, StagedFile, StorageGateway};
use crate::transcoder::{TranscodeJob, TranscodeProfile, Transcoder};

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::types::{CleanupReport, PipelineStage, ProcessOutcome};

/// Runs decode, download, transcode, upload and cleanup for one notification.
///
/// Stages run strictly in order. The two local deletes of the cleanup step
/// run concurrently. Cleanup runs on every path once a request was decoded.
pub struct PipelineOrchestrator {
    storage: Arc<dyn StorageGateway>,
    transcoder: Arc<dyn Transcoder>,
    profile: TranscodeProfile,
    scratch: ScratchSpace,
}

impl PipelineOrchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        config: PipelineConfig,
        storage: Arc<dyn StorageGateway>,
        transcoder: Arc<dyn Transcoder>,
    ) -> Self {
        Self {
            storage,
            transcoder,
            profile: config.profile,
            scratch: ScratchSpace::new(config.scratch_dir),
        }
    }

    pub fn scratch(&self) -> &ScratchSpace {
        &self.scratch
    }

    /// Creates the scratch root. Call once before serving requests.
    pub async fn prepare(&self) -> std::io::Result<()> {
        self.scratch.ensure().await
    }

    /// Processes one push request body.
    ///
    /// Never fails: every error is turned into a failed outcome.
    pub async fn process(&self, payload: &[u8]) -> ProcessOutcome {
        let invocation_id = Uuid::new_v4();
        let span = info_span!(
            "process_video",
            invocation = %invocation_id,
            name = field::Empty
        );
        self.run(invocation_id, payload).instrument(span).await
    }

    async fn run(&self, invocation_id: Uuid, payload: &[u8]) -> ProcessOutcome {
        let request = match decode_notification(payload) {
            Ok(request) => request,
            Err(e) => {
                let error = PipelineError::from(e);
                warn!(error = %error, "Rejected notification");
                INVOCATIONS_TOTAL.with_label_values(&[error.label()]).inc();
                return ProcessOutcome::failed(&error, PipelineStage::Received, None);
            }
        };

        Span::current().record("name", request.name());
        info!(
            output = %request.output_name(),
            bucket = ?request.bucket(),
            message_id = ?request.message_id(),
            "Notification decoded"
        );

        let scratch = self.scratch.invocation(invocation_id);
        let raw = scratch.raw_file(request.name());
        let processed = scratch.processed_file(&request.output_name());

        let mut reached = PipelineStage::Decoded;
        let result = self
            .transfer(&request, &raw, &processed, &mut reached)
            .await;

        let cleanup = self.cleanup(&raw, &processed).await;
        if let Err(e) = scratch.remove().await {
            warn!(dir = %scratch.dir().display(), error = %e, "Failed to remove invocation scratch directory");
        }

        match result {
            Ok(()) => {
                advance(&mut reached, PipelineStage::CleanedUp);
                info!("Processing finished");
                INVOCATIONS_TOTAL.with_label_values(&["success"]).inc();
                ProcessOutcome::success(cleanup)
            }
            Err(e) => {
                error!(error = %e, last_completed = reached.as_str(), "Processing failed");
                INVOCATIONS_TOTAL.with_label_values(&[e.label()]).inc();
                ProcessOutcome::failed(&e, reached, Some(cleanup))
            }
        }
    }

    /// Download, transcode and upload. Stops at the first failure.
    async fn transfer(
        &self,
        request: &ProcessRequest,
        raw: &StagedFile,
        processed: &StagedFile,
        reached: &mut PipelineStage,
    ) -> Result<(), PipelineError> {
        let started = Instant::now();
        let raw_path = self.download(raw).await;
        observe_stage("download", raw_path.is_ok(), started);
        let raw_path = raw_path?;
        advance(reached, PipelineStage::Downloaded);

        let job = TranscodeJob {
            job_id: request.name().to_string(),
            input_path: raw_path,
            output_path: processed.local_path().to_path_buf(),
            profile: self.profile.clone(),
        };
        let started = Instant::now();
        let converted = self.transcoder.convert(job).await;
        observe_stage("transcode", converted.is_ok(), started);
        let converted = converted?;
        debug!(
            output_size_bytes = converted.output_size_bytes,
            duration_ms = converted.duration_ms,
            transcoder = self.transcoder.name(),
            "Transcoded"
        );
        advance(reached, PipelineStage::Transcoded);

        let started = Instant::now();
        let uploaded = self
            .storage
            .upload_processed(processed)
            .await
            .map_err(PipelineError::Upload);
        observe_stage("upload", uploaded.is_ok(), started);
        uploaded?;
        advance(reached, PipelineStage::Uploaded);

        Ok(())
    }

    async fn download(&self, raw: &StagedFile) -> Result<PathBuf, PipelineError> {
        self.storage
            .download_raw(raw)
            .await
            .map_err(PipelineError::Download)
    }

    /// Deletes both staged files concurrently. Failures are reported, never raised.
    async fn cleanup(&self, raw: &StagedFile, processed: &StagedFile) -> CleanupReport {
        let started = Instant::now();
        let (raw_result, processed_result) = tokio::join!(
            self.storage.delete_raw_local(raw),
            self.storage.delete_processed_local(processed)
        );

        let mut report = CleanupReport::default();
        if let Err(e) = raw_result {
            warn!(path = %raw.local_path().display(), error = %e, "Failed to delete raw staged file");
            CLEANUP_FAILURES.with_label_values(&["raw"]).inc();
            report.raw_error = Some(e.to_string());
        }
        if let Err(e) = processed_result {
            warn!(path = %processed.local_path().display(), error = %e, "Failed to delete processed staged file");
            CLEANUP_FAILURES.with_label_values(&["processed"]).inc();
            report.processed_error = Some(e.to_string());
        }

        observe_stage("cleanup", report.is_clean(), started);
        report
    }
}

fn advance(reached: &mut PipelineStage, next: PipelineStage) {
    debug!(from = reached.as_str(), to = next.as_str(), "Stage transition");
    *reached = next;
}
