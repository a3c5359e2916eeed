//! Prometheus metrics for the processing pipeline.
//!
//! This module provides metrics for:
//! - Invocations by outcome
//! - Per-stage durations (download, transcode, upload, cleanup)
//! - Local cleanup failures

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};
use std::time::Instant;

/// Pipeline invocations total by outcome.
pub static INVOCATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "video_processor_invocations_total",
            "Total pipeline invocations",
        ),
        &["outcome"], // "success", "invalid_payload", "download_failed", "transcode_failed", "upload_failed"
    )
    .unwrap()
});

/// Stage duration in seconds.
pub static STAGE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "video_processor_stage_duration_seconds",
            "Duration of each pipeline stage",
        )
        .buckets(vec![
            0.01, 0.1, 0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 900.0, 1800.0, 3600.0,
        ]),
        &["stage", "result"], // stage: "download", "transcode", "upload", "cleanup"
    )
    .unwrap()
});

/// Local staged file deletions that failed, by file kind.
pub static CLEANUP_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "video_processor_cleanup_failures_total",
            "Total failed deletions of staged files",
        ),
        &["file"], // "raw", "processed"
    )
    .unwrap()
});

/// Records a stage duration measured from `started`.
pub fn observe_stage(stage: &str, success: bool, started: Instant) {
    let result = if success { "success" } else { "failed" };
    STAGE_DURATION
        .with_label_values(&[stage, result])
        .observe(started.elapsed().as_secs_f64());
}

/// Returns all pipeline metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(INVOCATIONS_TOTAL.clone()),
        Box::new(STAGE_DURATION.clone()),
        Box::new(CLEANUP_FAILURES.clone()),
    ]
}
