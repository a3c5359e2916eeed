//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the storage and transcoder
//! traits, allowing pipeline tests without buckets or an ffmpeg binary.
//!
//! # Example
//!
//! ```rust,ignore
//! use vidproc_core::testing::{fixtures, CallLog, MockStorageGateway, MockTranscoder};
//!
//! let log = CallLog::new();
//! let storage = MockStorageGateway::with_log(log.clone());
//! let transcoder = MockTranscoder::with_log(log.clone());
//!
//! // Configure mock responses
//! transcoder.set_next_error(TranscodeError::encode_failed("bad codec", None)).await;
//!
//! // Use in a PipelineOrchestrator, then inspect log.calls()
//! ```

mod call_log;
mod mock_storage;
mod mock_transcoder;

pub use call_log::{Call, CallLog};
pub use mock_storage::{MockStorageGateway, MOCK_RAW_CONTENT};
pub use mock_transcoder::{MockTranscoder, RecordedTranscode, MOCK_PROCESSED_CONTENT};

/// Test fixtures and helper functions.
pub mod fixtures {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    /// Wrap `data_json` as a Pub/Sub push body.
    pub fn push_body(data_json: &str) -> Vec<u8> {
        serde_json::json!({
            "message": {
                "data": STANDARD.encode(data_json),
                "messageId": "1",
                "attributes": {}
            },
            "subscription": "projects/test/subscriptions/raw-videos"
        })
        .to_string()
        .into_bytes()
    }

    /// Push body for an object-finalized event on `name`.
    pub fn notification_for(name: &str) -> Vec<u8> {
        let event = serde_json::json!({
            "name": name,
            "bucket": "raw-videos",
            "contentType": "video/mp4"
        });
        push_body(&event.to_string())
    }
}
