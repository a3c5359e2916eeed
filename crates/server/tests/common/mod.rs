//! Common test utilities for endpoint testing with mocks.
//!
//! This module provides a test fixture that creates an in-process router
//! with mock storage and transcoder injected, enabling endpoint tests
//! without buckets or an ffmpeg binary.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use vidproc_core::{
    testing::{CallLog, MockStorageGateway, MockTranscoder},
    PipelineConfig, PipelineOrchestrator,
};
use vidproc_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use vidproc_core::testing::fixtures;

/// Test fixture for endpoint testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_process() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture
///         .post_bytes("/process-video", fixtures::notification_for("a.mp4"))
///         .await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock storage - inject download/upload/delete failures
    pub storage: MockStorageGateway,
    /// Mock transcoder - inject conversion failures
    pub transcoder: MockTranscoder,
    /// Calls made against both mocks, in order
    pub log: CallLog,
    /// Scratch space for staged files
    pub scratch: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Response body is not JSON")
    }
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        let scratch = TempDir::new().expect("Failed to create scratch dir");
        let log = CallLog::new();
        let storage = MockStorageGateway::with_log(log.clone());
        let transcoder = MockTranscoder::with_log(log.clone());

        let orchestrator = PipelineOrchestrator::new(
            PipelineConfig::default().with_scratch_dir(scratch.path().to_path_buf()),
            Arc::new(storage.clone()),
            Arc::new(transcoder.clone()),
        );

        let router = create_router(Arc::new(AppState::new(orchestrator)));

        Self {
            router,
            storage,
            transcoder,
            log,
            scratch,
        }
    }

    /// Send a GET request to the test router.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, Body::empty()).await
    }

    /// Send a POST request with a raw body.
    pub async fn post_bytes(&self, path: &str, body: Vec<u8>) -> TestResponse {
        self.request("POST", path, Body::from(body)).await
    }

    /// Send a POST request with a string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.request("POST", path, Body::from(body.to_string()))
            .await
    }

    async fn request(&self, method: &str, path: &str, body: Body) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(body)
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        TestResponse {
            status,
            content_type,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        }
    }
}
