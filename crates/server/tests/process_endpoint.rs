//! Endpoint tests for the push target and operational routes.

mod common;

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use common::{fixtures, TestFixture};
use vidproc_core::storage::StorageError;
use vidproc_core::testing::Call;
use vidproc_core::transcoder::TranscodeError;

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
}

#[tokio::test]
async fn test_process_success() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_bytes("/process-video", fixtures::notification_for("b.mp4"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "Processing finished successfully");
    assert!(response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("text/plain")));

    let uploaded = fixture.storage.uploaded().await;
    assert_eq!(uploaded.len(), 1);
    assert_eq!(uploaded[0].0, "processed-b.mp4");
}

#[tokio::test]
async fn test_process_missing_name() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_bytes("/process-video", fixtures::push_body("{}"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        "Bad request: missing filename.\nInvalid message payload"
    );
    assert!(fixture.log.calls().await.is_empty());
}

#[tokio::test]
async fn test_process_malformed_bodies() {
    let fixture = TestFixture::new().await;

    for body in [
        "",
        "not json",
        r#"{"message":{}}"#,
        r#"{"message":{"data":"%%%not-base64%%%"}}"#,
    ] {
        let response = fixture.post_raw("/process-video", body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body:?}");
        assert!(response.body.starts_with("Bad request: missing filename."));
    }

    let not_json = STANDARD.encode("definitely not json");
    let response = fixture
        .post_raw(
            "/process-video",
            &format!(r#"{{"message":{{"data":"{not_json}"}}}}"#),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(fixture.log.calls().await.is_empty());
}

#[tokio::test]
async fn test_process_transcode_failure() {
    let fixture = TestFixture::new().await;
    fixture
        .transcoder
        .set_next_error(TranscodeError::encode_failed("bad codec", None))
        .await;

    let response = fixture
        .post_bytes("/process-video", fixtures::notification_for("a.mp4"))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, "Processing failed: bad codec");

    let calls = fixture.log.calls().await;
    assert!(calls.contains(&Call::DeleteRaw("a.mp4".to_string())));
    assert!(calls.contains(&Call::DeleteProcessed("processed-a.mp4".to_string())));
    assert_eq!(fixture.storage.upload_count().await, 0);
}

#[tokio::test]
async fn test_process_upload_failure() {
    let fixture = TestFixture::new().await;
    fixture
        .storage
        .set_upload_error(StorageError::Config("bucket gone".to_string()))
        .await;

    let response = fixture
        .post_bytes("/process-video", fixtures::notification_for("u.mp4"))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.starts_with("Upload failed:"));
    assert_eq!(fixture.storage.delete_count().await, 2);
}

#[tokio::test]
async fn test_process_video_rejects_get() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/process-video").await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_metrics_endpoint_reports_invocations() {
    let fixture = TestFixture::new().await;
    fixture
        .post_bytes("/process-video", fixtures::notification_for("m.mp4"))
        .await;

    let response = fixture.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("video_processor_invocations_total"));
    assert!(response.body.contains("video_processor_http_requests_total"));
}
