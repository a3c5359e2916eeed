//! Push endpoint running the processing pipeline.

use axum::{body::Bytes, extract::State, http::StatusCode};
use std::sync::Arc;

use crate::state::AppState;

/// Runs one pipeline invocation for a push request.
///
/// The body is handed to the pipeline untouched so that malformed JSON is
/// reported with the same 400 message as a missing name. Responds with the
/// outcome's status and plain text message.
pub async fn process_video(State(state): State<Arc<AppState>>, body: Bytes) -> (StatusCode, String) {
    let outcome = state.orchestrator().process(&body).await;
    let status = StatusCode::from_u16(outcome.http_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, outcome.message)
}
