//! Pipeline module: one invocation from notification to cleanup.
//!
//! `PipelineOrchestrator::process` decodes a push body, downloads the raw
//! video, transcodes it, uploads the result and removes both local copies.
//! Every invocation ends in a `ProcessOutcome` carrying the response status
//! and message.

mod config;
mod error;
mod orchestrator;
mod types;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use orchestrator::PipelineOrchestrator;
pub use types::{CleanupReport, OutcomeStatus, PipelineStage, ProcessOutcome, SUCCESS_MESSAGE};
