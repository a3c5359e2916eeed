pub mod config;
pub mod metrics;
pub mod notification;
pub mod pipeline;
pub mod storage;
pub mod testing;
pub mod transcoder;

pub use config::{
    load_config, load_config_from_str, load_optional_config, validate_config, Config,
    ConfigError, ServerConfig,
};
pub use notification::{decode_notification, PayloadError, ProcessRequest};
pub use pipeline::{
    CleanupReport, OutcomeStatus, PipelineConfig, PipelineError, PipelineOrchestrator,
    PipelineStage, ProcessOutcome,
};
pub use storage::{ObjectStoreGateway, StorageBackend, StorageConfig, StorageError, StorageGateway};
pub use transcoder::{FfmpegTranscoder, TranscodeError, Transcoder, TranscoderConfig};
