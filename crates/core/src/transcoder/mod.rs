//! Transcoder module for downscaling staged videos.
//!
//! This module provides the `Transcoder` trait and an FFmpeg implementation
//! that converts a local raw video into a local processed video at a fixed
//! target profile (360p H.264/AAC by default).
//!
//! # Example
//!
//! ```ignore
//! use vidproc_core::transcoder::{FfmpegTranscoder, Transcoder, TranscodeJob, TranscodeProfile};
//!
//! let transcoder = FfmpegTranscoder::with_defaults();
//! transcoder.validate().await?;
//!
//! let job = TranscodeJob {
//!     job_id: "job-1".to_string(),
//!     input_path: PathBuf::from("/scratch/raw/a.mp4"),
//!     output_path: PathBuf::from("/scratch/processed/processed-a.mp4"),
//!     profile: TranscodeProfile::default(),
//! };
//!
//! let result = transcoder.convert(job).await?;
//! println!("Transcoded in {} ms", result.duration_ms);
//! ```

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::TranscoderConfig;
pub use error::TranscodeError;
pub use ffmpeg::FfmpegTranscoder;
pub use traits::Transcoder;
pub use types::{TranscodeJob, TranscodeProfile, TranscodeResult};
