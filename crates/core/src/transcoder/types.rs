//! Types for the transcoder module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Target quality profile applied to every processed video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeProfile {
    /// Output height in pixels; width follows the source aspect ratio.
    #[serde(default = "default_height")]
    pub height: u32,

    /// FFmpeg video encoder.
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Constant rate factor (lower is better quality).
    #[serde(default = "default_crf")]
    pub crf: u8,

    /// Encoder speed preset.
    #[serde(default = "default_preset")]
    pub preset: String,

    /// FFmpeg audio encoder.
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Audio bitrate in kbps.
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate_kbps: u32,
}

fn default_height() -> u32 {
    360
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_crf() -> u8 {
    28
}

fn default_preset() -> String {
    "veryfast".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_audio_bitrate() -> u32 {
    96
}

impl Default for TranscodeProfile {
    fn default() -> Self {
        Self {
            height: default_height(),
            video_codec: default_video_codec(),
            crf: default_crf(),
            preset: default_preset(),
            audio_codec: default_audio_codec(),
            audio_bitrate_kbps: default_audio_bitrate(),
        }
    }
}

impl TranscodeProfile {
    /// Scale filter keeping aspect ratio; `-2` keeps the width even for x264.
    pub fn scale_filter(&self) -> String {
        format!("scale=-2:{}", self.height)
    }
}

/// A single transcoding job.
#[derive(Debug, Clone)]
pub struct TranscodeJob {
    /// Identifier used in logs.
    pub job_id: String,
    /// Local raw video.
    pub input_path: PathBuf,
    /// Local processed video to write.
    pub output_path: PathBuf,
    /// Target profile.
    pub profile: TranscodeProfile,
}

/// Result of a successful transcode.
#[derive(Debug, Clone)]
pub struct TranscodeResult {
    pub job_id: String,
    pub output_path: PathBuf,
    pub output_size_bytes: u64,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_360p() {
        let profile = TranscodeProfile::default();
        assert_eq!(profile.height, 360);
        assert_eq!(profile.scale_filter(), "scale=-2:360");
    }

    #[test]
    fn test_profile_partial_deserialize() {
        let profile: TranscodeProfile = toml::from_str("height = 480\ncrf = 23").unwrap();
        assert_eq!(profile.height, 480);
        assert_eq!(profile.crf, 23);
        assert_eq!(profile.video_codec, "libx264");
        assert_eq!(profile.audio_bitrate_kbps, 96);
    }
}
