//! Configuration for the pipeline orchestrator.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::transcoder::TranscodeProfile;

/// Pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Root of the local scratch space. Each invocation gets a subdirectory.
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,

    /// Quality profile every invocation transcodes to.
    #[serde(default)]
    pub profile: TranscodeProfile,
}

fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir().join("video-processor")
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scratch_dir: default_scratch_dir(),
            profile: TranscodeProfile::default(),
        }
    }
}

impl PipelineConfig {
    /// Sets the scratch directory.
    pub fn with_scratch_dir(mut self, scratch_dir: PathBuf) -> Self {
        self.scratch_dir = scratch_dir;
        self
    }

    /// Sets the target profile.
    pub fn with_profile(mut self, profile: TranscodeProfile) -> Self {
        self.profile = profile;
        self
    }
}
