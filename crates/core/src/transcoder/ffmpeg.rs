//! FFmpeg-based transcoder implementation.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, info};

use super::config::TranscoderConfig;
use super::error::TranscodeError;
use super::traits::Transcoder;
use super::types::{TranscodeJob, TranscodeProfile, TranscodeResult};

/// FFmpeg-based transcoder implementation.
pub struct FfmpegTranscoder {
    config: TranscoderConfig,
}

impl FfmpegTranscoder {
    /// Creates a new FFmpeg transcoder with the given configuration.
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Creates a transcoder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TranscoderConfig::default())
    }

    /// Builds ffmpeg arguments for a downscale job.
    fn build_args(
        &self,
        input_path: &Path,
        output_path: &Path,
        profile: &TranscodeProfile,
    ) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
        ];

        args.extend([
            "-c:v".to_string(),
            profile.video_codec.clone(),
            "-crf".to_string(),
            profile.crf.to_string(),
            "-preset".to_string(),
            profile.preset.clone(),
            "-vf".to_string(),
            profile.scale_filter(),
        ]);

        args.extend([
            "-c:a".to_string(),
            profile.audio_codec.clone(),
            "-b:a".to_string(),
            format!("{}k", profile.audio_bitrate_kbps),
        ]);

        args.extend([
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
        ]);

        args.extend(self.config.extra_ffmpeg_args.iter().cloned());

        args.push(output_path.to_string_lossy().to_string());

        args
    }

    fn spawn_error(&self, e: std::io::Error) -> TranscodeError {
        if e.kind() == std::io::ErrorKind::NotFound {
            TranscodeError::FfmpegNotFound {
                path: self.config.ffmpeg_path.clone(),
            }
        } else {
            TranscodeError::Io(e)
        }
    }

    async fn run(&self, job: &TranscodeJob) -> Result<TranscodeResult, TranscodeError> {
        let start = Instant::now();

        if !tokio::fs::try_exists(&job.input_path).await.unwrap_or(false) {
            return Err(TranscodeError::InputNotFound {
                path: job.input_path.clone(),
            });
        }

        if let Some(parent) = job.output_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|_| {
                TranscodeError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                }
            })?;
        }

        let args = self.build_args(&job.input_path, &job.output_path, &job.profile);
        debug!(job_id = %job.job_id, ?args, "Spawning ffmpeg");

        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| TranscodeError::encode_failed("ffmpeg stderr not captured", None))?;
        let mut reader = BufReader::new(stderr);

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let result = timeout(timeout_duration, async {
            let mut error_output = String::new();
            let mut last_error = None;
            let mut buf = Vec::new();

            // Drain stderr to EOF; ffmpeg output is not guaranteed to be UTF-8.
            while reader.read_until(b'\n', &mut buf).await? > 0 {
                let line = String::from_utf8_lossy(&buf).trim_end().to_string();
                buf.clear();
                if line.to_ascii_lowercase().contains("error") {
                    error_output.push_str(&line);
                    error_output.push('\n');
                    last_error = Some(line);
                }
            }

            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, error_output, last_error))
        })
        .await;

        match result {
            Ok(Ok((status, error_output, last_error))) => {
                if !status.success() {
                    let code = status
                        .code()
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "signal".to_string());
                    let reason = match last_error {
                        Some(line) => format!("ffmpeg exited with code {}: {}", code, line.trim()),
                        None => format!("ffmpeg exited with code {}", code),
                    };
                    return Err(TranscodeError::encode_failed(
                        reason,
                        if error_output.is_empty() {
                            None
                        } else {
                            Some(error_output)
                        },
                    ));
                }
            }
            Ok(Err(e)) => return Err(TranscodeError::Io(e)),
            Err(_) => {
                // Kill the process on timeout
                let _ = child.kill().await;
                return Err(TranscodeError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        }

        let output_meta = tokio::fs::metadata(&job.output_path).await.map_err(|_| {
            TranscodeError::OutputMissing {
                path: job.output_path.clone(),
            }
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            job_id = %job.job_id,
            output_size_bytes = output_meta.len(),
            duration_ms,
            "Transcode finished"
        );

        Ok(TranscodeResult {
            job_id: job.job_id.clone(),
            output_path: job.output_path.clone(),
            output_size_bytes: output_meta.len(),
            duration_ms,
        })
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn convert(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscodeError> {
        self.run(&job).await
    }

    async fn validate(&self) -> Result<(), TranscodeError> {
        let output = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(TranscodeError::encode_failed(
                "ffmpeg -version returned a non-zero status",
                Some(String::from_utf8_lossy(&output.stderr).to_string()),
            ));
        }

        Ok(())
    }
}
