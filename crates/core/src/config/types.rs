use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::pipeline::PipelineConfig;
use crate::storage::StorageConfig;
use crate::transcoder::TranscoderConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub transcoder: TranscoderConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageBackend;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackend::Gcs);
        assert_eq!(config.pipeline.profile.height, 360);
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[storage]
backend = "s3"
raw_bucket = "uploads"
processed_bucket = "renditions"

[transcoder]
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
timeout_secs = 600

[pipeline]
scratch_dir = "/var/tmp/videos"

[pipeline.profile]
height = 480
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.backend, StorageBackend::S3);
        assert_eq!(config.storage.processed_bucket, "renditions");
        assert_eq!(config.transcoder.timeout_secs, 600);
        assert_eq!(config.pipeline.profile.height, 480);
        assert_eq!(config.pipeline.profile.crf, 28);
        assert_eq!(
            config.pipeline.scratch_dir.to_str().unwrap(),
            "/var/tmp/videos"
        );
    }

    #[test]
    fn test_unknown_backend_fails() {
        let result: Result<Config, _> = toml::from_str("[storage]\nbackend = \"ftp\"");
        assert!(result.is_err());
    }
}
