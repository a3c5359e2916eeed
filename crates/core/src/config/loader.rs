use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides, e.g. `VIDEO_PROCESSOR_STORAGE__RAW_BUCKET`.
pub const CONFIG_ENV_PREFIX: &str = "VIDEO_PROCESSOR_";

fn layered(path: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }
    figment
        .merge(
            Env::prefixed(CONFIG_ENV_PREFIX)
                // VIDEO_PROCESSOR_CONFIG names the file itself.
                .ignore(&["config"])
                .split("__"),
        )
        // Hosting platforms hand the listen port over as plain PORT.
        .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(layered(Some(path)))
}

/// Load configuration from `path` when it exists, otherwise from defaults and
/// the environment alone
pub fn load_optional_config(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        extract(layered(Some(path)))
    } else {
        extract(layered(None))
    }
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
