use std::env;

use super::ConfigError;
use super::credential::DEFAULT_API_KEY_ENV;

pub(super) const DEFAULT_HOST: &str = "0.0.0.0";
pub(super) const DEFAULT_PORT: u16 = 3001;
pub(super) const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

/// Values read from the process environment, with defaults applied
#[derive(Debug, Clone)]
pub(super) struct EnvConfig {
    pub host: String,
    pub port: u16,
    pub elevenlabs_base_url: String,
    pub api_key_env: String,
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Load configuration from environment variables.
///
/// The API key itself is deliberately not read here; only the name of the
/// variable that holds it.
pub(super) fn load() -> Result<EnvConfig, ConfigError> {
    let port = match non_empty_var("PORT") {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: "PORT".to_string(),
            value,
        })?,
        None => DEFAULT_PORT,
    };

    Ok(EnvConfig {
        host: non_empty_var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port,
        elevenlabs_base_url: non_empty_var("ELEVENLABS_BASE_URL")
            .unwrap_or_else(|| DEFAULT_ELEVENLABS_BASE_URL.to_string()),
        api_key_env: non_empty_var("ELEVENLABS_API_KEY_VAR")
            .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
    })
}
