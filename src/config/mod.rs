//! Configuration module for the relay server
//!
//! Configuration comes from .env files, environment variables, and an optional
//! YAML file. Priority: YAML > ENV vars > .env values > defaults.
//!
//! The upstream API key is not part of the loaded values. Only its
//! [`CredentialSource`] is, so the key itself is read when a request needs it.
//!
//! # Example
//! ```rust,no_run
//! use convai_relay::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable base
//! let config = ServerConfig::from_file(&PathBuf::from("config.yaml"))?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

mod credential;
mod env;
mod yaml;

pub use credential::{CredentialSource, DEFAULT_API_KEY_ENV};
pub use yaml::{ElevenLabsYaml, ServerYaml, YamlConfig};

/// Errors raised while loading configuration at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid ElevenLabs base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    /// Base URL of the ElevenLabs API, without a trailing slash
    pub elevenlabs_base_url: String,
    /// Where the `xi-api-key` value is read from on each request
    pub elevenlabs_credential: CredentialSource,
}

impl ServerConfig {
    /// Load configuration from environment variables only
    ///
    /// # Errors
    /// Returns an error if `PORT` is not a valid port number or the base URL
    /// is not an absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::merge(None)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values (loaded in main.rs at startup)
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is malformed, or the merged
    /// configuration fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml_config = YamlConfig::from_file(path)?;
        Self::merge(Some(yaml_config))
    }

    fn merge(yaml: Option<YamlConfig>) -> Result<Self, ConfigError> {
        let env = env::load()?;
        let yaml = yaml.unwrap_or_default();
        let server = yaml.server.unwrap_or_default();
        let elevenlabs = yaml.elevenlabs.unwrap_or_default();

        let elevenlabs_base_url = validate_base_url(
            elevenlabs
                .base_url
                .as_deref()
                .unwrap_or(&env.elevenlabs_base_url),
        )?;

        let elevenlabs_credential = match elevenlabs.api_key {
            Some(key) => CredentialSource::fixed(key),
            None => CredentialSource::from_env_var(
                elevenlabs.api_key_env.unwrap_or(env.api_key_env),
            ),
        };

        Ok(Self {
            host: server.host.unwrap_or(env.host),
            port: server.port.unwrap_or(env.port),
            elevenlabs_base_url,
            elevenlabs_credential,
        })
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.query().is_some() {
        return Err(invalid("query strings are not allowed".to_string()));
    }

    Ok(raw.trim_end_matches('/').to_string())
}
