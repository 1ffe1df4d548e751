use std::fmt;

use zeroize::Zeroizing;

use crate::errors::relay_error::{RelayError, RelayResult};

/// Default environment variable holding the ElevenLabs API key
pub const DEFAULT_API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// Where the upstream credential comes from.
///
/// The environment-backed source is read on every call to [`resolve`], so a
/// rotated key is picked up by the next request without a restart. The static
/// source is fixed for the lifetime of the process and is zeroized on drop.
///
/// [`resolve`]: CredentialSource::resolve
#[derive(Clone)]
pub enum CredentialSource {
    /// Read the named environment variable at request time
    Environment(String),
    /// A key supplied through the YAML file (or by tests)
    Static(Zeroizing<String>),
}

impl CredentialSource {
    pub fn from_env_var(name: impl Into<String>) -> Self {
        Self::Environment(name.into())
    }

    pub fn fixed(secret: impl Into<String>) -> Self {
        Self::Static(Zeroizing::new(secret.into()))
    }

    /// Name used in error messages. Never the secret itself.
    pub fn name(&self) -> &str {
        match self {
            Self::Environment(var) => var,
            Self::Static(_) => "elevenlabs.api_key",
        }
    }

    /// Resolve the credential for one request.
    ///
    /// # Errors
    /// Returns [`RelayError::Configuration`] when the key is absent, empty, or
    /// not valid unicode.
    pub fn resolve(&self) -> RelayResult<Zeroizing<String>> {
        let secret = match self {
            Self::Environment(var) => std::env::var(var).ok().map(Zeroizing::new),
            Self::Static(secret) => Some(secret.clone()),
        };

        secret
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RelayError::Configuration(self.name().to_string()))
    }
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::from_env_var(DEFAULT_API_KEY_ENV)
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment(var) => f.debug_tuple("Environment").field(var).finish(),
            Self::Static(_) => f.write_str("Static(<redacted>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const TEST_VAR: &str = "CONVAI_RELAY_CREDENTIAL_TEST_KEY";

    #[test]
    fn test_static_credential_resolves() {
        let source = CredentialSource::fixed("sk-static");
        assert_eq!(source.resolve().unwrap().as_str(), "sk-static");
    }

    #[test]
    fn test_empty_static_credential_is_not_configured() {
        let err = CredentialSource::fixed("").resolve().unwrap_err();
        assert!(matches!(err, RelayError::Configuration(_)));
        assert_eq!(err.to_string(), "elevenlabs.api_key is not configured");
    }

    #[test]
    #[serial]
    fn test_environment_credential_missing() {
        unsafe {
            std::env::remove_var(TEST_VAR);
        }

        let err = CredentialSource::from_env_var(TEST_VAR).resolve().unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("{TEST_VAR} is not configured")
        );
    }

    #[test]
    #[serial]
    fn test_environment_credential_empty() {
        unsafe {
            std::env::set_var(TEST_VAR, "");
        }

        let result = CredentialSource::from_env_var(TEST_VAR).resolve();
        assert!(matches!(result, Err(RelayError::Configuration(_))));

        unsafe {
            std::env::remove_var(TEST_VAR);
        }
    }

    #[test]
    #[serial]
    fn test_environment_credential_rotation_without_restart() {
        let source = CredentialSource::from_env_var(TEST_VAR);

        unsafe {
            std::env::set_var(TEST_VAR, "first-key");
        }
        assert_eq!(source.resolve().unwrap().as_str(), "first-key");

        unsafe {
            std::env::set_var(TEST_VAR, "second-key");
        }
        assert_eq!(source.resolve().unwrap().as_str(), "second-key");

        unsafe {
            std::env::remove_var(TEST_VAR);
        }
    }

    #[test]
    fn test_debug_redacts_static_secret() {
        let rendered = format!("{:?}", CredentialSource::fixed("sk-very-secret"));
        assert!(!rendered.contains("sk-very-secret"));
        assert_eq!(rendered, "Static(<redacted>)");
    }

    #[test]
    fn test_default_reads_elevenlabs_api_key() {
        assert_eq!(CredentialSource::default().name(), DEFAULT_API_KEY_ENV);
    }
}
