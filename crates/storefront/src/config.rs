//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RIDEGEAR_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `RIDEGEAR_HOST` - Bind address (default: 127.0.0.1)
//! - `RIDEGEAR_PORT` - Listen port (default: 3000)
//! - `RIDEGEAR_BASE_URL` - Public URL (default: http://localhost:3000)
//! - `RIDEGEAR_DATA_DIR` - Data directory for the file-backed store; unset
//!   runs on the in-memory store (process-lifetime only, reset on restart)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_DISTINCT_SECRET_CHARS: usize = 10;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Data directory for the file backend; `None` runs in-memory
    pub data_dir: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the session secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("RIDEGEAR_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("RIDEGEAR_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("RIDEGEAR_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("RIDEGEAR_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("RIDEGEAR_BASE_URL", "http://localhost:3000");
        let session_secret = get_session_secret("RIDEGEAR_SESSION_SECRET")?;
        let data_dir = std::env::var("RIDEGEAR_DATA_DIR").ok().map(PathBuf::from);
        let sentry_dsn = std::env::var("SENTRY_DSN").ok();
        let sentry_environment = std::env::var("SENTRY_ENVIRONMENT").ok();

        Ok(Self {
            host,
            port,
            base_url,
            session_secret,
            data_dir,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// The socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and validate a session secret from the environment.
///
/// Rejects short secrets, obvious placeholder text, and strings with too
/// little character variety to have been randomly generated.
pub(crate) fn get_session_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value =
        std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))?;

    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!("must be at least {MIN_SESSION_SECRET_LENGTH} characters"),
        ));
    }

    let lowered = value.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lowered.contains(**p)) {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!("contains placeholder text: {pattern}"),
        ));
    }

    let distinct = {
        let mut chars: Vec<char> = value.chars().collect();
        chars.sort_unstable();
        chars.dedup();
        chars.len()
    };
    if distinct < MIN_DISTINCT_SECRET_CHARS {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            "not enough character variety".to_string(),
        ));
    }

    Ok(SecretString::from(value))
}

/// Test-only config builder so unit and integration tests avoid env vars.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("kKx4qPz7wN2mVb9rTf6yHj3gLd8sAc5e"),
        data_dir: None,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

// Expose the secret only where the session layer needs key material.
pub(crate) fn secret_bytes(secret: &SecretString) -> &[u8] {
    secret.expose_secret().as_bytes()
}

#[cfg(test)]
#[allow(unsafe_code)] // env::set_var is unsafe in edition 2024
mod tests {
    use super::*;

    #[test]
    fn short_secret_is_rejected() {
        unsafe { std::env::set_var("TEST_SECRET_SHORT", "abc") };
        let err = get_session_secret("TEST_SECRET_SHORT").expect_err("short");
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn placeholder_secret_is_rejected() {
        unsafe {
            std::env::set_var(
                "TEST_SECRET_PLACEHOLDER",
                "changeme-changeme-changeme-changeme",
            );
        };
        let err = get_session_secret("TEST_SECRET_PLACEHOLDER").expect_err("placeholder");
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn low_variety_secret_is_rejected() {
        unsafe { std::env::set_var("TEST_SECRET_FLAT", "aaaaaaaaaaaaaaaabbbbbbbbbbbbbbbb") };
        let err = get_session_secret("TEST_SECRET_FLAT").expect_err("flat");
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn strong_secret_is_accepted() {
        unsafe { std::env::set_var("TEST_SECRET_OK", "kKx4qPz7wN2mVb9rTf6yHj3gLd8sAc5e") };
        assert!(get_session_secret("TEST_SECRET_OK").is_ok());
    }

    #[test]
    fn missing_secret_is_reported() {
        let err = get_session_secret("TEST_SECRET_ABSENT").expect_err("missing");
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }
}
