//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RIDEGEAR_ADMIN_SESSION_SECRET` - Session signing secret (min 32 chars)
//!
//! ## Optional
//! - `RIDEGEAR_ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `RIDEGEAR_ADMIN_PORT` - Listen port (default: 3001)
//! - `RIDEGEAR_ADMIN_BASE_URL` - Public URL (default: http://localhost:3001)
//! - `RIDEGEAR_DATA_DIR` - Shared data directory; unset runs in-memory
//! - `SENTRY_DSN` / `SENTRY_ENVIRONMENT` - Error tracking

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_DISTINCT_SECRET_CHARS: usize = 10;

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

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub session_secret: SecretString,
    /// Data directory shared with the storefront; `None` runs in-memory.
    pub data_dir: Option<PathBuf>,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the session secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("RIDEGEAR_ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("RIDEGEAR_ADMIN_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("RIDEGEAR_ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("RIDEGEAR_ADMIN_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("RIDEGEAR_ADMIN_BASE_URL", "http://localhost:3001");
        let session_secret = get_session_secret("RIDEGEAR_ADMIN_SESSION_SECRET")?;
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

fn get_session_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))?;

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
pub fn test_config() -> AdminConfig {
    AdminConfig {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        session_secret: SecretString::from("mQw8dXc2nBv5kLp9jRt4hGf7sZa3yEu6"),
        data_dir: None,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

pub(crate) fn secret_bytes(secret: &SecretString) -> &[u8] {
    secret.expose_secret().as_bytes()
}
