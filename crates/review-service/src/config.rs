//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `REVIEW_DATABASE_URL` - `PostgreSQL` connection string (only for the
//!   `postgres` store; falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `REVIEW_STORE` - Document store backend: `postgres` (default) or `memory`
//! - `REVIEW_HOST` - Bind address (default: 127.0.0.1)
//! - `REVIEW_PORT` - Listen port (default: 8080)
//! - `REVIEW_LOG_JSON` - Emit JSON logs when set to any value
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which document store backs the service.
///
/// Implements `Debug` manually so the database URL never reaches logs.
#[derive(Clone)]
pub enum StoreBackend {
    /// `PostgreSQL`-backed store.
    Postgres {
        /// Connection URL (contains password)
        database_url: SecretString,
    },
    /// Process-local store; contents are lost on restart.
    Memory,
}

impl StoreBackend {
    /// Short backend name for logs and Sentry tags.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => "postgres",
            Self::Memory => "memory",
        }
    }
}

impl std::fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres { .. } => f
                .debug_struct("Postgres")
                .field("database_url", &"[REDACTED]")
                .finish(),
            Self::Memory => f.write_str("Memory"),
        }
    }
}

/// Review service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Document store backend
    pub store: StoreBackend,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Emit structured JSON logs instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store = match get_env_or_default("REVIEW_STORE", "postgres").as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: get_database_url("REVIEW_DATABASE_URL")?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "REVIEW_STORE".to_string(),
                    format!("unknown store '{other}' (expected 'postgres' or 'memory')"),
                ));
            }
        };
        let host = get_env_or_default("REVIEW_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("REVIEW_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("REVIEW_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("REVIEW_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            store,
            host,
            port,
            log_json: get_optional_env("REVIEW_LOG_JSON").is_some(),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a sample rate, which must lie within `0.0..=1.0`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |raw| parse_rate(key, &raw))
}

fn parse_rate(key: &str, raw: &str) -> Result<f32, ConfigError> {
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn memory_config() -> ServiceConfig {
        ServiceConfig {
            store: StoreBackend::Memory,
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = memory_config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_store_debug_redacts_database_url() {
        let config = ServiceConfig {
            store: StoreBackend::Postgres {
                database_url: SecretString::from("postgres://review:hunter2@db/reviews"),
            },
            ..memory_config()
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("Postgres"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_store_kind() {
        assert_eq!(StoreBackend::Memory.kind(), "memory");
        let postgres = StoreBackend::Postgres {
            database_url: SecretString::from("postgres://localhost/reviews"),
        };
        assert_eq!(postgres.kind(), "postgres");
    }

    #[test]
    fn test_parse_rate_bounds() {
        assert!((parse_rate("RATE", "0.25").unwrap() - 0.25).abs() < f32::EPSILON);
        assert!(parse_rate("RATE", "1.5").is_err());
        assert!(parse_rate("RATE", "-0.1").is_err());
    }

    #[test]
    fn test_parse_rate_rejects_non_numbers() {
        let err = parse_rate("RATE", "often").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "RATE"));
    }
}
