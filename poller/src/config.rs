//! Configuration management via environment variables
//!
//! Every setting is optional. Numeric values that fail to parse fall back to
//! their default with a warning log.

use crate::common::error::PollerError;
use crate::health::prober::DEFAULT_PROBE_TIMEOUT_MS;
use crate::health::scheduler::DEFAULT_POLL_INTERVAL_SECS;
use std::time::Duration;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://poller.db";

/// Get an environment variable, treating an empty value as unset
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable or the given default
pub fn get_env_or(name: &str, default: &str) -> String {
    get_env(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable parsed to a specific type
///
/// # Returns
/// The parsed value, or `default` if the variable is unset or cannot be parsed.
/// A parse failure is logged as a warning.
pub fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    match get_env(name) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    "Environment variable '{}' has invalid value '{}', using default",
                    name,
                    raw
                );
                default
            }
        },
        None => default,
    }
}

/// Poller runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// Poll cycle period
    pub poll_interval: Duration,
    /// Per-probe timeout
    pub probe_timeout: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
        }
    }
}

impl PollerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, PollerError> {
        let config = Self {
            host: get_env_or("POLLER_HOST", DEFAULT_HOST),
            port: get_env_parse("POLLER_PORT", DEFAULT_PORT),
            database_url: get_env_or("POLLER_DATABASE_URL", DEFAULT_DATABASE_URL),
            poll_interval: Duration::from_secs(get_env_parse(
                "POLLER_INTERVAL_SECS",
                DEFAULT_POLL_INTERVAL_SECS,
            )),
            probe_timeout: Duration::from_millis(get_env_parse(
                "POLLER_PROBE_TIMEOUT_MS",
                DEFAULT_PROBE_TIMEOUT_MS,
            )),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the scheduler and prober cannot run with.
    pub fn validate(&self) -> Result<(), PollerError> {
        if self.poll_interval.is_zero() {
            return Err(PollerError::Config(
                "POLLER_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }
        if self.probe_timeout.is_zero() {
            return Err(PollerError::Config(
                "POLLER_PROBE_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
