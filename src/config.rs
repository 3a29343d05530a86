//! Configuration and credentials for the futures API client.
//!
//! This module provides the [`Config`] struct for managing API credentials
//! and client settings.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Error;
use crate::logging::{default_sink, LogSink};

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
/// Fallback environment variable holding the API key
pub const TESTNET_API_KEY_VAR: &str = "BINANCE_TESTNET_API_KEY";
/// Environment variable holding the API secret
pub const API_SECRET_VAR: &str = "BINANCE_API_SECRET";
/// Fallback environment variable holding the API secret
pub const TESTNET_API_SECRET_VAR: &str = "BINANCE_TESTNET_API_SECRET";

/// Default HTTP timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// API environment (testnet or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Futures testnet (no real funds)
    #[default]
    Testnet,
    /// Production environment (real money)
    Production,
}

impl Environment {
    /// Get the base URL for REST API
    pub fn rest_base_url(&self) -> &'static str {
        match self {
            Environment::Testnet => "https://demo-fapi.binance.com",
            Environment::Production => "https://fapi.binance.com",
        }
    }
}

/// Configuration for the futures API client
///
/// # Example
///
/// ```rust
/// use fapi_trading::Config;
///
/// let config = Config::new("my-api-key", "my-api-secret");
///
/// // Custom endpoint and timeout
/// let config = Config::new("key", "secret")
///     .with_base_url("http://127.0.0.1:8080")
///     .with_timeout(std::time::Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct Config {
    api_key: String,
    api_secret: String,
    environment: Environment,
    base_url: Option<String>,
    timeout: Duration,
    log_sink: Arc<dyn LogSink>,
}

impl Config {
    /// Create a new configuration with API credentials
    ///
    /// Credentials are checked when the client is built, not here.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            environment: Environment::default(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            log_sink: default_sink(),
        }
    }

    /// Build a configuration from `BINANCE_API_KEY` / `BINANCE_API_SECRET`,
    /// falling back to the `BINANCE_TESTNET_*` variants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if either credential is missing or empty.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let first = |names: [&str; 2]| {
            names
                .into_iter()
                .filter_map(&lookup)
                .find(|value| !value.is_empty())
        };

        let api_key = first([API_KEY_VAR, TESTNET_API_KEY_VAR]);
        let api_secret = first([API_SECRET_VAR, TESTNET_API_SECRET_VAR]);

        match (api_key, api_secret) {
            (Some(key), Some(secret)) => Ok(Self::new(key, secret)),
            _ => Err(Error::Config(format!(
                "API credentials not found. Set {API_KEY_VAR} and {API_SECRET_VAR} \
                 (or {TESTNET_API_KEY_VAR} / {TESTNET_API_SECRET_VAR})"
            ))),
        }
    }

    /// Set the API environment (testnet or production)
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the REST base URL (takes precedence over the environment)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the HTTP request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Route request and order logs to `sink`
    #[must_use]
    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = sink;
        self
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the API secret
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// Get the environment
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Get the REST API base URL, without a trailing slash
    pub fn rest_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.rest_base_url())
            .trim_end_matches('/')
    }

    /// Get the timeout duration
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the log sink
    pub fn log_sink(&self) -> &Arc<dyn LogSink> {
        &self.log_sink
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.rest_base_url())
            .field("timeout", &self.timeout)
            .field("log_sink", &self.log_sink)
            .finish()
    }
}
