//! Client configuration

use crate::{AuthClient, ClientError, ClientResult};
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding the auth service base URL
pub const HOST_ENV: &str = "AUTH_PROVIDER_HOST";

/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "AUTH_PROVIDER_TIMEOUT_SECS";

/// Client configuration for connecting to the auth service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service base URL (e.g., "http://localhost:3001")
    pub base_url: String,

    /// Request timeout, enforced by the HTTP transport
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new client configuration with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the configuration from `AUTH_PROVIDER_HOST` and
    /// `AUTH_PROVIDER_TIMEOUT_SECS`
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let base_url = lookup(HOST_ENV)
            .filter(|host| !host.trim().is_empty())
            .ok_or_else(|| ClientError::Config(format!("{HOST_ENV} must be set")))?;

        let mut config = Self::new(base_url);
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("{TIMEOUT_ENV} is not a number of seconds: {raw}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create an auth client from this configuration
    pub fn build_client(&self) -> ClientResult<AuthClient> {
        AuthClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3001")
    }
}
