use std::time::Duration;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub const API_URL_ENV_VAR: &str = "PARSE_API_URL";
pub const API_KEY_ENV_VAR: &str = "PARSE_API_KEY";
pub const TIMEOUT_ENV_VAR: &str = "PARSE_TIMEOUT_SECS";

/// Settings for `ParseClient`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root; endpoint paths are appended to it.
    pub base_url: String,
    pub api_key: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Retry a transient failure once with options stripped.
    pub retry_simplified: bool,
    /// Pause before that retry.
    pub retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            retry_simplified: true,
            retry_delay: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, enabled: bool, delay: Duration) -> Self {
        self.retry_simplified = enabled;
        self.retry_delay = delay;
        self
    }

    /// Defaults overridden by `PARSE_API_URL`, `PARSE_API_KEY` and `PARSE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_ENV_VAR) {
            config.base_url = url;
        }
        config.api_key = lookup(API_KEY_ENV_VAR).filter(|key| !key.trim().is_empty());
        if let Some(raw) = lookup(TIMEOUT_ENV_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("{} must be whole seconds, got '{}'", TIMEOUT_ENV_VAR, raw))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}
