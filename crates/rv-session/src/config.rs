//! Session and report-source configuration types.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Controller behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Delay before re-fetching after a failed generate request.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Drop responses and retries that belong to an outdated selection or
    /// were overtaken by a newer fetch.
    #[serde(default = "default_true")]
    pub discard_stale_responses: bool,
}

fn default_retry_delay_ms() -> u64 {
    1500
}

fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            retry_delay_ms: default_retry_delay_ms(),
            discard_stale_responses: true,
        }
    }
}

impl SessionConfig {
    /// Retry delay as a duration.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Set the retry delay.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Enable or disable stale-response discarding.
    pub fn with_discard_stale_responses(mut self, enabled: bool) -> Self {
        self.discard_stale_responses = enabled;
        self
    }
}

/// Report server location and request limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the report server, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for report-data requests.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Timeout for report-generate requests. Generation runs a model on the
    /// server and routinely takes minutes.
    #[serde(default = "default_generate_timeout_secs")]
    pub generate_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_generate_timeout_secs() -> u64 {
    960
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            generate_timeout_secs: default_generate_timeout_secs(),
        }
    }
}

impl SourceConfig {
    /// Set the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the report-data timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_secs = timeout.as_secs();
        self
    }

    /// Set the report-generate timeout.
    pub fn with_generate_timeout(mut self, timeout: Duration) -> Self {
        self.generate_timeout_secs = timeout.as_secs();
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }
}

/// Complete viewer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Controller behaviour.
    #[serde(default)]
    pub session: SessionConfig,
    /// Report server.
    #[serde(default)]
    pub source: SourceConfig,
}

impl ViewerConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize config to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check values that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        let url = &self.source.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SessionError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got '{}'",
                url
            )));
        }
        if self.source.fetch_timeout_secs == 0 || self.source.generate_timeout_secs == 0 {
            return Err(SessionError::InvalidConfig(
                "request timeouts must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
