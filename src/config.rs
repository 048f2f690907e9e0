// src/config.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::{Result, SharpApiError};

/// Namespace of the settings group inside a host configuration repository
pub const CONFIG_NAMESPACE: &str = "sharpapi-hr-related-job-positions";

pub const DEFAULT_BASE_URL: &str = "https://sharpapi.com/api/v1";
pub const DEFAULT_POLLING_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_POLLING_WAIT_SECS: u64 = 180;
pub const DEFAULT_TIMEOUT_SECS: u64 = 400;

pub const ENV_API_KEY: &str = "SHARP_API_KEY";
pub const ENV_BASE_URL: &str = "SHARP_API_BASE_URL";
pub const ENV_POLLING_INTERVAL: &str = "SHARP_API_JOB_STATUS_POLLING_INTERVAL";
pub const ENV_POLLING_WAIT: &str = "SHARP_API_JOB_STATUS_POLLING_WAIT";

pub fn default_user_agent() -> String {
    format!(
        "SharpAPIRustHrRelatedJobPositions/{}",
        env!("CARGO_PKG_VERSION")
    )
}

/// Resolved client settings. Immutable once built; only obtainable through
/// [`ConfigOverrides::resolve`] or [`SharpApiConfig::new`], both of which
/// reject an empty API key.
#[derive(Clone, PartialEq)]
pub struct SharpApiConfig {
    api_key: String,
    base_url: String,
    polling_interval: Duration,
    polling_wait: Duration,
    user_agent: String,
    timeout: Duration,
}

impl SharpApiConfig {
    /// Build a configuration with package defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ConfigOverrides::default().with_api_key(api_key).resolve()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn polling_interval(&self) -> Duration {
        self.polling_interval
    }

    pub fn polling_wait(&self) -> Duration {
        self.polling_wait
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

// The key stays out of logs.
impl fmt::Debug for SharpApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharpApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("polling_interval", &self.polling_interval)
            .field("polling_wait", &self.polling_wait)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// One layer of user-supplied settings. Every field is optional; layers are
/// stacked with [`ConfigOverrides::layer`] and turned into a
/// [`SharpApiConfig`] by [`ConfigOverrides::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(
        rename = "api_job_status_polling_interval",
        deserialize_with = "lenient_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub polling_interval_secs: Option<u64>,

    #[serde(
        rename = "api_job_status_polling_wait",
        deserialize_with = "lenient_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub polling_wait_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(
        deserialize_with = "lenient_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout_seconds: Option<u64>,
}

impl ConfigOverrides {
    /// Package defaults, as merged by the provider and written by `publish`
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            polling_interval_secs: Some(DEFAULT_POLLING_INTERVAL_SECS),
            polling_wait_secs: Some(DEFAULT_POLLING_WAIT_SECS),
            user_agent: Some(default_user_agent()),
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read the `SHARP_API_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            api_key: non_empty(ENV_API_KEY),
            base_url: non_empty(ENV_BASE_URL),
            polling_interval_secs: non_empty(ENV_POLLING_INTERVAL)
                .map(|v| parse_seconds(ENV_POLLING_INTERVAL, &v))
                .transpose()?,
            polling_wait_secs: non_empty(ENV_POLLING_WAIT)
                .map(|v| parse_seconds(ENV_POLLING_WAIT, &v))
                .transpose()?,
            user_agent: None,
            timeout_seconds: None,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        info!("Loading configuration file: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Stack `higher` on top of `self`; values present in `higher` win
    pub fn layer(self, higher: ConfigOverrides) -> Self {
        Self {
            api_key: higher.api_key.or(self.api_key),
            base_url: higher.base_url.or(self.base_url),
            polling_interval_secs: higher.polling_interval_secs.or(self.polling_interval_secs),
            polling_wait_secs: higher.polling_wait_secs.or(self.polling_wait_secs),
            user_agent: higher.user_agent.or(self.user_agent),
            timeout_seconds: higher.timeout_seconds.or(self.timeout_seconds),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_polling_interval_secs(mut self, secs: u64) -> Self {
        self.polling_interval_secs = Some(secs);
        self
    }

    pub fn with_polling_wait_secs(mut self, secs: u64) -> Self {
        self.polling_wait_secs = Some(secs);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout_seconds(mut self, secs: u64) -> Self {
        self.timeout_seconds = Some(secs);
        self
    }

    /// Validate and fill unset values with package defaults
    pub fn resolve(self) -> Result<SharpApiConfig> {
        let api_key = self
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                SharpApiError::Configuration(format!(
                    "API key is empty. Set `api_key` or the {} environment variable",
                    ENV_API_KEY
                ))
            })?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if base_url.is_empty() {
            return Err(SharpApiError::Configuration(
                "base_url must not be empty".to_string(),
            ));
        }

        let interval = self
            .polling_interval_secs
            .unwrap_or(DEFAULT_POLLING_INTERVAL_SECS);
        if interval == 0 {
            return Err(SharpApiError::Configuration(
                "api_job_status_polling_interval must be at least 1 second".to_string(),
            ));
        }

        Ok(SharpApiConfig {
            api_key,
            base_url,
            polling_interval: Duration::from_secs(interval),
            polling_wait: Duration::from_secs(
                self.polling_wait_secs.unwrap_or(DEFAULT_POLLING_WAIT_SECS),
            ),
            user_agent: self
                .user_agent
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or_else(default_user_agent),
            timeout: Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

fn parse_seconds(name: &str, raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        SharpApiError::Configuration(format!(
            "{} must be a whole number of seconds, got '{}'",
            name, raw
        ))
    })
}

/// Accept `5` as well as `"5"`, the way the host framework casts config values
fn lenient_seconds<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) => text
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected seconds, got '{}'", text))),
    }
}
