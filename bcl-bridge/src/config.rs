//! Connector configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file is a valid
//! configuration pointing at the production API.
//!
//! ```toml
//! base_url = "https://bcl.my/api"
//! api_token_env = "BCL_API_TOKEN"
//! continue_on_fail = false
//!
//! [http]
//! timeout_secs = 30
//! connect_timeout_secs = 10
//! pool_max_idle_per_host = 10
//! http_version = "auto"
//! ```

use std::{path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::{
    credentials::{Credentials, DEFAULT_BASE_URL},
    error::{BridgeError, Result},
};

/// Environment variable holding the API token unless configured otherwise.
pub const DEFAULT_TOKEN_ENV: &str = "BCL_API_TOKEN";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BclConfig {
    /// API base URL.
    pub base_url: String,

    /// Name of the environment variable holding the API token.
    pub api_token_env: String,

    /// Record per-item failures instead of aborting the batch.
    pub continue_on_fail: bool,

    /// HTTP client settings.
    pub http: HttpConfig,
}

impl Default for BclConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_token_env: DEFAULT_TOKEN_ENV.to_owned(),
            continue_on_fail: false,
            http: HttpConfig::default(),
        }
    }
}

impl BclConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if the TOML is malformed or fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use bcl_bridge::config::BclConfig;
    ///
    /// let config = BclConfig::from_toml("continue_on_fail = true").unwrap();
    /// assert!(config.continue_on_fail);
    /// assert_eq!(config.base_url, "https://bcl.my/api");
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| BridgeError::Config(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if the file cannot be read or is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
    }

    /// Validates the configuration.
    ///
    /// Checks that:
    /// - `base_url` parses, uses `http` or `https` and has a host
    /// - `api_token_env` is a non-empty alphanumeric/underscore name
    /// - HTTP timeouts are within bounds
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] describing the first failed check.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            BridgeError::Config(format!("invalid base_url '{}': {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BridgeError::Config(format!(
                "base_url must use http or https, got: {}",
                url.scheme()
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(BridgeError::Config(format!("base_url has no host: {}", self.base_url)));
        }

        validate_env_var_name(&self.api_token_env)?;
        self.http.validate()
    }

    /// Loads credentials for this configuration.
    ///
    /// An explicit token takes precedence over `api_token_env`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if no token is available.
    pub fn credentials(&self, explicit_token: Option<&str>) -> Result<Credentials> {
        match explicit_token {
            Some(token) if !token.trim().is_empty() => {
                Ok(Credentials::new(token, self.base_url.as_str()))
            }
            _ => Credentials::from_env(&self.api_token_env, self.base_url.as_str()),
        }
    }
}

fn validate_env_var_name(name: &str) -> Result<()> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(BridgeError::Config(format!(
            "api_token_env must contain only ASCII letters, digits and underscores: '{name}'"
        )));
    }
    Ok(())
}

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Maximum idle connections per host.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// HTTP version preference.
    #[serde(default)]
    pub http_version: HttpVersion,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: default_pool_max_idle(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            http_version: HttpVersion::default(),
        }
    }
}

impl HttpConfig {
    /// Validates timeout bounds.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if:
    /// - `timeout_secs` is outside 1-300 seconds
    /// - `connect_timeout_secs` is outside 1-60 seconds
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(BridgeError::Config("timeout_secs must be between 1 and 300".to_owned()));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(BridgeError::Config(
                "connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns connect timeout as Duration.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// HTTP version preference.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HttpVersion {
    /// HTTP/1.1 only.
    Http1,
    /// HTTP/2 only.
    Http2,
    /// Negotiate.
    #[default]
    Auto,
}

fn default_pool_max_idle() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
