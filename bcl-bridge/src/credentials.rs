//! BCL API credentials.
//!
//! A [`Credentials`] record holds the personal access token and the base URL of the API.
//! It is loaded once per execution and passed explicitly to the dispatcher and executor.
//! The token lives in zeroizing memory and never appears in `Debug` output.

use std::fmt;

use zeroize::Zeroizing;

use crate::{
    error::{BridgeError, Result},
    request::RequestDescriptor,
};

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://bcl.my/api";

/// Base URL used by older deployments of the connector.
pub const LEGACY_BASE_URL: &str = "https://bcl-dev.net/api";

/// Path of the credential self-test endpoint.
pub const SELF_TEST_PATH: &str = "/user";

/// API token and base URL for the BCL API.
#[derive(Clone)]
pub struct Credentials {
    api_token: Zeroizing<String>,
    base_url: String,
}

impl Credentials {
    /// Creates credentials from a token and base URL.
    #[must_use]
    pub fn new(api_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self { api_token: Zeroizing::new(api_token.into()), base_url: base_url.into() }
    }

    /// Creates credentials against [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn with_default_base_url(api_token: impl Into<String>) -> Self {
        Self::new(api_token, DEFAULT_BASE_URL)
    }

    /// Reads the token from an environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if the variable is unset or empty.
    pub fn from_env(env_var: &str, base_url: impl Into<String>) -> Result<Self> {
        let token = std::env::var(env_var).unwrap_or_default();
        if token.trim().is_empty() {
            return Err(BridgeError::Config(format!(
                "environment variable {env_var} does not contain an API token"
            )));
        }
        Ok(Self::new(token, base_url))
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("Bearer {}", self.api_token.as_str()))
    }

    /// Returns the headers attached to every request.
    ///
    /// `Content-Type` is added by the executor for requests with a body.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, Zeroizing<String>)> {
        vec![
            ("Accept", Zeroizing::new("application/json".to_owned())),
            ("Authorization", self.bearer()),
        ]
    }

    /// Returns the request used to validate a token out-of-band.
    #[must_use]
    pub fn self_test_request() -> RequestDescriptor {
        RequestDescriptor::get(SELF_TEST_PATH)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}
