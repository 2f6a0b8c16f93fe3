//! Client configuration.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Lob API base URL. The trailing slash matters: relative paths resolve
/// beneath `/v1/`.
pub const BASE_URL: &str = "https://api.lob.com/v1/";

/// API version sent in the `Lob-Version` header.
pub const API_VERSION: &str = "2017-09-08";

/// Version of this library.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for `LobClient`. Built once, read-only afterwards.
///
/// # Example
///
/// ```
/// use lob_core::Config;
/// use std::time::Duration;
///
/// let config = Config::new("test_key")
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("my-app/1.0");
/// assert_eq!(config.base_url.as_str(), "https://api.lob.com/v1/");
/// ```
#[derive(Clone)]
pub struct Config {
    /// Base URL that request paths are resolved against
    pub base_url: Url,
    /// API key, sent as the basic-auth username
    pub api_key: String,
    /// Value of the `Lob-Version` header
    pub api_version: String,
    /// Overall per-request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
            api_version: API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("lob-core/{LIBRARY_VERSION} (Rust)"),
        }
    }

    /// Read `LOB_API_KEY` (required), `LOB_BASE_URL` and `LOB_API_VERSION`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LOB_API_KEY").unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(Error::Config("LOB_API_KEY must be set".to_string()));
        }

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("LOB_BASE_URL") {
            config = config.with_base_url(&base_url)?;
        }
        if let Ok(version) = std::env::var("LOB_API_VERSION") {
            config = config.with_api_version(version);
        }
        Ok(config)
    }

    /// Point the client at another host, e.g. a local mock server.
    ///
    /// A missing trailing slash is added so `addresses` resolves beneath the
    /// last path segment instead of replacing it.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = url;
        Ok(self)
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn default_base_url() -> Url {
    Url::parse(BASE_URL).unwrap_or_else(|_| unreachable!("BASE_URL is a valid URL"))
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
