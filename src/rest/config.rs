//! Transport configuration.

use std::time::Duration;

use crate::error::ExmoError;
use crate::rest::endpoints::{DEFAULT_API_VERSION, EXMO_BASE_URL};

/// Upper bound of the connection attempt budget.
pub const MAX_CONNECTION_ATTEMPTS: u32 = 10;
/// Attempt budget used when none is configured.
pub const DEFAULT_CONNECTION_ATTEMPTS: u32 = 5;
/// Pause between two attempts after a transport failure.
pub const CONNECTION_ATTEMPTS_PAUSE: Duration = Duration::from_secs(5);

/// Clamp a requested attempt budget into `1..=MAX_CONNECTION_ATTEMPTS`.
///
/// Values outside the range fall back to the maximum rather than failing.
pub fn clamp_attempts(requested: i64) -> u32 {
    if (1..=i64::from(MAX_CONNECTION_ATTEMPTS)).contains(&requested) {
        requested as u32
    } else {
        MAX_CONNECTION_ATTEMPTS
    }
}

/// Proxy URLs, by scheme of the proxied request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxySettings {
    /// Proxy for `http://` requests
    pub http: Option<String>,
    /// Proxy for `https://` requests
    pub https: Option<String>,
    /// Proxy for every request
    pub all: Option<String>,
}

impl ProxySettings {
    /// Whether no proxy is configured.
    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none() && self.all.is_none()
    }

    pub(crate) fn to_proxies(&self) -> Result<Vec<reqwest::Proxy>, ExmoError> {
        let invalid = |url: &str, e: reqwest::Error| {
            ExmoError::config(format!("Invalid proxy URL `{url}`: {e}"))
        };
        let mut proxies = Vec::new();
        if let Some(url) = self.http.as_deref() {
            proxies.push(reqwest::Proxy::http(url).map_err(|e| invalid(url, e))?);
        }
        if let Some(url) = self.https.as_deref() {
            proxies.push(reqwest::Proxy::https(url).map_err(|e| invalid(url, e))?);
        }
        if let Some(url) = self.all.as_deref() {
            proxies.push(reqwest::Proxy::all(url).map_err(|e| invalid(url, e))?);
        }
        Ok(proxies)
    }
}

/// Validated configuration of a [`Transport`](crate::rest::Transport).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) api_version: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) proxy: ProxySettings,
    pub(crate) connection_attempts: u32,
    pub(crate) retry_delay: Duration,
    pub(crate) timeout: Option<Duration>,
    pub(crate) user_agent: String,
}

impl ClientConfig {
    /// Base URL of the API, without the version segment.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API version path segment, e.g. `v1`.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Extra headers sent with every request.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Proxy settings.
    pub fn proxy(&self) -> &ProxySettings {
        &self.proxy
    }

    /// Maximum number of attempts per call, in `1..=10`.
    pub fn connection_attempts(&self) -> u32 {
        self.connection_attempts
    }

    /// Pause between attempts after a transport failure.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// HTTP client timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// User agent sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: EXMO_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            headers: Vec::new(),
            proxy: ProxySettings::default(),
            connection_attempts: DEFAULT_CONNECTION_ATTEMPTS,
            retry_delay: CONNECTION_ATTEMPTS_PAUSE,
            timeout: None,
            user_agent: format!("exmo-api-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
