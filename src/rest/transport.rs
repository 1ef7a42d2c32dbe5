//! Signed HTTP transport with retry over transport failures.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_tracing::TracingMiddleware;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{
    Credentials, CredentialsProvider, KEY_HEADER, MillisecondNonce, NonceProvider, SIGN_HEADER,
    sign_params,
};
use crate::error::{ApiError, ExmoError};
use crate::rest::config::{ClientConfig, ProxySettings, clamp_attempts};
use crate::rest::endpoints::public;
use crate::types::{Method, Params, Value, normalize};

/// The EXMO REST transport.
///
/// Owns the HTTP client, the configuration, the credentials and the nonce
/// provider. Every call goes through [`Transport::execute`], which signs the
/// request when credentials are configured and retries transport failures.
/// Facades ([`PublicClient`](crate::rest::PublicClient),
/// [`AuthenticatedClient`](crate::rest::AuthenticatedClient)) share one
/// transport behind an `Arc`.
///
/// # Example
///
/// ```rust,no_run
/// use exmo_api_client::rest::Transport;
/// use exmo_api_client::types::Params;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let transport = Transport::builder().connection_attempts(3).build()?;
///     let ticker = transport.query("ticker", Params::new()).await?;
///     println!("BTC_USD last trade: {}", ticker["BTC_USD"]["last_trade"]);
///     Ok(())
/// }
/// ```
pub struct Transport {
    http_client: ClientWithMiddleware,
    config: ClientConfig,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl Transport {
    /// Create a new transport builder.
    pub fn builder() -> TransportBuilder {
        TransportBuilder::new()
    }

    /// The validated configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Credentials used for signing, if both key and secret are non-empty.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials
            .as_ref()
            .map(|provider| provider.get_credentials())
            .filter(|creds| creds.is_complete())
    }

    /// Whether requests will be signed.
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_some()
    }

    /// POST to an endpoint. See [`Transport::execute`].
    pub async fn query(&self, endpoint: &str, params: Params) -> Result<Value, ExmoError> {
        self.execute(Method::Post, endpoint, params).await
    }

    /// Call an endpoint with a method given by name (`get` or `post`).
    ///
    /// Any other method name is a configuration error and nothing is sent.
    pub async fn request(
        &self,
        method: &str,
        endpoint: &str,
        params: Params,
    ) -> Result<Value, ExmoError> {
        let method = method.parse()?;
        self.execute(method, endpoint, params).await
    }

    /// Call `{base_url}/{api_version}/{endpoint}`.
    ///
    /// Each attempt is signed with a fresh nonce when credentials are
    /// configured. A failure to deliver the request is retried after
    /// [`ClientConfig::retry_delay`] until the attempt budget is spent, and
    /// then returned as [`ExmoError::Transport`]. Once a response has been
    /// received nothing is retried: an `error` payload is returned as
    /// [`ExmoError::Api`], since the request may already have taken effect.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        params: Params,
    ) -> Result<Value, ExmoError> {
        let url = self.endpoint_url(endpoint)?;
        let max_attempts = self.config.connection_attempts;
        let mut attempt = 1;

        loop {
            let request = self.build_request(method, &url, &params)?;
            debug!(%method, %url, attempt, "Sending EXMO request");

            match request.send().await {
                Ok(response) => return self.parse_response(response).await,
                Err(err) if attempt < max_attempts => {
                    warn!(
                        error = %err,
                        attempt,
                        max_attempts,
                        delay = ?self.config.retry_delay,
                        "EXMO request failed, retrying"
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(ExmoError::Transport {
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }

    /// Check connectivity by fetching the currency list.
    ///
    /// Returns `true` if the server answered with a success status. The
    /// request is sent once, unsigned.
    pub async fn ping(&self) -> bool {
        let url = match self.endpoint_url(public::CURRENCY) {
            Ok(url) => url,
            Err(err) => {
                debug!(error = %err, "Ping failed");
                return false;
            }
        };

        match self.http_client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!(error = %err, "Ping failed");
                false
            }
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, ExmoError> {
        let url = format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version.trim_matches('/'),
            endpoint.trim_start_matches('/')
        );
        Ok(Url::parse(&url)?)
    }

    fn build_request(
        &self,
        method: Method,
        url: &Url,
        params: &Params,
    ) -> Result<RequestBuilder, ExmoError> {
        let (encoded, auth) = match self.credentials() {
            Some(credentials) => {
                let signed = sign_params(params.clone(), credentials, self.nonce_provider.as_ref())?;
                (signed.body, Some(signed.headers))
            }
            None => (params.encode()?, None),
        };

        let mut request = match method {
            Method::Get => {
                let mut url = url.clone();
                if !encoded.is_empty() {
                    url.set_query(Some(&encoded));
                }
                self.http_client.get(url)
            }
            Method::Post => self.http_client.post(url.clone()).body(encoded),
        };

        if let Some(auth) = auth {
            request = request
                .header(KEY_HEADER, auth.key)
                .header(SIGN_HEADER, auth.sign);
        }

        Ok(request)
    }

    async fn parse_response(&self, response: reqwest::Response) -> Result<Value, ExmoError> {
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "Received EXMO response");

        let parsed: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            ExmoError::InvalidResponse(format!(
                "HTTP {status}: failed to parse response: {e}. Body: {body}"
            ))
        })?;

        if let Some(error) = parsed.get("error").filter(|e| is_truthy(e)) {
            return Err(ExmoError::Api(ApiError::from_json(error)));
        }

        Ok(normalize(Value::from(parsed)))
    }
}

/// Whether an `error` field signals a failure.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` do not.
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Object(map) => !map.is_empty(),
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("config", &self.config)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Builder for [`Transport`].
pub struct TransportBuilder {
    config: ClientConfig,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
}

impl TransportBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            credentials: None,
            nonce_provider: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the API version path segment.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Add a header sent with every request.
    ///
    /// Headers given here override the default `Content-Type`.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.push((name.into(), value.into()));
        self
    }

    /// Set the proxy settings.
    pub fn proxy(mut self, proxy: ProxySettings) -> Self {
        self.config.proxy = proxy;
        self
    }

    /// Set the attempt budget.
    ///
    /// Values outside `1..=10` fall back to 10.
    pub fn connection_attempts(mut self, attempts: i64) -> Self {
        self.config.connection_attempts = clamp_attempts(attempts);
        self
    }

    /// Set the pause between attempts after a transport failure.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Set the HTTP client timeout for each attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Validate the configuration and build the transport.
    pub fn build(self) -> Result<Transport, ExmoError> {
        let config = self.config;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ExmoError::config(format!("Invalid base URL `{}`: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ExmoError::config(format!(
                "Invalid base URL `{}`",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers.insert(USER_AGENT, header_value(&config.user_agent)?);
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ExmoError::config(format!("Invalid header name `{name}`: {e}")))?;
            headers.insert(name, header_value(value)?);
        }

        if let Some(provider) = &self.credentials {
            header_value(&provider.get_credentials().api_key)?;
        }

        let mut http = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            http = http.timeout(timeout);
        }
        for proxy in config.proxy.to_proxies()? {
            http = http.proxy(proxy);
        }
        let reqwest_client = http
            .build()
            .map_err(|e| ExmoError::config(format!("Failed to build HTTP client: {e}")))?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(MillisecondNonce::new()));

        Ok(Transport {
            http_client,
            config,
            credentials: self.credentials,
            nonce_provider,
        })
    }
}

impl Default for TransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ExmoError> {
    HeaderValue::from_str(value)
        .map_err(|e| ExmoError::config(format!("Invalid header value `{value}`: {e}")))
}
