//! Client configuration options.

use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Base URL of the Fortnox REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.fortnox.se/3/";

/// Fortnox OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://apps.fortnox.se/oauth-v1/token";

/// Configuration for the Fortnox client.
///
/// # Example
///
/// ```
/// use fortnox_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_min_request_interval(Duration::from_millis(200))
///     .with_user_agent("my-app/1.0");
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Base URL the resource paths are joined onto
    pub api_base_url: String,
    /// OAuth token endpoint
    pub token_url: String,
    /// Minimum spacing between the starts of two consecutive requests
    pub min_request_interval: Duration,
    /// Throttling retry configuration
    pub retry: RetryConfig,
    /// Whether to refresh the access token automatically before it expires
    pub auto_refresh: bool,
    /// How long before expiry the access token is refreshed
    pub refresh_margin: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("fortnox-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            // Fortnox allows 25 requests per 5 seconds per integration.
            min_request_interval: Duration::from_millis(250),
            retry: RetryConfig::default(),
            auto_refresh: true,
            refresh_margin: Duration::from_secs(5 * 60),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Point the client at a different API base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Point the client at a different OAuth token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Set the minimum spacing between request starts.
    pub fn with_min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }

    /// Set the throttling retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Enable or disable automatic token refresh.
    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    /// Set how long before expiry the access token is refreshed.
    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// Check the configuration for values the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_margin.is_zero() {
            return Err(Error::Config("refresh margin must be positive".to_string()));
        }
        parse_http_url(&self.api_base_url, "API base URL")?;
        parse_http_url(&self.token_url, "token URL")?;
        Ok(())
    }

    /// The API base URL, normalized to end with `/` so resource paths join
    /// below it.
    pub(crate) fn base_url(&self) -> Result<Url> {
        let mut url = parse_http_url(&self.api_base_url, "API base URL")?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

fn parse_http_url(raw: &str, what: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config(format!(
            "{} must use http or https, got {}",
            what, other
        ))),
    }
}

/// Configuration for retrying throttled requests.
///
/// A request answered with HTTP 429 and a `Retry-After` header is retried
/// at most once, after waiting exactly the advertised time. Waits longer
/// than `max_retry_after` are not attempted; the throttling error is
/// returned instead.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Whether throttled requests are retried at all
    pub retry_throttled: bool,
    /// Longest advertised wait the client is willing to sleep
    pub max_retry_after: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retry_throttled: true,
            max_retry_after: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// Create a configuration with no retries.
    pub fn no_retry() -> Self {
        Self {
            retry_throttled: false,
            ..Default::default()
        }
    }

    /// Set the longest advertised wait the client will sleep.
    pub fn with_max_retry_after(mut self, max: Duration) -> Self {
        self.max_retry_after = max;
        self
    }

    /// How long to wait before retrying a throttled request, if at all.
    pub fn retry_delay(&self, retry_after: Option<Duration>) -> Option<Duration> {
        if !self.retry_throttled {
            return None;
        }
        retry_after.filter(|wait| *wait <= self.max_retry_after)
    }
}
