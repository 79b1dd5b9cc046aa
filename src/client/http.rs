//! HTTP client implementation for the Fortnox API.

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::api::{
    AccountsService, CompanyService, FinancialYearsService, InvoicesService, SieService,
    SupplierInvoicesService, VouchersService,
};
use crate::auth::{Authenticator, Credentials, LegacyTokens, TokenManager};
use crate::error::SanitizedResponse;
use crate::models::Query;
use crate::{Error, Result};

use super::config::ClientConfig;
use super::rate_limit::{parse_retry_after, RateLimiter};

/// Upper bound on automatic retries of a throttled request.
pub const MAX_THROTTLE_RETRIES: u32 = 1;

/// The main client for interacting with the Fortnox API.
///
/// This client provides access to all API services through method calls
/// that return service structs. Every request goes through one shared
/// dispatcher that authenticates it, paces it and normalizes failures.
///
/// # Example
///
/// ```no_run
/// use fortnox_rs::{Credentials, FortnoxClient, Pages};
///
/// # async fn example() -> fortnox_rs::Result<()> {
/// let client = FortnoxClient::from_credentials(Credentials::from_env()?)?;
///
/// // First page of vouchers
/// let vouchers = client.vouchers().list(None, Pages::First).await?;
///
/// // Every account, across all pages
/// let accounts = client.accounts().list(None, Pages::All).await?;
/// println!("{} vouchers, {} accounts", vouchers.len(), accounts.len());
/// # Ok(())
/// # }
/// ```
pub struct FortnoxClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) auth: Authenticator,
    pub(crate) base_url: Url,
    pub(crate) limiter: RateLimiter,
    pub(crate) config: ClientConfig,
}

/// Status, retry hint and body of one HTTP exchange.
struct Reply {
    status: StatusCode,
    retry_after: Option<Duration>,
    body: Vec<u8>,
}

impl FortnoxClient {
    /// Create a client with OAuth credentials and the default configuration.
    pub fn from_credentials(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with OAuth credentials and custom configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = build_http(&config)?;
        let tokens = TokenManager::new(credentials, http.clone(), &config)?;
        Self::build(http, Authenticator::OAuth(tokens), config)
    }

    /// Create a client using the legacy `Access-Token` / `Client-Secret`
    /// header pair. These tokens do not expire and are never refreshed.
    pub fn with_legacy_tokens(
        access_token: impl Into<String>,
        client_secret: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        config.validate()?;
        let http = build_http(&config)?;
        let auth = Authenticator::Legacy(LegacyTokens {
            access_token: SecretString::from(access_token.into()),
            client_secret: SecretString::from(client_secret.into()),
        });
        Self::build(http, auth, config)
    }

    fn build(http: reqwest::Client, auth: Authenticator, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                auth,
                base_url: config.base_url()?,
                limiter: RateLimiter::new(config.min_request_interval),
                config,
            }),
        })
    }

    /// Get the vouchers service.
    pub fn vouchers(&self) -> VouchersService {
        VouchersService::new(self.inner.clone())
    }

    /// Get the financial years service.
    pub fn financial_years(&self) -> FinancialYearsService {
        FinancialYearsService::new(self.inner.clone())
    }

    /// Get the chart of accounts service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the company information service.
    pub fn company(&self) -> CompanyService {
        CompanyService::new(self.inner.clone())
    }

    /// Get the customer invoices service.
    pub fn invoices(&self) -> InvoicesService {
        InvoicesService::new(self.inner.clone())
    }

    /// Get the supplier invoices service.
    pub fn supplier_invoices(&self) -> SupplierInvoicesService {
        SupplierInvoicesService::new(self.inner.clone())
    }

    /// Get the SIE export service.
    pub fn sie(&self) -> SieService {
        SieService::new(self.inner.clone())
    }

    /// Refresh the OAuth access token now, regardless of its expiry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for clients using legacy tokens.
    pub async fn refresh_token(&self) -> Result<()> {
        match self.inner.auth.token_manager() {
            Some(tokens) => tokens.refresh().await.map(|_| ()),
            None => Err(Error::Config(
                "legacy token clients cannot refresh tokens".to_string(),
            )),
        }
    }

    /// Snapshot of the current OAuth credentials, for persisting rotated
    /// refresh tokens. `None` for clients using legacy tokens.
    pub async fn credentials(&self) -> Option<Credentials> {
        match self.inner.auth.token_manager() {
            Some(tokens) => Some(tokens.credentials().await),
            None => None,
        }
    }

    /// The token manager, for clients using OAuth.
    pub fn token_manager(&self) -> Option<&TokenManager> {
        self.inner.auth.token_manager()
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// GET a JSON resource.
    pub(crate) async fn dispatch(&self, path: &str, query: &Query) -> Result<Value> {
        let body = self.send(path, query).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// GET a resource and return the raw body.
    pub(crate) async fn dispatch_bytes(&self, path: &str, query: &Query) -> Result<Vec<u8>> {
        self.send(path, query).await
    }

    async fn send(&self, path: &str, query: &Query) -> Result<Vec<u8>> {
        let url = self.base_url.join(path)?;
        let mut retries = 0;

        loop {
            let reply = self.send_once(&url, query).await?;

            if reply.status.is_success() {
                return Ok(reply.body);
            }

            if reply.status == StatusCode::TOO_MANY_REQUESTS {
                match self.config.retry.retry_delay(reply.retry_after) {
                    Some(wait) if retries < MAX_THROTTLE_RETRIES => {
                        retries += 1;
                        warn!(path, wait_ms = wait.as_millis() as u64, "throttled by Fortnox API, retrying");
                        tokio::time::sleep(wait).await;
                        continue;
                    }
                    _ => {
                        let response = SanitizedResponse::from_parts(reply.status, &reply.body);
                        warn!(path, retries, response = %response, "throttled by Fortnox API");
                        return Err(Error::Throttled {
                            retry_after: reply.retry_after,
                            response,
                        });
                    }
                }
            }

            let err = Error::from_api_response(reply.status, &reply.body);
            if let Some(snapshot) = err.sanitized_response() {
                warn!(path, response = %snapshot, "Fortnox API request failed");
            }
            return Err(err);
        }
    }

    async fn send_once(&self, url: &Url, query: &Query) -> Result<Reply> {
        let _permit = self.limiter.acquire().await;

        // Fetched per request so a refresh by another task is picked up.
        let headers = self.auth.headers().await?;

        debug!(url = %url, query = %query, "sending Fortnox API request");
        let response = self
            .http
            .get(url.clone())
            .headers(headers)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(Error::from_transport)?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let body = response.bytes().await.map_err(Error::from_transport)?.to_vec();
        debug!(status = status.as_u16(), bytes = body.len(), "received Fortnox API response");

        Ok(Reply {
            status,
            retry_after,
            body,
        })
    }
}

fn build_http(config: &ClientConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))
}

impl Clone for FortnoxClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for FortnoxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FortnoxClient")
            .field("config", &self.inner.config)
            .field("auth", &self.inner.auth)
            .finish()
    }
}
