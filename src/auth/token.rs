//! OAuth token lifecycle for the Fortnox API.

use chrono::{DateTime, Duration, Utc};
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use url::Url;

use crate::client::rate_limit::parse_retry_after;
use crate::{ClientConfig, Error, Result};

/// OAuth credentials for a Fortnox integration.
///
/// The access and refresh tokens rotate on every refresh. Fortnox
/// invalidates a refresh token once it has been used, so callers that
/// persist credentials should store [`TokenManager::credentials`] after
/// the client has refreshed.
///
/// # Example
///
/// ```
/// use fortnox_rs::Credentials;
///
/// let credentials = Credentials::new(
///     "access-token",
///     "refresh-token",
///     "client-id",
///     "client-secret",
/// )
/// .with_expires_in(3600);
///
/// assert!(credentials.expires_at.is_some());
/// ```
#[derive(Clone)]
pub struct Credentials {
    /// Current access token
    pub access_token: SecretString,
    /// Current refresh token
    pub refresh_token: SecretString,
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: SecretString,
    /// When the access token expires; `None` if unknown
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    /// Create credentials with no recorded expiry.
    ///
    /// Without an expiry the first request triggers a refresh.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            refresh_token: SecretString::from(refresh_token.into()),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            expires_at: None,
        }
    }

    /// Read credentials from `FORTNOX_ACCESS_TOKEN`, `FORTNOX_REFRESH_TOKEN`,
    /// `FORTNOX_CLIENT_ID` and `FORTNOX_CLIENT_SECRET`.
    ///
    /// An empty or missing access token is allowed; the client refreshes
    /// before its first request.
    pub fn from_env() -> Result<Self> {
        fn required(name: &str) -> Result<String> {
            std::env::var(name).map_err(|_| Error::Config(format!("{} must be set", name)))
        }

        Ok(Self::new(
            std::env::var("FORTNOX_ACCESS_TOKEN").unwrap_or_default(),
            required("FORTNOX_REFRESH_TOKEN")?,
            required("FORTNOX_CLIENT_ID")?,
            required("FORTNOX_CLIENT_SECRET")?,
        ))
    }

    /// Set the expiry from a lifetime in seconds, counted from now.
    ///
    /// Lifetimes beyond the representable range saturate.
    pub fn with_expires_in(mut self, expires_in_secs: i64) -> Self {
        let expires_at = expiry_after(Utc::now(), expires_in_secs).unwrap_or(
            if expires_in_secs < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            },
        );
        self.expires_at = Some(expires_at);
        self
    }

    /// Set the expiry to a fixed instant.
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Returns `true` if the access token must be refreshed at `now`.
    fn needs_refresh(&self, margin: Duration, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at
                .checked_sub_signed(margin)
                .map_or(true, |refresh_at| now >= refresh_at),
            None => true,
        }
    }

    /// Store a token response.
    ///
    /// The rotated refresh token is kept even when `expires_in` is out of
    /// range; the expiry is then cleared so the next request refreshes.
    fn apply(&mut self, token: TokenResponse, now: DateTime<Utc>) -> Result<()> {
        if let Some(refresh_token) = token.refresh_token {
            self.refresh_token = SecretString::from(refresh_token);
        }

        match expiry_after(now, token.expires_in) {
            Some(expires_at) => {
                self.access_token = SecretString::from(token.access_token);
                self.expires_at = Some(expires_at);
                Ok(())
            }
            None => {
                self.expires_at = None;
                Err(Error::UnexpectedResponse(format!(
                    "token lifetime out of range: expires_in={}",
                    token.expires_in
                )))
            }
        }
    }
}

fn expiry_after(now: DateTime<Utc>, secs: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(secs).and_then(|lifetime| now.checked_add_signed(lifetime))
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Owner of the OAuth credentials.
///
/// # Thread Safety
///
/// `TokenManager` is cheap to clone and shared by every request of a
/// client. The expiry check and the refresh both run under one lock, so
/// tasks asking for a token while a refresh is in flight wait for it and
/// reuse its result instead of spending the refresh token again.
#[derive(Clone)]
pub struct TokenManager {
    state: Arc<Mutex<Credentials>>,
    http: reqwest::Client,
    token_url: Url,
    margin: Duration,
    auto_refresh: bool,
}

impl TokenManager {
    /// Create a token manager from credentials and client configuration.
    pub fn new(credentials: Credentials, http: reqwest::Client, config: &ClientConfig) -> Result<Self> {
        let margin = Duration::from_std(config.refresh_margin)
            .map_err(|_| Error::Config("refresh margin is out of range".to_string()))?;

        Ok(Self {
            state: Arc::new(Mutex::new(credentials)),
            http,
            token_url: Url::parse(&config.token_url)?,
            margin,
            auto_refresh: config.auto_refresh,
        })
    }

    /// Get an access token for the next request.
    ///
    /// With automatic refresh enabled, the token is refreshed first when it
    /// expires within the configured margin or has no recorded expiry.
    ///
    /// # Errors
    ///
    /// - [`Error::AuthRefresh`] if the refresh token was rejected
    /// - [`Error::Throttled`] if the token endpoint rate limited us
    /// - any other classified error from the token endpoint
    pub async fn get_token(&self) -> Result<SecretString> {
        let state = self.state.clone().lock_owned().await;
        if !self.auto_refresh || !state.needs_refresh(self.margin, Utc::now()) {
            return Ok(state.access_token.clone());
        }

        debug!(expires_at = ?state.expires_at, "access token expired or inside refresh margin");
        self.run_refresh(state).await
    }

    /// Refresh the access token unconditionally.
    pub async fn refresh(&self) -> Result<SecretString> {
        let state = self.state.clone().lock_owned().await;
        self.run_refresh(state).await
    }

    /// Snapshot of the current credentials.
    pub async fn credentials(&self) -> Credentials {
        self.state.lock().await.clone()
    }

    /// When the current access token expires.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.expires_at
    }

    /// Returns `true` if the current token is outside the refresh margin.
    pub async fn is_valid(&self) -> bool {
        !self.state.lock().await.needs_refresh(self.margin, Utc::now())
    }

    async fn run_refresh(&self, mut state: OwnedMutexGuard<Credentials>) -> Result<SecretString> {
        let http = self.http.clone();
        let token_url = self.token_url.clone();

        // The task owns the guard: a started refresh finishes even if the
        // caller's future is dropped.
        tokio::spawn(async move {
            let token = exchange_refresh_token(&http, &token_url, &state).await?;
            state.apply(token, Utc::now())?;
            info!(expires_at = ?state.expires_at, "refreshed Fortnox access token");
            Ok::<_, Error>(state.access_token.clone())
        })
        .await
        .map_err(|e| Error::Internal(format!("token refresh task failed: {}", e)))?
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("token_url", &self.token_url.as_str())
            .field("margin", &self.margin)
            .field("auto_refresh", &self.auto_refresh)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
}

async fn exchange_refresh_token(
    http: &reqwest::Client,
    token_url: &Url,
    credentials: &Credentials,
) -> Result<TokenResponse> {
    let response = http
        .post(token_url.clone())
        .basic_auth(
            &credentials.client_id,
            Some(credentials.client_secret.expose_secret()),
        )
        .header(ACCEPT, "application/json")
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", credentials.refresh_token.expose_secret()),
        ])
        .send()
        .await
        .map_err(Error::from_transport)?;

    let status = response.status();
    let retry_after = parse_retry_after(response.headers());
    let body = response.bytes().await.map_err(Error::from_transport)?;

    if !status.is_success() {
        let err = Error::from_token_response(status, retry_after, &body);
        if let Some(snapshot) = err.sanitized_response() {
            warn!(status = status.as_u16(), response = %snapshot, "token refresh failed");
        }
        return Err(err);
    }

    Ok(serde_json::from_slice(&body)?)
}
