//! Authentication for the Fortnox API.
//!
//! This module provides two authentication methods:
//!
//! 1. **OAuth** (recommended) - Bearer access tokens, refreshed from a
//!    rotating refresh token by [`TokenManager`]
//! 2. **Legacy tokens** - The older `Access-Token` / `Client-Secret`
//!    header pair, which never expires
//!
//! # OAuth Authentication
//!
//! ```no_run
//! use fortnox_rs::{Credentials, FortnoxClient};
//!
//! # async fn example() -> fortnox_rs::Result<()> {
//! let client = FortnoxClient::from_credentials(Credentials::new(
//!     "access-token",
//!     "refresh-token",
//!     "client-id",
//!     "client-secret",
//! ))?;
//!
//! // Persist the rotated refresh token after use
//! let credentials = client.credentials().await;
//! # Ok(())
//! # }
//! ```

mod token;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

pub use token::{Credentials, TokenManager};

/// How requests are authenticated.
#[derive(Debug, Clone)]
pub(crate) enum Authenticator {
    OAuth(TokenManager),
    Legacy(LegacyTokens),
}

impl Authenticator {
    /// Build the authentication headers for one request.
    ///
    /// For OAuth this asks the token manager for a token on every call, so
    /// a refresh performed by another task is picked up immediately.
    pub(crate) async fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        match self {
            Authenticator::OAuth(tokens) => {
                let token = tokens.get_token().await?;
                headers.insert(
                    AUTHORIZATION,
                    secret_header(&format!("Bearer {}", token.expose_secret()))?,
                );
            }
            Authenticator::Legacy(tokens) => {
                headers.insert("access-token", secret_header(tokens.access_token.expose_secret())?);
                headers.insert("client-secret", secret_header(tokens.client_secret.expose_secret())?);
            }
        }

        Ok(headers)
    }

    pub(crate) fn token_manager(&self) -> Option<&TokenManager> {
        match self {
            Authenticator::OAuth(tokens) => Some(tokens),
            Authenticator::Legacy(_) => None,
        }
    }
}

/// Static credentials for the legacy header scheme.
#[derive(Clone)]
pub(crate) struct LegacyTokens {
    pub(crate) access_token: SecretString,
    pub(crate) client_secret: SecretString,
}

impl std::fmt::Debug for LegacyTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegacyTokens")
            .field("access_token", &"[REDACTED]")
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

fn secret_header(value: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|_| Error::Validation("Invalid token format".to_string()))?;
    header.set_sensitive(true);
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_legacy_headers() {
        let auth = Authenticator::Legacy(LegacyTokens {
            access_token: SecretString::from("legacy-access".to_string()),
            client_secret: SecretString::from("legacy-secret".to_string()),
        });

        let headers = auth.headers().await.unwrap();
        assert_eq!(headers["access-token"], "legacy-access");
        assert_eq!(headers["client-secret"], "legacy-secret");
        assert!(headers["access-token"].is_sensitive());
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(auth.token_manager().is_none());
    }

    #[test]
    fn test_legacy_debug_redacts() {
        let tokens = LegacyTokens {
            access_token: SecretString::from("legacy-access".to_string()),
            client_secret: SecretString::from("legacy-secret".to_string()),
        };
        let debug_str = format!("{:?}", tokens);
        assert!(!debug_str.contains("legacy-"));
    }

    #[test]
    fn test_secret_header_rejects_newlines() {
        assert!(matches!(secret_header("abc\ndef"), Err(Error::Validation(_))));
    }
}
