//! Error types for the Fortnox API client.
//!
//! Every failure in the request pipeline, from a refused connection to a
//! structured `ErrorInformation` body, is normalized into a single
//! [`Error`] value. Any HTTP response attached to an error is reduced to a
//! [`SanitizedResponse`] first, so headers, cookies and credentials can
//! never reach a log sink through an error.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// A specialized `Result` type for Fortnox operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Message used when a request was sent but no response came back.
pub const NO_RESPONSE_MESSAGE: &str = "No response received from Fortnox API";

/// Keys stripped from sanitized response bodies, compared case-insensitively.
const SENSITIVE_KEYS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "access-token",
    "client-secret",
    "cookie",
    "set-cookie",
];

/// The main error type for all Fortnox API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The request was sent but no response was received (connect failure,
    /// timeout, interrupted body).
    #[error("No response received from Fortnox API: {detail}")]
    Transport {
        /// Underlying transport failure
        detail: String,
    },

    /// Non-2xx response without a structured error body
    #[error("HTTP error: status={status}, message={message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Generic message derived from the status
        message: String,
        /// Sanitized response snapshot
        response: SanitizedResponse,
    },

    /// Fortnox returned a structured `ErrorInformation` body
    #[error("API error: status={status}, error={error:?}, code={code:?}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Numeric `error` field of `ErrorInformation`
        error: Option<i64>,
        /// Numeric `code` field of `ErrorInformation`
        code: Option<i64>,
        /// Human-readable message from the API
        message: String,
        /// Sanitized response snapshot
        response: SanitizedResponse,
    },

    /// Throttled by the API (HTTP 429)
    #[error("Rate limited by Fortnox API")]
    Throttled {
        /// Server-provided wait, if any
        retry_after: Option<Duration>,
        /// Sanitized response snapshot
        response: SanitizedResponse,
    },

    /// The refresh token was rejected; the caller must re-authenticate
    #[error("Token refresh rejected: {message}")]
    AuthRefresh {
        /// Message from the token endpoint
        message: String,
        /// Sanitized response snapshot
        response: SanitizedResponse,
    },

    /// Invalid caller input, rejected before any network call
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The request could not be constructed
    #[error("Request error: {0}")]
    Request(String),

    /// JSON deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A response did not have the expected envelope shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal task failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// The normalized, human-readable message of this error.
    pub fn message(&self) -> String {
        match self {
            Error::Transport { .. } => NO_RESPONSE_MESSAGE.to_string(),
            Error::Http { message, .. }
            | Error::Api { message, .. }
            | Error::AuthRefresh { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status code, when a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } | Error::Api { status, .. } => Some(*status),
            Error::Throttled { response, .. } | Error::AuthRefresh { response, .. } => {
                Some(response.status())
            }
            _ => None,
        }
    }

    /// The `code` field of a structured API error.
    pub fn api_error_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => *code,
            _ => None,
        }
    }

    /// The `error` field of a structured API error.
    pub fn api_error_number(&self) -> Option<i64> {
        match self {
            Error::Api { error, .. } => *error,
            _ => None,
        }
    }

    /// The sanitized response snapshot, when a response was received.
    pub fn sanitized_response(&self) -> Option<&SanitizedResponse> {
        match self {
            Error::Http { response, .. }
            | Error::Api { response, .. }
            | Error::Throttled { response, .. }
            | Error::AuthRefresh { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Server-provided wait for a throttled request.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::Throttled { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried by the caller.
    ///
    /// # Example
    ///
    /// ```
    /// use fortnox_rs::Error;
    ///
    /// fn handle_error(err: Error) {
    ///     if err.is_retryable() {
    ///         println!("Retrying operation...");
    ///     }
    /// }
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport { .. } | Error::Throttled { .. } => true,
            Error::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::AuthRefresh { .. } => true,
            Error::Http { status, .. } | Error::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a client-side issue.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Http { status, .. } | Error::Api { status, .. } => {
                (400..500).contains(status)
            }
            Error::Validation(_) | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Http { status, .. } | Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Classify a non-2xx API response.
    ///
    /// A body carrying `ErrorInformation` becomes [`Error::Api`]; anything
    /// else becomes [`Error::Http`] with a generic message.
    pub(crate) fn from_api_response(status: StatusCode, body: &[u8]) -> Self {
        let response = SanitizedResponse::from_parts(status, body);

        if let Some(info) = ErrorInformation::extract(response.data()) {
            return Error::Api {
                status: status.as_u16(),
                error: info.error,
                code: info.code,
                message: info.message,
                response,
            };
        }

        Error::Http {
            status: status.as_u16(),
            message: format!("Request failed with status code {}", status.as_u16()),
            response,
        }
    }

    /// Classify a non-2xx response from the OAuth token endpoint.
    pub(crate) fn from_token_response(
        status: StatusCode,
        retry_after: Option<Duration>,
        body: &[u8],
    ) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Error::Throttled {
                retry_after,
                response: SanitizedResponse::from_parts(status, body),
            };
        }

        let response = SanitizedResponse::from_parts(status, body);
        if status.is_client_error() && is_invalid_refresh_token(response.data()) {
            let message = response
                .data()
                .get("error_description")
                .and_then(Value::as_str)
                .unwrap_or("refresh token is no longer valid; re-authentication required")
                .to_string();
            return Error::AuthRefresh { message, response };
        }

        Self::from_api_response(status, body)
    }

    /// Classify a transport-level failure from `reqwest`.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::Request(err.to_string())
        } else {
            Error::Transport {
                detail: err.without_url().to_string(),
            }
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("invalid URL: {}", err))
    }
}

/// A response snapshot that is safe to log or serialize.
///
/// Only the status, status text and body are kept; headers and the
/// originating request are never captured. Keys naming credentials or
/// cookies are removed from the body at every nesting level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedResponse {
    status: u16,
    status_text: String,
    data: Value,
}

impl SanitizedResponse {
    /// Build a snapshot, scrubbing sensitive keys from `data`.
    pub fn new(status: u16, status_text: impl Into<String>, data: Value) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            data: scrub(data),
        }
    }

    pub(crate) fn from_parts(status: StatusCode, body: &[u8]) -> Self {
        let data = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
        };
        Self::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            data,
        )
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// HTTP reason phrase.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Response body, parsed as JSON when possible.
    pub fn data(&self) -> &Value {
        &self.data
    }
}

impl fmt::Display for SanitizedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{} {}", self.status, self.status_text),
        }
    }
}

fn is_sensitive(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn scrub(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| !is_sensitive(key))
                .map(|(key, value)| (key, scrub(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(scrub).collect()),
        other => other,
    }
}

fn is_invalid_refresh_token(data: &Value) -> bool {
    let error = data.get("error").and_then(Value::as_str).unwrap_or_default();
    let description = data
        .get("error_description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_ascii_lowercase();
    error == "invalid_grant" || description.contains("refresh token")
}

/// The `ErrorInformation` object Fortnox attaches to failed requests.
struct ErrorInformation {
    error: Option<i64>,
    code: Option<i64>,
    message: String,
}

impl ErrorInformation {
    // Fortnox has used both `error/code/message` and `Error/Code/Message`.
    fn extract(data: &Value) -> Option<Self> {
        let info = field(data.as_object()?, "ErrorInformation")?.as_object()?;
        let message = field(info, "message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown API error")
            .to_string();

        Some(Self {
            error: field(info, "error").and_then(as_number),
            code: field(info, "code").and_then(as_number),
            message,
        })
    }
}

fn field<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

fn as_number(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}
