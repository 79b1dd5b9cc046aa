//! HTTP client, request pipeline and page aggregation.
//!
//! This module provides the main entry point [`FortnoxClient`]. Every
//! request goes through the same pipeline: the token manager supplies
//! credentials, the rate limiter serializes and paces the call, and any
//! failure is classified into [`crate::Error`].
//!
//! # Example
//!
//! ```no_run
//! use fortnox_rs::{ClientConfig, Credentials, FortnoxClient, Pages};
//! use std::time::Duration;
//!
//! # async fn example() -> fortnox_rs::Result<()> {
//! let config = ClientConfig::default().with_min_request_interval(Duration::from_millis(200));
//! let client = FortnoxClient::with_config(Credentials::from_env()?, config)?;
//!
//! let series = client.vouchers().series(Pages::All).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;
pub(crate) mod rate_limit;

pub use config::{ClientConfig, RetryConfig, DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URL};
pub use http::{FortnoxClient, MAX_THROTTLE_RETRIES};
pub use paginated::{Aggregated, Pages, Payload, LIMIT_PARAM, MAX_PAGE_SIZE, PAGE_PARAM};
pub(crate) use http::ClientInner;
