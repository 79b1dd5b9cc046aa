//! # fortnox-rs
//!
//! An async Rust client for the Fortnox accounting API.
//!
//! The client covers the read side of Fortnox bookkeeping: vouchers and
//! voucher series, the chart of accounts, financial years, company
//! information, customer and supplier invoices, and SIE exports.
//!
//! ## Features
//!
//! - **Authentication**: OAuth2 refresh-token flow with proactive, single-flight
//!   refresh, or the legacy `Access-Token` / `Client-Secret` headers
//! - **Pagination**: Listings are fetched one page or all pages at a time and
//!   merged in page order
//! - **Rate limiting**: Requests are serialized and spaced to stay within the
//!   Fortnox per-tenant limit; throttled requests are retried once
//! - **Error handling**: Every failure is classified into [`Error`], with
//!   response snapshots scrubbed of credentials
//! - **Type Safety**: Strongly-typed models and validated path parameters
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fortnox_rs::{Credentials, FortnoxClient, Pages};
//! use fortnox_rs::api::VouchersQuery;
//!
//! #[tokio::main]
//! async fn main() -> fortnox_rs::Result<()> {
//!     let credentials = Credentials::new(
//!         "access-token",
//!         "refresh-token",
//!         "client-id",
//!         "client-secret",
//!     );
//!     let client = FortnoxClient::from_credentials(credentials)?;
//!
//!     let company = client.company().information().await?;
//!     println!("Connected to {}", company.company_name);
//!
//!     let query = VouchersQuery {
//!         financial_year: Some(3),
//!         ..Default::default()
//!     };
//!     let vouchers = client.vouchers().list(Some(query), Pages::All).await?;
//!     println!("Found {} vouchers", vouchers.len());
//!
//!     // Refresh tokens rotate; persist the new one
//!     if let Some(credentials) = client.credentials().await {
//!         println!("Token valid until {:?}", credentials.expires_at);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use fortnox_rs::{Error, FortnoxClient, SieType};
//!
//! # async fn example(client: FortnoxClient) {
//! match client.sie().export(SieType::Type4, Some(3)).await {
//!     Ok(bytes) => println!("{} bytes", bytes.len()),
//!     Err(Error::Throttled { retry_after, .. }) => {
//!         println!("Throttled, try again in {:?}", retry_after);
//!     }
//!     Err(err) if err.is_auth_error() => println!("Reconnect Fortnox: {}", err),
//!     Err(err) => println!("Export failed: {}", err),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result, SanitizedResponse};
pub use models::{MetaInformation, Query, SeriesCode, SieType};
pub use client::{Aggregated, ClientConfig, FortnoxClient, Pages, Payload, RetryConfig};
pub use auth::{Credentials, TokenManager};

/// Prelude module for convenient imports.
///
/// ```rust
/// use fortnox_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        MetaInformation, Query, SeriesCode, SieType,
        // Bookkeeping
        Account, FinancialYear, Voucher, VoucherRow, VoucherSeries,
        // Company and invoices
        CompanyInformation, Invoice, SupplierInvoice,
    };
    pub use crate::api::{
        AccountsQuery, FinancialYearsQuery, InvoiceFilter, InvoicesQuery,
        SupplierInvoiceFilter, SupplierInvoicesQuery, VouchersQuery,
    };
    pub use crate::client::{Aggregated, ClientConfig, FortnoxClient, Pages, Payload, RetryConfig};
    pub use crate::auth::Credentials;
}
