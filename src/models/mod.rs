//! Data models for the Fortnox API.
//!
//! Models are organized by domain:
//!
//! - [`primitives`] - Query parameters and validated path parameters
//! - [`envelope`] - Listing metadata and the [`Resource`] payload contract
//! - [`voucher`] - Vouchers and voucher series
//! - [`account`] - Chart of accounts
//! - [`financial_year`] - Financial years
//! - [`company`] - Company information
//! - [`invoice`] - Customer and supplier invoices

pub mod primitives;
pub mod envelope;
pub mod voucher;
pub mod account;
pub mod financial_year;
pub mod company;
pub mod invoice;

// Re-export commonly used types
pub use primitives::*;
pub use envelope::*;
pub use voucher::*;
pub use account::*;
pub use financial_year::*;
pub use company::*;
pub use invoice::*;
