//! API service modules for Fortnox endpoints.
//!
//! Each service provides methods for one resource family. Listing methods
//! take an optional filter struct and a [`Pages`](crate::Pages) selector.

mod accounts;
mod company;
mod financial_years;
mod invoices;
mod sie;
mod supplier_invoices;
mod vouchers;

use chrono::NaiveDateTime;

use crate::client::MAX_PAGE_SIZE;
use crate::{Error, Result};

pub use accounts::{AccountsQuery, AccountsService};
pub use company::CompanyService;
pub use financial_years::{FinancialYearsQuery, FinancialYearsService};
pub use invoices::{InvoiceFilter, InvoicesQuery, InvoicesService};
pub use sie::SieService;
pub use supplier_invoices::{SupplierInvoiceFilter, SupplierInvoicesQuery, SupplierInvoicesService};
pub use vouchers::{VouchersQuery, VouchersService};

/// Format used by the `lastmodified` filter.
const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M";

fn format_last_modified(value: &NaiveDateTime) -> String {
    value.format(LAST_MODIFIED_FORMAT).to_string()
}

fn check_limit(limit: Option<u32>) -> Result<Option<u32>> {
    match limit {
        Some(0) => Err(Error::Validation("limit must be at least 1".to_string())),
        Some(n) if n > MAX_PAGE_SIZE => Err(Error::Validation(format!(
            "limit must be at most {}",
            MAX_PAGE_SIZE
        ))),
        other => Ok(other),
    }
}
