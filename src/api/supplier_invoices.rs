//! Supplier invoices service.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use super::{check_limit, format_last_modified};
use crate::client::{Aggregated, ClientInner, Pages};
use crate::models::{Query, SupplierInvoice};
use crate::Result;

/// Service for supplier invoice operations.
pub struct SupplierInvoicesService {
    inner: Arc<ClientInner>,
}

/// Predefined supplier invoice filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierInvoiceFilter {
    /// Cancelled invoices
    Cancelled,
    /// Fully paid invoices
    FullyPaid,
    /// Invoices with a remaining balance
    Unpaid,
    /// Unpaid invoices past their due date
    UnpaidOverdue,
    /// Invoices not yet booked
    Unbooked,
    /// Invoices with a pending payment
    PendingPayment,
    /// Invoices waiting for authorization
    AuthorizePending,
}

impl SupplierInvoiceFilter {
    /// The value sent as the `filter` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierInvoiceFilter::Cancelled => "cancelled",
            SupplierInvoiceFilter::FullyPaid => "fullypaid",
            SupplierInvoiceFilter::Unpaid => "unpaid",
            SupplierInvoiceFilter::UnpaidOverdue => "unpaidoverdue",
            SupplierInvoiceFilter::Unbooked => "unbooked",
            SupplierInvoiceFilter::PendingPayment => "pendingpayment",
            SupplierInvoiceFilter::AuthorizePending => "authorizepending",
        }
    }
}

impl fmt::Display for SupplierInvoiceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for listing supplier invoices.
#[derive(Debug, Default, Clone)]
pub struct SupplierInvoicesQuery {
    /// Predefined filter
    pub filter: Option<SupplierInvoiceFilter>,
    /// Earliest invoice date
    pub from_date: Option<NaiveDate>,
    /// Latest invoice date
    pub to_date: Option<NaiveDate>,
    /// Financial year id
    pub financial_year: Option<u32>,
    /// Only invoices modified after this time
    pub last_modified: Option<NaiveDateTime>,
    /// Only invoices from this supplier
    pub supplier_number: Option<String>,
    /// Page size
    pub limit: Option<u32>,
    /// Additional raw filters
    pub extra: Query,
}

impl SupplierInvoicesQuery {
    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .set_opt("filter", self.filter)
            .set_opt("fromdate", self.from_date)
            .set_opt("todate", self.to_date)
            .set_opt("financialyear", self.financial_year)
            .set_opt("lastmodified", self.last_modified.as_ref().map(format_last_modified))
            .set_opt("suppliernumber", self.supplier_number.as_deref())
            .merge(&self.extra)
    }
}

impl SupplierInvoicesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List supplier invoices.
    pub async fn list(
        &self,
        query: Option<SupplierInvoicesQuery>,
        pages: Pages,
    ) -> Result<Aggregated<SupplierInvoice>> {
        let query = query.unwrap_or_default();
        let limit = check_limit(query.limit)?;
        self.inner
            .fetch_all("supplierinvoices", &query.to_query(), limit, pages)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_supplier_invoices_query() {
        let query = SupplierInvoicesQuery {
            filter: Some(SupplierInvoiceFilter::AuthorizePending),
            last_modified: NaiveDate::from_ymd_opt(2024, 5, 2)
                .unwrap()
                .and_hms_opt(14, 30, 0),
            ..Default::default()
        };
        assert_eq!(
            query.to_query().to_string(),
            "filter=authorizepending&lastmodified=2024-05-02 14:30"
        );
    }
}
