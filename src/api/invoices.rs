//! Customer invoices service.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use super::{check_limit, format_last_modified};
use crate::client::{Aggregated, ClientInner, Pages};
use crate::models::{Invoice, Query};
use crate::Result;

/// Service for customer invoice operations.
///
/// # Example
///
/// ```no_run
/// use fortnox_rs::api::{InvoiceFilter, InvoicesQuery};
/// use fortnox_rs::Pages;
///
/// # async fn example(client: fortnox_rs::FortnoxClient) -> fortnox_rs::Result<()> {
/// let query = InvoicesQuery {
///     filter: Some(InvoiceFilter::UnpaidOverdue),
///     ..Default::default()
/// };
/// let overdue = client.invoices().list(Some(query), Pages::All).await?;
/// for invoice in overdue.items() {
///     println!("{} {:?}", invoice.document_number, invoice.balance);
/// }
/// # Ok(())
/// # }
/// ```
pub struct InvoicesService {
    inner: Arc<ClientInner>,
}

/// Predefined invoice filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceFilter {
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
}

impl InvoiceFilter {
    /// The value sent as the `filter` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceFilter::Cancelled => "cancelled",
            InvoiceFilter::FullyPaid => "fullypaid",
            InvoiceFilter::Unpaid => "unpaid",
            InvoiceFilter::UnpaidOverdue => "unpaidoverdue",
            InvoiceFilter::Unbooked => "unbooked",
        }
    }
}

impl fmt::Display for InvoiceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for listing customer invoices.
#[derive(Debug, Default, Clone)]
pub struct InvoicesQuery {
    /// Predefined filter
    pub filter: Option<InvoiceFilter>,
    /// Earliest invoice date
    pub from_date: Option<NaiveDate>,
    /// Latest invoice date
    pub to_date: Option<NaiveDate>,
    /// Financial year id
    pub financial_year: Option<u32>,
    /// Only invoices modified after this time
    pub last_modified: Option<NaiveDateTime>,
    /// Only invoices for this customer
    pub customer_number: Option<String>,
    /// Page size
    pub limit: Option<u32>,
    /// Additional raw filters
    pub extra: Query,
}

impl InvoicesQuery {
    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .set_opt("filter", self.filter)
            .set_opt("fromdate", self.from_date)
            .set_opt("todate", self.to_date)
            .set_opt("financialyear", self.financial_year)
            .set_opt("lastmodified", self.last_modified.as_ref().map(format_last_modified))
            .set_opt("customernumber", self.customer_number.as_deref())
            .merge(&self.extra)
    }
}

impl InvoicesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List customer invoices.
    pub async fn list(
        &self,
        query: Option<InvoicesQuery>,
        pages: Pages,
    ) -> Result<Aggregated<Invoice>> {
        let query = query.unwrap_or_default();
        let limit = check_limit(query.limit)?;
        self.inner
            .fetch_all("invoices", &query.to_query(), limit, pages)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoices_query() {
        let query = InvoicesQuery {
            filter: Some(InvoiceFilter::Unpaid),
            customer_number: Some("1001".to_string()),
            ..Default::default()
        };
        assert_eq!(query.to_query().to_string(), "filter=unpaid&customernumber=1001");
    }

    #[test]
    fn test_extra_overrides_typed_filter() {
        let query = InvoicesQuery {
            filter: Some(InvoiceFilter::Unpaid),
            extra: Query::new().set("Filter", "cancelled"),
            ..Default::default()
        };
        assert_eq!(query.to_query().get("filter"), Some("cancelled"));
    }
}
