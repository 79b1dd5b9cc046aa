//! Vouchers service.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use super::{check_limit, format_last_modified};
use crate::client::{Aggregated, ClientInner, Pages};
use crate::models::{Query, SeriesCode, Voucher, VoucherSeries};
use crate::Result;

/// Service for voucher and voucher series operations.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use fortnox_rs::api::VouchersQuery;
/// use fortnox_rs::Pages;
///
/// # async fn example(client: fortnox_rs::FortnoxClient) -> fortnox_rs::Result<()> {
/// let query = VouchersQuery {
///     from_date: NaiveDate::from_ymd_opt(2024, 1, 1),
///     to_date: NaiveDate::from_ymd_opt(2024, 1, 31),
///     ..Default::default()
/// };
/// let vouchers = client.vouchers().list(Some(query), Pages::All).await?;
///
/// // Rows are only included when fetching a single voucher
/// let voucher = client.vouchers().get("A", 1, None).await?;
/// for row in &voucher.voucher_rows {
///     println!("{}: {} / {}", row.account, row.debit, row.credit);
/// }
/// # Ok(())
/// # }
/// ```
pub struct VouchersService {
    inner: Arc<ClientInner>,
}

/// Filters for listing vouchers.
#[derive(Debug, Default, Clone)]
pub struct VouchersQuery {
    /// Earliest transaction date
    pub from_date: Option<NaiveDate>,
    /// Latest transaction date
    pub to_date: Option<NaiveDate>,
    /// Financial year id
    pub financial_year: Option<u32>,
    /// Only vouchers modified after this time
    pub last_modified: Option<NaiveDateTime>,
    /// Only vouchers in this series
    pub series: Option<SeriesCode>,
    /// Page size
    pub limit: Option<u32>,
    /// Additional raw filters
    pub extra: Query,
}

impl VouchersQuery {
    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .set_opt("fromdate", self.from_date)
            .set_opt("todate", self.to_date)
            .set_opt("financialyear", self.financial_year)
            .set_opt("lastmodified", self.last_modified.as_ref().map(format_last_modified))
            .merge(&self.extra)
    }

    fn path(&self) -> String {
        match &self.series {
            Some(series) => format!("vouchers/sublist/{}", series),
            None => "vouchers".to_string(),
        }
    }
}

impl VouchersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List vouchers.
    pub async fn list(
        &self,
        query: Option<VouchersQuery>,
        pages: Pages,
    ) -> Result<Aggregated<Voucher>> {
        let query = query.unwrap_or_default();
        let limit = check_limit(query.limit)?;
        self.inner
            .fetch_all(&query.path(), &query.to_query(), limit, pages)
            .await
    }

    /// Get a single voucher, including its rows.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] without making a request if
    /// `series` is not a valid series code.
    pub async fn get(
        &self,
        series: &str,
        number: u64,
        financial_year: Option<u32>,
    ) -> Result<Voucher> {
        let series = SeriesCode::new(series)?;
        let query = Query::new().set_opt("financialyear", financial_year);
        self.inner
            .fetch_one(&format!("vouchers/{}/{}", series, number), &query)
            .await
    }

    /// List voucher series.
    pub async fn series(&self, pages: Pages) -> Result<Aggregated<VoucherSeries>> {
        self.inner
            .fetch_all("voucherseries", &Query::new(), None, pages)
            .await
    }
}
