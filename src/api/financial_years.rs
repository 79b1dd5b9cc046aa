//! Financial years service.

use std::sync::Arc;

use chrono::NaiveDate;

use super::check_limit;
use crate::client::{Aggregated, ClientInner, Pages};
use crate::models::{FinancialYear, Query};
use crate::Result;

/// Service for financial year operations.
pub struct FinancialYearsService {
    inner: Arc<ClientInner>,
}

/// Filters for listing financial years.
#[derive(Debug, Default, Clone)]
pub struct FinancialYearsQuery {
    /// Only the financial year containing this date
    pub date: Option<NaiveDate>,
    /// Page size
    pub limit: Option<u32>,
    /// Additional raw filters
    pub extra: Query,
}

impl FinancialYearsQuery {
    pub(crate) fn to_query(&self) -> Query {
        Query::new().set_opt("date", self.date).merge(&self.extra)
    }
}

impl FinancialYearsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List financial years.
    pub async fn list(
        &self,
        query: Option<FinancialYearsQuery>,
        pages: Pages,
    ) -> Result<Aggregated<FinancialYear>> {
        let query = query.unwrap_or_default();
        let limit = check_limit(query.limit)?;
        self.inner
            .fetch_all("financialyears", &query.to_query(), limit, pages)
            .await
    }

    /// Get a financial year by id.
    pub async fn get(&self, id: u32) -> Result<FinancialYear> {
        self.inner
            .fetch_one(&format!("financialyears/{}", id), &Query::new())
            .await
    }

    /// Get the financial year containing `date`, if one exists.
    pub async fn for_date(&self, date: NaiveDate) -> Result<Option<FinancialYear>> {
        let query = FinancialYearsQuery {
            date: Some(date),
            ..Default::default()
        };
        let years = self.list(Some(query), Pages::First).await?;
        Ok(years.into_items().into_iter().find(|year| year.contains(date)))
    }
}
