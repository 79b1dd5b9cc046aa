//! Chart of accounts service.

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::{check_limit, format_last_modified};
use crate::client::{Aggregated, ClientInner, Pages};
use crate::models::{Account, Query};
use crate::Result;

/// Service for chart of accounts operations.
///
/// # Example
///
/// ```no_run
/// use fortnox_rs::api::AccountsQuery;
/// use fortnox_rs::Pages;
///
/// # async fn example(client: fortnox_rs::FortnoxClient) -> fortnox_rs::Result<()> {
/// // All balance sheet accounts of financial year 3
/// let query = AccountsQuery {
///     financial_year: Some(3),
///     account_number_from: Some(1000),
///     account_number_to: Some(2999),
///     ..Default::default()
/// };
/// let accounts = client.accounts().list(Some(query), Pages::All).await?;
/// for account in accounts.items() {
///     println!("{} {}", account.number, account.description);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

/// Filters for listing accounts.
#[derive(Debug, Default, Clone)]
pub struct AccountsQuery {
    /// Financial year id
    pub financial_year: Option<u32>,
    /// Lowest account number
    pub account_number_from: Option<u32>,
    /// Highest account number
    pub account_number_to: Option<u32>,
    /// Only accounts modified after this time
    pub last_modified: Option<NaiveDateTime>,
    /// Page size
    pub limit: Option<u32>,
    /// Additional raw filters
    pub extra: Query,
}

impl AccountsQuery {
    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .set_opt("accountnumberfrom", self.account_number_from)
            .set_opt("accountnumberto", self.account_number_to)
            .set_opt("financialyear", self.financial_year)
            .set_opt("lastmodified", self.last_modified.as_ref().map(format_last_modified))
            .merge(&self.extra)
    }
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List accounts.
    pub async fn list(
        &self,
        query: Option<AccountsQuery>,
        pages: Pages,
    ) -> Result<Aggregated<Account>> {
        let query = query.unwrap_or_default();
        let limit = check_limit(query.limit)?;
        self.inner
            .fetch_all("accounts", &query.to_query(), limit, pages)
            .await
    }

    /// Get details for a specific account.
    ///
    /// # Arguments
    ///
    /// * `number` - The account number to retrieve
    /// * `financial_year` - Financial year id; the current year if `None`
    pub async fn get(&self, number: u32, financial_year: Option<u32>) -> Result<Account> {
        let query = Query::new().set_opt("financialyear", financial_year);
        self.inner
            .fetch_one(&format!("accounts/{}", number), &query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accounts_query() {
        let query = AccountsQuery {
            financial_year: Some(2),
            account_number_from: Some(1000),
            account_number_to: Some(1999),
            ..Default::default()
        };

        assert_eq!(
            query.to_query().to_string(),
            "accountnumberfrom=1000&accountnumberto=1999&financialyear=2"
        );
    }
}
