//! Financial year models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::envelope::Resource;

/// A financial year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FinancialYear {
    /// Resource URL
    #[serde(rename = "@url", default)]
    pub url: Option<String>,
    /// Financial year id, used as `financialyear` in other queries
    pub id: u32,
    /// First day of the year
    pub from_date: NaiveDate,
    /// Last day of the year
    pub to_date: NaiveDate,
    /// `ACCRUAL` or `CASH`
    #[serde(default)]
    pub accounting_method: Option<String>,
    /// Chart of accounts the year is based on
    #[serde(default, alias = "accountCharts")]
    pub account_charts: Option<String>,
}

impl Resource for FinancialYear {
    const COLLECTION_KEY: &'static str = "FinancialYears";
    const SINGLE_KEY: &'static str = "FinancialYear";
}

impl FinancialYear {
    /// Returns `true` if `date` falls within this financial year.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from_date <= date && date <= self.to_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financial_year_contains() {
        let year: FinancialYear = serde_json::from_value(serde_json::json!({
            "Id": 3,
            "FromDate": "2024-01-01",
            "ToDate": "2024-12-31",
            "AccountingMethod": "ACCRUAL",
            "accountCharts": "Bas 2024"
        }))
        .unwrap();

        assert_eq!(year.account_charts.as_deref(), Some("Bas 2024"));
        assert!(year.contains(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(!year.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    }
}
