//! Voucher and voucher series models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::envelope::Resource;

/// A bookkeeping voucher.
///
/// Listings return vouchers without rows; fetch a single voucher to get
/// [`Voucher::voucher_rows`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Voucher {
    /// Resource URL
    #[serde(rename = "@url", default)]
    pub url: Option<String>,
    /// Free-text comments
    #[serde(default)]
    pub comments: Option<String>,
    /// Cost center code
    #[serde(default)]
    pub cost_center: Option<String>,
    /// Voucher description
    #[serde(default)]
    pub description: Option<String>,
    /// Project code
    #[serde(default)]
    pub project: Option<String>,
    /// Reference number of the originating document
    #[serde(default)]
    pub reference_number: Option<String>,
    /// Type of the originating document (e.g. `INVOICE`, `MANUAL`)
    #[serde(default)]
    pub reference_type: Option<String>,
    /// Booking date
    pub transaction_date: NaiveDate,
    /// Number within the series
    pub voucher_number: u64,
    /// Voucher rows (only present on single-voucher responses)
    #[serde(default)]
    pub voucher_rows: Vec<VoucherRow>,
    /// Series code
    pub voucher_series: String,
    /// Financial year id
    #[serde(default)]
    pub year: Option<u32>,
    /// Approval state
    #[serde(default)]
    pub approval_state: Option<i32>,
}

impl Resource for Voucher {
    const COLLECTION_KEY: &'static str = "Vouchers";
    const SINGLE_KEY: &'static str = "Voucher";
}

/// A single debit or credit row of a voucher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoucherRow {
    /// Account number
    pub account: u32,
    /// Cost center code
    #[serde(default)]
    pub cost_center: Option<String>,
    /// Credit amount
    #[serde(default)]
    pub credit: Decimal,
    /// Row description
    #[serde(default)]
    pub description: Option<String>,
    /// Debit amount
    #[serde(default)]
    pub debit: Decimal,
    /// Project code
    #[serde(default)]
    pub project: Option<String>,
    /// Whether the row has been removed
    #[serde(default)]
    pub removed: bool,
    /// Transaction information text
    #[serde(default)]
    pub transaction_information: Option<String>,
    /// Quantity
    #[serde(default)]
    pub quantity: Option<Decimal>,
}

/// A voucher series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoucherSeries {
    /// Resource URL
    #[serde(rename = "@url", default)]
    pub url: Option<String>,
    /// Series code
    pub code: String,
    /// Series description
    #[serde(default)]
    pub description: Option<String>,
    /// Whether manual vouchers may be created in the series
    #[serde(default)]
    pub manual: bool,
    /// Financial year id
    #[serde(default)]
    pub year: Option<u32>,
    /// Approver of vouchers in the series
    #[serde(default)]
    pub approver: Option<Approver>,
}

impl Resource for VoucherSeries {
    const COLLECTION_KEY: &'static str = "VoucherSeriesCollection";
    const SINGLE_KEY: &'static str = "VoucherSeries";
}

/// Approver of a voucher series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Approver {
    /// Approver id
    pub id: u64,
    /// Approver name
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_voucher_with_rows() {
        let voucher: Voucher = serde_json::from_value(serde_json::json!({
            "@url": "https://api.fortnox.se/3/vouchers/A/1?financialyear=1",
            "Comments": null,
            "Description": "Kontantförsäljning",
            "ReferenceType": "MANUAL",
            "TransactionDate": "2024-01-15",
            "VoucherNumber": 1,
            "VoucherSeries": "A",
            "Year": 1,
            "VoucherRows": [
                { "Account": 1930, "Debit": 1250.5, "Credit": 0, "Removed": false },
                { "Account": 3001, "Debit": 0, "Credit": 1250.5, "Removed": false }
            ]
        }))
        .unwrap();

        assert_eq!(voucher.voucher_number, 1);
        assert_eq!(voucher.transaction_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(voucher.voucher_rows.len(), 2);
        assert_eq!(voucher.voucher_rows[0].debit, dec!(1250.5));
        assert_eq!(voucher.voucher_rows[1].account, 3001);
    }

    #[test]
    fn test_voucher_series() {
        let series: VoucherSeries = serde_json::from_value(serde_json::json!({
            "Code": "A",
            "Description": "Redovisningsverifikationer",
            "Manual": true,
            "Year": 1,
            "Approver": { "Id": 7, "Name": "Anna" }
        }))
        .unwrap();

        assert_eq!(series.code, "A");
        assert_eq!(series.approver.unwrap().name, "Anna");
    }
}
