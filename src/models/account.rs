//! Chart of accounts models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::envelope::Resource;

/// An account in the chart of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    /// Resource URL
    #[serde(rename = "@url", default)]
    pub url: Option<String>,
    /// Whether the account is active
    #[serde(default)]
    pub active: bool,
    /// Opening balance of the financial year
    #[serde(default)]
    pub balance_brought_forward: Option<Decimal>,
    /// Closing balance of the financial year
    #[serde(default)]
    pub balance_carried_forward: Option<Decimal>,
    /// Default cost center
    #[serde(default)]
    pub cost_center: Option<String>,
    /// Cost center requirement (`ALLOWED`, `MANDATORY`, `NOTALLOWED`)
    #[serde(default)]
    pub cost_center_settings: Option<String>,
    /// Account description
    pub description: String,
    /// Account number
    pub number: u32,
    /// Default project
    #[serde(default)]
    pub project: Option<String>,
    /// Project requirement
    #[serde(default)]
    pub project_settings: Option<String>,
    /// SRU code for tax reporting
    #[serde(rename = "SRU", default)]
    pub sru: Option<u32>,
    /// Financial year id
    #[serde(default)]
    pub year: Option<u32>,
    /// VAT code
    #[serde(rename = "VATCode", default)]
    pub vat_code: Option<String>,
    /// Default transaction information
    #[serde(default)]
    pub transaction_information: Option<String>,
    /// Transaction information requirement
    #[serde(default)]
    pub transaction_information_settings: Option<String>,
    /// Quantity requirement
    #[serde(default)]
    pub quantity_settings: Option<String>,
    /// Quantity unit
    #[serde(default)]
    pub quantity_unit: Option<String>,
    /// Opening quantities per project
    #[serde(default)]
    pub opening_quantities: Vec<OpeningQuantity>,
}

impl Resource for Account {
    const COLLECTION_KEY: &'static str = "Accounts";
    const SINGLE_KEY: &'static str = "Account";
}

/// Opening quantity of an account for a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OpeningQuantity {
    /// Project code
    pub project: String,
    /// Opening balance
    pub balance: Decimal,
}
