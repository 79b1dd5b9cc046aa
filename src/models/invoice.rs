//! Customer and supplier invoice models.
//!
//! These are the fields Fortnox returns in invoice listings; single-invoice
//! responses carry more, which are ignored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::envelope::Resource;

/// A customer invoice as returned by the invoice listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    /// Resource URL
    #[serde(rename = "@url", default)]
    pub url: Option<String>,
    /// Remaining amount to be paid
    #[serde(default)]
    pub balance: Option<Decimal>,
    /// Whether the invoice is booked
    #[serde(default)]
    pub booked: bool,
    /// Whether the invoice is cancelled
    #[serde(default)]
    pub cancelled: bool,
    /// Currency code
    #[serde(default)]
    pub currency: Option<String>,
    /// Customer name
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Customer number
    pub customer_number: String,
    /// Invoice number
    pub document_number: String,
    /// Due date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Invoice date
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    /// OCR reference
    #[serde(rename = "OCR", default)]
    pub ocr: Option<String>,
    /// Whether the invoice has been sent
    #[serde(default)]
    pub sent: bool,
    /// Total amount including VAT
    #[serde(default)]
    pub total: Option<Decimal>,
    /// Date of final payment
    #[serde(default)]
    pub final_pay_date: Option<NaiveDate>,
}

impl Resource for Invoice {
    const COLLECTION_KEY: &'static str = "Invoices";
    const SINGLE_KEY: &'static str = "Invoice";
}

impl Invoice {
    /// Returns `true` if the invoice still has an amount outstanding.
    pub fn is_unpaid(&self) -> bool {
        !self.cancelled && self.balance.is_some_and(|b| !b.is_zero())
    }
}

/// A supplier invoice as returned by the supplier invoice listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SupplierInvoice {
    /// Resource URL
    #[serde(rename = "@url", default)]
    pub url: Option<String>,
    /// Remaining amount to be paid
    #[serde(default)]
    pub balance: Option<Decimal>,
    /// Whether the invoice is booked
    #[serde(default)]
    pub booked: bool,
    /// Whether the invoice is cancelled
    #[serde(default)]
    pub cancel: bool,
    /// Currency code
    #[serde(default)]
    pub currency: Option<String>,
    /// Due date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Fortnox serial number of the supplier invoice
    pub given_number: String,
    /// Invoice date
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    /// Supplier's invoice number
    #[serde(default)]
    pub invoice_number: Option<String>,
    /// Supplier name
    #[serde(default)]
    pub supplier_name: Option<String>,
    /// Supplier number
    pub supplier_number: String,
    /// Total amount including VAT
    #[serde(default)]
    pub total: Option<Decimal>,
}

impl Resource for SupplierInvoice {
    const COLLECTION_KEY: &'static str = "SupplierInvoices";
    const SINGLE_KEY: &'static str = "SupplierInvoice";
}
