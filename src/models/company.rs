//! Company information model.

use serde::{Deserialize, Serialize};

use super::envelope::Resource;

/// Information about the company the credentials belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyInformation {
    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
    /// Postal city
    #[serde(default)]
    pub city: Option<String>,
    /// Country code
    #[serde(default)]
    pub country_code: Option<String>,
    /// Fortnox database number
    #[serde(default)]
    pub database_number: Option<u64>,
    /// Registered company name
    pub company_name: String,
    /// Organization number
    #[serde(default)]
    pub organization_number: Option<String>,
    /// Visiting address
    #[serde(default)]
    pub visit_address: Option<String>,
    /// Visiting city
    #[serde(default)]
    pub visit_city: Option<String>,
    /// Visiting country code
    #[serde(default)]
    pub visit_country_code: Option<String>,
    /// Visiting zip code
    #[serde(default)]
    pub visit_zip_code: Option<String>,
    /// Postal zip code
    #[serde(default)]
    pub zip_code: Option<String>,
}

impl Resource for CompanyInformation {
    // Singleton-only resource; both keys are the same.
    const COLLECTION_KEY: &'static str = "CompanyInformation";
    const SINGLE_KEY: &'static str = "CompanyInformation";
}
