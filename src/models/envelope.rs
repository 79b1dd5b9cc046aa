//! Listing envelope shared by every Fortnox collection endpoint.
//!
//! A listing response looks like
//!
//! ```json
//! {
//!   "MetaInformation": { "@TotalPages": 3, "@CurrentPage": 1, "@TotalResources": 250 },
//!   "Vouchers": [ ... ]
//! }
//! ```
//!
//! and a singleton response like `{ "Voucher": { ... } }`. The payload key
//! is declared per item type through [`Resource`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Key of the pagination metadata object.
pub const META_KEY: &str = "MetaInformation";

/// Pagination metadata of a listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaInformation {
    /// Total number of pages
    #[serde(rename = "@TotalPages")]
    pub total_pages: u32,
    /// Page this response belongs to (1-based)
    #[serde(rename = "@CurrentPage")]
    pub current_page: u32,
    /// Total number of resources across all pages
    #[serde(rename = "@TotalResources")]
    pub total_resources: u64,
}

impl MetaInformation {
    /// Returns `true` if there are pages after the current one.
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// An item type returned by Fortnox, together with the keys its payload
/// is wrapped in.
pub trait Resource: DeserializeOwned {
    /// Key of the array payload in a listing response.
    const COLLECTION_KEY: &'static str;
    /// Key of the object payload in a single-resource response.
    const SINGLE_KEY: &'static str;
}
