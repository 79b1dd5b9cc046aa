//! SIE export service.

use std::sync::Arc;

use tracing::debug;

use crate::client::ClientInner;
use crate::models::{Query, SieType};
use crate::Result;

/// Service for SIE file exports.
///
/// # Example
///
/// ```no_run
/// use fortnox_rs::SieType;
///
/// # async fn example(client: fortnox_rs::FortnoxClient) -> fortnox_rs::Result<()> {
/// let bytes = client.sie().export(SieType::Type4, Some(3)).await?;
/// std::fs::write("export.se", &bytes).expect("write export");
/// # Ok(())
/// # }
/// ```
pub struct SieService {
    inner: Arc<ClientInner>,
}

impl SieService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Export the bookkeeping as an SIE file.
    ///
    /// The body is returned unparsed. SIE files are usually encoded as
    /// CP437 (PC8), so decoding is left to the caller.
    pub async fn export(&self, sie_type: SieType, financial_year: Option<u32>) -> Result<Vec<u8>> {
        let query = Query::new().set_opt("financialyear", financial_year);
        let bytes = self
            .inner
            .dispatch_bytes(&format!("sie/{}", sie_type), &query)
            .await?;
        debug!(sie_type = sie_type.as_str(), len = bytes.len(), "SIE export received");
        Ok(bytes)
    }
}
