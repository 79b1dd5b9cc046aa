//! Company information service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{CompanyInformation, Query};
use crate::Result;

/// Service for company information.
pub struct CompanyService {
    inner: Arc<ClientInner>,
}

impl CompanyService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get information about the company the credentials belong to.
    pub async fn information(&self) -> Result<CompanyInformation> {
        self.inner
            .fetch_one("companyinformation", &Query::new())
            .await
    }
}
