//! Companies service.

use std::sync::Arc;

use serde_json::Value;

use crate::api::{Endpoint, PathParams};
use crate::client::paginated::{Page, PageStream};
use crate::client::ClientInner;
use crate::Result;

/// Service for the companies the caller belongs to.
pub struct CompaniesService {
    inner: Arc<ClientInner>,
}

impl CompaniesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the first page of companies.
    pub async fn list(&self) -> Result<Page> {
        let request = Endpoint::ListCompanies.request(&PathParams::new())?;
        let value: Value = self.inner.fetch_json(request).await?;
        Page::from_value(value)
    }

    /// Stream every page of companies.
    pub async fn list_stream(&self) -> Result<PageStream> {
        let first = self.list().await?;
        Ok(self.inner.clone().pages(first))
    }
}
