//! Teams service.

use std::sync::Arc;

use serde_json::Value;

use crate::api::{Endpoint, PathParams};
use crate::client::paginated::{Page, PageStream};
use crate::client::ClientInner;
use crate::Result;

/// Service for the caller's teams.
pub struct TeamsService {
    inner: Arc<ClientInner>,
}

impl TeamsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the first page of teams.
    pub async fn list(&self) -> Result<Page> {
        let request = Endpoint::ListTeams.request(&PathParams::new())?;
        let value: Value = self.inner.fetch_json(request).await?;
        Page::from_value(value)
    }

    /// Stream every page of teams.
    pub async fn list_stream(&self) -> Result<PageStream> {
        let first = self.list().await?;
        Ok(self.inner.clone().pages(first))
    }
}
