//! OAuth applications service.

use std::sync::Arc;

use serde_json::Value;

use crate::api::{Endpoint, PathParams};
use crate::cache::LookupCache;
use crate::client::ClientInner;
use crate::models::{ClientId, JsonExt};
use crate::{Error, Result};

/// Recorded for applications whose name cannot be looked up.
pub const UNKNOWN_APPLICATION: &str = "unknown";

/// Service for OAuth applications, keyed by client ID.
///
/// # Example
///
/// ```no_run
/// use onshape_rs::{ClientId, LookupCache};
///
/// # async fn example(client: onshape_rs::OnshapeClient) {
/// let mut names = LookupCache::new();
/// let name = client
///     .applications()
///     .name(&ClientId::new("ABCDEF0123"), &mut names)
///     .await;
/// println!("{}", name);
/// # }
/// ```
pub struct ApplicationsService {
    inner: Arc<ClientInner>,
}

impl ApplicationsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get an application.
    pub async fn get(&self, cid: &ClientId) -> Result<Value> {
        let request =
            Endpoint::GetApplication.request(&PathParams::new().with("cid", cid.as_str()))?;
        self.inner.fetch_json(request).await
    }

    /// Look up an application's display name through `cache`.
    ///
    /// Each client ID is fetched at most once per cache. A failed lookup, or
    /// an application without a name, is cached as [`UNKNOWN_APPLICATION`].
    pub async fn name(&self, cid: &ClientId, cache: &mut LookupCache<ClientId, String>) -> String {
        cache
            .get_or_fetch_or(
                cid.clone(),
                move || async move {
                    let application = self.get(cid).await?;
                    application
                        .str_field("name")
                        .map(str::to_string)
                        .ok_or_else(|| {
                            Error::InvalidResponse("application has no name".to_string())
                        })
                },
                UNKNOWN_APPLICATION.to_string(),
            )
            .await
    }
}
