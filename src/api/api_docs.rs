//! API documentation service.

use std::sync::Arc;

use serde_json::Value;

use crate::api::{Endpoint, PathParams};
use crate::client::ClientInner;
use crate::Result;

/// Service describing the API itself.
///
/// # Example
///
/// ```no_run
/// use onshape_rs::JsonExt;
///
/// # async fn example(client: onshape_rs::OnshapeClient) -> onshape_rs::Result<()> {
/// let groups = client.api_docs().endpoints().await?;
/// for group in groups.as_array().into_iter().flatten() {
///     println!("{}", group.str_field("groupTitle").unwrap_or("?"));
/// }
/// # Ok(())
/// # }
/// ```
pub struct ApiDocsService {
    inner: Arc<ClientInner>,
}

impl ApiDocsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the documented endpoints, grouped by area.
    ///
    /// Each group carries `group`, `groupTitle` and an `endpoints` array
    /// describing method, URL, parameters and responses.
    pub async fn endpoints(&self) -> Result<Value> {
        let request = Endpoint::GetEndpoints.request(&PathParams::new())?;
        self.inner.fetch_json(request).await
    }
}
