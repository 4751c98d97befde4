//! Parts service: part lists and part metadata.

use std::sync::Arc;

use serde_json::Value;

use crate::api::{Endpoint, PathParams};
use crate::client::ClientInner;
use crate::models::{DocumentRef, PartId};
use crate::Result;

/// Service for parts.
///
/// # Example
///
/// ```no_run
/// use onshape_rs::{DocumentRef, JsonExt};
/// use serde_json::json;
///
/// # async fn example(client: onshape_rs::OnshapeClient) -> onshape_rs::Result<()> {
/// let doc = DocumentRef::from_url("https://cad.onshape.com/documents/d1/w/w1")?;
///
/// let parts = client.parts().list(&doc).await?;
/// let updates: Vec<_> = parts
///     .as_array()
///     .into_iter()
///     .flatten()
///     .map(|part| json!({
///         "elementId": part.str_field("elementId"),
///         "partId": part.str_field("partId"),
///         "partNumber": part.str_field("name"),
///     }))
///     .collect();
///
/// client.parts().set_metadata_bulk(&doc, &updates).await?;
/// # Ok(())
/// # }
/// ```
pub struct PartsService {
    inner: Arc<ClientInner>,
}

impl PartsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the parts in a document revision.
    pub async fn list(&self, doc: &DocumentRef) -> Result<Value> {
        let request = Endpoint::ListParts.request(&PathParams::document(doc))?;
        self.inner.fetch_json(request).await
    }

    /// Set metadata on one part, e.g. `{"name": ..., "partNumber": ...}`.
    ///
    /// `doc` must point at the part studio holding the part.
    pub async fn set_metadata(
        &self,
        doc: &DocumentRef,
        part_id: &PartId,
        payload: &Value,
    ) -> Result<Value> {
        doc.require_element("Part metadata")?;
        let params = PathParams::document(doc).with("partid", part_id.as_str());
        let request = Endpoint::SetPartMetadata
            .request(&params)?
            .with_json(payload)?;
        self.inner.fetch_json(request).await
    }

    /// Set metadata on many parts in one call.
    ///
    /// Each payload must carry `elementId` and `partId`; every other key is
    /// an optional property such as `partNumber` or `material`.
    pub async fn set_metadata_bulk(&self, doc: &DocumentRef, payloads: &[Value]) -> Result<Value> {
        let request = Endpoint::SetPartsMetadata
            .request(&PathParams::document(doc))?
            .with_json(payloads)?;
        self.inner.fetch_json(request).await
    }
}
