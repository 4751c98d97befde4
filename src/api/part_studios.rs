//! Part studios service.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::api::{Endpoint, PathParams};
use crate::client::ClientInner;
use crate::models::{DocumentRef, FeatureId};
use crate::Result;

/// `Accept` value for binary exports.
pub const OCTET_STREAM_ACCEPT: &str = "application/vnd.onshape.v1+octet-stream";

/// Service for part studio elements.
///
/// Every call needs a [`DocumentRef`] pointing at the part studio.
pub struct PartStudiosService {
    inner: Arc<ClientInner>,
}

impl PartStudiosService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the feature list.
    pub async fn features(&self, doc: &DocumentRef) -> Result<Value> {
        doc.require_element("Part studio features")?;
        let request = Endpoint::GetFeatures.request(&PathParams::document(doc))?;
        self.inner.fetch_json(request).await
    }

    /// Replace one feature's definition.
    ///
    /// `feature` is the body the API expects, usually an edited copy of the
    /// entry returned by [`features`](Self::features). Only workspaces can be
    /// edited.
    pub async fn update_feature(
        &self,
        doc: &DocumentRef,
        feature_id: &FeatureId,
        feature: &Value,
    ) -> Result<Value> {
        doc.require_element("Feature update")?;
        doc.require_workspace("Feature update")?;
        let params = PathParams::document(doc).with("fid", feature_id.as_str());
        let request = Endpoint::UpdateFeature.request(&params)?.with_json(feature)?;
        self.inner.fetch_json(request).await
    }

    /// Move the rollback bar so that only the first `index` features are
    /// evaluated.
    pub async fn set_rollback_index(&self, doc: &DocumentRef, index: usize) -> Result<Value> {
        doc.require_element("Rollback")?;
        doc.require_workspace("Rollback")?;
        let request = Endpoint::SetRollbackBar
            .request(&PathParams::document(doc))?
            .with_json(&json!({ "rollbackIndex": index }))?;
        self.inner.fetch_json(request).await
    }

    /// Get mass, volume, centroid and inertia for every part.
    pub async fn mass_properties(&self, doc: &DocumentRef) -> Result<Value> {
        doc.require_element("Mass properties")?;
        let request = Endpoint::GetMassProperties.request(&PathParams::document(doc))?;
        self.inner.fetch_json(request).await
    }

    /// Get the tessellation of the edges of every part.
    pub async fn tessellated_edges(&self, doc: &DocumentRef) -> Result<Value> {
        doc.require_element("Tessellated edges")?;
        let request = Endpoint::GetTessellatedEdges.request(&PathParams::document(doc))?;
        self.inner.fetch_json(request).await
    }

    /// Export the part studio as STL and return the file bytes.
    pub async fn export_stl(&self, doc: &DocumentRef) -> Result<Vec<u8>> {
        doc.require_element("STL export")?;
        let request = Endpoint::ExportStl
            .request(&PathParams::document(doc))?
            .with_header("Accept", OCTET_STREAM_ACCEPT)?;
        self.inner.fetch_bytes(request).await
    }
}
