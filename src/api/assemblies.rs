//! Assemblies service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{Endpoint, PathParams};
use crate::client::ClientInner;
use crate::models::{DocumentId, DocumentRef, WvmId};
use crate::{Query, Result};

/// Service for assembly elements.
///
/// Payloads are returned as plain JSON.
pub struct AssembliesService {
    inner: Arc<ClientInner>,
}

/// Query parameters for an assembly definition.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyDefinitionQuery {
    /// Include mate connectors (needs `include_mate_features`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_mate_connectors: Option<bool>,
    /// Add a `features` array with the mate features
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_mate_features: Option<bool>,
    /// Include surfaces and sketches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_non_solids: Option<bool>,
    /// Document linking to this one, for access through a version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_document_id: Option<String>,
}

/// Query parameters for a bill of materials.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BomQuery {
    /// Return an indented BOM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indented: Option<bool>,
    /// Return a multi-level BOM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_level: Option<bool>,
    /// Create the BOM table if the assembly has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_if_absent: Option<bool>,
}

impl AssembliesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create an assembly element in a workspace.
    pub async fn create(&self, did: &DocumentId, wid: &WvmId, name: &str) -> Result<Value> {
        let params = PathParams::new()
            .with("did", did.as_str())
            .with("wvmid", wid.as_str());
        let request = Endpoint::CreateAssembly
            .request(&params)?
            .with_json(&json!({ "name": name }))?;
        self.inner.fetch_json(request).await
    }

    /// Get the definition of an assembly.
    ///
    /// `doc` must point at the assembly element.
    pub async fn definition(
        &self,
        doc: &DocumentRef,
        query: &AssemblyDefinitionQuery,
    ) -> Result<Value> {
        doc.require_element("Assembly definition")?;
        let request = Endpoint::GetAssemblyDefinition
            .request(&PathParams::document(doc))?
            .with_query(&Query::from_serialize(query)?);
        self.inner.fetch_json(request).await
    }

    /// Get the bill of materials of an assembly.
    pub async fn bom(&self, doc: &DocumentRef, query: &BomQuery) -> Result<Value> {
        doc.require_element("Assembly BOM")?;
        let request = Endpoint::GetAssemblyBom
            .request(&PathParams::document(doc))?
            .with_query(&Query::from_serialize(query)?);
        self.inner.fetch_json(request).await
    }

    /// Get the bounding box of the assembly.
    pub async fn bounding_boxes(&self, doc: &DocumentRef) -> Result<Value> {
        doc.require_element("Assembly bounding boxes")?;
        let request = Endpoint::GetAssemblyBoundingBoxes.request(&PathParams::document(doc))?;
        self.inner.fetch_json(request).await
    }

    /// Insert a part, part studio or sub-assembly as a new instance.
    ///
    /// `instance` names the source (`documentId`, `elementId`, and a
    /// `partId` or `isWholePartStudio`/`isAssembly` flags).
    pub async fn insert_instance(&self, doc: &DocumentRef, instance: &Value) -> Result<Value> {
        doc.require_element("Assembly instance insert")?;
        doc.require_workspace("Assembly instance insert")?;
        let request = Endpoint::CreateAssemblyInstance
            .request(&PathParams::document(doc))?
            .with_json(instance)?;
        self.inner.fetch_json(request).await
    }

    /// Apply a transform to occurrences.
    ///
    /// `transform` carries the `occurrences` paths, the 16-value
    /// `transform` matrix and `isRelative`.
    pub async fn transform_occurrences(
        &self,
        doc: &DocumentRef,
        transform: &Value,
    ) -> Result<Value> {
        doc.require_element("Occurrence transform")?;
        doc.require_workspace("Occurrence transform")?;
        let request = Endpoint::TransformOccurrences
            .request(&PathParams::document(doc))?
            .with_json(transform)?;
        self.inner.fetch_json(request).await
    }
}
