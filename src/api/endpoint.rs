//! The table of API routes the services are built from.

use std::fmt;

use crate::client::ApiRequest;
use crate::models::DocumentRef;
use crate::{Error, HttpMethod, Result};

/// A named API route with its method and path template.
///
/// # Example
///
/// ```
/// use onshape_rs::api::{Endpoint, PathParams};
///
/// let path = Endpoint::GetDocument
///     .path(&PathParams::new().with("did", "d31dbb77700b695251588ff2"))
///     .unwrap();
/// assert_eq!(path, "/api/documents/d31dbb77700b695251588ff2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// List documents
    ListDocuments,
    /// Create a document
    CreateDocument,
    /// Get a document
    GetDocument,
    /// Update document attributes
    UpdateDocument,
    /// Delete a document
    DeleteDocument,
    /// List the workspaces of a document
    ListWorkspaces,
    /// List the elements of a document revision
    ListElements,
    /// Create an assembly element
    CreateAssembly,
    /// Get an assembly definition
    GetAssemblyDefinition,
    /// Get the bill of materials of an assembly
    GetAssemblyBom,
    /// Get the bounding boxes of an assembly
    GetAssemblyBoundingBoxes,
    /// Insert an instance into an assembly
    CreateAssemblyInstance,
    /// Move assembly occurrences
    TransformOccurrences,
    /// List the parts of a document revision
    ListParts,
    /// Set metadata on many parts
    SetPartsMetadata,
    /// Set metadata on one part
    SetPartMetadata,
    /// Get the feature list of a part studio
    GetFeatures,
    /// Update one feature of a part studio
    UpdateFeature,
    /// Move the rollback bar of a part studio
    SetRollbackBar,
    /// Get the mass properties of a part studio
    GetMassProperties,
    /// Get the tessellated edges of a part studio
    GetTessellatedEdges,
    /// Export a part studio as STL
    ExportStl,
    /// Upload a file into a new blob element
    UploadBlob,
    /// List the caller's teams
    ListTeams,
    /// List the caller's companies
    ListCompanies,
    /// Get a user
    GetUser,
    /// Get the session user
    GetSessionInfo,
    /// Get an OAuth application
    GetApplication,
    /// List the documented API endpoints
    GetEndpoints,
}

impl Endpoint {
    /// Every endpoint, in table order.
    pub const ALL: [Endpoint; 29] = [
        Endpoint::ListDocuments,
        Endpoint::CreateDocument,
        Endpoint::GetDocument,
        Endpoint::UpdateDocument,
        Endpoint::DeleteDocument,
        Endpoint::ListWorkspaces,
        Endpoint::ListElements,
        Endpoint::CreateAssembly,
        Endpoint::GetAssemblyDefinition,
        Endpoint::GetAssemblyBom,
        Endpoint::GetAssemblyBoundingBoxes,
        Endpoint::CreateAssemblyInstance,
        Endpoint::TransformOccurrences,
        Endpoint::ListParts,
        Endpoint::SetPartsMetadata,
        Endpoint::SetPartMetadata,
        Endpoint::GetFeatures,
        Endpoint::UpdateFeature,
        Endpoint::SetRollbackBar,
        Endpoint::GetMassProperties,
        Endpoint::GetTessellatedEdges,
        Endpoint::ExportStl,
        Endpoint::UploadBlob,
        Endpoint::ListTeams,
        Endpoint::ListCompanies,
        Endpoint::GetUser,
        Endpoint::GetSessionInfo,
        Endpoint::GetApplication,
        Endpoint::GetEndpoints,
    ];

    /// The endpoint's name.
    pub fn name(&self) -> &'static str {
        self.route().0
    }

    /// The HTTP method.
    pub fn method(&self) -> HttpMethod {
        self.route().1
    }

    /// The path template, with `{placeholder}` segments.
    pub fn template(&self) -> &'static str {
        self.route().2
    }

    fn route(&self) -> (&'static str, HttpMethod, &'static str) {
        use HttpMethod::*;

        match self {
            Endpoint::ListDocuments => ("ListDocuments", Get, "/api/documents"),
            Endpoint::CreateDocument => ("CreateDocument", Post, "/api/documents"),
            Endpoint::GetDocument => ("GetDocument", Get, "/api/documents/{did}"),
            Endpoint::UpdateDocument => ("UpdateDocument", Post, "/api/documents/{did}"),
            Endpoint::DeleteDocument => ("DeleteDocument", Delete, "/api/documents/{did}"),
            Endpoint::ListWorkspaces => {
                ("ListWorkspaces", Get, "/api/documents/d/{did}/workspaces")
            }
            Endpoint::ListElements => (
                "ListElements",
                Get,
                "/api/documents/d/{did}/{wvm}/{wvmid}/elements",
            ),
            Endpoint::CreateAssembly => {
                ("CreateAssembly", Post, "/api/assemblies/d/{did}/w/{wvmid}")
            }
            Endpoint::GetAssemblyDefinition => (
                "GetAssemblyDefinition",
                Get,
                "/api/assemblies/d/{did}/{wvm}/{wvmid}/e/{eid}",
            ),
            Endpoint::GetAssemblyBom => (
                "GetAssemblyBom",
                Get,
                "/api/assemblies/d/{did}/{wvm}/{wvmid}/e/{eid}/bom",
            ),
            Endpoint::GetAssemblyBoundingBoxes => (
                "GetAssemblyBoundingBoxes",
                Get,
                "/api/assemblies/d/{did}/{wvm}/{wvmid}/e/{eid}/boundingboxes",
            ),
            Endpoint::CreateAssemblyInstance => (
                "CreateAssemblyInstance",
                Post,
                "/api/assemblies/d/{did}/w/{wvmid}/e/{eid}/instances",
            ),
            Endpoint::TransformOccurrences => (
                "TransformOccurrences",
                Post,
                "/api/assemblies/d/{did}/w/{wvmid}/e/{eid}/occurrencetransforms",
            ),
            Endpoint::ListParts => ("ListParts", Get, "/api/parts/d/{did}/{wvm}/{wvmid}"),
            Endpoint::SetPartsMetadata => {
                ("SetPartsMetadata", Post, "/api/parts/d/{did}/{wvm}/{wvmid}")
            }
            Endpoint::SetPartMetadata => (
                "SetPartMetadata",
                Post,
                "/api/parts/d/{did}/{wvm}/{wvmid}/e/{eid}/partid/{partid}/metadata",
            ),
            Endpoint::GetFeatures => (
                "GetFeatures",
                Get,
                "/api/partstudios/d/{did}/{wvm}/{wvmid}/e/{eid}/features",
            ),
            Endpoint::UpdateFeature => (
                "UpdateFeature",
                Post,
                "/api/partstudios/d/{did}/w/{wvmid}/e/{eid}/features/featureid/{fid}",
            ),
            Endpoint::SetRollbackBar => (
                "SetRollbackBar",
                Post,
                "/api/partstudios/d/{did}/w/{wvmid}/e/{eid}/features/rollback",
            ),
            Endpoint::GetMassProperties => (
                "GetMassProperties",
                Get,
                "/api/partstudios/d/{did}/{wvm}/{wvmid}/e/{eid}/massproperties",
            ),
            Endpoint::GetTessellatedEdges => (
                "GetTessellatedEdges",
                Get,
                "/api/partstudios/d/{did}/{wvm}/{wvmid}/e/{eid}/tessellatededges",
            ),
            Endpoint::ExportStl => (
                "ExportStl",
                Get,
                "/api/partstudios/d/{did}/{wvm}/{wvmid}/e/{eid}/stl",
            ),
            Endpoint::UploadBlob => ("UploadBlob", Post, "/api/blobelements/d/{did}/w/{wvmid}"),
            Endpoint::ListTeams => ("ListTeams", Get, "/api/teams"),
            Endpoint::ListCompanies => ("ListCompanies", Get, "/api/companies"),
            Endpoint::GetUser => ("GetUser", Get, "/api/users/{uid}"),
            Endpoint::GetSessionInfo => ("GetSessionInfo", Get, "/api/users/sessioninfo"),
            Endpoint::GetApplication => ("GetApplication", Get, "/api/applications/{cid}"),
            Endpoint::GetEndpoints => ("GetEndpoints", Get, "/api/endpoints"),
        }
    }

    /// Render the path, percent-encoding each placeholder value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the template names a placeholder
    /// that `params` does not supply.
    pub fn path(&self, params: &PathParams<'_>) -> Result<String> {
        let template = self.template();
        let mut path = String::with_capacity(template.len() + 64);
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            path.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                Error::InvalidInput(format!("Unclosed placeholder in {}", template))
            })?;
            let name = &after[..close];

            let value = params.get(name).ok_or_else(|| {
                Error::InvalidInput(format!("{} is missing path parameter '{}'", self, name))
            })?;
            path.push_str(&urlencoding::encode(value));

            rest = &after[close + 1..];
        }
        path.push_str(rest);

        Ok(path)
    }

    /// An unsigned request for this endpoint.
    pub fn request(&self, params: &PathParams<'_>) -> Result<ApiRequest> {
        Ok(ApiRequest::new(self.method(), self.path(params)?))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Values for the placeholders of an endpoint template.
#[derive(Debug, Clone, Default)]
pub struct PathParams<'a> {
    values: Vec<(&'static str, &'a str)>,
}

impl<'a> PathParams<'a> {
    /// No values.
    pub fn new() -> Self {
        Self::default()
    }

    /// The `did`, `wvm` and `wvmid` values of a document reference, plus
    /// `eid` when it points at an element.
    pub fn document(doc: &'a DocumentRef) -> Self {
        let params = Self::new()
            .with("did", doc.did.as_str())
            .with("wvm", doc.wvm_type.as_path_segment())
            .with("wvmid", doc.wvm_id.as_str());

        match &doc.eid {
            Some(eid) => params.with("eid", eid.as_str()),
            None => params,
        }
    }

    /// Set a placeholder value, replacing an earlier one.
    pub fn with(mut self, name: &'static str, value: &'a str) -> Self {
        self.values.retain(|(n, _)| *n != name);
        self.values.push((name, value));
        self
    }

    /// The value for `name`.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }
}
