//! Documents service for listing, creating and inspecting documents.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{Endpoint, PathParams};
use crate::client::paginated::{Page, PageStream};
use crate::client::ClientInner;
use crate::models::{DocumentId, DocumentRef, OwnerType};
use crate::{Query, Result};

/// Service for document operations.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use onshape_rs::api::DocumentsQuery;
///
/// # async fn example(client: onshape_rs::OnshapeClient) -> onshape_rs::Result<()> {
/// let query = DocumentsQuery::search("bracket");
///
/// let mut pages = client.documents().list_stream(&query).await?;
/// while let Some(page) = pages.next().await {
///     for doc in page?.items {
///         println!("{} ({})", doc["name"], doc["id"]);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct DocumentsService {
    inner: Arc<ClientInner>,
}

/// Query parameters for listing documents.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsQuery {
    /// Search text matched against document names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Filter code (0 my documents, 1 created, 4 shared, 6 public, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<u32>,
    /// Owner ID, used with `owner_type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Owner kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_type: Option<OwnerType>,
    /// Column to sort by, e.g. `modifiedAt`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<String>,
    /// `asc` or `desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    /// Index of the first result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Results per page (the server caps this at 20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl DocumentsQuery {
    /// Search documents by name.
    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }
}

/// Query parameters for listing the elements of a document revision.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementsQuery {
    /// Only elements of this type, e.g. `PARTSTUDIO` or `ASSEMBLY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    /// Only the element with this ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    /// Include thumbnail info
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_thumbnails: Option<bool>,
}

/// A document to create.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    /// Document name
    pub name: String,
    /// Who owns the new document
    pub owner_type: OwnerType,
    /// Company or team ID, when not owned by the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Whether the document is public
    pub is_public: bool,
}

impl NewDocument {
    /// A private document owned by the calling user.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_type: OwnerType::User,
            owner_id: None,
            is_public: false,
        }
    }

    /// Owned by a company or team.
    pub fn owned_by(mut self, owner_type: OwnerType, owner_id: impl Into<String>) -> Self {
        self.owner_type = owner_type;
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Make the document public.
    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }
}

impl Default for NewDocument {
    fn default() -> Self {
        Self::new("Test Document")
    }
}

impl DocumentsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the first page of documents matching `query`.
    pub async fn list(&self, query: &DocumentsQuery) -> Result<Page> {
        let request = Endpoint::ListDocuments
            .request(&PathParams::new())?
            .with_query(&Query::from_serialize(query)?);
        let value: Value = self.inner.fetch_json(request).await?;
        Page::from_value(value)
    }

    /// Stream every page of documents matching `query`.
    ///
    /// The first page is fetched before this returns; later pages are
    /// fetched as the stream is polled.
    pub async fn list_stream(&self, query: &DocumentsQuery) -> Result<PageStream> {
        let first = self.list(query).await?;
        Ok(self.inner.clone().pages(first))
    }

    /// Get a document.
    pub async fn get(&self, did: &DocumentId) -> Result<Value> {
        let request = Endpoint::GetDocument.request(&PathParams::new().with("did", did.as_str()))?;
        self.inner.fetch_json(request).await
    }

    /// Create a document.
    pub async fn create(&self, document: &NewDocument) -> Result<Value> {
        let request = Endpoint::CreateDocument
            .request(&PathParams::new())?
            .with_json(document)?;
        self.inner.fetch_json(request).await
    }

    /// Rename a document.
    pub async fn rename(&self, did: &DocumentId, name: &str) -> Result<Value> {
        let request = Endpoint::UpdateDocument
            .request(&PathParams::new().with("did", did.as_str()))?
            .with_json(&json!({ "name": name }))?;
        self.inner.fetch_json(request).await
    }

    /// Delete a document (moves it to the trash).
    pub async fn delete(&self, did: &DocumentId) -> Result<Value> {
        let request =
            Endpoint::DeleteDocument.request(&PathParams::new().with("did", did.as_str()))?;
        self.inner.fetch_json(request).await
    }

    /// List the workspaces of a document.
    ///
    /// With `no_read_only`, read-only workspaces are left out.
    pub async fn workspaces(&self, did: &DocumentId, no_read_only: bool) -> Result<Value> {
        let request = Endpoint::ListWorkspaces
            .request(&PathParams::new().with("did", did.as_str()))?
            .with_query(&Query::new().with("noreadonly", no_read_only));
        self.inner.fetch_json(request).await
    }

    /// List the elements (tabs) of a document revision.
    pub async fn elements(&self, doc: &DocumentRef, query: &ElementsQuery) -> Result<Value> {
        let request = Endpoint::ListElements
            .request(&PathParams::document(doc))?
            .with_query(&Query::from_serialize(query)?);
        self.inner.fetch_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_query_serializes_camel_case() {
        let query = DocumentsQuery {
            q: Some("IO".to_string()),
            filter: Some(7),
            sort_column: Some("modifiedAt".to_string()),
            owner_type: Some(OwnerType::Team),
            offset: Some(0),
            ..Default::default()
        };

        assert_eq!(
            Query::from_serialize(&query).unwrap().to_query_string(),
            "filter=7&offset=0&ownerType=2&q=IO&sortColumn=modifiedAt"
        );
    }

    #[test]
    fn test_empty_query() {
        assert!(Query::from_serialize(&DocumentsQuery::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_new_document_body() {
        let body = serde_json::to_value(NewDocument::default()).unwrap();
        assert_eq!(
            body,
            json!({ "name": "Test Document", "ownerType": 0, "isPublic": false })
        );

        let body = serde_json::to_value(
            NewDocument::new("Fixture").owned_by(OwnerType::Company, "c1").public(),
        )
        .unwrap();
        assert_eq!(body["ownerType"], 1);
        assert_eq!(body["ownerId"], "c1");
        assert_eq!(body["isPublic"], true);
    }

    #[test]
    fn test_elements_query() {
        let query = ElementsQuery {
            element_type: Some("ASSEMBLY".to_string()),
            with_thumbnails: Some(false),
            ..Default::default()
        };
        assert_eq!(
            Query::from_serialize(&query).unwrap().to_query_string(),
            "elementType=ASSEMBLY&withThumbnails=false"
        );
    }
}
