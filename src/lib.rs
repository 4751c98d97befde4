//! # onshape-rs
//!
//! A Rust client for the Onshape REST API.
//!
//! Onshape authenticates API-key requests one at a time: every call carries
//! an HMAC-SHA256 signature over its method, nonce, date, content type, path
//! and query. This crate signs requests, follows the API's cross-host
//! redirects by re-signing them, and walks paged list responses by following
//! their `next` links.
//!
//! ## Features
//!
//! - **Request signing**: [`RequestSigner`] builds the `Authorization`,
//!   `Date` and `On-Nonce` headers for any request
//! - **Paging**: [`PageStream`] lazily follows `next` links, one page at a time
//! - **Credentials**: profile files and `ONSHAPE_*` environment variables
//! - **Endpoints**: documents, assemblies, parts, part studios, blob elements,
//!   teams, companies, users, applications and the API's own endpoint listing
//! - **Opaque payloads**: responses stay [`serde_json::Value`]; [`JsonExt`]
//!   reads optional fields without unwrapping
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use onshape_rs::api::DocumentsQuery;
//! use onshape_rs::{Credentials, OnshapeClient, Stack};
//!
//! #[tokio::main]
//! async fn main() -> onshape_rs::Result<()> {
//!     let credentials = Credentials::for_stack(Stack::Production, "access-key", "secret-key");
//!     let client = OnshapeClient::new(credentials)?;
//!
//!     let mut pages = client
//!         .documents()
//!         .list_stream(&DocumentsQuery::search("bracket"))
//!         .await?;
//!
//!     while let Some(page) = pages.next().await {
//!         for doc in page?.items {
//!             println!("{}", doc["name"]);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Signing Without the Client
//!
//! ```rust
//! use onshape_rs::{Credentials, HttpMethod, Query, RequestSigner};
//!
//! let credentials = Credentials::new("https://cad.onshape.com", "access", "secret");
//! let query = Query::new().with("q", "IO").with("offset", 0);
//!
//! let headers = RequestSigner::new(&credentials)
//!     .sign(HttpMethod::Get, "/api/documents", &query, None);
//!
//! for (name, value) in headers.pairs() {
//!     println!("{}: {}", name, value);
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod cache;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{CredentialStore, Credentials, RequestSigner, SignedHeaders};
pub use cache::LookupCache;
pub use client::{
    ApiRequest, ClientConfig, OnshapeClient, Page, PageStream, ReqwestTransport, Transport,
    TransportRequest, TransportResponse,
};
pub use error::{Error, Result};
pub use models::{
    ClientId, DocumentId, DocumentRef, ElementId, FeatureId, HttpMethod, JsonExt, OwnerType,
    PartId, Query, Stack, UserId, WvmId, WvmType,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use onshape_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        AssemblyDefinitionQuery, BomQuery, DocumentsQuery, ElementsQuery, Endpoint, NewDocument,
        PathParams,
    };
    pub use crate::auth::{CredentialStore, Credentials, RequestSigner, SignedHeaders};
    pub use crate::cache::LookupCache;
    pub use crate::client::{ClientConfig, OnshapeClient, Page, PageStream};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        ClientId, DocumentId, DocumentRef, ElementId, FeatureId, HttpMethod, JsonExt, OwnerType,
        PartId, Query, Stack, UserId, WvmId, WvmType,
    };
}
