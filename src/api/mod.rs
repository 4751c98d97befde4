//! API service modules for Onshape endpoints.
//!
//! Each service is a thin call-builder over the [`Endpoint`] table: it
//! renders the route, attaches query and body, and hands the request to the
//! client for signing.

mod api_docs;
mod applications;
mod assemblies;
mod blob_elements;
mod companies;
mod documents;
mod endpoint;
mod part_studios;
mod parts;
mod teams;
mod users;

pub use api_docs::ApiDocsService;
pub use applications::{ApplicationsService, UNKNOWN_APPLICATION};
pub use assemblies::{AssembliesService, AssemblyDefinitionQuery, BomQuery};
pub use blob_elements::BlobElementsService;
pub use companies::CompaniesService;
pub use documents::{DocumentsQuery, DocumentsService, ElementsQuery, NewDocument};
pub use endpoint::{Endpoint, PathParams};
pub use part_studios::{PartStudiosService, OCTET_STREAM_ACCEPT};
pub use parts::PartsService;
pub use teams::TeamsService;
pub use users::{UsersService, UNKNOWN_EMAIL};
