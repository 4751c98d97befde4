//! HTTP client and service layer for the Onshape API.
//!
//! This module provides the main entry point [`OnshapeClient`]. Requests go
//! out through a [`Transport`]; the client signs each one and re-signs it
//! when the API redirects to another host.
//!
//! # Example
//!
//! ```no_run
//! use onshape_rs::OnshapeClient;
//!
//! # async fn example() -> onshape_rs::Result<()> {
//! let client = OnshapeClient::from_profile("creds.json", "https://cad.onshape.com")?;
//!
//! let me = client.users().session_info().await?;
//! println!("Signed in as {}", me["name"]);
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;
mod request;
mod transport;

pub use config::{ClientConfig, DEFAULT_MAX_REDIRECTS};
pub use http::OnshapeClient;
pub use paginated::{BoxFuture, Page, PageStream};
pub use request::ApiRequest;
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
pub(crate) use http::ClientInner;
