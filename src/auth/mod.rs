//! API key authentication for the Onshape REST API.
//!
//! Onshape API keys authenticate each request individually: the client
//! signs the method, a nonce, the date, the content type, the path and the
//! query with HMAC-SHA256 and sends the result in the `Authorization`
//! header.
//!
//! - [`Credentials`] hold the base URL, access key and secret key.
//! - [`CredentialStore`] loads named profiles from a JSON file.
//! - [`RequestSigner`] produces the per-request [`SignedHeaders`].
//!
//! ```
//! use onshape_rs::{Credentials, HttpMethod, Query, RequestSigner};
//!
//! let credentials = Credentials::new("https://cad.onshape.com", "access", "secret");
//! let headers = RequestSigner::new(&credentials)
//!     .sign(HttpMethod::Get, "/api/documents", &Query::new(), None);
//!
//! assert_eq!(headers.nonce.len(), 25);
//! ```

mod credentials;
mod signer;

pub use credentials::{
    CredentialStore, Credentials, CREDENTIALS_FILE_ENV, DEFAULT_CREDENTIALS_FILE,
};
pub use signer::{
    http_date, make_nonce, string_to_sign, RequestSigner, SignedHeaders, DEFAULT_CONTENT_TYPE,
    NONCE_HEADER, NONCE_LENGTH,
};
