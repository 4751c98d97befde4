//! Description of a request before it is signed.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, DATE};
use serde::Serialize;

use crate::{Error, HttpMethod, Query, Result};

/// An unsigned API request.
///
/// The client signs it (fresh nonce and date) each time it is sent, and
/// again for every redirect hop.
///
/// # Example
///
/// ```
/// use onshape_rs::{ApiRequest, HttpMethod, Query};
///
/// let request = ApiRequest::new(HttpMethod::Get, "/api/documents")
///     .with_query(&Query::new().with("q", "bracket"));
/// assert_eq!(request.query_string, "q=bracket");
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Request method
    pub method: HttpMethod,
    /// Path below the base URL, without query string
    pub path: String,
    /// Encoded query string, without leading `?`
    pub query_string: String,
    /// Signed content type; `application/json` when `None`
    pub content_type: Option<String>,
    /// Extra headers sent alongside the signing headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Create a request with no query, headers or body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query_string: String::new(),
            content_type: None,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Set the query from parameters (sorted by key).
    pub fn with_query(mut self, query: &Query) -> Self {
        self.query_string = query.to_query_string();
        self
    }

    /// Set an already encoded query string, sent and signed verbatim.
    pub fn with_raw_query(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = query_string.into();
        self
    }

    /// Set a JSON body.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        self.content_type = None;
        Ok(self)
    }

    /// Set a raw body with its content type.
    pub fn with_body(mut self, content_type: impl Into<String>, body: Vec<u8>) -> Self {
        self.content_type = Some(content_type.into());
        self.body = Some(body);
        self
    }

    /// Add an extra header.
    ///
    /// `Content-Type` is signed, so it becomes the request's content type
    /// rather than an extra header.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if the name or value is not a valid
    /// header, or if the name is one of `Authorization`, `Date` or
    /// `On-Nonce`, which the signer owns.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::InvalidInput(format!("Invalid header name: {}", name)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::InvalidInput(format!("Invalid header value: {}", value)))?;

        if name == CONTENT_TYPE {
            let content_type = value.to_str().map_err(|_| {
                Error::InvalidInput("Content-Type must be visible ASCII".to_string())
            })?;
            self.content_type = Some(content_type.to_string());
            return Ok(self);
        }
        if is_signing_header(&name) {
            return Err(Error::InvalidInput(format!(
                "{} is set when the request is signed",
                name
            )));
        }

        self.headers.insert(name, value);
        Ok(self)
    }
}

/// Headers produced by the signer; extra headers never replace them.
pub(crate) fn is_signing_header(name: &HeaderName) -> bool {
    *name == CONTENT_TYPE || *name == AUTHORIZATION || *name == DATE || name.as_str() == "on-nonce"
}
