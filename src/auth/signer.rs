//! HMAC-SHA256 request signing for the Onshape API.
//!
//! Every request carries a fresh nonce and date, both of which are part of
//! the signed string, so a [`SignedHeaders`] value authorizes exactly one
//! request.

use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, DATE};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::{Error, HttpMethod, Query, Result};

type HmacSha256 = Hmac<Sha256>;

/// Content type signed when the caller does not name one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Length of the `On-Nonce` value.
pub const NONCE_LENGTH: usize = 25;

/// Header carrying the nonce.
pub const NONCE_HEADER: &str = "On-Nonce";

const NONCE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a 25-character request nonce.
pub fn make_nonce() -> String {
    let mut rng = rand::thread_rng();
    (0..NONCE_LENGTH)
        .map(|_| NONCE_ALPHABET[rng.gen_range(0..NONCE_ALPHABET.len())] as char)
        .collect()
}

/// Format a timestamp as an RFC-1123 HTTP date (`Mon, 05 Mar 2018 14:30:00 GMT`).
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Build the string the signature is computed over.
///
/// The whole string, query included, is lower-cased.
pub fn string_to_sign(
    method: HttpMethod,
    nonce: &str,
    date: &str,
    content_type: &str,
    path: &str,
    query_string: &str,
) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n",
        method.as_str(),
        nonce,
        date,
        content_type,
        path,
        query_string
    )
    .to_lowercase()
}

/// Headers authorizing a single request.
///
/// Never cache or reuse a value of this type: the server rejects a replayed
/// nonce or a stale date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Method that was signed
    pub method: HttpMethod,
    /// Path that was signed (no query string)
    pub path: String,
    /// Encoded query string that was signed, without leading `?`
    pub query_string: String,
    /// `Content-Type` header value
    pub content_type: String,
    /// `Date` header value
    pub date: String,
    /// `On-Nonce` header value
    pub nonce: String,
    /// Base64 HMAC-SHA256 signature
    pub signature: String,
    /// `Authorization` header value
    pub authorization: String,
}

impl SignedHeaders {
    /// The four signing headers as name/value pairs.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("Content-Type", self.content_type.as_str()),
            ("Date", self.date.as_str()),
            (NONCE_HEADER, self.nonce.as_str()),
            ("Authorization", self.authorization.as_str()),
        ]
    }

    /// Convert to a header map ready to attach to a request.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if the content type contains
    /// characters that are not valid in a header.
    pub fn header_map(&self) -> Result<HeaderMap> {
        let value = |v: &str| {
            HeaderValue::from_str(v)
                .map_err(|_| Error::InvalidInput(format!("Invalid header value: {}", v)))
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, value(self.content_type.as_str())?);
        headers.insert(DATE, value(self.date.as_str())?);
        headers.insert(HeaderName::from_static("on-nonce"), value(self.nonce.as_str())?);
        headers.insert(AUTHORIZATION, value(self.authorization.as_str())?);
        Ok(headers)
    }
}

/// Request signer for authenticated Onshape API calls.
///
/// # Example
///
/// ```
/// use onshape_rs::{Credentials, HttpMethod, Query, RequestSigner};
///
/// let credentials = Credentials::new("https://cad.onshape.com", "access", "secret");
/// let signer = RequestSigner::new(&credentials);
///
/// let query = Query::new().with("offset", 0);
/// let headers = signer.sign(HttpMethod::Get, "/api/documents", &query, None);
/// assert!(headers.authorization.starts_with("On access:HmacSHA256:"));
/// ```
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials.
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Sign a message and return the base64-encoded signature.
    pub fn signature(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.credentials.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");

        mac.update(message.as_bytes());
        let result = mac.finalize();
        base64::engine::general_purpose::STANDARD.encode(result.into_bytes())
    }

    /// Sign a request with a fresh nonce and the current time.
    ///
    /// `content_type` defaults to `application/json`.
    pub fn sign(
        &self,
        method: HttpMethod,
        path: &str,
        query: &Query,
        content_type: Option<&str>,
    ) -> SignedHeaders {
        self.sign_raw(method, path, &query.to_query_string(), content_type)
    }

    /// Sign a request whose query string is already encoded.
    ///
    /// Used for `next` links and redirect targets, where the query must be
    /// signed exactly as it will be sent.
    pub fn sign_raw(
        &self,
        method: HttpMethod,
        path: &str,
        query_string: &str,
        content_type: Option<&str>,
    ) -> SignedHeaders {
        let nonce = make_nonce();
        let date = http_date(Utc::now());
        self.sign_at(method, path, query_string, content_type, &nonce, &date)
    }

    /// Sign with a caller-supplied nonce and date.
    ///
    /// Deterministic: the same inputs always give the same signature.
    pub fn sign_at(
        &self,
        method: HttpMethod,
        path: &str,
        query_string: &str,
        content_type: Option<&str>,
        nonce: &str,
        date: &str,
    ) -> SignedHeaders {
        let content_type = content_type.unwrap_or(DEFAULT_CONTENT_TYPE);
        let message = string_to_sign(method, nonce, date, content_type, path, query_string);
        let signature = self.signature(&message);
        let authorization = format!(
            "On {}:HmacSHA256:{}",
            self.credentials.access_key(),
            signature
        );

        SignedHeaders {
            method,
            path: path.to_string(),
            query_string: query_string.to_string(),
            content_type: content_type.to_string(),
            date: date.to_string(),
            nonce: nonce.to_string(),
            signature,
            authorization,
        }
    }
}
