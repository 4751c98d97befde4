//! Error types for the Onshape API client.
//!
//! This module provides a single error type that covers every failure mode
//! of the client: credential loading, transport failures, vendor error
//! responses and redirects that could not be followed.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Onshape operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Onshape API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The transport could not complete the request
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// A body could not be encoded or decoded as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx response not covered by a more specific variant
    #[error("Onshape returned {status}: {message}")]
    Api {
        /// Response status
        status: u16,
        /// The body's `message`, when it has one
        message: String,
        /// Parsed body, or the raw text as a JSON string
        body: Value,
    },

    /// The API key was rejected (401/403)
    #[error("API key rejected: {0}")]
    Authentication(String),

    /// The document, element or route does not exist (404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Too many requests (429)
    #[error("rate limited, retry in {retry_after_secs}s")]
    RateLimited {
        /// Seconds from `Retry-After`, 60 when absent
        retry_after_secs: u64,
    },

    /// A 307 redirect that the client did not follow.
    ///
    /// The request must be re-signed against `location`; a signature made
    /// for the original path is not valid there.
    #[error("Redirect to {location} not followed")]
    Redirect {
        /// Target from the `Location` header
        location: String,
    },

    /// The response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The transport gave up waiting
    #[error("request timed out")]
    Timeout,

    /// An argument cannot be turned into a valid request
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A base URL, link or `Location` is not a valid URL
    #[error("bad URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Credential or client configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried by the caller.
    ///
    /// The client itself never retries.
    ///
    /// # Example
    ///
    /// ```
    /// use onshape_rs::Error;
    ///
    /// fn should_try_again(err: &Error) -> bool {
    ///     err.is_retryable() && !err.is_redirect()
    /// }
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout | Error::RateLimited { .. } => true,
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` when the API key was rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_))
    }

    /// Returns `true` if the server asked for the request to be re-signed
    /// against another location.
    pub fn is_redirect(&self) -> bool {
        matches!(self, Error::Redirect { .. })
    }

    /// Returns `true` for failures the caller has to fix: 4xx responses,
    /// bad arguments and missing credentials.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::Authentication(_)
            | Error::NotFound(_)
            | Error::InvalidInput(_)
            | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` for 5xx responses.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from a response.
    ///
    /// Onshape error bodies carry a top-level `message` field.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let message = error_message(&body).unwrap_or("Unknown API error").to_string();

        Error::Api {
            status,
            message,
            body,
        }
    }
}

/// Extract the vendor's error message from a response body.
pub(crate) fn error_message(body: &Value) -> Option<&str> {
    body.get("message").and_then(|m| m.as_str())
}
