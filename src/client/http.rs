//! HTTP client implementation for the Onshape API.

use std::path::Path;
use std::sync::Arc;

use reqwest::header::LOCATION;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::api::{
    ApiDocsService, ApplicationsService, AssembliesService, BlobElementsService,
    CompaniesService, DocumentsService, PartStudiosService, PartsService, TeamsService,
    UsersService,
};
use crate::auth::{CredentialStore, Credentials, RequestSigner};
use crate::error::error_message;
use crate::{Error, HttpMethod, Query, Result};

use super::config::ClientConfig;
use super::paginated::{BoxFuture, Page, PageStream};
use super::request::{is_signing_header, ApiRequest};
use super::transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

/// HTTP status the API uses to send a request to another host.
const TEMPORARY_REDIRECT: u16 = 307;

/// The main client for interacting with the Onshape API.
///
/// This client provides access to the API services through method calls
/// that return service structs. Every request is signed with the client's
/// API key just before it is sent.
///
/// # Example
///
/// ```no_run
/// use onshape_rs::api::DocumentsQuery;
/// use onshape_rs::{OnshapeClient, Credentials, Stack};
///
/// # async fn example() -> onshape_rs::Result<()> {
/// let credentials = Credentials::for_stack(Stack::Production, "access-key", "secret-key");
/// let client = OnshapeClient::new(credentials)?;
///
/// // First page of matching documents
/// let page = client.documents().list(&DocumentsQuery::search("bracket")).await?;
/// println!("{} documents on the first page", page.items.len());
/// # Ok(())
/// # }
/// ```
pub struct OnshapeClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) credentials: Credentials,
    pub(crate) config: ClientConfig,
}

impl OnshapeClient {
    /// Create a client with the default configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with a custom configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(credentials, config, Arc::new(transport)))
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(
        credentials: Credentials,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                credentials,
                config,
            }),
        }
    }

    /// Create a client from a named profile in a credential file.
    ///
    /// # Errors
    /// Returns [`Error::Io`] or [`Error::Config`] if the file cannot be read
    /// or has no such profile.
    pub fn from_profile(path: impl AsRef<Path>, profile: &str) -> Result<Self> {
        let credentials = CredentialStore::from_file(path)?.profile(profile)?;
        Self::new(credentials)
    }

    /// Create a client from `ONSHAPE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::from_env()?)
    }

    /// Get the documents service.
    pub fn documents(&self) -> DocumentsService {
        DocumentsService::new(self.inner.clone())
    }

    /// Get the assemblies service.
    pub fn assemblies(&self) -> AssembliesService {
        AssembliesService::new(self.inner.clone())
    }

    /// Get the parts service.
    pub fn parts(&self) -> PartsService {
        PartsService::new(self.inner.clone())
    }

    /// Get the part studios service.
    pub fn part_studios(&self) -> PartStudiosService {
        PartStudiosService::new(self.inner.clone())
    }

    /// Get the blob elements service.
    pub fn blob_elements(&self) -> BlobElementsService {
        BlobElementsService::new(self.inner.clone())
    }

    /// Get the teams service.
    pub fn teams(&self) -> TeamsService {
        TeamsService::new(self.inner.clone())
    }

    /// Get the companies service.
    pub fn companies(&self) -> CompaniesService {
        CompaniesService::new(self.inner.clone())
    }

    /// Get the users service.
    pub fn users(&self) -> UsersService {
        UsersService::new(self.inner.clone())
    }

    /// Get the OAuth applications service.
    pub fn applications(&self) -> ApplicationsService {
        ApplicationsService::new(self.inner.clone())
    }

    /// Get the API documentation service.
    pub fn api_docs(&self) -> ApiDocsService {
        ApiDocsService::new(self.inner.clone())
    }

    /// Stream the pages of a list response, starting from its first page.
    ///
    /// The first page is yielded as-is; later pages are fetched by following
    /// `next` links with freshly signed GETs.
    pub fn pages(&self, first_page: Page) -> PageStream {
        self.inner.clone().pages(first_page)
    }

    /// Fetch one page by its link (absolute, or relative to the base URL).
    pub async fn get_page(&self, link: &str) -> Result<Page> {
        self.inner.get_page(link).await
    }

    /// Send an arbitrary request and return the raw response.
    ///
    /// The request is signed and redirects are followed, but the status is
    /// not checked.
    pub async fn request(&self, request: ApiRequest) -> Result<TransportResponse> {
        self.inner.execute(request).await
    }

    /// GET a path and parse the JSON body.
    pub async fn get_json(&self, path: &str, query: &Query) -> Result<Value> {
        self.inner.get(path, query).await
    }

    /// The credentials this client signs with.
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// Send a request against the credentials' base URL.
    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<TransportResponse> {
        let base_url = self.credentials.base_url().to_string();
        self.execute_at(base_url, request).await
    }

    /// Sign and send a request, re-signing it for each 307 hop.
    pub(crate) async fn execute_at(
        &self,
        base_url: String,
        request: ApiRequest,
    ) -> Result<TransportResponse> {
        let mut base_url = base_url;
        let mut path = request.path.clone();
        let mut query_string = request.query_string.clone();
        let mut redirects = 0;

        loop {
            let signed = RequestSigner::new(&self.credentials).sign_raw(
                request.method,
                &path,
                &query_string,
                request.content_type.as_deref(),
            );

            let mut headers = signed.header_map()?;
            for (name, value) in request.headers.iter() {
                if !is_signing_header(name) {
                    headers.append(name.clone(), value.clone());
                }
            }

            let url = build_url(&base_url, &path, &query_string);
            tracing::debug!(method = %request.method, url = %url, "Call onshape");

            let response = self
                .transport
                .send(TransportRequest {
                    method: request.method,
                    url: url.clone(),
                    headers,
                    body: request.body.clone(),
                })
                .await?;

            tracing::debug!(status = response.status, "Response status");

            if response.status != TEMPORARY_REDIRECT {
                return Ok(response);
            }

            let location = response
                .header(LOCATION.as_str())
                .ok_or_else(|| {
                    Error::InvalidResponse("307 response without Location header".to_string())
                })?
                .to_string();

            let target = Url::parse(&url)?.join(&location)?;
            if redirects >= self.config.max_redirects {
                return Err(Error::Redirect {
                    location: target.to_string(),
                });
            }
            redirects += 1;

            tracing::info!(location = %target, hop = redirects, "Re-signing redirected request");

            base_url = target.origin().ascii_serialization();
            path = target.path().to_string();
            query_string = target.query().unwrap_or_default().to_string();
        }
    }

    /// Make a GET request and parse the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T> {
        let request = ApiRequest::new(HttpMethod::Get, path).with_query(query);
        let response = self.execute(request).await?;
        parse_json(response)
    }

    /// Send a request and return the body bytes of a successful response.
    pub(crate) async fn fetch_bytes(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let response = self.execute(request).await?;
        Ok(check_status(response)?.body)
    }

    /// Send a request and parse the JSON body of a successful response.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.execute(request).await?;
        parse_json(response)
    }

    /// Fetch the page a `next` link points at.
    ///
    /// The link is followed verbatim: its path and query string are signed
    /// and sent exactly as given.
    pub(crate) async fn get_page(&self, link: &str) -> Result<Page> {
        let (base_url, path, query_string) = split_link(self.credentials.base_url(), link)?;
        let request = ApiRequest::new(HttpMethod::Get, path).with_raw_query(query_string);

        let response = self.execute_at(base_url, request).await?;
        let value: Value = parse_json(response)?;
        Page::from_value(value)
    }

    /// Build a page stream whose fetches go through this client.
    pub(crate) fn pages(self: Arc<Self>, first_page: Page) -> PageStream {
        PageStream::new(first_page, move |link: String| {
            let inner = self.clone();
            let fetch: BoxFuture<'static, Result<Page>> =
                Box::pin(async move { inner.get_page(&link).await });
            fetch
        })
    }
}

/// Join a base URL, path and encoded query string.
pub(crate) fn build_url(base_url: &str, path: &str, query_string: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    if query_string.is_empty() {
        format!("{}{}", base_url, path)
    } else {
        format!("{}{}?{}", base_url, path, query_string)
    }
}

/// Split a `next` link into base URL, path and query string.
///
/// Absolute and root-relative links keep their path and query text as
/// given. Any other relative link is resolved against `base_url`.
pub(crate) fn split_link(base_url: &str, link: &str) -> Result<(String, String, String)> {
    let link = link.split('#').next().unwrap_or_default();

    let scheme_end = link.find("://").filter(|&i| {
        i > 0
            && link[..i]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    });

    let (origin, rest) = if let Some(scheme_end) = scheme_end {
        let origin = Url::parse(link)?.origin().ascii_serialization();
        let authority_start = scheme_end + 3;
        let path_start = link[authority_start..]
            .find(['/', '?'])
            .map_or(link.len(), |i| authority_start + i);
        (origin, &link[path_start..])
    } else if link.starts_with('/') && !link.starts_with("//") {
        (Url::parse(base_url)?.origin().ascii_serialization(), link)
    } else {
        let target = Url::parse(base_url)?.join(link)?;
        return Ok((
            target.origin().ascii_serialization(),
            target.path().to_string(),
            target.query().unwrap_or_default().to_string(),
        ));
    };

    let (path, query_string) = rest.split_once('?').unwrap_or((rest, ""));
    let path = if path.is_empty() { "/" } else { path };
    Ok((origin, path.to_string(), query_string.to_string()))
}

/// Map a non-2xx response to an error.
pub(crate) fn check_status(response: TransportResponse) -> Result<TransportResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let status = response.status;
    let body: Value =
        serde_json::from_slice(&response.body).unwrap_or_else(|_| Value::String(response.text()));
    match status {
        429 => {
            let retry_after_secs = response
                .header("retry-after")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(60);
            Err(Error::RateLimited { retry_after_secs })
        }
        401 | 403 => Err(Error::Authentication(message_or(&body, "API key rejected"))),
        404 => Err(Error::NotFound(message_or(&body, "Resource not found"))),
        _ => Err(Error::from_api_response(status, body)),
    }
}

fn message_or(body: &Value, fallback: &str) -> String {
    error_message(body).unwrap_or(fallback).to_string()
}

/// Check the status and parse the JSON body; an empty body parses as `null`.
pub(crate) fn parse_json<T: DeserializeOwned>(response: TransportResponse) -> Result<T> {
    let response = check_status(response)?;

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(Value::Null)?);
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        tracing::warn!(body = %response.text(), error = %e, "Failed to parse response");
        Error::Json(e)
    })
}

impl Clone for OnshapeClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for OnshapeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnshapeClient")
            .field("credentials", &self.inner.credentials)
            .field("config", &self.inner.config)
            .finish()
    }
}
