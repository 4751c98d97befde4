//! Integration tests for onshape-rs
//!
//! Most tests run offline: the client sends through a scripted transport
//! that records every request and answers from a queue of responses.
//!
//! The `live_tests` module talks to the real API and is ignored by default.
//! It needs:
//! - ONSHAPE_ACCESS_KEY / ONSHAPE_SECRET_KEY: API key pair
//! - ONSHAPE_BASE_URL (optional): stack to test against, production by default
//!
//! Run with: cargo test --test api_tests -- --ignored --test-threads=1

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, LOCATION};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use onshape_rs::prelude::*;
use onshape_rs::{ApiRequest, Transport, TransportRequest, TransportResponse};

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

const BASE_URL: &str = "https://cad.onshape.com";

/// Transport answering from a script and recording what was sent.
#[derive(Default)]
struct MockTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    fn new(responses: Vec<TransportResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> onshape_rs::Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::InvalidInput("no scripted response left".to_string()))
    }
}

fn json_response(status: u16, body: Value) -> TransportResponse {
    TransportResponse {
        status,
        headers: HeaderMap::new(),
        body: serde_json::to_vec(&body).unwrap(),
    }
}

fn bytes_response(body: &[u8]) -> TransportResponse {
    TransportResponse {
        status: 200,
        headers: HeaderMap::new(),
        body: body.to_vec(),
    }
}

fn redirect(location: &str) -> TransportResponse {
    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, HeaderValue::from_str(location).unwrap());
    TransportResponse {
        status: 307,
        headers,
        body: Vec::new(),
    }
}

fn page_body(ids: &[&str], next: Option<&str>) -> Value {
    json!({
        "items": ids.iter().map(|id| json!({ "id": id, "name": format!("Doc {}", id) })).collect::<Vec<_>>(),
        "next": next,
        "previous": null,
        "href": "https://cad.onshape.com/api/documents"
    })
}

fn credentials() -> Credentials {
    Credentials::new(BASE_URL, "TESTACCESSKEY", "TESTSECRETKEY123")
}

fn client_with(transport: Arc<MockTransport>, config: ClientConfig) -> OnshapeClient {
    init_logging();
    OnshapeClient::with_transport(credentials(), config, transport)
}

fn client(transport: Arc<MockTransport>) -> OnshapeClient {
    client_with(transport, ClientConfig::default())
}

fn header<'a>(request: &'a TransportRequest, name: &str) -> &'a str {
    request
        .headers
        .get(name)
        .unwrap_or_else(|| panic!("missing header {}", name))
        .to_str()
        .unwrap()
}

/// Recompute the authorization a request should carry for a path and query.
fn expected_authorization(request: &TransportRequest, path: &str, query_string: &str) -> String {
    RequestSigner::new(&credentials())
        .sign_at(
            request.method,
            path,
            query_string,
            Some(header(request, "content-type")),
            header(request, "on-nonce"),
            header(request, "date"),
        )
        .authorization
}

// =============================================================================
// Signing Tests
// =============================================================================

mod signing_tests {
    use super::*;

    #[tokio::test]
    async fn test_request_carries_signing_headers() {
        let transport = MockTransport::new(vec![json_response(200, page_body(&["a"], None))]);
        let client = client(transport.clone());

        let query = DocumentsQuery {
            q: Some("IO".to_string()),
            filter: Some(7),
            offset: Some(0),
            ..Default::default()
        };
        client.documents().list(&query).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "https://cad.onshape.com/api/documents?filter=7&offset=0&q=IO"
        );
        assert_eq!(header(request, "content-type"), "application/json");
        assert_eq!(header(request, "on-nonce").len(), 25);
        assert!(header(request, "date").ends_with(" GMT"));
        assert_eq!(
            header(request, "authorization"),
            expected_authorization(request, "/api/documents", "filter=7&offset=0&q=IO")
        );
    }

    #[tokio::test]
    async fn test_each_call_gets_a_fresh_nonce() {
        let transport = MockTransport::new(vec![
            json_response(200, json!({})),
            json_response(200, json!({})),
        ]);
        let client = client(transport.clone());

        client.users().session_info().await.unwrap();
        client.users().session_info().await.unwrap();

        let requests = transport.requests();
        assert_ne!(
            header(&requests[0], "on-nonce"),
            header(&requests[1], "on-nonce")
        );
    }

    #[tokio::test]
    async fn test_post_body_is_sent() {
        let transport = MockTransport::new(vec![json_response(200, json!({ "id": "abc" }))]);
        let client = client(transport.clone());

        client
            .documents()
            .rename(&DocumentId::new("abc"), "Renamed")
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://cad.onshape.com/api/documents/abc");
        let body: Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, json!({ "name": "Renamed" }));
    }
}

mod header_tests {
    use super::*;

    #[tokio::test]
    async fn test_content_type_header_is_the_signed_one() {
        let transport = MockTransport::new(vec![json_response(200, json!({}))]);
        let client = client(transport.clone());

        let request = ApiRequest::new(HttpMethod::Post, "/api/documents")
            .with_json(&json!({ "name": "Bracket" }))
            .unwrap()
            .with_header("Content-Type", "text/plain")
            .unwrap();
        client.request(request).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(header(sent, "content-type"), "text/plain");
        assert_eq!(sent.headers.get_all("content-type").iter().count(), 1);
        assert_eq!(
            header(sent, "authorization"),
            expected_authorization(sent, "/api/documents", "")
        );
    }

    #[tokio::test]
    async fn test_extra_headers_cannot_replace_signing_headers() {
        let transport = MockTransport::new(vec![json_response(200, json!({}))]);
        let client = client(transport.clone());

        let mut request = ApiRequest::new(HttpMethod::Get, "/api/users/sessioninfo")
            .with_header("Accept", "application/json")
            .unwrap();
        request
            .headers
            .insert("authorization", HeaderValue::from_static("On forged"));
        request
            .headers
            .insert("content-type", HeaderValue::from_static("text/plain"));
        client.request(request).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(header(sent, "accept"), "application/json");
        assert_eq!(header(sent, "content-type"), "application/json");
        assert_eq!(
            header(sent, "authorization"),
            expected_authorization(sent, "/api/users/sessioninfo", "")
        );
    }
}

// =============================================================================
// Redirect Tests
// =============================================================================

mod redirect_tests {
    use super::*;

    #[tokio::test]
    async fn test_redirect_is_resigned_for_new_location() {
        let transport = MockTransport::new(vec![
            redirect("https://cad-usw2.onshape.com/api/documents/d/abc/workspaces?noreadonly=true&sig=1"),
            json_response(200, json!([{ "id": "w1" }])),
        ]);
        let client = client(transport.clone());

        let workspaces = client
            .documents()
            .workspaces(&DocumentId::new("abc"), true)
            .await
            .unwrap();
        assert_eq!(workspaces[0]["id"], "w1");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);

        let hop = &requests[1];
        assert_eq!(
            hop.url,
            "https://cad-usw2.onshape.com/api/documents/d/abc/workspaces?noreadonly=true&sig=1"
        );
        assert_eq!(
            header(hop, "authorization"),
            expected_authorization(hop, "/api/documents/d/abc/workspaces", "noreadonly=true&sig=1")
        );
    }

    #[tokio::test]
    async fn test_relative_redirect_keeps_host() {
        let transport = MockTransport::new(vec![
            redirect("/api/users/sessioninfo?moved=1"),
            json_response(200, json!({ "name": "Ada" })),
        ]);
        let client = client(transport.clone());

        client.users().session_info().await.unwrap();
        assert_eq!(
            transport.requests()[1].url,
            "https://cad.onshape.com/api/users/sessioninfo?moved=1"
        );
    }

    #[tokio::test]
    async fn test_redirect_budget_exhausted() {
        let transport = MockTransport::new(vec![
            redirect("https://a.onshape.com/api/teams"),
            redirect("https://b.onshape.com/api/teams"),
        ]);
        let client = client_with(transport.clone(), ClientConfig::new().with_max_redirects(1));

        let err = client.teams().list().await.unwrap_err();
        match err {
            Error::Redirect { location } => {
                assert_eq!(location, "https://b.onshape.com/api/teams")
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_relative_redirect_reports_absolute_location() {
        let transport = MockTransport::new(vec![redirect("/api/documents?x=1")]);
        let client = client_with(transport, ClientConfig::new().with_max_redirects(0));

        match client.teams().list().await.unwrap_err() {
            Error::Redirect { location } => {
                assert_eq!(location, "https://cad.onshape.com/api/documents?x=1")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_redirects_surfaces_first_307() {
        let transport = MockTransport::new(vec![redirect("https://a.onshape.com/api/teams")]);
        let client = client_with(transport.clone(), ClientConfig::new().with_max_redirects(0));

        let err = client.teams().list().await.unwrap_err();
        assert!(err.is_redirect());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_redirect_without_location() {
        let transport = MockTransport::new(vec![TransportResponse {
            status: 307,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }]);
        let client = client(transport);

        assert!(matches!(
            client.teams().list().await,
            Err(Error::InvalidResponse(_))
        ));
    }
}

// =============================================================================
// Error Handling Tests
// =============================================================================

mod error_handling_tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found() {
        let transport = MockTransport::new(vec![json_response(
            404,
            json!({ "message": "Document not found", "status": 404 }),
        )]);
        let client = client(transport);

        let err = client
            .documents()
            .get(&DocumentId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(ref m) if m == "Document not found"));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_unauthenticated() {
        let transport = MockTransport::new(vec![json_response(
            401,
            json!({ "message": "Unauthenticated API request" }),
        )]);
        let client = client(transport);

        let err = client.users().session_info().await.unwrap_err();
        assert!(err.is_auth_error());
    }

    #[tokio::test]
    async fn test_server_error_keeps_body() {
        let transport = MockTransport::new(vec![json_response(
            503,
            json!({ "message": "Service unavailable", "code": 7 }),
        )]);
        let client = client(transport);

        match client.api_docs().endpoints().await.unwrap_err() {
            Error::Api {
                status,
                message,
                body,
            } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service unavailable");
                assert_eq!(body["code"], 7);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_element_fails_before_sending() {
        let transport = MockTransport::new(vec![]);
        let client = client(transport.clone());

        let doc = DocumentRef::workspace("d1", "w1");
        let err = client.part_studios().features(&doc).await.unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let transport = MockTransport::new(vec![]);
        let client = client(transport);

        assert!(client.teams().list().await.is_err());
    }
}

// =============================================================================
// Pagination Tests
// =============================================================================

mod pagination_tests {
    use super::*;

    const PAGE_2: &str = "https://cad.onshape.com/api/documents?q=IO&offset=20&limit=20";
    const PAGE_3: &str = "https://cad.onshape.com/api/documents?q=IO&offset=40&limit=20";

    #[tokio::test]
    async fn test_stream_follows_next_links_verbatim() {
        let transport = MockTransport::new(vec![
            json_response(200, page_body(&["a", "b"], Some(PAGE_2))),
            json_response(200, page_body(&["c", "d"], Some(PAGE_3))),
            json_response(200, page_body(&["e"], None)),
        ]);
        let client = client(transport.clone());

        let pages: Vec<Page> = client
            .documents()
            .list_stream(&DocumentsQuery::search("IO"))
            .await
            .unwrap()
            .map(|page| page.unwrap())
            .collect()
            .await;

        let ids: Vec<&str> = pages
            .iter()
            .flat_map(|page| page.items.iter())
            .filter_map(|item| item.str_field("id"))
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].url, PAGE_2);
        assert_eq!(requests[2].url, PAGE_3);

        // The query is signed in the order the link gives it, not re-sorted.
        assert_eq!(
            header(&requests[1], "authorization"),
            expected_authorization(&requests[1], "/api/documents", "q=IO&offset=20&limit=20")
        );
    }

    #[tokio::test]
    async fn test_next_link_query_is_not_reencoded() {
        let next = "https://cad.onshape.com/api/documents?q=it's&offset=20";
        let transport = MockTransport::new(vec![json_response(200, page_body(&["b"], None))]);
        let client = client(transport.clone());

        let first = Page::new(vec![json!({ "id": "a" })]).with_next(next);
        let pages: Vec<_> = client.pages(first).collect().await;
        assert_eq!(pages.len(), 2);

        let sent = &transport.requests()[0];
        assert_eq!(sent.url, next);
        assert_eq!(
            header(sent, "authorization"),
            expected_authorization(sent, "/api/documents", "q=it's&offset=20")
        );
    }

    #[tokio::test]
    async fn test_first_page_needs_no_fetch() {
        let transport = MockTransport::new(vec![]);
        let client = client(transport.clone());

        let first = Page::from_value(page_body(&["only"], None)).unwrap();
        let pages: Vec<_> = client.pages(first).collect().await;

        assert_eq!(pages.len(), 1);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_relative_next_link() {
        let transport = MockTransport::new(vec![json_response(200, page_body(&["b"], None))]);
        let client = client(transport.clone());

        let first = Page::new(vec![json!({ "id": "a" })]).with_next("/api/teams?offset=20&limit=20");
        let pages: Vec<_> = client.pages(first).collect().await;

        assert_eq!(pages.len(), 2);
        assert_eq!(
            transport.requests()[0].url,
            "https://cad.onshape.com/api/teams?offset=20&limit=20"
        );
    }

    #[tokio::test]
    async fn test_empty_page_with_next_continues() {
        let transport = MockTransport::new(vec![
            json_response(200, page_body(&[], Some(PAGE_3))),
            json_response(200, page_body(&["z"], None)),
        ]);
        let client = client(transport.clone());

        let first = Page::from_value(page_body(&["a"], Some(PAGE_2))).unwrap();
        let pages: Vec<Page> = client
            .pages(first)
            .map(|page| page.unwrap())
            .collect()
            .await;

        assert_eq!(pages.len(), 3);
        assert!(pages[1].items.is_empty());
        assert_eq!(pages[2].items[0]["id"], "z");
    }

    #[tokio::test]
    async fn test_error_ends_stream() {
        let transport = MockTransport::new(vec![
            json_response(500, json!({ "message": "boom" })),
            json_response(200, page_body(&["never"], None)),
        ]);
        let client = client(transport.clone());

        let first = Page::from_value(page_body(&["a"], Some(PAGE_2))).unwrap();
        let mut stream = client.pages(first);

        assert!(stream.next().await.unwrap().is_ok());
        assert!(matches!(
            stream.next().await,
            Some(Err(Error::Api { status: 500, .. }))
        ));
        assert!(stream.next().await.is_none());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_page_without_items_is_invalid() {
        let transport = MockTransport::new(vec![json_response(200, json!({ "next": null }))]);
        let client = client(transport);

        let first = Page::new(vec![]).with_next(PAGE_2);
        let results: Vec<_> = client.pages(first).collect().await;

        assert_eq!(results.len(), 2);
        assert!(matches!(results[1], Err(Error::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_teams_stream() {
        let transport = MockTransport::new(vec![
            json_response(
                200,
                json!({ "items": [{ "id": "t1" }], "next": "https://cad.onshape.com/api/teams?offset=20" }),
            ),
            json_response(200, json!({ "items": [{ "id": "t2" }] })),
        ]);
        let client = client(transport);

        let teams: Vec<Value> = client
            .teams()
            .list_stream()
            .await
            .unwrap()
            .map(|page| page.unwrap().items)
            .concat()
            .await;

        assert_eq!(teams.len(), 2);
    }
}

// =============================================================================
// Service Tests
// =============================================================================

mod service_tests {
    use super::*;

    #[tokio::test]
    async fn test_blob_upload_signs_multipart_content_type() {
        let transport = MockTransport::new(vec![json_response(200, json!({ "id": "blob1" }))]);
        let client = client(transport.clone());

        client
            .blob_elements()
            .upload(
                &DocumentId::new("d1"),
                &WvmId::new("w1"),
                "blob.json",
                "application/json",
                b"{\"a\":1}".to_vec(),
            )
            .await
            .unwrap();

        let request = &transport.requests()[0];
        let content_type = header(request, "content-type");
        assert!(content_type.starts_with("multipart/form-data; boundary=\""));
        assert_eq!(request.url, "https://cad.onshape.com/api/blobelements/d/d1/w/w1");
        assert_eq!(
            header(request, "authorization"),
            expected_authorization(request, "/api/blobelements/d/d1/w/w1", "")
        );

        let body = String::from_utf8(request.body.clone().unwrap()).unwrap();
        assert!(body.contains("name=\"fileContentLength\"\r\n\r\n7\r\n"));
        assert!(body.contains("{\"a\":1}"));
    }

    #[tokio::test]
    async fn test_export_stl_returns_bytes() {
        let stl = b"solid part\nendsolid part\n";
        let transport = MockTransport::new(vec![bytes_response(stl)]);
        let client = client(transport.clone());

        let doc = DocumentRef::workspace("d1", "w1").with_element("e1");
        let bytes = client.part_studios().export_stl(&doc).await.unwrap();

        assert_eq!(bytes, stl.to_vec());
        let request = &transport.requests()[0];
        assert_eq!(
            request.url,
            "https://cad.onshape.com/api/partstudios/d/d1/w/w1/e/e1/stl"
        );
        assert_eq!(
            header(request, "accept"),
            "application/vnd.onshape.v1+octet-stream"
        );
    }

    #[tokio::test]
    async fn test_bom_on_version() {
        let transport = MockTransport::new(vec![json_response(200, json!({ "bomTable": {} }))]);
        let client = client(transport.clone());

        let doc = DocumentRef::revision("d1", WvmType::Version, "v1").with_element("e1");
        let query = BomQuery {
            indented: Some(true),
            ..Default::default()
        };
        client.assemblies().bom(&doc, &query).await.unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "https://cad.onshape.com/api/assemblies/d/d1/v/v1/e/e1/bom?indented=true"
        );
    }

    #[tokio::test]
    async fn test_bulk_part_metadata() {
        let transport = MockTransport::new(vec![json_response(200, Value::Null)]);
        let client = client(transport.clone());

        let doc = DocumentRef::workspace("d1", "w1");
        let payloads = vec![json!({ "elementId": "e1", "partId": "JHD", "partNumber": "PN-1" })];
        client.parts().set_metadata_bulk(&doc, &payloads).await.unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.url, "https://cad.onshape.com/api/parts/d/d1/w/w1");
        let body: Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body[0]["partNumber"], "PN-1");
    }

    #[tokio::test]
    async fn test_delete_with_empty_body() {
        let transport = MockTransport::new(vec![bytes_response(b"")]);
        let client = client(transport.clone());

        let result = client.documents().delete(&DocumentId::new("d1")).await.unwrap();
        assert!(result.is_null());
        assert_eq!(transport.requests()[0].method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_user_email_is_cached() {
        let transport = MockTransport::new(vec![
            json_response(200, json!({ "id": "u1", "email": "ada@example.com" })),
            json_response(404, json!({ "message": "No such user" })),
        ]);
        let client = client(transport.clone());
        let mut emails = LookupCache::new();

        let u1 = UserId::new("u1");
        let u2 = UserId::new("u2");
        assert_eq!(client.users().email(&u1, &mut emails).await, "ada@example.com");
        assert_eq!(client.users().email(&u1, &mut emails).await, "ada@example.com");
        assert_eq!(client.users().email(&u2, &mut emails).await, "unknown");
        assert_eq!(client.users().email(&u2, &mut emails).await, "unknown");

        assert_eq!(transport.request_count(), 2);
        assert_eq!(emails.len(), 2);
    }

    #[tokio::test]
    async fn test_application_name_is_cached() {
        let transport = MockTransport::new(vec![
            json_response(200, json!({ "clientId": "C1", "name": "Report Builder" })),
            json_response(200, json!({ "clientId": "C2" })),
        ]);
        let client = client(transport.clone());
        let mut names = LookupCache::new();

        let c1 = ClientId::new("C1");
        let c2 = ClientId::new("C2");
        assert_eq!(client.applications().name(&c1, &mut names).await, "Report Builder");
        assert_eq!(client.applications().name(&c1, &mut names).await, "Report Builder");
        assert_eq!(client.applications().name(&c2, &mut names).await, "unknown");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, "https://cad.onshape.com/api/applications/C1");
    }

    #[tokio::test]
    async fn test_companies_stream() {
        let transport = MockTransport::new(vec![
            json_response(
                200,
                json!({ "items": [{ "id": "co1" }], "next": "/api/companies?offset=1&limit=1" }),
            ),
            json_response(200, json!({ "items": [{ "id": "co2" }] })),
        ]);
        let client = client(transport.clone());

        let pages: Vec<Page> = client
            .companies()
            .list_stream()
            .await
            .unwrap()
            .map(|page| page.unwrap())
            .collect()
            .await;

        assert_eq!(pages.len(), 2);
        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://cad.onshape.com/api/companies");
        assert_eq!(
            requests[1].url,
            "https://cad.onshape.com/api/companies?offset=1&limit=1"
        );
    }

    #[tokio::test]
    async fn test_rollback_and_feature_update() {
        let transport = MockTransport::new(vec![
            json_response(200, json!({ "rollbackIndex": 3 })),
            json_response(200, json!({ "feature": {} })),
        ]);
        let client = client(transport.clone());

        let doc = DocumentRef::workspace("d1", "w1").with_element("e1");
        client.part_studios().set_rollback_index(&doc, 3).await.unwrap();
        client
            .part_studios()
            .update_feature(&doc, &FeatureId::new("F1"), &json!({ "feature": {} }))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(
            requests[0].url,
            "https://cad.onshape.com/api/partstudios/d/d1/w/w1/e/e1/features/rollback"
        );
        let body: Value = serde_json::from_slice(requests[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(body, json!({ "rollbackIndex": 3 }));
        assert_eq!(
            requests[1].url,
            "https://cad.onshape.com/api/partstudios/d/d1/w/w1/e/e1/features/featureid/F1"
        );
    }

    #[tokio::test]
    async fn test_edits_need_a_workspace() {
        let transport = MockTransport::new(vec![]);
        let client = client(transport.clone());

        let doc = DocumentRef::revision("d1", WvmType::Version, "v1").with_element("e1");
        let err = client
            .assemblies()
            .transform_occurrences(&doc, &json!({ "occurrences": [] }))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_assembly_instances_and_bounding_boxes() {
        let transport = MockTransport::new(vec![
            json_response(200, json!({ "lowX": -1.0, "highX": 1.0 })),
            json_response(200, json!({})),
            json_response(200, json!({ "bodies": {} })),
        ]);
        let client = client(transport.clone());

        let doc = DocumentRef::workspace("d1", "w1").with_element("a1");
        let bbox = client.assemblies().bounding_boxes(&doc).await.unwrap();
        assert_eq!(bbox["highX"], 1.0);

        client
            .assemblies()
            .insert_instance(&doc, &json!({ "documentId": "d1", "elementId": "p1", "partId": "JHD" }))
            .await
            .unwrap();

        let studio = DocumentRef::workspace("d1", "w1").with_element("p1");
        client.part_studios().mass_properties(&studio).await.unwrap();

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://cad.onshape.com/api/assemblies/d/d1/w/w1/e/a1/boundingboxes",
                "https://cad.onshape.com/api/assemblies/d/d1/w/w1/e/a1/instances",
                "https://cad.onshape.com/api/partstudios/d/d1/w/w1/e/p1/massproperties",
            ]
        );
    }
}

// =============================================================================
// Live Tests
// =============================================================================

mod live_tests {
    use super::*;

    fn live_client() -> OnshapeClient {
        init_logging();
        OnshapeClient::from_env().expect("ONSHAPE_ACCESS_KEY and ONSHAPE_SECRET_KEY must be set")
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_session_info() {
        let client = live_client();
        let me = client.users().session_info().await.unwrap();
        assert!(me.str_field("id").is_some());
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_list_documents_pages() {
        let client = live_client();
        let query = DocumentsQuery {
            limit: Some(5),
            ..Default::default()
        };

        let mut stream = client.documents().list_stream(&query).await.unwrap();
        let mut seen = 0;
        while let Some(page) = stream.next().await {
            seen += page.unwrap().items.len();
            if seen >= 15 {
                break;
            }
        }
        tracing::info!(seen, "Documents listed");
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_endpoints() {
        let client = live_client();
        let groups = client.api_docs().endpoints().await.unwrap();
        assert!(groups.as_array().map_or(false, |g| !g.is_empty()));
    }
}
