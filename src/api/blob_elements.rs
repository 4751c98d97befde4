//! Blob elements service: file uploads.

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value;

use crate::api::{Endpoint, PathParams};
use crate::client::ClientInner;
use crate::models::{DocumentId, WvmId};
use crate::Result;

const BOUNDARY_LENGTH: usize = 8;

/// Service for blob elements.
///
/// # Example
///
/// ```no_run
/// use onshape_rs::{DocumentId, WvmId};
///
/// # async fn example(client: onshape_rs::OnshapeClient) -> onshape_rs::Result<()> {
/// let bytes = std::fs::read("blob.json")?;
/// let element = client
///     .blob_elements()
///     .upload(&DocumentId::new("d1"), &WvmId::new("w1"), "blob.json", "application/json", bytes)
///     .await?;
/// println!("New element: {}", element["id"]);
/// # Ok(())
/// # }
/// ```
pub struct BlobElementsService {
    inner: Arc<ClientInner>,
}

impl BlobElementsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Upload a file into a new blob element of a workspace.
    ///
    /// The body is sent as `multipart/form-data`; the multipart content
    /// type, boundary included, is the one that gets signed.
    pub async fn upload(
        &self,
        did: &DocumentId,
        wid: &WvmId,
        filename: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<Value> {
        let boundary = make_boundary();
        let params = PathParams::new()
            .with("did", did.as_str())
            .with("wvmid", wid.as_str());

        let request = Endpoint::UploadBlob.request(&params)?.with_body(
            multipart_content_type(&boundary),
            multipart_body(&boundary, filename, mime_type, &content),
        );
        self.inner.fetch_json(request).await
    }
}

fn make_boundary() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_LENGTH)
        .map(char::from)
        .collect()
}

fn multipart_content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary=\"{}\"", boundary)
}

/// Build the form: the file name, its length and the file itself.
fn multipart_body(boundary: &str, filename: &str, mime_type: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + 512);

    let field = |body: &mut Vec<u8>, name: &str, value: &str| {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                boundary, name, value
            )
            .as_bytes(),
        );
    };

    field(&mut body, "encodedFilename", filename);
    field(&mut body, "fileContentLength", &content.len().to_string());

    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            boundary, filename, mime_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--", boundary).as_bytes());

    body
}
