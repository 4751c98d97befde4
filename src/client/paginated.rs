//! Paginated stream for lazy iteration over API results.
//!
//! List endpoints return a page object with an `items` array and a `next`
//! link. [`PageStream`] yields the first page as given, then follows each
//! `next` link verbatim until a page has none.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// One page of a list response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    /// The items in this page.
    pub items: Vec<Value>,
    /// Link to the next page, absent or null on the last page.
    #[serde(default)]
    pub next: Option<String>,
    /// Link to the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Link to this page.
    #[serde(default)]
    pub href: Option<String>,
}

impl Page {
    /// A last page holding `items`.
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            next: None,
            previous: None,
            href: None,
        }
    }

    /// Set the `next` link.
    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Read a page out of a parsed response body.
    ///
    /// # Errors
    /// Returns [`Error::InvalidResponse`] if the body has no `items` array.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.get("items").map_or(false, Value::is_array) {
            return Err(Error::InvalidResponse(
                "paged response has no 'items' array".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Returns `true` if another page follows.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Deserialize the items into a typed vector.
    pub fn items_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.items
            .iter()
            .cloned()
            .map(|item| serde_json::from_value(item).map_err(Error::from))
            .collect()
    }
}

/// Type alias for a boxed future used internally.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type FetchPage = Box<dyn Fn(String) -> BoxFuture<'static, Result<Page>> + Send + Sync>;

/// A stream that lazily fetches the pages of a list response.
///
/// - The first page is yielded without a network call.
/// - Each following page is fetched from the previous page's `next` link,
///   one at a time, only when the consumer asks for it.
/// - A page with no `next` ends the stream, even if it is empty; an empty
///   page with a `next` link is still yielded.
/// - A failed fetch is yielded once as `Err`, then the stream ends.
///
/// Each stream owns its cursor; restarting means building a new stream.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use onshape_rs::api::DocumentsQuery;
///
/// # async fn example(client: onshape_rs::OnshapeClient) -> onshape_rs::Result<()> {
/// let first = client.documents().list(&DocumentsQuery::search("bracket")).await?;
///
/// let mut pages = client.pages(first);
/// while let Some(page) = pages.next().await {
///     for item in page?.items {
///         println!("{}", item["name"]);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct PageStream {
    /// Function to fetch a page by URL.
    fetch_page: FetchPage,
    /// Already-fetched first page, until it has been yielded.
    first_page: Option<Page>,
    /// Link to follow next, None if exhausted.
    next_url: Option<String>,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<Page>>>,
}

impl PageStream {
    /// Create a stream from an already fetched first page and a function
    /// fetching a page by its `next` link.
    pub fn new<F>(first_page: Page, fetch_page: F) -> Self
    where
        F: Fn(String) -> BoxFuture<'static, Result<Page>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            first_page: Some(first_page),
            next_url: None,
            pending_fetch: None,
        }
    }

    fn finish_page(&mut self, page: Page) -> Page {
        self.next_url = page.next.clone();
        page
    }
}

impl Stream for PageStream {
    type Item = Result<Page>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        if let Some(page) = this.first_page.take() {
            return Poll::Ready(Some(Ok(this.finish_page(page))));
        }

        loop {
            if let Some(ref mut fut) = this.pending_fetch {
                return match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        Poll::Ready(Some(Ok(this.finish_page(page))))
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next_url = None; // Stop on error
                        Poll::Ready(Some(Err(e)))
                    }
                    Poll::Pending => Poll::Pending,
                };
            }

            // No pending fetch, start one if there is a link to follow
            if let Some(url) = this.next_url.take() {
                this.pending_fetch = Some((this.fetch_page)(url));
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

impl std::fmt::Debug for PageStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageStream")
            .field("first_page_pending", &self.first_page.is_some())
            .field("next_url", &self.next_url)
            .field("fetching", &self.pending_fetch.is_some())
            .finish()
    }
}
