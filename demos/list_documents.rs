//! List documents example.
//!
//! Walks every page of the caller's documents matching a search string,
//! following the API's `next` links.
//!
//! Run with: cargo run --example list_documents -- bracket
//!
//! Credentials come from `ONSHAPE_ACCESS_KEY` / `ONSHAPE_SECRET_KEY`
//! (a `.env` file works too).

use futures_util::StreamExt;
use onshape_rs::api::DocumentsQuery;
use onshape_rs::{JsonExt, OnshapeClient};

#[tokio::main]
async fn main() -> onshape_rs::Result<()> {
    // Initialize logging; RUST_LOG=onshape_rs=debug shows each signed call
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let search = std::env::args().nth(1).unwrap_or_default();
    let client = OnshapeClient::from_env()?;

    println!("Listing documents on {}...", client.credentials().base_url());

    let query = DocumentsQuery {
        q: (!search.is_empty()).then_some(search),
        sort_column: Some("modifiedAt".to_string()),
        sort_order: Some("desc".to_string()),
        ..Default::default()
    };

    let mut pages = client.documents().list_stream(&query).await?;
    let mut count = 0;

    while let Some(page) = pages.next().await {
        for doc in page?.items {
            count += 1;
            println!(
                "{:>4}. {} ({}) owned by {}",
                count,
                doc.str_field("name").unwrap_or("<unnamed>"),
                doc.str_field("id").unwrap_or("?"),
                doc.path(&["owner", "name"])
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown"),
            );
        }
    }

    println!("\n{} document(s)", count);
    Ok(())
}
