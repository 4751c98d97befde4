//! API endpoint listing example.
//!
//! Prints every documented endpoint group with its endpoints.
//!
//! Run with: cargo run --example get_endpoints

use onshape_rs::{JsonExt, OnshapeClient};

#[tokio::main]
async fn main() -> onshape_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let client = OnshapeClient::from_env()?;
    let groups = client.api_docs().endpoints().await?;

    for group in groups.as_array().into_iter().flatten() {
        let endpoints = group.array_field("endpoints").map(Vec::as_slice).unwrap_or(&[]);
        println!(
            "{} ({} endpoints)",
            group.str_field("groupTitle").unwrap_or("?"),
            endpoints.len()
        );

        for endpoint in endpoints {
            println!(
                "    {:<7} {:<60} {}",
                endpoint.str_field("type").unwrap_or("?").to_uppercase(),
                endpoint.str_field("url").unwrap_or("?"),
                endpoint.str_field("title").unwrap_or(""),
            );
        }
    }

    Ok(())
}
