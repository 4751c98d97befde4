//! Part number fix example.
//!
//! Parts imported from other CAD tools often arrive with no part number and
//! with the part number as their name. This example finds such parts in a
//! document and copies the name into the part number.
//!
//! Run with:
//!   cargo run --example part_numbers -- <document-url> <prefix> [--apply]
//!
//! Without `--apply` the changes are only printed.

use onshape_rs::{DocumentRef, Error, JsonExt, OnshapeClient};
use serde_json::{json, Value};

/// A part needs a number if it has none and its name looks like one.
fn needs_part_number(part: &Value, prefix: &str) -> bool {
    let missing = part.str_field("partNumber").map_or(true, str::is_empty);
    let looks_like_number = part
        .str_field("name")
        .map_or(false, |name| name.starts_with(prefix) && name.len() > prefix.len());
    missing && looks_like_number
}

#[tokio::main]
async fn main() -> onshape_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (url, prefix) = match (args.first(), args.get(1)) {
        (Some(url), Some(prefix)) => (url, prefix),
        _ => {
            return Err(Error::InvalidInput(
                "usage: part_numbers <document-url> <prefix> [--apply]".to_string(),
            ))
        }
    };
    let apply = args.iter().any(|a| a == "--apply");

    let doc = DocumentRef::from_url(url)?;
    let client = OnshapeClient::from_env()?;

    let parts = client.parts().list(&doc).await?;
    let updates: Vec<Value> = parts
        .as_array()
        .into_iter()
        .flatten()
        .filter(|part| needs_part_number(part, prefix))
        .map(|part| {
            json!({
                "elementId": part.str_field("elementId"),
                "partId": part.str_field("partId"),
                "partNumber": part.str_field("name"),
            })
        })
        .collect();

    for update in &updates {
        println!(
            "{} / {} -> {}",
            update["elementId"], update["partId"], update["partNumber"]
        );
    }

    if updates.is_empty() {
        println!("No parts need a part number.");
    } else if apply {
        client.parts().set_metadata_bulk(&doc, &updates).await?;
        println!("Updated {} part(s).", updates.len());
    } else {
        println!("{} part(s) would change; rerun with --apply.", updates.len());
    }

    Ok(())
}
