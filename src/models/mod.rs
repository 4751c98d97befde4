//! Data models for the Onshape API.
//!
//! Vendor payloads stay opaque [`serde_json::Value`]s; this module only
//! holds the types the client itself needs:
//!
//! - [`primitives`] - Identifiers, revision kinds, stacks, query parameters
//! - [`json`] - Optional-field lookups over opaque payloads

pub mod json;
pub mod primitives;

pub use json::JsonExt;
pub use primitives::*;
