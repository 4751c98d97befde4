//! Optional-field lookups over opaque JSON payloads.
//!
//! Vendor payloads are not modeled; callers read what they need through
//! these helpers instead of indexing and unwrapping.

use serde_json::Value;

/// Explicit optional-field access on [`serde_json::Value`].
///
/// # Example
///
/// ```
/// use onshape_rs::models::JsonExt;
///
/// let doc = serde_json::json!({
///     "name": "Bracket",
///     "owner": { "name": "Impossible Objects" },
///     "tags": []
/// });
/// assert_eq!(doc.str_field("name"), Some("Bracket"));
/// assert_eq!(doc.path(&["owner", "name"]).and_then(|v| v.as_str()), Some("Impossible Objects"));
/// assert!(doc.str_field("missing").is_none());
/// ```
pub trait JsonExt {
    /// A nested value reached by following object keys.
    fn path(&self, keys: &[&str]) -> Option<&Value>;

    /// A string field.
    fn str_field(&self, key: &str) -> Option<&str>;

    /// An integer field.
    fn i64_field(&self, key: &str) -> Option<i64>;

    /// A boolean field.
    fn bool_field(&self, key: &str) -> Option<bool>;

    /// An array field.
    fn array_field(&self, key: &str) -> Option<&Vec<Value>>;
}

impl JsonExt for Value {
    fn path(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().try_fold(self, |value, key| value.get(*key))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn i64_field(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    fn bool_field(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    fn array_field(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }
}
