//! Primitive types and newtypes for type-safe API interactions.
//!
//! This module provides strongly-typed wrappers around the vendor's string
//! identifiers so that a document ID cannot be passed where an element ID
//! is expected.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

id_newtype!(
    /// A document ID (the `did` path segment).
    ///
    /// # Example
    ///
    /// ```
    /// use onshape_rs::DocumentId;
    ///
    /// let did = DocumentId::new("d31dbb77700b695251588ff2");
    /// println!("Document: {}", did);
    /// ```
    DocumentId
);

id_newtype!(
    /// A workspace, version or microversion ID (the `wvm` value).
    WvmId
);

id_newtype!(
    /// An element ID (part studio, assembly, blob, ...).
    ElementId
);

id_newtype!(
    /// A part ID within a part studio.
    PartId
);

id_newtype!(
    /// A user ID.
    UserId
);

id_newtype!(
    /// A feature ID within a part studio's feature list.
    FeatureId
);

id_newtype!(
    /// An OAuth application's client ID.
    ClientId
);

/// Which kind of document revision a [`WvmId`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WvmType {
    /// A mutable workspace (`w`).
    #[default]
    Workspace,
    /// An immutable named version (`v`).
    Version,
    /// A microversion (`m`).
    Microversion,
}

impl WvmType {
    /// The single-letter path segment used in API routes.
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            WvmType::Workspace => "w",
            WvmType::Version => "v",
            WvmType::Microversion => "m",
        }
    }
}

impl fmt::Display for WvmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path_segment())
    }
}

impl FromStr for WvmType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "w" | "workspace" => Ok(WvmType::Workspace),
            "v" | "version" => Ok(WvmType::Version),
            "m" | "microversion" => Ok(WvmType::Microversion),
            _ => Err(Error::InvalidInput(format!(
                "Invalid wvm type: {}. Expected w, v or m",
                s
            ))),
        }
    }
}

/// A reference to a document revision and, optionally, one of its elements.
///
/// # Example
///
/// ```
/// use onshape_rs::{DocumentRef, WvmType};
///
/// let doc = DocumentRef::from_url(
///     "https://cad.onshape.com/documents/d31dbb77700b695251588ff2/w/2c28968f83a53f9631d066fa/e/24f03732ef009163ad541a90",
/// ).unwrap();
/// assert_eq!(doc.wvm_type, WvmType::Workspace);
/// assert_eq!(doc.eid.unwrap().as_str(), "24f03732ef009163ad541a90");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentRef {
    /// Document ID
    pub did: DocumentId,
    /// Revision kind
    pub wvm_type: WvmType,
    /// Workspace, version or microversion ID
    pub wvm_id: WvmId,
    /// Element ID, when the reference points at an element
    pub eid: Option<ElementId>,
}

impl DocumentRef {
    /// Reference a workspace of a document.
    pub fn workspace(did: impl Into<DocumentId>, wid: impl Into<WvmId>) -> Self {
        Self {
            did: did.into(),
            wvm_type: WvmType::Workspace,
            wvm_id: wid.into(),
            eid: None,
        }
    }

    /// Reference a specific revision of a document.
    pub fn revision(
        did: impl Into<DocumentId>,
        wvm_type: WvmType,
        wvm_id: impl Into<WvmId>,
    ) -> Self {
        Self {
            did: did.into(),
            wvm_type,
            wvm_id: wvm_id.into(),
            eid: None,
        }
    }

    /// Point the reference at an element.
    pub fn with_element(mut self, eid: impl Into<ElementId>) -> Self {
        self.eid = Some(eid.into());
        self
    }

    /// Parse a document URL as shown in the browser.
    ///
    /// Accepts `<base>/documents/<did>/<w|v|m>/<wvmid>[/e/<eid>]`; trailing
    /// segments and query strings are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the URL does not contain a document
    /// and revision.
    pub fn from_url(document_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(document_url)?;
        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let invalid = || Error::InvalidInput(format!("Not a document URL: {}", document_url));

        let start = segments
            .iter()
            .position(|s| *s == "documents")
            .ok_or_else(invalid)?;

        let did = segments.get(start + 1).ok_or_else(invalid)?;
        let wvm_type: WvmType = segments.get(start + 2).ok_or_else(invalid)?.parse()?;
        let wvm_id = segments.get(start + 3).ok_or_else(invalid)?;

        let eid = match (segments.get(start + 4), segments.get(start + 5)) {
            (Some(&"e"), Some(eid)) => Some(ElementId::new(*eid)),
            _ => None,
        };

        Ok(Self {
            did: DocumentId::new(*did),
            wvm_type,
            wvm_id: WvmId::new(*wvm_id),
            eid,
        })
    }

    /// The element ID, or an error naming the operation that needed it.
    pub(crate) fn require_element(&self, operation: &str) -> Result<&ElementId> {
        self.eid.as_ref().ok_or_else(|| {
            Error::InvalidInput(format!("{} requires an element ID", operation))
        })
    }

    /// Fail unless this reference points at a workspace, naming the
    /// operation that needed one.
    pub(crate) fn require_workspace(&self, operation: &str) -> Result<()> {
        match self.wvm_type {
            WvmType::Workspace => Ok(()),
            other => Err(Error::InvalidInput(format!(
                "{} requires a workspace, not a {} reference",
                operation,
                other.as_path_segment()
            ))),
        }
    }
}

/// Named deployments of the Onshape API.
///
/// # Example
///
/// ```
/// use onshape_rs::Stack;
///
/// let stack = Stack::Partner;
/// println!("API URL: {}", stack.base_url());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stack {
    /// Production (`cad.onshape.com`).
    #[default]
    Production,
    /// Partner development stack.
    Partner,
}

impl Stack {
    /// Get the base URL for REST API requests.
    pub fn base_url(&self) -> &'static str {
        match self {
            Stack::Production => "https://cad.onshape.com",
            Stack::Partner => "https://partner.dev.onshape.com",
        }
    }

    /// Returns `true` if this is the production stack.
    pub fn is_production(&self) -> bool {
        matches!(self, Stack::Production)
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stack::Production => write!(f, "production"),
            Stack::Partner => write!(f, "partner"),
        }
    }
}

impl FromStr for Stack {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "production" | "prod" | "cad" => Ok(Stack::Production),
            "partner" | "dev" => Ok(Stack::Partner),
            _ => Err(Error::Config(format!(
                "invalid stack '{}', expected 'production' or 'partner'",
                s
            ))),
        }
    }
}

/// Who owns a newly created document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerType {
    /// The calling user.
    #[default]
    User,
    /// A company.
    Company,
    /// A team.
    Team,
}

impl OwnerType {
    /// The numeric code the API expects.
    pub fn code(&self) -> u8 {
        match self {
            OwnerType::User => 0,
            OwnerType::Company => 1,
            OwnerType::Team => 2,
        }
    }
}

impl Serialize for OwnerType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(Error::InvalidInput(format!("Unsupported HTTP method: {}", s))),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Query parameters, kept sorted by key.
///
/// The sorted order is what gets signed and what goes on the wire, so the
/// server re-derives the same string.
///
/// # Example
///
/// ```
/// use onshape_rs::Query;
///
/// let query = Query::new().with("q", "bracket").with("offset", 0);
/// assert_eq!(query.to_query_string(), "offset=0&q=bracket");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(BTreeMap<String, String>);

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from a serializable struct of scalar fields.
    ///
    /// `null` fields are skipped; strings are used as-is and other scalars
    /// use their JSON text (`true`, `20`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the value is not an object or a
    /// field is an array or object.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        let object = match value {
            serde_json::Value::Object(object) => object,
            serde_json::Value::Null => return Ok(Self::new()),
            other => {
                return Err(Error::InvalidInput(format!(
                    "Query must serialize to an object, got {}",
                    other
                )))
            }
        };

        let mut query = Self::new();
        for (key, value) in object {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => {
                    query.0.insert(key, s);
                }
                serde_json::Value::Bool(_) | serde_json::Value::Number(_) => {
                    query.0.insert(key, value.to_string());
                }
                _ => {
                    return Err(Error::InvalidInput(format!(
                        "Query field '{}' must be a scalar",
                        key
                    )))
                }
            }
        }
        Ok(query)
    }

    /// Insert a parameter, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Form-urlencode the parameters in key order.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (k, v) in iter {
            query.insert(k, v);
        }
        query
    }
}
