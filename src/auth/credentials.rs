//! API key credentials and the profile file they are loaded from.
//!
//! Uses the `secrecy` crate to prevent accidental logging of secret keys
//! and ensures memory is zeroed on drop.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{Error, Result, Stack};

/// Environment variable naming the credential file.
pub const CREDENTIALS_FILE_ENV: &str = "ONSHAPE_CREDENTIALS";

/// Credential file used when [`CREDENTIALS_FILE_ENV`] is not set.
pub const DEFAULT_CREDENTIALS_FILE: &str = "./creds.json";

/// API key credentials for one stack.
///
/// The secret key is wrapped in `SecretString` which:
/// - Prevents accidental Debug/Display printing
/// - Zeros memory on drop via zeroize
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    access_key: String,
    secret_key: SecretString,
}

impl Credentials {
    /// Create credentials from explicit values.
    ///
    /// A trailing `/` on the base URL is dropped.
    pub fn new(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Create credentials for a named stack.
    pub fn for_stack(
        stack: Stack,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self::new(stack.base_url(), access_key, secret_key)
    }

    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `ONSHAPE_BASE_URL` - Stack base URL (defaults to production)
    /// - `ONSHAPE_ACCESS_KEY` - The access key (public)
    /// - `ONSHAPE_SECRET_KEY` - The secret key (private)
    ///
    /// # Errors
    /// Returns [`Error::Config`] if either key variable is not set.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let base_url = std::env::var("ONSHAPE_BASE_URL")
            .unwrap_or_else(|_| Stack::default().base_url().to_string());

        let access_key = std::env::var("ONSHAPE_ACCESS_KEY")
            .map_err(|_| Error::Config("Missing environment variable: ONSHAPE_ACCESS_KEY".into()))?;

        let secret_key = std::env::var("ONSHAPE_SECRET_KEY")
            .map_err(|_| Error::Config("Missing environment variable: ONSHAPE_SECRET_KEY".into()))?;

        Ok(Self::new(base_url, access_key, secret_key))
    }

    /// Base URL of the stack these credentials belong to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the access key (public, safe to log).
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Expose the secret key for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// One entry of the credential file.
///
/// Both spellings seen in the wild are accepted: camelCase entries carry
/// their own `baseUrl`, snake_case entries are keyed by the base URL.
#[derive(Deserialize)]
struct ProfileEntry {
    #[serde(rename = "baseUrl", alias = "base_url", default)]
    base_url: Option<String>,
    #[serde(rename = "accessKey", alias = "access_key")]
    access_key: String,
    #[serde(rename = "secretKey", alias = "secret_key")]
    secret_key: String,
}

/// A set of named credential profiles loaded from a JSON file.
///
/// The file maps a profile name to its credentials:
///
/// ```json
/// {
///     "onshape_partner": {
///         "baseUrl": "https://partner.dev.onshape.com",
///         "accessKey": "API-KEY",
///         "secretKey": "API-KEY-SECRET"
///     },
///     "https://cad.onshape.com": {
///         "access_key": "API-KEY",
///         "secret_key": "API-KEY-SECRET"
///     }
/// }
/// ```
///
/// An entry without `baseUrl` uses its profile name as the base URL.
///
/// # Example
///
/// ```no_run
/// use onshape_rs::CredentialStore;
///
/// # fn example() -> onshape_rs::Result<()> {
/// let store = CredentialStore::from_file("creds.json")?;
/// let credentials = store.profile("onshape_partner")?;
/// println!("Using {}", credentials.base_url());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    profiles: HashMap<String, Credentials>,
}

impl CredentialStore {
    /// Load profiles from a JSON file.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not a valid credential file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load profiles from the file named by `ONSHAPE_CREDENTIALS`, falling
    /// back to `./creds.json`.
    pub fn from_default_location() -> Result<Self> {
        Self::from_file(Self::default_path())
    }

    /// The credential file location used by
    /// [`from_default_location`](Self::from_default_location).
    pub fn default_path() -> PathBuf {
        std::env::var_os(CREDENTIALS_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_FILE))
    }

    /// Parse profiles from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, ProfileEntry> = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid credential file: {}", e)))?;

        let profiles = entries
            .into_iter()
            .map(|(name, entry)| {
                let base_url = entry.base_url.unwrap_or_else(|| name.clone());
                let credentials = Credentials::new(base_url, entry.access_key, entry.secret_key);
                (name, credentials)
            })
            .collect();

        Ok(Self { profiles })
    }

    /// Add or replace a profile.
    pub fn insert(&mut self, name: impl Into<String>, credentials: Credentials) {
        self.profiles.insert(name.into(), credentials);
    }

    /// Get the credentials of a profile.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if no such profile exists.
    pub fn profile(&self, name: &str) -> Result<Credentials> {
        self.profiles
            .get(name)
            .cloned()
            .ok_or_else(|| Error::Config(format!("No credentials found for profile '{}'", name)))
    }

    /// Names of all profiles, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if the store has no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
