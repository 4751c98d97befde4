//! Client configuration options.

use std::time::Duration;

/// Redirect hops followed before [`Error::Redirect`](crate::Error::Redirect)
/// is returned.
pub const DEFAULT_MAX_REDIRECTS: u32 = 3;

/// Configuration for the Onshape client.
///
/// # Example
///
/// ```
/// use onshape_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("part-renumber/1.0")
///     .with_max_redirects(0);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// How many 307 redirects to re-sign and follow
    pub max_redirects: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("onshape-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set how many redirects are followed.
    ///
    /// With `0`, every 307 surfaces as [`Error::Redirect`](crate::Error::Redirect).
    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}
