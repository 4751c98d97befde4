//! A small caller-owned cache for repeated lookups.
//!
//! Reporting tools resolve the same user or application IDs over and over.
//! [`LookupCache`] remembers each answer so the API is asked once per key.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use crate::Result;

/// Get-or-fetch-and-store cache.
///
/// The cache is owned by the caller and passed by `&mut`; nothing is shared
/// between caches.
///
/// # Example
///
/// ```no_run
/// use onshape_rs::{LookupCache, UserId};
///
/// # async fn example(client: onshape_rs::OnshapeClient) -> onshape_rs::Result<()> {
/// let mut emails = LookupCache::new();
/// let uid = UserId::new("5447a7dde4b0f9ac4d0a3fd1");
///
/// // The second call is answered from the cache.
/// let first = client.users().email(&uid, &mut emails).await;
/// let second = client.users().email(&uid, &mut emails).await;
/// assert_eq!(first, second);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LookupCache<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for LookupCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V: Clone> LookupCache<K, V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Store a value, replacing any previous one.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    /// Number of cached keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached value, or await `fetch`, store its value and
    /// return it.
    ///
    /// Errors from `fetch` are returned and nothing is stored, so the next
    /// call fetches again.
    pub async fn get_or_fetch<F, Fut>(&mut self, key: K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.entries.get(&key) {
            return Ok(value.clone());
        }

        let value = fetch().await?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Like [`get_or_fetch`](Self::get_or_fetch), but a failed fetch stores
    /// and returns `fallback`.
    pub async fn get_or_fetch_or<F, Fut>(&mut self, key: K, fetch: F, fallback: V) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.entries.get(&key) {
            return value.clone();
        }

        let value = match fetch().await {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Lookup failed, caching fallback");
                fallback
            }
        };
        self.entries.insert(key, value.clone());
        value
    }
}
