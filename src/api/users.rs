//! Users service.

use std::sync::Arc;

use serde_json::Value;

use crate::api::{Endpoint, PathParams};
use crate::cache::LookupCache;
use crate::client::ClientInner;
use crate::models::{JsonExt, UserId};
use crate::{Error, Result};

/// Recorded for users whose email cannot be looked up.
pub const UNKNOWN_EMAIL: &str = "unknown";

/// Service for user information.
pub struct UsersService {
    inner: Arc<ClientInner>,
}

impl UsersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get a user.
    pub async fn get(&self, uid: &UserId) -> Result<Value> {
        let request = Endpoint::GetUser.request(&PathParams::new().with("uid", uid.as_str()))?;
        self.inner.fetch_json(request).await
    }

    /// Get the user the API key belongs to.
    pub async fn session_info(&self) -> Result<Value> {
        let request = Endpoint::GetSessionInfo.request(&PathParams::new())?;
        self.inner.fetch_json(request).await
    }

    /// Look up a user's email address through `cache`.
    ///
    /// Each user is fetched at most once per cache. A failed lookup, or a
    /// user without an email, is cached as [`UNKNOWN_EMAIL`].
    pub async fn email(&self, uid: &UserId, cache: &mut LookupCache<UserId, String>) -> String {
        cache
            .get_or_fetch_or(
                uid.clone(),
                move || async move {
                    let user = self.get(uid).await?;
                    user.str_field("email")
                        .map(str::to_string)
                        .ok_or_else(|| Error::InvalidResponse("user has no email".to_string()))
                },
                UNKNOWN_EMAIL.to_string(),
            )
            .await
    }
}
