//! The response-store capability and its stored value type.
//!
//! The storage engine itself — disk layout, quota bookkeeping, eviction —
//! is out of scope for this crate; it is reduced to [`ResponseStore`], the
//! `get`/`put` capability the cache stage consumes.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{HeaderMap, StatusCode};
use std::time::Duration;

use crate::directives::DirectiveSet;
use crate::error::StoreError;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A cached HTTP response with the timestamp it was stored at.
///
/// Freshness is judged against the entry's own `Cache-Control` header,
/// which the freshness clamp has already bounded before the entry became
/// eligible for storage.
#[derive(Clone, Debug)]
pub struct StoredResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    stored_at: DateTime<Utc>,
}

impl StoredResponse {
    /// Creates an entry stored as of now.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        StoredResponse {
            status,
            headers,
            body,
            stored_at: Utc::now(),
        }
    }

    /// Creates an entry with an explicit storage timestamp.
    pub fn with_stored_at(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        stored_at: DateTime<Utc>,
    ) -> Self {
        StoredResponse {
            status,
            headers,
            body,
            stored_at,
        }
    }

    /// Returns the response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the entry into status, headers, and body.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }

    /// Returns the time elapsed since the entry was stored.
    pub fn age(&self) -> Duration {
        (Utc::now() - self.stored_at).to_std().unwrap_or_default()
    }

    /// Returns whether the entry is still within its declared freshness
    /// window.
    ///
    /// An entry without a declared `max-age` is never fresh, and an entry
    /// whose age equals its lifetime has already expired.
    pub fn is_fresh(&self) -> bool {
        match DirectiveSet::from_headers(&self.headers).max_age() {
            Some(max_age) => self.age() < max_age,
            None => false,
        }
    }

    /// Returns the entry's weight for quota accounting, in bytes.
    pub fn weight(&self) -> usize {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| name.as_str().len() + value.len())
            .sum::<usize>();
        self.body.len() + headers
    }
}

/// Capability provided by the response cache engine.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Looks up the entry stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<StoredResponse>>;

    /// Stores `response` under `key`, replacing any previous entry.
    async fn put(&self, key: &str, response: StoredResponse) -> StoreResult<()>;
}

#[async_trait]
impl ResponseStore for Box<dyn ResponseStore> {
    async fn get(&self, key: &str) -> StoreResult<Option<StoredResponse>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, response: StoredResponse) -> StoreResult<()> {
        (**self).put(key, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{CACHE_CONTROL, HeaderValue};

    fn entry(cache_control: Option<&str>, stored_at: DateTime<Utc>) -> StoredResponse {
        let mut headers = HeaderMap::new();
        if let Some(value) = cache_control {
            headers.insert(CACHE_CONTROL, HeaderValue::from_str(value).unwrap());
        }
        StoredResponse::with_stored_at(StatusCode::OK, headers, Bytes::from_static(b"{}"), stored_at)
    }

    #[test]
    fn fresh_within_declared_window() {
        assert!(entry(Some("max-age=2"), Utc::now()).is_fresh());
    }

    #[test]
    fn stale_past_declared_window() {
        let old = Utc::now() - chrono::Duration::seconds(3);
        assert!(!entry(Some("max-age=2"), old).is_fresh());
    }

    #[test]
    fn stale_once_age_reaches_lifetime() {
        let boundary = Utc::now() - chrono::Duration::seconds(2);
        assert!(!entry(Some("max-age=2"), boundary).is_fresh());
    }

    #[test]
    fn never_fresh_without_max_age() {
        assert!(!entry(None, Utc::now()).is_fresh());
        assert!(!entry(Some("no-store"), Utc::now()).is_fresh());
    }

    #[test]
    fn weight_accounts_for_body_and_headers() {
        let entry = entry(Some("max-age=2"), Utc::now());
        assert_eq!(entry.weight(), 2 + "cache-control".len() + "max-age=2".len());
    }
}
