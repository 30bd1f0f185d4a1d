#![warn(missing_docs)]
//! # restub-memory
//!
//! An in-process [`ResponseStore`] bounded by a byte quota.
//!
//! Stands in for the disk-backed engine in tests and demos. Entries are
//! evicted in insertion order once the quota is exceeded; a single entry
//! larger than the whole quota is rejected outright.
//!
//! ```
//! use restub_memory::MemoryStore;
//!
//! // 20 MiB, the conventional response-cache quota.
//! let store = MemoryStore::with_default_quota();
//! # let _ = store;
//! ```
//!
//! # Caveats
//!
//! - Data is **not persisted** — the store is lost on process restart.
//! - Eviction is FIFO, not LRU; the quota bounds memory, nothing more.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dashmap::DashMap;
use restub_core::{ResponseStore, StoreError, StoreResult, StoredResponse};

/// Default byte quota: 20 MiB.
pub const DEFAULT_QUOTA: usize = 20 * 1024 * 1024;

#[derive(Default)]
struct Accounting {
    order: VecDeque<String>,
    used: usize,
}

struct Inner {
    entries: DashMap<String, StoredResponse>,
    accounting: Mutex<Accounting>,
    quota: usize,
}

/// Byte-quota-bounded in-memory response store.
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Creates a store bounded by `quota` bytes of entry weight.
    pub fn new(quota: usize) -> Self {
        MemoryStore {
            inner: Arc::new(Inner {
                entries: DashMap::new(),
                accounting: Mutex::new(Accounting::default()),
                quota,
            }),
        }
    }

    /// Creates a store bounded by [`DEFAULT_QUOTA`].
    pub fn with_default_quota() -> Self {
        MemoryStore::new(DEFAULT_QUOTA)
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Returns whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Returns the summed weight of stored entries, in bytes.
    pub fn used_bytes(&self) -> usize {
        self.accounting().used
    }

    fn accounting(&self) -> std::sync::MutexGuard<'_, Accounting> {
        // A poisoned lock only means another writer panicked mid-accounting;
        // the map itself is still usable.
        self.inner
            .accounting
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("quota", &self.inner.quota)
            .field("entries", &self.inner.entries.len())
            .finish()
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<StoredResponse>> {
        Ok(self.inner.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, response: StoredResponse) -> StoreResult<()> {
        let weight = response.weight();
        if weight > self.inner.quota {
            return Err(StoreError::QuotaExceeded {
                size: weight,
                quota: self.inner.quota,
            });
        }

        let mut accounting = self.accounting();
        match self.inner.entries.insert(key.to_owned(), response) {
            Some(previous) => {
                accounting.used -= previous.weight();
                // Replacement refreshes the key's insertion position.
                if let Some(position) = accounting.order.iter().position(|k| k == key) {
                    accounting.order.remove(position);
                }
                accounting.order.push_back(key.to_owned());
            }
            None => accounting.order.push_back(key.to_owned()),
        }
        accounting.used += weight;

        // The new key sits at the back of the queue, so it is evicted last
        // and the loop terminates with used <= quota.
        while accounting.used > self.inner.quota {
            let Some(oldest) = accounting.order.pop_front() else {
                break;
            };
            if let Some((_, evicted)) = self.inner.entries.remove(&oldest) {
                accounting.used -= evicted.weight();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};

    fn entry(body: &'static [u8]) -> StoredResponse {
        StoredResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::from_static(body))
    }

    #[tokio::test]
    async fn get_returns_what_put_stored() {
        let store = MemoryStore::new(1024);
        store.put("GET /a", entry(b"aaaa")).await.unwrap();
        let stored = store.get("GET /a").await.unwrap().unwrap();
        assert_eq!(stored.body().as_ref(), b"aaaa");
        assert!(store.get("GET /b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn replacement_keeps_accounting_consistent() {
        let store = MemoryStore::new(1024);
        store.put("GET /a", entry(b"aaaaaaaa")).await.unwrap();
        store.put("GET /a", entry(b"aa")).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.used_bytes(), 2);
    }

    #[tokio::test]
    async fn oldest_entries_are_evicted_past_quota() {
        let store = MemoryStore::new(10);
        store.put("GET /a", entry(b"aaaa")).await.unwrap();
        store.put("GET /b", entry(b"bbbb")).await.unwrap();
        store.put("GET /c", entry(b"cccc")).await.unwrap();
        assert!(store.get("GET /a").await.unwrap().is_none());
        assert!(store.get("GET /b").await.unwrap().is_some());
        assert!(store.get("GET /c").await.unwrap().is_some());
        assert!(store.used_bytes() <= 10);
    }

    #[tokio::test]
    async fn replacement_near_quota_evicts_older_entries_first() {
        let store = MemoryStore::new(10);
        store.put("GET /a", entry(b"aaaa")).await.unwrap();
        store.put("GET /b", entry(b"bbbb")).await.unwrap();
        // Growing /a pushes used past the quota; the rewritten entry is the
        // newest and must survive the eviction that follows.
        store.put("GET /a", entry(b"aaaaaaaa")).await.unwrap();
        assert!(store.get("GET /a").await.unwrap().is_some());
        assert!(store.get("GET /b").await.unwrap().is_none());
        assert!(store.used_bytes() <= 10);
    }

    #[tokio::test]
    async fn oversized_entry_is_rejected() {
        let store = MemoryStore::new(3);
        let error = store.put("GET /a", entry(b"aaaa")).await.unwrap_err();
        assert!(matches!(
            error,
            StoreError::QuotaExceeded { size: 4, quota: 3 }
        ));
        assert!(store.is_empty());
    }
}
