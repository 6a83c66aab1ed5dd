//! Read-through cache for single-document fetches.
//!
//! The cache is consulted before a remote read, populated on miss, and
//! invalidated on every write to the same key. It is deliberately not
//! linearizable: a stale read between a remote write and its invalidation
//! is tolerated.

use lru::LruCache;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Derive the cache key for a document.
///
/// Plain alphanumeric ids are used directly; anything else (separators,
/// unicode, empty) is replaced by its sha-256 hex digest so arbitrary ids
/// cannot collide with or inject into other keys.
pub fn cache_key(collection: &str, document_id: &str) -> String {
    if !document_id.is_empty() && document_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        format!("firestore_{}_{}", collection, document_id)
    } else {
        let digest = Sha256::digest(document_id.as_bytes());
        format!("firestore_{}_{}", collection, hex::encode(digest))
    }
}

/// TTL-bounded LRU cache of decoded documents.
pub struct DocumentCache {
    entries: RwLock<LruCache<String, (Map<String, Value>, Instant)>>,
}

impl DocumentCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Fetch a cached document, dropping it if its TTL has elapsed.
    pub async fn get(&self, key: &str) -> Option<Map<String, Value>> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    pub async fn set(&self, key: String, value: Map<String, Value>, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.put(key, (value, Instant::now() + ttl));
    }

    pub async fn remove(&self, key: &str) {
        let mut entries = self.entries.write().await;
        entries.pop(key);
    }
}
