//! In-process cache engine.

use std::num::NonZeroUsize;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use lru::LruCache;
use metrics::counter;
use tracing::debug;

use super::backend::{CacheError, KvCache};
use super::keys::CacheKey;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

pub const CACHE_HIT_TOTAL: &str = "todo_cache_hit_total";
pub const CACHE_MISS_TOTAL: &str = "todo_cache_miss_total";
pub const CACHE_EVICT_TOTAL: &str = "todo_cache_evict_total";

/// Bounded in-memory cache with least-recently-used eviction.
///
/// Evictions are silent to callers.
pub struct MemoryCache {
    entries: RwLock<LruCache<String, Bytes>>,
}

impl MemoryCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> NonZeroUsize {
        rw_read(&self.entries, SOURCE, "capacity").cap()
    }
}

fn key_kind(raw: &str) -> &'static str {
    CacheKey::decode(raw).map_or("other", |key| key.kind())
}

#[async_trait]
impl KvCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        // `get` promotes the entry, so it needs the write lock.
        let found = rw_write(&self.entries, SOURCE, "get").get(key).cloned();
        if found.is_some() {
            counter!(CACHE_HIT_TOTAL, "kind" => key_kind(key)).increment(1);
        } else {
            counter!(CACHE_MISS_TOTAL, "kind" => key_kind(key)).increment(1);
        }
        Ok(found)
    }

    async fn set(&self, key: &str, value: Bytes) -> Result<(), CacheError> {
        let displaced = rw_write(&self.entries, SOURCE, "set").push(key.to_string(), value);
        if let Some((evicted, _)) = displaced.filter(|(evicted, _)| evicted != key) {
            let kind = key_kind(&evicted);
            counter!(CACHE_EVICT_TOTAL, "kind" => kind).increment(1);
            debug!(
                target = "todo::cache",
                evicted_key = %evicted,
                kind,
                "Evicted least recently used entry"
            );
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        Ok(rw_write(&self.entries, SOURCE, "delete")
            .pop(key)
            .is_some())
    }
}
