//! Cache engine selection.

use std::sync::Arc;

use tracing::info;

use crate::cache::{KvCache, MemoryCache};
use crate::config::{CacheBackend, CacheSettings};

use super::error::InfraError;
use super::memcached::MemcachedCache;

/// Build the engine named by `settings`.
pub fn open(settings: &CacheSettings) -> Result<Arc<dyn KvCache>, InfraError> {
    match &settings.backend {
        CacheBackend::Memory { capacity } => {
            info!(
                target = "todo::cache",
                capacity = capacity.get(),
                "Using in-memory cache"
            );
            Ok(Arc::new(MemoryCache::new(*capacity)))
        }
        CacheBackend::Memcached { url } => Ok(Arc::new(MemcachedCache::connect(url)?)),
    }
}
