//! Cache access for the store.
//!
//! - [`KvCache`]: the single-key get/set/delete contract.
//! - [`MemoryCache`]: bounded in-process engine with LRU eviction.
//! - [`CacheKey`]: the key namespace shared by every engine.
//! - [`ListRegistry`]: process-wide set of known list ids, used by export.
//!
//! The memcached engine lives in `infra::memcached`.

mod backend;
mod keys;
mod lock;
mod registry;
mod store;

pub use backend::{CacheError, KvCache};
pub use keys::{CacheKey, LIST_KEY_PREFIX, TASK_KEY_PREFIX};
pub use registry::ListRegistry;
pub use store::{CACHE_EVICT_TOTAL, CACHE_HIT_TOTAL, CACHE_MISS_TOTAL, MemoryCache};
