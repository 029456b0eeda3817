//! memcached engine.
//!
//! The `memcache` client is blocking, so every call runs on tokio's blocking
//! pool. The client keeps its own connection pool and is shared between calls.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use memcache::{Client, MemcacheError};
use tracing::info;

use crate::cache::{CacheError, KvCache};

/// Stored entries never expire on their own; memcached may still evict them.
const NO_EXPIRY: u32 = 0;

#[derive(Clone)]
pub struct MemcachedCache {
    client: Arc<Client>,
}

impl MemcachedCache {
    /// Connect to `url`, e.g. `memcache://127.0.0.1:11211`.
    pub fn connect(url: &str) -> Result<Self, CacheError> {
        let client = Client::connect(url)
            .map_err(|err| CacheError::unavailable(format!("connect to {url}: {err}")))?;
        info!(target = "todo::cache", url, "Connected to memcached");
        Ok(Self {
            client: Arc::new(client),
        })
    }

    async fn run<T, F>(&self, op: &'static str, key: &str, call: F) -> Result<T, CacheError>
    where
        T: Send + 'static,
        F: FnOnce(&Client) -> Result<T, MemcacheError> + Send + 'static,
    {
        let client = self.client.clone();
        tokio::task::spawn_blocking(move || call(&client))
            .await
            .map_err(|err| CacheError::operation(op, key, format!("worker failed: {err}")))?
            .map_err(|err| CacheError::operation(op, key, err.to_string()))
    }
}

#[async_trait]
impl KvCache for MemcachedCache {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        let owned = key.to_string();
        let value = self
            .run("get", key, move |client| client.get::<Vec<u8>>(&owned))
            .await?;
        Ok(value.map(Bytes::from))
    }

    async fn set(&self, key: &str, value: Bytes) -> Result<(), CacheError> {
        let owned = key.to_string();
        self.run("set", key, move |client| {
            client.set(&owned, &value[..], NO_EXPIRY)
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let owned = key.to_string();
        self.run("delete", key, move |client| client.delete(&owned))
            .await
    }
}
