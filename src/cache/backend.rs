//! The narrow key-value contract every cache engine satisfies.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Failure talking to the cache engine. A miss is never an error.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {message}")]
    Unavailable { message: String },
    #[error("cache `{op}` failed for key `{key}`: {message}")]
    Operation {
        op: &'static str,
        key: String,
        message: String,
    },
}

impl CacheError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn operation(op: &'static str, key: &str, message: impl Into<String>) -> Self {
        Self::Operation {
            op,
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Single-key primitives over a flat, volatile namespace.
///
/// Entries may disappear at any time without notice. There is no enumeration
/// and no compare-and-swap.
#[async_trait]
pub trait KvCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError>;

    /// Store `value` under `key`, replacing any previous value. Entries never expire.
    async fn set(&self, key: &str, value: Bytes) -> Result<(), CacheError>;

    /// Remove `key`. Returns whether an entry was present.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;
}
