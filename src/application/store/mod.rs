//! Hierarchical store over a flat, volatile cache.
//!
//! Lists and tasks are each stored under their own key. A list record keeps
//! the ordered ids of its tasks; that membership is maintained by hand with
//! single-key reads and writes, so it can drift from the task keys when the
//! cache evicts entries. Readers tolerate the drift instead of failing.
//!
//! No lock is held across cache calls. Concurrent writers race with
//! last-writer-wins semantics.

mod lists;
mod tasks;

use std::sync::Arc;

use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::cache::{CacheError, CacheKey, KvCache, ListRegistry};
use crate::domain::error::DomainError;
use crate::domain::ids::{ListId, TaskId};
use crate::domain::types::TaskStatus;

pub use lists::DeletedList;
pub use tasks::DeletedTask;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("list `{list_id}` not found")]
    ListNotFound { list_id: ListId },
    #[error("task `{task_id}` not found on list `{list_id}`")]
    TaskNotFound { list_id: ListId, task_id: TaskId },
    #[error("a list with id `{list_id}` already exists")]
    ListExists { list_id: ListId },
    #[error("a task with id `{task_id}` already exists on list `{list_id}`")]
    TaskExists { list_id: ListId, task_id: TaskId },
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("record under `{key}` could not be decoded")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("record for `{key}` could not be encoded")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    NotFound,
    AlreadyExists,
    InvalidInput,
    Backend,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::ListNotFound { .. } | StoreError::TaskNotFound { .. } => {
                StoreErrorKind::NotFound
            }
            StoreError::ListExists { .. } | StoreError::TaskExists { .. } => {
                StoreErrorKind::AlreadyExists
            }
            StoreError::Invalid(_) => StoreErrorKind::InvalidInput,
            StoreError::Cache(_) | StoreError::Corrupt { .. } | StoreError::Encode { .. } => {
                StoreErrorKind::Backend
            }
        }
    }

    fn list_not_found(list_id: &ListId) -> Self {
        StoreError::ListNotFound {
            list_id: list_id.clone(),
        }
    }

    fn task_not_found(list_id: &ListId, task_id: &TaskId) -> Self {
        StoreError::TaskNotFound {
            list_id: list_id.clone(),
            task_id: task_id.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateListCommand {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: Option<String>,
}

#[derive(Clone)]
pub struct TodoStore {
    cache: Arc<dyn KvCache>,
    registry: Arc<ListRegistry>,
}

impl TodoStore {
    pub fn new(cache: Arc<dyn KvCache>, registry: Arc<ListRegistry>) -> Self {
        Self { cache, registry }
    }

    pub fn registry(&self) -> &ListRegistry {
        &self.registry
    }

    // ========================================================================
    // Record codec
    // ========================================================================

    async fn load<T: DeserializeOwned>(&self, key: &CacheKey) -> Result<Option<T>, StoreError> {
        let encoded = key.encode();
        match self.cache.get(&encoded).await? {
            Some(payload) => serde_json::from_slice(&payload)
                .map(Some)
                .map_err(|source| StoreError::Corrupt {
                    key: encoded,
                    source,
                }),
            None => Ok(None),
        }
    }

    async fn save<T: Serialize + Sync>(&self, key: &CacheKey, value: &T) -> Result<(), StoreError> {
        let encoded = key.encode();
        let payload = serde_json::to_vec(value).map_err(|source| StoreError::Encode {
            key: encoded.clone(),
            source,
        })?;
        self.cache.set(&encoded, Bytes::from(payload)).await?;
        Ok(())
    }

    async fn exists(&self, key: &CacheKey) -> Result<bool, StoreError> {
        Ok(self.cache.get(&key.encode()).await?.is_some())
    }

    async fn remove(&self, key: &CacheKey) -> Result<bool, StoreError> {
        Ok(self.cache.delete(&key.encode()).await?)
    }
}
