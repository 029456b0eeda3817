//! Known-list registry.
//!
//! The cache cannot enumerate its keys, so the process remembers which list
//! ids it has created in order to drive export. The set is best-effort: it is
//! empty after a restart, and ids of lists the cache has evicted stay here
//! until the list is explicitly deleted.

use std::collections::BTreeSet;
use std::sync::RwLock;

use crate::domain::ids::ListId;

use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::registry";

#[derive(Debug, Default)]
pub struct ListRegistry {
    ids: RwLock<BTreeSet<ListId>>,
}

impl ListRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `list_id`. Returns `false` if it was already known.
    pub fn insert(&self, list_id: ListId) -> bool {
        rw_write(&self.ids, SOURCE, "insert").insert(list_id)
    }

    /// Forget `list_id`. Unknown ids are ignored.
    pub fn remove(&self, list_id: &ListId) -> bool {
        rw_write(&self.ids, SOURCE, "remove").remove(list_id)
    }

    pub fn contains(&self, list_id: &ListId) -> bool {
        rw_read(&self.ids, SOURCE, "contains").contains(list_id)
    }

    /// Copy of the known ids in ascending order.
    pub fn snapshot(&self) -> Vec<ListId> {
        rw_read(&self.ids, SOURCE, "snapshot").iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        rw_read(&self.ids, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
