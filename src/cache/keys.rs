//! Cache key namespace.
//!
//! Every record lives under exactly one key. List keys and task keys use
//! distinct prefixes, and task keys join the owning list id and the task id
//! with [`KEY_SEPARATOR`], which identifiers are forbidden to contain. Encoding
//! is therefore injective and [`CacheKey::decode`] recovers the original pair.

use std::fmt;

use crate::domain::ids::{KEY_SEPARATOR, ListId, TaskId};

pub const LIST_KEY_PREFIX: &str = "todo:list:";
pub const TASK_KEY_PREFIX: &str = "todo:task:";

/// Identifies one record in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// A task list record.
    List(ListId),
    /// A task record, addressed through its owning list.
    Task { list_id: ListId, task_id: TaskId },
}

impl CacheKey {
    pub fn list(list_id: &ListId) -> Self {
        CacheKey::List(list_id.clone())
    }

    pub fn task(list_id: &ListId, task_id: &TaskId) -> Self {
        CacheKey::Task {
            list_id: list_id.clone(),
            task_id: task_id.clone(),
        }
    }

    /// Short label used in logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            CacheKey::List(_) => "list",
            CacheKey::Task { .. } => "task",
        }
    }

    /// Render the key as stored in the cache.
    pub fn encode(&self) -> String {
        match self {
            CacheKey::List(list_id) => format!("{LIST_KEY_PREFIX}{list_id}"),
            CacheKey::Task { list_id, task_id } => {
                format!("{TASK_KEY_PREFIX}{list_id}{KEY_SEPARATOR}{task_id}")
            }
        }
    }

    /// Recover a key from its encoded form. Returns `None` for foreign keys.
    pub fn decode(raw: &str) -> Option<Self> {
        if let Some(rest) = raw.strip_prefix(LIST_KEY_PREFIX) {
            return ListId::parse(rest).ok().map(CacheKey::List);
        }
        let rest = raw.strip_prefix(TASK_KEY_PREFIX)?;
        let (list_id, task_id) = rest.split_once(KEY_SEPARATOR)?;
        Some(CacheKey::Task {
            list_id: ListId::parse(list_id).ok()?,
            task_id: TaskId::parse(task_id).ok()?,
        })
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(id: &str) -> ListId {
        ListId::parse(id).expect("valid list id")
    }

    fn task(id: &str) -> TaskId {
        TaskId::parse(id).expect("valid task id")
    }

    #[test]
    fn list_key_is_prefix_plus_id() {
        assert_eq!(CacheKey::list(&list("Groceries")).encode(), "todo:list:Groceries");
    }

    #[test]
    fn task_key_joins_list_and_task() {
        let key = CacheKey::task(&list("Work"), &task("Report"));
        assert_eq!(key.encode(), "todo:task:Work:Report");
        assert_eq!(key.to_string(), key.encode());
    }

    #[test]
    fn underscore_heavy_pairs_do_not_collide() {
        let a = CacheKey::task(&list("a_b"), &task("c"));
        let b = CacheKey::task(&list("a"), &task("b_c"));
        assert_ne!(a.encode(), b.encode());
    }

    #[test]
    fn list_and_task_namespaces_are_disjoint() {
        let list_key = CacheKey::list(&list("x")).encode();
        let task_key = CacheKey::task(&list("x"), &task("x")).encode();
        assert_ne!(list_key, task_key);
        assert!(!task_key.starts_with(LIST_KEY_PREFIX));
    }

    #[test]
    fn decode_inverts_encode() {
        let keys = [
            CacheKey::list(&list("Grocery_List")),
            CacheKey::task(&list("Work"), &task("Q1_report")),
        ];
        for key in keys {
            assert_eq!(CacheKey::decode(&key.encode()), Some(key));
        }
    }

    #[test]
    fn decode_rejects_foreign_keys() {
        assert_eq!(CacheKey::decode("welcome_message_v500"), None);
        assert_eq!(CacheKey::decode("todo:task:only-one-segment"), None);
        assert_eq!(CacheKey::decode("todo:task:a:b:c"), None);
    }
}
