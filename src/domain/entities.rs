//! Records persisted in the cache and the views assembled from them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _, ser::Error as _};
use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use super::ids::{ListId, TaskId};
use super::types::TaskStatus;

const STAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month repr:short]-[year] ([hour]:[minute]:[second])");

/// Creation instant with second precision, encoded as `DD-Mon-YYYY (HH:MM:SS)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(PrimitiveDateTime);

impl Timestamp {
    /// Current UTC time truncated to whole seconds.
    pub fn now() -> Self {
        let now = OffsetDateTime::now_utc();
        let now = now.replace_nanosecond(0).unwrap_or(now);
        Self(PrimitiveDateTime::new(now.date(), now.time()))
    }

    pub fn parse(value: &str) -> Result<Self, time::error::Parse> {
        PrimitiveDateTime::parse(value, STAMP_FORMAT).map(Self)
    }

    fn format(&self) -> Result<String, time::error::Format> {
        self.0.format(STAMP_FORMAT)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.format().map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = self.format().map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

/// A unit of work owned by exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_id: TaskId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<String>,
    pub assigned_list: ListId,
    pub creation_date: Timestamp,
}

impl TaskRecord {
    /// Merge the supplied fields of `patch`; unset fields keep their value.
    pub fn apply(&mut self, patch: TaskPatch) {
        let TaskPatch {
            description,
            status,
            due_date,
        } = patch;
        description.apply_to(&mut self.description);
        status.apply_to(&mut self.status);
        due_date.apply_to(&mut self.due_date);
    }
}

/// A named, ordered grouping of task identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListRecord {
    pub list_id: ListId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub creation_date: Timestamp,
    #[serde(default)]
    pub tasks: Vec<TaskId>,
}

impl TaskListRecord {
    pub fn new(list_id: ListId, name: String, description: Option<String>) -> Self {
        Self {
            list_id,
            name,
            description,
            creation_date: Timestamp::now(),
            tasks: Vec::new(),
        }
    }

    pub fn contains_task(&self, task_id: &TaskId) -> bool {
        self.tasks.contains(task_id)
    }

    /// Append `task_id` unless already present. Returns whether the list changed.
    pub fn push_task(&mut self, task_id: TaskId) -> bool {
        if self.contains_task(&task_id) {
            return false;
        }
        self.tasks.push(task_id);
        true
    }

    /// Drop `task_id` if present. Returns whether the list changed.
    pub fn remove_task(&mut self, task_id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|existing| existing != task_id);
        self.tasks.len() != before
    }
}

/// A list member: the full task when it could be read, otherwise the bare id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListMember {
    Task(TaskRecord),
    Id(TaskId),
}

impl ListMember {
    pub fn task_id(&self) -> &TaskId {
        match self {
            ListMember::Task(task) => &task.task_id,
            ListMember::Id(id) => id,
        }
    }

    pub fn as_task(&self) -> Option<&TaskRecord> {
        match self {
            ListMember::Task(task) => Some(task),
            ListMember::Id(_) => None,
        }
    }
}

/// A list as returned to callers, with members optionally expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListView {
    pub list_id: ListId,
    pub name: String,
    pub description: Option<String>,
    pub creation_date: Timestamp,
    pub tasks: Vec<ListMember>,
}

impl From<TaskListRecord> for TaskListView {
    fn from(record: TaskListRecord) -> Self {
        Self {
            list_id: record.list_id,
            name: record.name,
            description: record.description,
            creation_date: record.creation_date,
            tasks: record.tasks.into_iter().map(ListMember::Id).collect(),
        }
    }
}

/// A field in a partial update: either left alone or replaced.
///
/// Deserializing a present value (including `null` for `Option` fields) yields
/// `Set`; fields missing from the payload fall back to `Unchanged` through
/// `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Unchanged,
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, FieldUpdate::Set(_))
    }

    pub fn apply_to(self, slot: &mut T) {
        if let FieldUpdate::Set(value) = self {
            *slot = value;
        }
    }
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unchanged
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(FieldUpdate::Set)
    }
}

/// Partial update of a task's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub description: FieldUpdate<String>,
    pub status: FieldUpdate<TaskStatus>,
    pub due_date: FieldUpdate<Option<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        !(self.description.is_set() || self.status.is_set() || self.due_date.is_set())
    }
}
