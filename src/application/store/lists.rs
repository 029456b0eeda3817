use tracing::{debug, info, warn};

use crate::cache::CacheKey;
use crate::domain::entities::{ListMember, TaskListRecord, TaskListView, TaskRecord};
use crate::domain::error::DomainError;
use crate::domain::ids::{ListId, TaskId};

use super::{CreateListCommand, StoreError, TodoStore};

/// Outcome of a cascading list delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedList {
    pub list_id: ListId,
    /// Member ids the cascade targeted, whether or not their keys still existed.
    pub deleted_tasks: Vec<TaskId>,
}

impl TodoStore {
    /// Create an empty list whose id is derived from `command.name`.
    ///
    /// The existence check and the write are separate cache calls; two
    /// concurrent creates of the same name both succeed and the later write wins.
    pub async fn create_list(
        &self,
        command: CreateListCommand,
    ) -> Result<TaskListRecord, StoreError> {
        let list_id = ListId::from_name(&command.name).map_err(DomainError::from)?;
        let key = CacheKey::list(&list_id);

        if self.exists(&key).await? {
            return Err(StoreError::ListExists { list_id });
        }

        let record = TaskListRecord::new(list_id.clone(), command.name, command.description);
        self.save(&key, &record).await?;
        self.registry.insert(list_id.clone());

        info!(target = "todo::store", list_id = %list_id, "List created");
        Ok(record)
    }

    /// Read a list. With `expand`, members whose task key still resolves are
    /// replaced by the full task; the rest stay bare ids.
    pub async fn get_list(
        &self,
        list_id: &ListId,
        expand: bool,
    ) -> Result<TaskListView, StoreError> {
        let record: TaskListRecord = self
            .load(&CacheKey::list(list_id))
            .await?
            .ok_or_else(|| StoreError::list_not_found(list_id))?;

        let mut view = TaskListView::from(record);
        if !expand {
            return Ok(view);
        }

        for member in &mut view.tasks {
            let task_id = member.task_id().clone();
            match self
                .load::<TaskRecord>(&CacheKey::task(list_id, &task_id))
                .await
            {
                Ok(Some(task)) => *member = ListMember::Task(task),
                Ok(None) => {
                    debug!(
                        target = "todo::store",
                        list_id = %list_id,
                        task_id = %task_id,
                        "Member task missing from cache; keeping bare id"
                    );
                }
                Err(StoreError::Corrupt { key, source }) => {
                    warn!(
                        target = "todo::store",
                        key = %key,
                        error = %source,
                        "Member task undecodable; keeping bare id"
                    );
                }
                Err(other) => return Err(other),
            }
        }

        Ok(view)
    }

    /// Delete a list and every member task it references.
    pub async fn delete_list(&self, list_id: &ListId) -> Result<DeletedList, StoreError> {
        let key = CacheKey::list(list_id);
        let record: TaskListRecord = self
            .load(&key)
            .await?
            .ok_or_else(|| StoreError::list_not_found(list_id))?;

        let mut removed = 0usize;
        for task_id in &record.tasks {
            if self.remove(&CacheKey::task(list_id, task_id)).await? {
                removed += 1;
            }
        }

        self.remove(&key).await?;
        self.registry.remove(list_id);

        info!(
            target = "todo::store",
            list_id = %list_id,
            targeted = record.tasks.len(),
            removed,
            "List deleted"
        );

        Ok(DeletedList {
            list_id: list_id.clone(),
            deleted_tasks: record.tasks,
        })
    }

    /// Expanded view of every known list that still resolves, in registry order.
    ///
    /// Lists evicted since they were registered are skipped. The registry is
    /// not pruned.
    pub async fn export_all(&self) -> Result<Vec<TaskListView>, StoreError> {
        let known = self.registry.snapshot();
        let mut lists = Vec::with_capacity(known.len());

        for list_id in known {
            match self.get_list(&list_id, true).await {
                Ok(view) => lists.push(view),
                Err(StoreError::ListNotFound { .. }) => {
                    debug!(
                        target = "todo::store",
                        list_id = %list_id,
                        "Known list no longer in cache; skipping"
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Ok(lists)
    }
}
