use tracing::{debug, info, warn};

use crate::cache::CacheKey;
use crate::domain::entities::{TaskListRecord, TaskPatch, TaskRecord, Timestamp};
use crate::domain::error::DomainError;
use crate::domain::ids::{ListId, TaskId};

use super::{CreateTaskCommand, StoreError, TodoStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedTask {
    pub list_id: ListId,
    pub task_id: TaskId,
}

impl TodoStore {
    /// Create a task on an existing list and append it to the list's members.
    ///
    /// The task key is written before the list is re-read and rewritten, so a
    /// failure in between leaves an unreferenced task rather than a dangling
    /// member id.
    pub async fn add_task(
        &self,
        list_id: &ListId,
        command: CreateTaskCommand,
    ) -> Result<TaskRecord, StoreError> {
        let list_key = CacheKey::list(list_id);
        if !self.exists(&list_key).await? {
            return Err(StoreError::list_not_found(list_id));
        }

        let task_id = TaskId::from_name(&command.name).map_err(DomainError::from)?;
        let task_key = CacheKey::task(list_id, &task_id);
        if self.exists(&task_key).await? {
            return Err(StoreError::TaskExists {
                list_id: list_id.clone(),
                task_id,
            });
        }

        let task = TaskRecord {
            task_id: task_id.clone(),
            name: command.name,
            description: command.description,
            status: command.status,
            due_date: command.due_date,
            assigned_list: list_id.clone(),
            creation_date: Timestamp::now(),
        };
        self.save(&task_key, &task).await?;

        let Some(mut list) = self.load::<TaskListRecord>(&list_key).await? else {
            warn!(
                target = "todo::store",
                list_id = %list_id,
                task_id = %task_id,
                "List vanished after task write; task left unreferenced"
            );
            return Err(StoreError::list_not_found(list_id));
        };
        if list.push_task(task_id.clone()) {
            self.save(&list_key, &list).await?;
        }

        info!(
            target = "todo::store",
            list_id = %list_id,
            task_id = %task_id,
            "Task created"
        );
        Ok(task)
    }

    pub async fn get_task(
        &self,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<TaskRecord, StoreError> {
        self.load(&CacheKey::task(list_id, task_id))
            .await?
            .ok_or_else(|| StoreError::task_not_found(list_id, task_id))
    }

    /// Overwrite the fields supplied in `patch`. List membership is untouched.
    pub async fn edit_task(
        &self,
        list_id: &ListId,
        task_id: &TaskId,
        patch: TaskPatch,
    ) -> Result<TaskRecord, StoreError> {
        let key = CacheKey::task(list_id, task_id);
        let mut task: TaskRecord = self
            .load(&key)
            .await?
            .ok_or_else(|| StoreError::task_not_found(list_id, task_id))?;

        if patch.is_empty() {
            return Ok(task);
        }

        task.apply(patch);
        self.save(&key, &task).await?;

        debug!(
            target = "todo::store",
            list_id = %list_id,
            task_id = %task_id,
            "Task updated"
        );
        Ok(task)
    }

    /// Delete one task and drop it from its list's members.
    pub async fn delete_task(
        &self,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<DeletedTask, StoreError> {
        let list_key = CacheKey::list(list_id);
        if !self.exists(&list_key).await? {
            return Err(StoreError::list_not_found(list_id));
        }

        if !self.remove(&CacheKey::task(list_id, task_id)).await? {
            return Err(StoreError::task_not_found(list_id, task_id));
        }

        match self.load::<TaskListRecord>(&list_key).await? {
            Some(mut list) => {
                if list.remove_task(task_id) {
                    self.save(&list_key, &list).await?;
                }
            }
            None => {
                debug!(
                    target = "todo::store",
                    list_id = %list_id,
                    "List vanished after task delete; nothing to unlink"
                );
            }
        }

        info!(
            target = "todo::store",
            list_id = %list_id,
            task_id = %task_id,
            "Task deleted"
        );
        Ok(DeletedTask {
            list_id: list_id.clone(),
            task_id: task_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::application::store::test_support::memory_store;
    use crate::application::store::{CreateListCommand, CreateTaskCommand, StoreError};
    use crate::domain::entities::{FieldUpdate, TaskPatch};
    use crate::domain::ids::{ListId, TaskId};
    use crate::domain::types::TaskStatus;

    fn task(name: &str) -> CreateTaskCommand {
        CreateTaskCommand {
            name: name.to_string(),
            description: "Q1".to_string(),
            status: TaskStatus::Assigned,
            due_date: None,
        }
    }

    async fn store_with_list() -> (crate::application::store::TodoStore, ListId) {
        let (store, _) = memory_store();
        let list = store
            .create_list(CreateListCommand {
                name: "Work".to_string(),
                description: None,
            })
            .await
            .expect("create list");
        (store, list.list_id)
    }

    #[tokio::test]
    async fn add_task_on_missing_list_is_not_found() {
        let (store, _) = memory_store();
        let list_id = ListId::parse("Ghost").expect("valid id");
        let err = store
            .add_task(&list_id, task("Report"))
            .await
            .expect_err("missing list");
        assert!(matches!(err, StoreError::ListNotFound { .. }));
    }

    #[tokio::test]
    async fn add_task_stamps_owner_and_links_membership() {
        let (store, list_id) = store_with_list().await;
        let created = store
            .add_task(&list_id, task("Quarterly Report"))
            .await
            .expect("add");

        assert_eq!(created.task_id, "Quarterly_Report");
        assert_eq!(created.assigned_list, list_id);

        let view = store.get_list(&list_id, false).await.expect("get list");
        let ids: Vec<_> = view.tasks.iter().map(|m| m.task_id().clone()).collect();
        assert_eq!(ids, vec![created.task_id]);
    }

    #[tokio::test]
    async fn duplicate_task_is_rejected() {
        let (store, list_id) = store_with_list().await;
        store.add_task(&list_id, task("Report")).await.expect("add");
        let err = store
            .add_task(&list_id, task("Report"))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, StoreError::TaskExists { .. }));

        let view = store.get_list(&list_id, false).await.expect("get list");
        assert_eq!(view.tasks.len(), 1);
    }

    #[tokio::test]
    async fn empty_patch_leaves_task_untouched() {
        let (store, list_id) = store_with_list().await;
        let created = store.add_task(&list_id, task("Report")).await.expect("add");

        let edited = store
            .edit_task(&list_id, &created.task_id, TaskPatch::default())
            .await
            .expect("edit");
        assert_eq!(edited, created);
    }

    #[tokio::test]
    async fn edit_missing_task_is_not_found() {
        let (store, list_id) = store_with_list().await;
        let missing = TaskId::parse("Nope").expect("valid id");
        let patch = TaskPatch {
            status: FieldUpdate::Set(TaskStatus::Closed),
            ..TaskPatch::default()
        };
        let err = store
            .edit_task(&list_id, &missing, patch)
            .await
            .expect_err("missing");
        assert!(matches!(err, StoreError::TaskNotFound { .. }));
    }

    #[tokio::test]
    async fn delete_task_on_missing_list_checks_list_first() {
        let (store, _) = memory_store();
        let list_id = ListId::parse("Ghost").expect("valid id");
        let task_id = TaskId::parse("Report").expect("valid id");
        let err = store
            .delete_task(&list_id, &task_id)
            .await
            .expect_err("missing list");
        assert!(matches!(err, StoreError::ListNotFound { .. }));
    }
}
