use serde::{Deserialize, Serialize};

use crate::application::store::{CreateListCommand, CreateTaskCommand, DeletedList, DeletedTask};
use crate::domain::entities::{FieldUpdate, TaskPatch};
use crate::domain::error::DomainError;
use crate::domain::ids::{ListId, TaskId};
use crate::domain::types::TaskStatus;

fn parse_status(label: &str) -> Result<TaskStatus, DomainError> {
    TaskStatus::try_from(label)
}

#[derive(Debug, Deserialize)]
pub struct ListCreateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ListCreateRequest> for CreateListCommand {
    fn from(request: ListCreateRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TaskCreateRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl TryFrom<TaskCreateRequest> for CreateTaskCommand {
    type Error = DomainError;

    fn try_from(request: TaskCreateRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .as_deref()
            .map(parse_status)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            name: request.name,
            description: request.description,
            status,
            due_date: request.due_date,
        })
    }
}

/// Partial task update. Omitted fields are left unchanged; `"due_date": null`
/// clears the due date.
#[derive(Debug, Default, Deserialize)]
pub struct TaskUpdateRequest {
    #[serde(default)]
    pub description: FieldUpdate<String>,
    #[serde(default)]
    pub status: FieldUpdate<String>,
    #[serde(default)]
    pub due_date: FieldUpdate<Option<String>>,
}

impl TryFrom<TaskUpdateRequest> for TaskPatch {
    type Error = DomainError;

    fn try_from(request: TaskUpdateRequest) -> Result<Self, Self::Error> {
        let status = match request.status {
            FieldUpdate::Set(label) => FieldUpdate::Set(parse_status(&label)?),
            FieldUpdate::Unchanged => FieldUpdate::Unchanged,
        };
        Ok(Self {
            description: request.description,
            status,
            due_date: request.due_date,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub get_task_data: bool,
}

#[derive(Debug, Serialize)]
pub struct ListDeleteResponse {
    pub message: String,
    pub list_id: ListId,
    pub deleted_tasks: Vec<TaskId>,
}

impl From<DeletedList> for ListDeleteResponse {
    fn from(deleted: DeletedList) -> Self {
        Self {
            message: format!("{} deleted successfully.", deleted.list_id),
            list_id: deleted.list_id,
            deleted_tasks: deleted.deleted_tasks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskDeleteResponse {
    pub message: String,
    pub task_id: TaskId,
    pub list_id: ListId,
}

impl From<DeletedTask> for TaskDeleteResponse {
    fn from(deleted: DeletedTask) -> Self {
        Self {
            message: format!(
                "Task {} on list {} deleted successfully.",
                deleted.task_id, deleted.list_id
            ),
            task_id: deleted.task_id,
            list_id: deleted.list_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_absent_from_null() {
        let absent: TaskUpdateRequest =
            serde_json::from_str(r#"{"status": "Closed"}"#).expect("decode");
        let patch = TaskPatch::try_from(absent).expect("valid");
        assert_eq!(patch.status, FieldUpdate::Set(TaskStatus::Closed));
        assert_eq!(patch.due_date, FieldUpdate::Unchanged);

        let cleared: TaskUpdateRequest =
            serde_json::from_str(r#"{"due_date": null}"#).expect("decode");
        let patch = TaskPatch::try_from(cleared).expect("valid");
        assert_eq!(patch.due_date, FieldUpdate::Set(None));
    }

    #[test]
    fn unknown_status_label_is_rejected() {
        let request: TaskUpdateRequest =
            serde_json::from_str(r#"{"status": "Done"}"#).expect("decode");
        assert!(TaskPatch::try_from(request).is_err());
    }

    #[test]
    fn create_request_defaults_status_to_assigned() {
        let request: TaskCreateRequest =
            serde_json::from_str(r#"{"name": "Report", "description": "Q1"}"#).expect("decode");
        let command = CreateTaskCommand::try_from(request).expect("valid");
        assert_eq!(command.status, TaskStatus::Assigned);
        assert_eq!(command.due_date, None);
    }
}
