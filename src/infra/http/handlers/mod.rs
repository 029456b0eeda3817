mod backup;
mod lists;
mod tasks;

pub use backup::create_backup;
pub use lists::{create_list, delete_list, get_list};
pub use tasks::{add_task, delete_task, edit_task, get_task};

use axum::http::StatusCode;

use crate::application::backup::BackupError;
use crate::application::store::StoreError;
use crate::domain::error::DomainError;
use crate::domain::ids::{ListId, TaskId};

use super::error::{ApiError, codes};

pub async fn health() -> &'static str {
    "ok"
}

pub(crate) fn parse_list_id(raw: String) -> Result<ListId, ApiError> {
    ListId::parse(raw).map_err(|err| ApiError::bad_request("Invalid list id", Some(err.to_string())))
}

pub(crate) fn parse_task_id(raw: String) -> Result<TaskId, ApiError> {
    TaskId::parse(raw).map_err(|err| ApiError::bad_request("Invalid task id", Some(err.to_string())))
}

pub(crate) fn domain_to_api(err: DomainError) -> ApiError {
    ApiError::new(
        StatusCode::BAD_REQUEST,
        codes::INVALID_INPUT,
        "Invalid input",
        Some(err.to_string()),
    )
}

pub(crate) fn store_to_api(err: StoreError) -> ApiError {
    let hint = Some(err.to_string());
    match err {
        StoreError::ListNotFound { .. } => ApiError::new(
            StatusCode::NOT_FOUND,
            codes::NOT_FOUND,
            "List not found",
            hint,
        ),
        StoreError::TaskNotFound { .. } => ApiError::new(
            StatusCode::NOT_FOUND,
            codes::NOT_FOUND,
            "Task not found",
            hint,
        ),
        StoreError::ListExists { .. } | StoreError::TaskExists { .. } => ApiError::new(
            StatusCode::CONFLICT,
            codes::DUPLICATE,
            "Duplicate record",
            hint,
        ),
        StoreError::Invalid(err) => domain_to_api(err),
        StoreError::Cache(_) => ApiError::from_error(
            StatusCode::SERVICE_UNAVAILABLE,
            codes::CACHE_UNAVAILABLE,
            "Cache unavailable",
            &err,
        ),
        StoreError::Corrupt { .. } | StoreError::Encode { .. } => ApiError::from_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::CORRUPT_RECORD,
            "Stored record is unreadable",
            &err,
        ),
    }
}

pub(crate) fn backup_to_api(err: BackupError) -> ApiError {
    match err {
        BackupError::Store(err) => store_to_api(err),
        BackupError::Exists { .. } => ApiError::new(
            StatusCode::CONFLICT,
            codes::DUPLICATE,
            "Backup already taken this second",
            Some(err.to_string()),
        ),
        other => ApiError::from_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::BACKUP,
            "Backup failed",
            &other,
        ),
    }
}
