use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::store::CreateTaskCommand;
use crate::domain::entities::TaskPatch;
use crate::infra::http::error::ApiError;
use crate::infra::http::models::{TaskCreateRequest, TaskDeleteResponse, TaskUpdateRequest};
use crate::infra::http::state::ApiState;

use super::{domain_to_api, parse_list_id, parse_task_id, store_to_api};

pub async fn add_task(
    State(state): State<ApiState>,
    Path(list_id): Path<String>,
    Json(payload): Json<TaskCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let list_id = parse_list_id(list_id)?;
    let command = CreateTaskCommand::try_from(payload).map_err(domain_to_api)?;
    let task = state
        .store
        .add_task(&list_id, command)
        .await
        .map_err(store_to_api)?;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_task(
    State(state): State<ApiState>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let list_id = parse_list_id(list_id)?;
    let task_id = parse_task_id(task_id)?;
    let task = state
        .store
        .get_task(&list_id, &task_id)
        .await
        .map_err(store_to_api)?;

    Ok(Json(task))
}

pub async fn edit_task(
    State(state): State<ApiState>,
    Path((list_id, task_id)): Path<(String, String)>,
    Json(payload): Json<TaskUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let list_id = parse_list_id(list_id)?;
    let task_id = parse_task_id(task_id)?;
    let patch = TaskPatch::try_from(payload).map_err(domain_to_api)?;
    let task = state
        .store
        .edit_task(&list_id, &task_id, patch)
        .await
        .map_err(store_to_api)?;

    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<ApiState>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let list_id = parse_list_id(list_id)?;
    let task_id = parse_task_id(task_id)?;
    let deleted = state
        .store
        .delete_task(&list_id, &task_id)
        .await
        .map_err(store_to_api)?;

    Ok(Json(TaskDeleteResponse::from(deleted)))
}
