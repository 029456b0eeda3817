use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::store::CreateListCommand;
use crate::infra::http::error::ApiError;
use crate::infra::http::models::{ListCreateRequest, ListDeleteResponse, ListQuery};
use crate::infra::http::state::ApiState;

use super::{parse_list_id, store_to_api};

pub async fn create_list(
    State(state): State<ApiState>,
    Json(payload): Json<ListCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let list = state
        .store
        .create_list(CreateListCommand::from(payload))
        .await
        .map_err(store_to_api)?;

    Ok((StatusCode::CREATED, Json(list)))
}

pub async fn get_list(
    State(state): State<ApiState>,
    Path(list_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let list_id = parse_list_id(list_id)?;
    let view = state
        .store
        .get_list(&list_id, query.get_task_data)
        .await
        .map_err(store_to_api)?;

    Ok((StatusCode::ACCEPTED, Json(view)))
}

pub async fn delete_list(
    State(state): State<ApiState>,
    Path(list_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let list_id = parse_list_id(list_id)?;
    let deleted = state
        .store
        .delete_list(&list_id)
        .await
        .map_err(store_to_api)?;

    Ok(Json(ListDeleteResponse::from(deleted)))
}
