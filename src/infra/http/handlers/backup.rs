use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::infra::http::error::ApiError;
use crate::infra::http::state::ApiState;

use super::backup_to_api;

pub async fn create_backup(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let receipt = state.backup.snapshot().await.map_err(backup_to_api)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
