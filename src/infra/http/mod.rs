//! HTTP surface.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use middleware::{log_responses, set_request_context};

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/todo_lists", post(handlers::create_list))
        .route("/todo_lists/", post(handlers::create_list))
        .route(
            "/todo_lists/{list_id}",
            get(handlers::get_list)
                .post(handlers::add_task)
                .delete(handlers::delete_list),
        )
        .route(
            "/todo_lists/{list_id}/{task_id}",
            get(handlers::get_task)
                .put(handlers::edit_task)
                .delete(handlers::delete_task),
        )
        .route("/backup", post(handlers::create_backup))
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}
