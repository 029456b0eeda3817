use std::num::NonZeroUsize;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use ephemeral_todo::application::backup::BackupService;
use ephemeral_todo::application::store::TodoStore;
use ephemeral_todo::cache::{ListRegistry, MemoryCache};
use ephemeral_todo::infra::backup::FsBackupSink;
use ephemeral_todo::infra::http::{ApiState, build_router};

fn router(backup_dir: &TempDir) -> Router {
    let cache = Arc::new(MemoryCache::new(
        NonZeroUsize::new(256).expect("non-zero capacity"),
    ));
    let store = Arc::new(TodoStore::new(cache, Arc::new(ListRegistry::new())));
    let sink = Arc::new(FsBackupSink::new(backup_dir.path()));
    let backup = Arc::new(BackupService::new(store.clone(), sink));
    build_router(ApiState { store, backup })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = TempDir::new().expect("tempdir");
    let app = router(&dir);
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn list_lifecycle_status_codes() {
    let dir = TempDir::new().expect("tempdir");
    let app = router(&dir);

    let (status, created) = send(
        &app,
        Method::POST,
        "/todo_lists/",
        Some(json!({"name": "Grocery List", "description": "weekly"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["list_id"], "Grocery_List");
    assert_eq!(created["tasks"], json!([]));

    let (status, body) = send(
        &app,
        Method::POST,
        "/todo_lists/",
        Some(json!({"name": "Grocery List"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "duplicate");

    let (status, fetched) = send(&app, Method::GET, "/todo_lists/Grocery_List", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(fetched["name"], "Grocery List");
    assert_eq!(fetched["description"], "weekly");

    let (status, deleted) = send(&app, Method::DELETE, "/todo_lists/Grocery_List", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["list_id"], "Grocery_List");
    assert_eq!(deleted["deleted_tasks"], json!([]));
    assert_eq!(deleted["message"], "Grocery_List deleted successfully.");

    let (status, body) = send(&app, Method::GET, "/todo_lists/Grocery_List", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn task_lifecycle_and_expansion() {
    let dir = TempDir::new().expect("tempdir");
    let app = router(&dir);
    send(&app, Method::POST, "/todo_lists", Some(json!({"name": "Work"}))).await;

    let (status, task) = send(
        &app,
        Method::POST,
        "/todo_lists/Work",
        Some(json!({"name": "Report", "description": "Q1", "due_date": "2024-03-31"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["task_id"], "Report");
    assert_eq!(task["status"], "Assigned");
    assert_eq!(task["assigned_list"], "Work");

    let (status, bare) = send(&app, Method::GET, "/todo_lists/Work", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(bare["tasks"], json!(["Report"]));

    let (_, expanded) = send(
        &app,
        Method::GET,
        "/todo_lists/Work?get_task_data=true",
        None,
    )
    .await;
    assert_eq!(expanded["tasks"][0]["description"], "Q1");

    let (status, edited) = send(
        &app,
        Method::PUT,
        "/todo_lists/Work/Report",
        Some(json!({"status": "In Process"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["status"], "In Process");
    assert_eq!(edited["due_date"], "2024-03-31");

    let (status, fetched) = send(&app, Method::GET, "/todo_lists/Work/Report", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, edited);

    let (status, deleted) = send(&app, Method::DELETE, "/todo_lists/Work/Report", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["task_id"], "Report");
    assert_eq!(deleted["list_id"], "Work");

    let (status, _) = send(&app, Method::DELETE, "/todo_lists/Work/Report", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn task_on_missing_list_is_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let app = router(&dir);
    let (status, body) = send(
        &app,
        Method::POST,
        "/todo_lists/Ghost",
        Some(json!({"name": "Report", "description": "Q1"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "List not found");
}

#[tokio::test]
async fn invalid_input_is_bad_request() {
    let dir = TempDir::new().expect("tempdir");
    let app = router(&dir);
    send(&app, Method::POST, "/todo_lists", Some(json!({"name": "Work"}))).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/todo_lists",
        Some(json!({"name": "a:b"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");

    let (status, body) = send(
        &app,
        Method::POST,
        "/todo_lists/Work",
        Some(json!({"name": "Report", "description": "Q1", "status": "Done"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn backup_endpoint_writes_snapshot_file() {
    let dir = TempDir::new().expect("tempdir");
    let app = router(&dir);
    send(&app, Method::POST, "/todo_lists", Some(json!({"name": "Work"}))).await;

    let (status, receipt) = send(&app, Method::POST, "/backup", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["lists"], 1);

    let file = receipt["file"].as_str().expect("file path");
    let contents = std::fs::read_to_string(file).expect("snapshot written");
    let snapshot: Value = serde_json::from_str(&contents).expect("json");
    assert_eq!(snapshot[0]["list_id"], "Work");
}
