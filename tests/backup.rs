use std::num::NonZeroUsize;
use std::sync::Arc;

use bytes::Bytes;
use tempfile::TempDir;

use ephemeral_todo::application::backup::{BackupError, BackupService, BackupSink};
use ephemeral_todo::application::store::{CreateListCommand, CreateTaskCommand, TodoStore};
use ephemeral_todo::cache::{CacheKey, KvCache, ListRegistry, MemoryCache};
use ephemeral_todo::domain::entities::TaskListView;
use ephemeral_todo::domain::types::TaskStatus;
use ephemeral_todo::infra::backup::FsBackupSink;

fn store() -> (Arc<TodoStore>, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new(
        NonZeroUsize::new(128).expect("non-zero capacity"),
    ));
    let store = Arc::new(TodoStore::new(cache.clone(), Arc::new(ListRegistry::new())));
    (store, cache)
}

async fn seed(store: &TodoStore, list: &str, tasks: &[&str]) {
    let created = store
        .create_list(CreateListCommand {
            name: list.to_string(),
            description: None,
        })
        .await
        .expect("create list");
    for name in tasks {
        store
            .add_task(
                &created.list_id,
                CreateTaskCommand {
                    name: name.to_string(),
                    description: format!("{name} details"),
                    status: TaskStatus::Pending,
                    due_date: None,
                },
            )
            .await
            .expect("add task");
    }
}

#[tokio::test]
async fn sink_creates_missing_directory() {
    let root = TempDir::new().expect("tempdir");
    let nested = root.path().join("nested").join("backups");
    let sink = FsBackupSink::new(&nested);

    let location = sink
        .write("snapshot.json", Bytes::from_static(b"[]"))
        .await
        .expect("write");

    assert_eq!(location, nested.join("snapshot.json").display().to_string());
    assert_eq!(
        std::fs::read_to_string(nested.join("snapshot.json")).expect("read"),
        "[]"
    );
}

#[tokio::test]
async fn sink_refuses_to_overwrite_an_existing_snapshot() {
    let dir = TempDir::new().expect("tempdir");
    let sink = FsBackupSink::new(dir.path());

    sink.write("backup_data_20260101_000000.json", Bytes::from_static(b"[\"first\"]"))
        .await
        .expect("first write");
    let err = sink
        .write("backup_data_20260101_000000.json", Bytes::from_static(b"[]"))
        .await
        .expect_err("same name rejected");

    assert!(matches!(err, BackupError::Exists { .. }));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("backup_data_20260101_000000.json"))
            .expect("read"),
        "[\"first\"]"
    );
}

#[tokio::test]
async fn snapshot_contains_every_known_list_expanded() {
    let dir = TempDir::new().expect("tempdir");
    let (store, _) = store();
    seed(&store, "Work", &["Report", "Review"]).await;
    seed(&store, "Home", &["Laundry"]).await;

    let service = BackupService::new(store, Arc::new(FsBackupSink::new(dir.path())));
    let receipt = service.snapshot().await.expect("snapshot");
    assert_eq!(receipt.lists, 2);

    let file_name = std::path::Path::new(&receipt.file)
        .file_name()
        .and_then(|name| name.to_str())
        .expect("file name");
    assert!(file_name.starts_with("backup_data_"));
    assert!(file_name.ends_with(".json"));

    let contents = std::fs::read(&receipt.file).expect("read snapshot");
    let lists: Vec<TaskListView> = serde_json::from_slice(&contents).expect("decode");
    let ids: Vec<_> = lists.iter().map(|list| list.list_id.to_string()).collect();
    assert_eq!(ids, vec!["Home", "Work"]);

    let work = &lists[1];
    assert_eq!(work.tasks.len(), 2);
    assert!(work.tasks.iter().all(|member| member.as_task().is_some()));
}

#[tokio::test]
async fn snapshot_skips_evicted_lists_and_keeps_evicted_members_bare() {
    let dir = TempDir::new().expect("tempdir");
    let (store, cache) = store();
    seed(&store, "Work", &["Report", "Review"]).await;
    seed(&store, "Home", &["Laundry"]).await;

    let work = ephemeral_todo::domain::ids::ListId::parse("Work").expect("valid id");
    let home = ephemeral_todo::domain::ids::ListId::parse("Home").expect("valid id");
    let review = ephemeral_todo::domain::ids::TaskId::parse("Review").expect("valid id");
    cache
        .delete(&CacheKey::list(&home).encode())
        .await
        .expect("evict list");
    cache
        .delete(&CacheKey::task(&work, &review).encode())
        .await
        .expect("evict task");

    let service = BackupService::new(store, Arc::new(FsBackupSink::new(dir.path())));
    let receipt = service.snapshot().await.expect("snapshot");
    assert_eq!(receipt.lists, 1);

    let contents = std::fs::read(&receipt.file).expect("read snapshot");
    let value: serde_json::Value = serde_json::from_slice(&contents).expect("decode");
    assert_eq!(value[0]["list_id"], "Work");
    assert_eq!(value[0]["tasks"][0]["task_id"], "Report");
    assert_eq!(value[0]["tasks"][1], "Review");
}
