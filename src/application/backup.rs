//! Point-in-time export of every known list.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use metrics::counter;
use serde::Serialize;
use thiserror::Error;
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use tracing::info;

use crate::application::store::{StoreError, TodoStore};

pub const BACKUP_WRITTEN_TOTAL: &str = "todo_backup_written_total";

const FILE_STAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year]_[hour][minute][second]");

#[derive(Debug, Error)]
pub enum BackupError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to format snapshot name: {0}")]
    Name(#[from] time::error::Format),
    #[error("snapshot `{location}` already exists")]
    Exists { location: String },
    #[error("failed to write snapshot `{location}`")]
    Write {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for encoded snapshots.
#[async_trait]
pub trait BackupSink: Send + Sync {
    /// Persist `contents` under `name` and return where it ended up.
    async fn write(&self, name: &str, contents: Bytes) -> Result<String, BackupError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupReceipt {
    pub file: String,
    pub lists: usize,
}

/// `backup_data_DD-MM-YYYY_HHMMSS.json` for the given instant.
pub fn snapshot_file_name(at: OffsetDateTime) -> Result<String, time::error::Format> {
    Ok(format!("backup_data_{}.json", at.format(FILE_STAMP_FORMAT)?))
}

#[derive(Clone)]
pub struct BackupService {
    store: Arc<TodoStore>,
    sink: Arc<dyn BackupSink>,
}

impl BackupService {
    pub fn new(store: Arc<TodoStore>, sink: Arc<dyn BackupSink>) -> Self {
        Self { store, sink }
    }

    /// Export every known list, fully expanded, as one JSON array.
    pub async fn snapshot(&self) -> Result<BackupReceipt, BackupError> {
        let name = snapshot_file_name(OffsetDateTime::now_utc())?;
        let lists = self.store.export_all().await?;
        let encoded = serde_json::to_vec_pretty(&lists)?;

        let file = self.sink.write(&name, Bytes::from(encoded)).await?;
        counter!(BACKUP_WRITTEN_TOTAL).increment(1);

        info!(
            target = "todo::backup",
            file = %file,
            lists = lists.len(),
            "Backup written"
        );
        Ok(BackupReceipt {
            file,
            lists: lists.len(),
        })
    }
}
