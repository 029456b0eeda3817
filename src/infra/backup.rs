//! Filesystem destination for backup snapshots.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::application::backup::{BackupError, BackupSink};

/// Writes each snapshot as a file in one directory, creating it on demand.
/// An existing file is never overwritten.
#[derive(Debug, Clone)]
pub struct FsBackupSink {
    directory: PathBuf,
}

impl FsBackupSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl BackupSink for FsBackupSink {
    async fn write(&self, name: &str, contents: Bytes) -> Result<String, BackupError> {
        let path = self.directory.join(name);
        let location = path.display().to_string();
        let write_error = |source| BackupError::Write {
            location: location.clone(),
            source,
        };

        fs::create_dir_all(&self.directory)
            .await
            .map_err(write_error)?;
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(BackupError::Exists {
                    location: location.clone(),
                });
            }
            Err(err) => return Err(write_error(err)),
        };
        file.write_all(&contents).await.map_err(write_error)?;
        file.flush().await.map_err(write_error)?;
        Ok(location)
    }
}
