use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use super::memory::Records;
use super::DocumentStore;
use crate::error::StoreError;
use crate::types::{NewTodo, Todo, TodoId};

/// Store backed by a single JSON document file.
///
/// The file holds an array of todo records. It is read once by `connect`;
/// every write goes to a temp file that is synced to disk and then renamed
/// over the old one, so a crash leaves either the old or the new contents.
/// Writes are serialized by the inner lock.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: RwLock<Option<Records>>,
}

impl FileStore {
    /// Open the store at `path`, creating an empty file if none exists.
    pub async fn connect(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match fs::read(&path).await {
            Ok(bytes) => {
                let todos: Vec<Todo> = serde_json::from_slice(&bytes).map_err(|source| {
                    StoreError::Corrupt {
                        path: path.clone(),
                        source,
                    }
                })?;
                Records::from_todos(todos).map_err(|id| StoreError::DuplicateId {
                    path: path.clone(),
                    id,
                })?
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let records = Records::default();
                write_atomic(&path, &records).await?;
                records
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), count = records.len(), "file store connected");

        Ok(Self {
            path,
            records: RwLock::new(Some(records)),
        })
    }

    /// Flush and close the store. Later operations fail with
    /// `StoreError::Disconnected`. Closing twice is a no-op.
    pub async fn disconnect(&self) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        if let Some(records) = guard.take() {
            write_atomic(&self.path, &records).await?;
            tracing::debug!(path = %self.path.display(), "file store disconnected");
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let mut guard = self.records.write().await;
        let records = guard.as_mut().ok_or(StoreError::Disconnected)?;

        let todo = todo.into_todo(records.next_id());
        let mut next = records.clone();
        next.insert(todo.clone());
        write_atomic(&self.path, &next).await?;
        *records = next;
        Ok(todo)
    }

    async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        let guard = self.records.read().await;
        let records = guard.as_ref().ok_or(StoreError::Disconnected)?;
        Ok(records.to_vec())
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, StoreError> {
        let guard = self.records.read().await;
        let records = guard.as_ref().ok_or(StoreError::Disconnected)?;
        Ok(records.get(id).cloned())
    }

    async fn save(&self, todo: &Todo) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        let records = guard.as_mut().ok_or(StoreError::Disconnected)?;

        let mut next = records.clone();
        next.replace(todo)?;
        write_atomic(&self.path, &next).await?;
        *records = next;
        Ok(())
    }
}

async fn write_atomic(path: &Path, records: &Records) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(&records.to_vec()).map_err(StoreError::Encode)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs::File::create(&tmp).await.map_err(io_err)?;
    file.write_all(&bytes).await.map_err(io_err)?;
    file.sync_all().await.map_err(io_err)?;
    drop(file);
    fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}
