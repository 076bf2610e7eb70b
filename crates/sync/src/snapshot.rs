//! On-device copy of the collection used while the service is unreachable.
//!
//! A snapshot is a single slot named [`SNAPSHOT_KEY`] holding a JSON array
//! of items. It exists only while local changes are waiting to be pushed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Name of the snapshot slot.
pub const SNAPSHOT_KEY: &str = "makeup-items";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A single string slot for the serialized collection.
#[async_trait]
pub trait LocalSnapshot: Send + Sync {
    /// The stored contents, or `None` when nothing is pending.
    async fn read(&self) -> Result<Option<String>, SnapshotError>;

    /// Replace the contents entirely.
    async fn write(&self, contents: &str) -> Result<(), SnapshotError>;

    /// Remove the contents. Succeeds when there are none.
    async fn clear(&self) -> Result<(), SnapshotError>;
}

/// Snapshot stored as `<dir>/makeup-items.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written file.
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    dir: PathBuf,
    path: PathBuf,
}

impl FileSnapshot {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let path = dir.join(format!("{SNAPSHOT_KEY}.json"));
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LocalSnapshot for FileSnapshot {
    async fn read(&self) -> Result<Option<String>, SnapshotError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, contents: &str) -> Result<(), SnapshotError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SnapshotError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local snapshot for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySnapshot {
    slot: RwLock<Option<String>>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot that already holds `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(contents.into())),
        }
    }
}

#[async_trait]
impl LocalSnapshot for MemorySnapshot {
    async fn read(&self) -> Result<Option<String>, SnapshotError> {
        Ok(self.slot.read().await.clone())
    }

    async fn write(&self, contents: &str) -> Result<(), SnapshotError> {
        *self.slot.write().await = Some(contents.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SnapshotError> {
        *self.slot.write().await = None;
        Ok(())
    }
}
