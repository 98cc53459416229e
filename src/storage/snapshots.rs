/// Snapshot history store: latest snapshot plus a bounded newest-first history
use super::JsonStore;
use crate::errors::{BoardError, BoardResult};
use crate::logger::LogTag;
use crate::types::{Snapshot, SnapshotHistory};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct SnapshotStore {
    store: Arc<JsonStore<SnapshotHistory>>,
    /// In-memory copy of the document, read by request handlers without disk access
    current: RwLock<SnapshotHistory>,
    write_lock: Mutex<()>,
}

impl SnapshotStore {
    /// Open the store, loading (or self-healing) the persisted history
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = JsonStore::new(path, LogTag::Snapshot);
        let current = RwLock::new(store.load());
        Self {
            store: Arc::new(store),
            current,
            write_lock: Mutex::new(()),
        }
    }

    pub fn latest(&self) -> Option<Snapshot> {
        self.current.read().latest.clone()
    }

    pub fn history(&self) -> SnapshotHistory {
        self.current.read().clone()
    }

    /// Make `snapshot` the latest, prepend it to the history and persist.
    /// The in-memory copy only advances once the write succeeded; readers keep
    /// seeing the previous snapshot while the file is written off the runtime.
    pub async fn append(&self, snapshot: Snapshot) -> BoardResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.current.read().clone();
        next.record(snapshot);

        let store = self.store.clone();
        let next = tokio::task::spawn_blocking(move || store.save(&next).map(|_| next))
            .await
            .map_err(|e| BoardError::Persist(format!("Snapshot write task failed: {}", e)))??;

        *self.current.write() = next;
        Ok(())
    }
}
