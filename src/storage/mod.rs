/// Durable JSON documents
///
/// Each store owns one JSON file and treats it as a single transactional
/// unit: `load` reads the whole document, `save` replaces the whole document.
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash mid-write leaves the previous file intact.
/// Loads never fail: a missing or unreadable document yields the default.
pub mod registry;
pub mod snapshots;
pub mod stats_cache;

pub use registry::RegistryStore;
pub use snapshots::SnapshotStore;
pub use stats_cache::StatsCacheStore;

use crate::errors::{BoardError, BoardResult};
use crate::logger::{self, LogTag};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

pub struct JsonStore<T> {
    path: PathBuf,
    tag: LogTag,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>, tag: LogTag) -> Self {
        Self {
            path: path.into(),
            tag,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, substituting the default when missing or corrupt
    pub fn load(&self) -> T {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                logger::warning(
                    self.tag.clone(),
                    &format!("Failed to read {}: {} - starting fresh", self.path.display(), e),
                );
                return T::default();
            }
        };

        match serde_json::from_slice::<T>(&data) {
            Ok(value) => value,
            Err(e) => {
                logger::warning(
                    self.tag.clone(),
                    &format!("Corrupt document {}: {} - starting fresh", self.path.display(), e),
                );
                T::default()
            }
        }
    }

    /// Atomically replace the document
    pub fn save(&self, value: &T) -> BoardResult<()> {
        let json = serde_json::to_vec_pretty(value)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| {
            BoardError::Persist(format!("Failed to replace {}: {}", self.path.display(), e.error))
        })?;

        logger::verbose(
            self.tag.clone(),
            &format!("Wrote {} ({} bytes)", self.path.display(), json.len()),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    type Doc = BTreeMap<String, u32>;

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Doc> = JsonStore::new(dir.path().join("absent.json"), LogTag::Test);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store: JsonStore<Doc> = JsonStore::new(&path, LogTag::Test);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Doc> = JsonStore::new(dir.path().join("doc.json"), LogTag::Test);

        let mut doc = Doc::new();
        doc.insert("a".to_string(), 1);
        store.save(&doc).unwrap();
        assert_eq!(store.load(), doc);
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Doc> = JsonStore::new(dir.path().join("doc.json"), LogTag::Test);
        store.save(&Doc::new()).unwrap();
        store.save(&Doc::new()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.json");
        let store: JsonStore<Doc> = JsonStore::new(&path, LogTag::Test);
        store.save(&Doc::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_location_is_persist_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        // parent "directory" is a regular file
        let store: JsonStore<Doc> = JsonStore::new(blocker.join("doc.json"), LogTag::Test);
        assert!(matches!(store.save(&Doc::new()), Err(BoardError::Persist(_))));
    }
}
