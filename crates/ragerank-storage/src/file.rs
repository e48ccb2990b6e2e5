//! JSON file backend.
//!
//! Each storage key maps to `<dir>/<key>.json`. Writes land in a sibling
//! temp file that is renamed over the target, so a crash mid-write leaves
//! the previous blob intact.

use std::io::ErrorKind;
use std::path::PathBuf;

use ragerank_core::traits::Persistence;
use ragerank_core::BoardResult;

use crate::error::StorageError;

/// Persists each collection blob as a JSON file in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File that holds the blob for `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let usable = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if usable {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

impl Persistence for JsonFileStore {
    fn read_all(&self, key: &str) -> BoardResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(blob) => {
                tracing::debug!(path = %path.display(), bytes = blob.len(), "read collection");
                Ok(Some(blob))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }.into()),
        }
    }

    fn write_all(&mut self, key: &str, blob: &str) -> BoardResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&tmp, blob).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = blob.len(), "wrote collection");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragerank_core::store::{EntityStore, StoreConfig};
    use ragerank_core::{BoardError, ColorTag};

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert_eq!(store.read_all("board").unwrap(), None);
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested"));
        store.write_all("board", "[1,2,3]").unwrap();
        assert_eq!(store.read_all("board").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(dir.path().join("nested/board.json").exists());
        assert!(!dir.path().join("nested/board.json.tmp").exists());

        store.write_all("board", "[]").unwrap();
        assert_eq!(store.read_all("board").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        for key in ["", "..", "../escape", "a/b", "a b"] {
            let err = store.write_all(key, "[]").unwrap_err();
            assert!(
                matches!(err, BoardError::PersistenceUnavailable(ref m) if m.contains("invalid storage key")),
                "key {key:?} gave {err}"
            );
        }
    }

    #[test]
    fn unreadable_path_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the read fail.
        std::fs::create_dir(dir.path().join("board.json")).unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.read_all("board").unwrap_err(),
            BoardError::PersistenceUnavailable(_)
        ));
    }

    #[test]
    fn entity_store_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::default();

        let mut store = EntityStore::open(JsonFileStore::new(dir.path()), config.clone()).value;
        let id = store.add("Mme Petit", "Histoire", ColorTag::Yellow).value.id;
        let _ = store.adjust_pending(id, 41).unwrap();
        let _ = store.commit(id).unwrap();

        let reopened = EntityStore::open(JsonFileStore::new(dir.path()), config);
        assert!(reopened.warning.is_none());
        assert_eq!(reopened.value.collection(), store.collection());
        assert_eq!(reopened.value.get(id).unwrap().committed_score, 41);
    }
}
