//! JSON file state store

use super::{StateStore, StoreError};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const DOCUMENT_KEY: &str = "state document";

/// State store backed by a single JSON object on disk
///
/// The document is read on every load and rewritten on every save, so
/// separate invocations of the CLI see each other's state.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `<data dir>/filedb-client/state.json`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoDataDir` if the platform has no data directory.
    pub fn default_location() -> Result<Self, StoreError> {
        let dir = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dir.join("filedb-client").join("state.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns an empty document if the file doesn't exist.
    fn read_document(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&contents).map_err(|e| StoreError::serialization(DOCUMENT_KEY, e))
    }

    /// Creates the parent directory if it doesn't exist.
    fn write_document(&self, document: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::serialization(DOCUMENT_KEY, e))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl StateStore for FileStateStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_document()?.remove(key))
    }

    fn save(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value);
        self.write_document(&document)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        if document.remove(key).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SearchQuery, SortMethod};
    use crate::store::SEARCH_FILTER_KEY;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStateStore {
        FileStateStore::new(dir.path().join("nested").join("state.json"))
    }

    #[test]
    fn test_missing_file_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load(SEARCH_FILTER_KEY).unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_state_survives_a_new_store() {
        let dir = TempDir::new().unwrap();
        let filter = SearchQuery {
            tag_whitelist: vec!["collection:trip".into()],
            tag_blacklist: vec!["blurry".into()],
            count: Some(20),
            sort: Some(SortMethod::Size),
            sort_reverse: true,
            ..SearchQuery::default()
        };

        let mut store = store_in(&dir);
        store.save_filter(&filter).unwrap();
        store.save_page_ids(&[4, 8, 15]).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.load_filter().unwrap(), Some(filter));
        assert_eq!(reopened.load_page_ids().unwrap(), [4, 8, 15]);
    }

    #[test]
    fn test_remove_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save_filter(&SearchQuery::default()).unwrap();
        store.save_page_ids(&[1, 2]).unwrap();

        store.remove(SEARCH_FILTER_KEY).unwrap();
        assert!(store.load_filter().unwrap().is_none());
        assert_eq!(store.load_page_ids().unwrap(), [1, 2]);
    }

    #[test]
    fn test_corrupt_document_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(
            store.load(SEARCH_FILTER_KEY),
            Err(StoreError::Serialization { .. })
        ));
    }
}
