//! Persisted client state
//!
//! Two pieces of state outlive a single command: the last search filter and
//! the ids of the last result page. Both are stored as JSON values under a
//! fixed key through the [`StateStore`] interface.
//!
//! # Storage
//!
//! [`FileStateStore`] keeps every key in one JSON document, by default
//! `<data dir>/filedb-client/state.json`. [`MemoryStateStore`] keeps them in
//! a map and is used by tests.
//!
//! # Examples
//!
//! ```
//! use filedb_client::api::SearchQuery;
//! use filedb_client::store::{MemoryStateStore, StateStore};
//!
//! let mut store = MemoryStateStore::new();
//! let filter = SearchQuery { tag_whitelist: vec!["cats".into()], ..SearchQuery::default() };
//! store.save_filter(&filter).unwrap();
//! assert_eq!(store.load_filter().unwrap(), Some(filter));
//! ```

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::FileStateStore;
pub use memory::MemoryStateStore;

use crate::api::SearchQuery;
use serde_json::Value;

/// Key of the last-used search filter
pub const SEARCH_FILTER_KEY: &str = "search_filter";

/// Key of the ordered ids on the last result page
pub const PAGE_IDS_KEY: &str = "page_ids";

/// Key-value persistence for client state
pub trait StateStore {
    /// Value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read.
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value under `key`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn save(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Drop `key`; absent keys are ignored
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Last saved search filter
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the entry cannot be read or decoded.
    fn load_filter(&self) -> Result<Option<SearchQuery>, StoreError> {
        self.load(SEARCH_FILTER_KEY)?
            .map(|v| {
                serde_json::from_value(v)
                    .map_err(|e| StoreError::serialization(SEARCH_FILTER_KEY, e))
            })
            .transpose()
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the entry cannot be encoded or written.
    fn save_filter(&mut self, filter: &SearchQuery) -> Result<(), StoreError> {
        let value = serde_json::to_value(filter)
            .map_err(|e| StoreError::serialization(SEARCH_FILTER_KEY, e))?;
        self.save(SEARCH_FILTER_KEY, value)
    }

    /// Ids of the last result page, empty when none were saved
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the entry cannot be read or decoded.
    fn load_page_ids(&self) -> Result<Vec<u64>, StoreError> {
        match self.load(PAGE_IDS_KEY)? {
            Some(v) => {
                serde_json::from_value(v).map_err(|e| StoreError::serialization(PAGE_IDS_KEY, e))
            }
            None => Ok(Vec::new()),
        }
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the entry cannot be written.
    fn save_page_ids(&mut self, ids: &[u64]) -> Result<(), StoreError> {
        self.save(PAGE_IDS_KEY, Value::from(ids.to_vec()))
    }
}
