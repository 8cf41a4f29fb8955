//! Error types for local state persistence

use std::io;
use thiserror::Error;

/// Errors while reading or writing persisted client state
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The state document or an entry in it is not valid JSON for its key
    #[error("Serialization error for '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// No data directory could be determined for the default location
    #[error("Could not determine a data directory for client state")]
    NoDataDir,
}

impl StoreError {
    pub(crate) fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            key: key.into(),
            source,
        }
    }
}
