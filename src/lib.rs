//! filedb-client - A client for the FileDb media catalog
//!
//! This library talks to a FileDb server over its JSON API: it searches and
//! pages through files, edits their tags and ratings with minimal updates,
//! and puts collections in order using their `colindex:N` tags.

use thiserror::Error;

pub mod api;
pub mod cli;
pub mod collection;
pub mod commands;
pub mod config;
pub mod output;
pub mod record;
pub mod session;
pub mod store;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum FdbError {
    /// Server, transport or request error
    #[error(transparent)]
    Api(#[from] api::ApiError),
    /// Error from a page session
    #[error(transparent)]
    Session(#[from] session::SessionError),
    /// Invalid local edit
    #[error(transparent)]
    Record(#[from] record::RecordError),
    /// Collection could not be loaded or ordered
    #[error(transparent)]
    Collection(#[from] collection::LoadError),
    /// Saved state could not be read or written
    #[error("State error: {0}")]
    Store(#[from] store::StoreError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
