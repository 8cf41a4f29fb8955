//! Error types for page sessions

use crate::api::ApiError;
use crate::collection::LoadError;
use crate::record::RecordError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors raised by page sessions
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Collection(#[from] LoadError),

    /// Toggled a tag that is neither on the file nor in the vocabulary
    #[error("Unknown tag '{0}'")]
    UnknownTag(String),

    /// The file carries no tag in the requested namespace
    #[error("File {0} is not part of a {1}")]
    NoCollection(u64, &'static str),

    /// The loaded collection does not contain the current file
    #[error("File {0} doesn't exist in collection '{1}'")]
    NotInCollection(u64, String),
}
