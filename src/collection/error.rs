//! Collection assembly errors

use thiserror::Error;

/// Errors that abort a collection assembly
///
/// Assembly is all-or-nothing: when one of these is returned no ordering was
/// produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    /// A `colindex` tag whose value is not a non-negative integer
    #[error("Expected colindex value to be a number, got '{value}' on record {record_id}")]
    Parse { record_id: u64, value: String },

    /// Two records (or two tags) claim the same slot
    #[error("Duplicate colindex: {0}")]
    DuplicateIndex(usize),
}
