//! Errors raised by local record mutations
//!
//! These are validation failures detected before any request leaves the
//! client. Every mutation that returns one of these leaves the record
//! unchanged.

use thiserror::Error;

/// Record mutation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Star rating outside 0..=5
    #[error("Invalid rating {0}: stars must be between 0 and 5")]
    InvalidRating(i64),

    /// Tag is already present on the record
    #[error("Tag '{0}' already exists")]
    DuplicateTag(String),

    /// Empty tags are never accepted
    #[error("Cannot use empty tag")]
    EmptyTag,
}
