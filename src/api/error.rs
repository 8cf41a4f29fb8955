//! API error types
//!
//! This module defines every failure a FileDb request can end in.
//!
//! # Error Types
//!
//! - **`Server`**: the server answered with an envelope whose `Code` is not 200;
//!   `message` is the envelope's `Data` string, verbatim
//! - **`Transport`**: the request never produced a response (connection, TLS, ...)
//! - **`Decode`**: the response body was not the JSON we expected
//! - **`EmptyResult`**: a lookup that must return a record returned none
//! - **`MissingContentType`**: a content probe came back without a `Content-Type`
//! - **`InvalidQuery`**: the request was rejected locally before being sent
//! - **`InvalidCookie`**: the configured account cookie is not a valid header value
//!
//! The CLI shows these messages to the user and aborts the current action;
//! nothing is retried.

use thiserror::Error;

/// Errors from FileDb API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// Envelope with a non-200 `Code`
    #[error("Request failed with {code}: {message}")]
    Server { code: i64, message: String },

    /// HTTP transport failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Error while decoding response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A lookup returned an empty list
    #[error("Expected '{0}' to return a file, but it returned an empty list")]
    EmptyResult(String),

    /// HEAD probe without a Content-Type header
    #[error("Expected content of file {0} to have a 'content-type', but it didn't")]
    MissingContentType(u64),

    /// Request rejected locally
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Account cookie cannot be sent as a header
    #[error("Invalid account cookie: {0}")]
    InvalidCookie(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    /// Envelope code for server-side failures
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Server { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// `true` when the server reported the resource as missing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Server { code: 404, .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
