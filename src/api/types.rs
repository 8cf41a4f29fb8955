//! Wire types for the FileDb v1 API
//!
//! Every response body is an envelope `{"Code": <int>, "Data": <any>}`. A
//! `Code` of 200 means success and `Data` holds the payload; any other code
//! is a failure and `Data` is a human-readable message.
//!
//! # Examples
//!
//! ```
//! use filedb_client::api::Envelope;
//!
//! let ok: Envelope = serde_json::from_str(r#"{"Code":200,"Data":["a","b"]}"#).unwrap();
//! let tags: Vec<String> = ok.into_data().unwrap();
//! assert_eq!(tags, ["a", "b"]);
//!
//! let err: Envelope = serde_json::from_str(r#"{"Code":404,"Data":"file not found"}"#).unwrap();
//! assert!(err.into_ack().is_err());
//! ```

use super::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// `Code` value of a successful envelope
pub const CODE_OK: i64 = 200;

/// Response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    /// Decode the payload of a successful envelope
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` for a failed envelope and `ApiError::Decode`
    /// if the payload does not match `T`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let data = self.into_ok_value()?;
        Ok(serde_json::from_value(data)?)
    }

    /// Accept a successful envelope, ignoring its payload
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` for a failed envelope.
    pub fn into_ack(self) -> Result<(), ApiError> {
        self.into_ok_value().map(|_| ())
    }

    fn into_ok_value(self) -> Result<Value, ApiError> {
        if self.is_ok() {
            return Ok(self.data);
        }
        let message = match self.data {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        Err(ApiError::Server { code: self.code, message })
    }
}

/// Global tag vocabulary as returned by `/api/1/tags`
///
/// The server sends an object keyed by tag id; older builds sent a plain list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagList {
    ById(BTreeMap<String, String>),
    List(Vec<String>),
}

impl TagList {
    /// Tags ordered by numeric id (list order for the list form)
    #[must_use]
    pub fn into_tags(self) -> Vec<String> {
        match self {
            Self::List(tags) => tags,
            Self::ById(map) => {
                let mut entries: Vec<(String, String)> = map.into_iter().collect();
                entries.sort_by(|(a, _), (b, _)| match (a.parse::<u64>(), b.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    _ => a.cmp(b),
                });
                entries.into_iter().map(|(_, tag)| tag).collect()
            }
        }
    }
}

/// One version triple with its display string and code name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Version {
    pub string: String,
    pub code_name: String,
    pub major: i64,
    pub minor: i64,
    pub revision: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, Value>>,
}

/// Server build version next to the on-disk database version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionInfo {
    pub file_db: Version,
    pub database: Version,
}

/// How well the database version matches the server build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCompat {
    Supported,
    /// Minor versions differ
    Outdated,
    /// Major versions differ
    Unsupported,
}

impl VersionInfo {
    #[must_use]
    pub const fn compatibility(&self) -> VersionCompat {
        if self.file_db.major != self.database.major {
            VersionCompat::Unsupported
        } else if self.file_db.minor != self.database.minor {
            VersionCompat::Outdated
        } else {
            VersionCompat::Supported
        }
    }
}

/// Payload of `/api/1/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusInfo {
    pub version_info: VersionInfo,
    #[serde(default)]
    pub in_safe_mode: bool,
}
