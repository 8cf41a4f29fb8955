//! Search query composition
//!
//! [`SearchQuery`] mirrors the filters `/api/1/search` accepts. It turns into
//! a list of query-string pairs for the request and into JSON for the saved
//! "last search" entry, using the same PascalCase field names the web client
//! stored.

use super::error::ApiError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest page the server will return
pub const MAX_COUNT: u32 = 200;

/// Page size used when none is configured
pub const DEFAULT_COUNT: u32 = 50;

/// Result ordering understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMethod {
    #[default]
    None,
    Size,
    Stars,
    /// Last viewed time
    Date,
    Id,
    Random,
}

impl SortMethod {
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Size,
        Self::Stars,
        Self::Date,
        Self::Id,
        Self::Random,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Size => "size",
            Self::Stars => "stars",
            Self::Date => "date",
            Self::Id => "id",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for SortMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                ApiError::InvalidQuery(format!(
                    "Invalid sort method '{s}', must be one of 'none', 'size', 'stars', 'date', 'id' or 'random'"
                ))
            })
    }
}

/// Filters for a file search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchQuery {
    /// Substring the path must contain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Regex the path must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_re: Option<String>,
    /// Tags every result must carry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_whitelist: Vec<String>,
    /// Tags no result may carry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_blacklist: Vec<String>,
    /// Offset of the first result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortMethod>,
    #[serde(default)]
    pub sort_reverse: bool,
}

impl SearchQuery {
    /// Check the query before it is sent
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidQuery` if `count` is outside `1..=200` or
    /// `path_re` is not a valid regular expression.
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(count) = self.count {
            validate_count(count)?;
        }
        if let Some(re) = &self.path_re {
            Regex::new(re)
                .map_err(|e| ApiError::InvalidQuery(format!("Invalid path regex '{re}': {e}")))?;
        }
        Ok(())
    }

    /// Query-string pairs in the order the server documents them
    ///
    /// Absent and empty fields are left out; list fields repeat their key.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(path) = self.path.as_ref().filter(|p| !p.is_empty()) {
            pairs.push(("path", path.clone()));
        }
        if let Some(re) = self.path_re.as_ref().filter(|p| !p.is_empty()) {
            pairs.push(("path_re", re.clone()));
        }
        pairs.extend(self.tag_whitelist.iter().map(|t| ("tag_whitelist", t.clone())));
        pairs.extend(self.tag_blacklist.iter().map(|t| ("tag_blacklist", t.clone())));
        if let Some(count) = self.count {
            pairs.push(("count", count.to_string()));
        }
        if let Some(index) = self.index {
            pairs.push(("index", index.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if self.sort_reverse {
            pairs.push(("sort_reverse", "true".to_string()));
        }
        pairs
    }
}

/// Check a page size against the server's limits
///
/// # Errors
///
/// Returns `ApiError::InvalidQuery` unless `count` is in `1..=200`.
pub fn validate_count(count: u32) -> Result<(), ApiError> {
    if count == 0 {
        return Err(ApiError::InvalidQuery(format!(
            "Count must be greater than 0, was {count}"
        )));
    }
    if count > MAX_COUNT {
        return Err(ApiError::InvalidQuery(format!(
            "Count must be at most {MAX_COUNT}, was {count}"
        )));
    }
    Ok(())
}
