//! Cataloged file records
//!
//! A [`Record`] is one file known to the FileDb server: its id, path, tags,
//! star rating, last-viewed time and size. Records arrive from the API in
//! PascalCase JSON and are mutated locally before being sent back as a
//! minimal update (see [`crate::api::UpdateRequest`]).
//!
//! Local mutations validate eagerly: an out-of-range rating or a duplicate
//! tag is rejected here, before any request is built.
//!
//! # Examples
//!
//! ```
//! use filedb_client::record::Record;
//!
//! let original = Record::new(7, "/media/a.png").with_tags(["cats"]);
//! let mut edited = original.clone();
//! edited.add_tag("dogs").unwrap();
//! edited.set_stars(4).unwrap();
//!
//! assert_eq!(original.tags(), ["cats"]);
//! assert_eq!(edited.tags(), ["cats", "dogs"]);
//! ```

pub mod error;
pub mod tags;

pub use error::RecordError;
pub use tags::TagKind;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Highest star rating the server accepts
pub const MAX_STARS: u8 = 5;

/// Last-viewed value the server reports for files never opened
const NEVER_VIEWED: &str = "0001-01-01T00:00:00Z";

/// A cataloged file as exposed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    id: u64,
    path: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    tags: Vec<String>,
    #[serde(default = "never_viewed")]
    last_viewed: DateTime<Utc>,
    #[serde(default)]
    stars: u8,
    #[serde(default)]
    size: u64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn never_viewed() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(NEVER_VIEWED)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

impl Record {
    /// Create a record with no tags, no rating and no view history
    #[must_use]
    pub fn new(id: u64, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            tags: Vec::new(),
            last_viewed: never_viewed(),
            stars: 0,
            size: 0,
        }
    }

    /// Replace the tag list (builder style, no validation)
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub const fn with_last_viewed(mut self, at: DateTime<Utc>) -> Self {
        self.last_viewed = at;
        self
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub const fn stars(&self) -> u8 {
        self.stars
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn last_viewed(&self) -> DateTime<Utc> {
        self.last_viewed
    }

    /// Whether the server has never recorded a view of this file
    #[must_use]
    pub fn is_never_viewed(&self) -> bool {
        self.last_viewed == never_viewed()
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Add a tag
    ///
    /// # Errors
    ///
    /// Returns `RecordError::EmptyTag` for an empty tag and
    /// `RecordError::DuplicateTag` if the record already carries it.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> Result<(), RecordError> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(RecordError::EmptyTag);
        }
        if self.has_tag(&tag) {
            return Err(RecordError::DuplicateTag(tag));
        }
        self.tags.push(tag);
        Ok(())
    }

    /// Remove a tag; absent tags are ignored
    pub fn remove_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        }
    }

    /// Set the star rating
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidRating` unless `stars` is in `0..=5`.
    pub fn set_stars(&mut self, stars: i64) -> Result<(), RecordError> {
        match u8::try_from(stars) {
            Ok(v) if v <= MAX_STARS => {
                self.stars = v;
                Ok(())
            }
            _ => Err(RecordError::InvalidRating(stars)),
        }
    }

    /// Values of all tags in `namespace`, in tag order
    #[must_use]
    pub fn tags_in<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tags.iter().filter_map(move |t| match tags::split_namespace(t) {
            Some((ns, value)) if ns == namespace => Some(value),
            _ => None,
        })
    }

    /// URI of the file content relative to the server root
    #[must_use]
    pub fn content_uri(&self, touch: bool) -> String {
        content_uri(self.id, touch)
    }
}

/// URI of a file's content relative to the server root
#[must_use]
pub fn content_uri(id: u64, touch: bool) -> String {
    format!("/api/1/content?id={id}&update={touch}")
}
