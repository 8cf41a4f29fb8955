//! Tag namespaces
//!
//! FileDb tags are free-form strings. A tag of the form `ns:value` belongs to
//! namespace `ns`; three namespaces carry meaning for the client:
//!
//! - `author:<name>`: the record's author, also usable as a collection
//! - `collection:<name>`: membership in a named collection
//! - `colindex:<n>`: explicit position inside the record's collection
//!
//! Any other namespace is treated as generic metadata.

use std::fmt;

/// Namespace prefix for authors
pub const AUTHOR: &str = "author";
/// Namespace prefix for collections
pub const COLLECTION: &str = "collection";
/// Namespace prefix for collection positions
pub const COLINDEX: &str = "colindex";

/// Classified view of a single tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind<'a> {
    /// Tag without a namespace
    Plain(&'a str),
    /// `author:<name>`
    Author(&'a str),
    /// `collection:<name>`
    Collection(&'a str),
    /// `colindex:<raw value>`, not yet parsed
    ColIndex(&'a str),
    /// Any other `ns:value`
    Metadata { namespace: &'a str, value: &'a str },
}

impl<'a> TagKind<'a> {
    /// Classify a tag by its namespace
    #[must_use]
    pub fn parse(tag: &'a str) -> Self {
        match split_namespace(tag) {
            None => Self::Plain(tag),
            Some((AUTHOR, value)) => Self::Author(value),
            Some((COLLECTION, value)) => Self::Collection(value),
            Some((COLINDEX, value)) => Self::ColIndex(value),
            Some((namespace, value)) => Self::Metadata { namespace, value },
        }
    }

    /// Text shown for the tag: the value part for namespaced tags
    #[must_use]
    pub const fn display_value(&self) -> &'a str {
        match self {
            Self::Plain(v)
            | Self::Author(v)
            | Self::Collection(v)
            | Self::ColIndex(v)
            | Self::Metadata { value: v, .. } => *v,
        }
    }

    #[must_use]
    pub const fn is_namespaced(&self) -> bool {
        !matches!(self, Self::Plain(_))
    }
}

impl fmt::Display for TagKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(v) => write!(f, "{v}"),
            Self::Author(v) => write!(f, "{AUTHOR}:{v}"),
            Self::Collection(v) => write!(f, "{COLLECTION}:{v}"),
            Self::ColIndex(v) => write!(f, "{COLINDEX}:{v}"),
            Self::Metadata { namespace, value } => write!(f, "{namespace}:{value}"),
        }
    }
}

/// Split `ns:value` at the first colon
#[must_use]
pub fn split_namespace(tag: &str) -> Option<(&str, &str)> {
    tag.split_once(':')
}

/// Build a namespaced tag
#[must_use]
pub fn namespaced(namespace: &str, value: &str) -> String {
    format!("{namespace}:{value}")
}

/// Normalize user-entered tag filter input: trimmed, lowercased, empties dropped
#[must_use]
pub fn normalize_filter_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
