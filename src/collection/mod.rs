//! Collections of records
//!
//! A collection is not stored anywhere: it is every record carrying
//! `collection:<name>` (or `author:<name>`), fetched by a tag search and then
//! put in order by [`assemble`].
//!
//! [`CollectionCursor`] walks an assembled collection one record at a time,
//! which is how the file detail view moves to the previous or next member.

mod assemble;
pub mod error;

pub use assemble::assemble;
pub use error::CollectionError;

use crate::api::{ApiError, FileDbApi, SearchQuery};
use crate::record::tags::{self, AUTHOR, COLLECTION};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Tag namespace a collection is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionNamespace {
    /// `collection:<name>`
    #[default]
    Collection,
    /// `author:<name>`
    Author,
}

impl CollectionNamespace {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Collection => COLLECTION,
            Self::Author => AUTHOR,
        }
    }

    /// The tag every member of collection `name` carries
    #[must_use]
    pub fn tag_for(self, name: &str) -> String {
        tags::namespaced(self.prefix(), name)
    }
}

/// Failure while loading a collection from the server
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to get collection: {0}")]
    Api(#[from] ApiError),

    #[error("Failed to get collection: {0}")]
    Order(#[from] CollectionError),
}

/// Fetch every member of a collection and put them in order
///
/// # Errors
///
/// Returns `LoadError::Api` if the search fails and `LoadError::Order` if the
/// members' `colindex` tags are malformed or collide.
pub async fn load_collection<A>(
    api: &A,
    name: &str,
    namespace: CollectionNamespace,
) -> Result<Vec<Record>, LoadError>
where
    A: FileDbApi + ?Sized,
{
    let query = SearchQuery {
        tag_whitelist: vec![namespace.tag_for(name)],
        ..SearchQuery::default()
    };
    let members = api.search(&query).await?;
    debug!(collection = name, members = members.len(), "loaded collection members");
    Ok(assemble(members)?)
}

/// Names of all collections in a tag vocabulary, in vocabulary order
#[must_use]
pub fn collection_names(all_tags: &[String]) -> Vec<&str> {
    all_tags
        .iter()
        .filter_map(|t| match tags::split_namespace(t) {
            Some((COLLECTION, name)) => Some(name),
            _ => None,
        })
        .collect()
}

/// Name of the first collection a record belongs to
#[must_use]
pub fn collection_name_of(record: &Record) -> Option<&str> {
    record.tags_in(COLLECTION).next()
}

/// Position within an assembled collection
#[derive(Debug, Clone)]
pub struct CollectionCursor {
    members: Vec<Record>,
    position: usize,
}

impl CollectionCursor {
    /// Cursor at the first member
    #[must_use]
    pub const fn new(members: Vec<Record>) -> Self {
        Self { members, position: 0 }
    }

    /// Cursor positioned on the member with id `record_id`
    ///
    /// Returns `None` if the record is not part of the collection.
    #[must_use]
    pub fn at_record(members: Vec<Record>, record_id: u64) -> Option<Self> {
        let position = members.iter().position(|r| r.id() == record_id)?;
        Some(Self { members, position })
    }

    #[must_use]
    pub fn current(&self) -> Option<&Record> {
        self.members.get(self.position)
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn members(&self) -> &[Record] {
        &self.members
    }

    /// Move to the next member, staying put at the end
    pub fn next(&mut self) -> Option<&Record> {
        if self.position + 1 >= self.members.len() {
            return None;
        }
        self.position += 1;
        self.current()
    }

    /// Move to the previous member, staying put at the start
    pub fn prev(&mut self) -> Option<&Record> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members() -> Vec<Record> {
        vec![Record::new(10, "a"), Record::new(20, "b"), Record::new(30, "c")]
    }

    #[test]
    fn test_namespace_tag() {
        assert_eq!(CollectionNamespace::Collection.tag_for("trip"), "collection:trip");
        assert_eq!(CollectionNamespace::Author.tag_for("bob"), "author:bob");
    }

    #[test]
    fn test_collection_names() {
        let tags: Vec<String> = ["cats", "collection:trip", "author:bob", "collection:zoo"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(collection_names(&tags), ["trip", "zoo"]);
    }

    #[test]
    fn test_collection_name_of() {
        let record = Record::new(1, "a").with_tags(["cats", "collection:trip", "collection:zoo"]);
        assert_eq!(collection_name_of(&record), Some("trip"));
        assert_eq!(collection_name_of(&Record::new(2, "b")), None);
    }

    #[test]
    fn test_cursor_at_record() {
        let cursor = CollectionCursor::at_record(members(), 20).unwrap();
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.current().map(Record::id), Some(20));
        assert!(CollectionCursor::at_record(members(), 99).is_none());
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut cursor = CollectionCursor::new(members());
        assert!(cursor.prev().is_none());
        assert_eq!(cursor.next().map(Record::id), Some(20));
        assert_eq!(cursor.next().map(Record::id), Some(30));
        assert!(cursor.next().is_none());
        assert_eq!(cursor.current().map(Record::id), Some(30));
        assert_eq!(cursor.prev().map(Record::id), Some(20));
    }

    #[test]
    fn test_empty_cursor() {
        let mut cursor = CollectionCursor::new(Vec::new());
        assert!(cursor.is_empty());
        assert!(cursor.current().is_none());
        assert!(cursor.next().is_none());
    }
}
