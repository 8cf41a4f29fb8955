//! Collection index
//!
//! Lists every collection named in the tag vocabulary with its member count.
//! Counts come from assembling each collection, so a collection whose
//! ordering tags are broken is listed without a count instead of failing the
//! whole index.

use super::Result;
use crate::api::FileDbApi;
use crate::collection::{self, CollectionNamespace};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    pub name: String,
    /// `None` when the collection could not be loaded
    pub members: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct CollectionIndex {
    entries: Vec<CollectionEntry>,
}

impl CollectionIndex {
    /// Build the index from the server's vocabulary
    ///
    /// # Errors
    ///
    /// Returns an error if the tag vocabulary cannot be fetched.
    pub async fn load<A>(api: &A) -> Result<Self>
    where
        A: FileDbApi + ?Sized,
    {
        let vocabulary = api.list_tags().await?;
        let mut entries = Vec::new();
        for name in collection::collection_names(&vocabulary) {
            let members =
                match collection::load_collection(api, name, CollectionNamespace::Collection).await {
                    Ok(records) => Some(records.len()),
                    Err(e) => {
                        warn!(collection = name, error = %e, "failed to count collection");
                        None
                    }
                };
            entries.push(CollectionEntry {
                name: name.to_string(),
                members,
            });
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
