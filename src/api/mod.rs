//! FileDb v1 API
//!
//! [`FileDbApi`] is the seam between the page sessions and the server.
//! [`FileDbClient`] implements it over HTTP; tests substitute an in-memory
//! fake.

pub mod client;
pub mod error;
pub mod query;
pub mod types;
pub mod update;

pub use client::FileDbClient;
pub use error::ApiError;
pub use query::{SearchQuery, SortMethod};
pub use types::{Envelope, StatusInfo, TagList, Version, VersionCompat, VersionInfo};
pub use update::UpdateRequest;

use crate::record::Record;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ApiError>;

/// Operations offered by a FileDb server
#[async_trait]
pub trait FileDbApi: Send + Sync {
    /// Fetch one file; `touch` also updates its last-viewed time
    ///
    /// # Errors
    ///
    /// Fails with the server's message, or `ApiError::EmptyResult` if the
    /// server returned no file.
    async fn get_file(&self, id: u64, touch: bool) -> Result<Record>;

    /// Run a search
    ///
    /// # Errors
    ///
    /// Fails locally with `ApiError::InvalidQuery` or with the server's message.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Record>>;

    /// Send a change set for one file
    ///
    /// # Errors
    ///
    /// Fails with the server's message.
    async fn update_file(&self, request: &UpdateRequest) -> Result<()>;

    /// Global tag vocabulary in id order
    ///
    /// # Errors
    ///
    /// Fails with the server's message.
    async fn list_tags(&self) -> Result<Vec<String>>;

    /// # Errors
    ///
    /// Fails with the server's message, e.g. for a duplicate tag.
    async fn add_tag(&self, tag: &str) -> Result<()>;

    /// # Errors
    ///
    /// Fails with the server's message.
    async fn delete_tag(&self, tag: &str) -> Result<()>;

    /// # Errors
    ///
    /// Fails with the server's message.
    async fn mark_viewed(&self, id: u64) -> Result<()>;

    /// MIME type of a file's content, without touching it
    ///
    /// # Errors
    ///
    /// Fails if the probe is rejected or has no `Content-Type`.
    async fn content_type(&self, id: u64) -> Result<String>;

    /// # Errors
    ///
    /// Fails with the server's message.
    async fn status(&self) -> Result<StatusInfo>;

    /// # Errors
    ///
    /// Fails with the server's message.
    async fn delete_file(&self, id: u64) -> Result<()>;

    /// One file picked at random by the server
    ///
    /// # Errors
    ///
    /// Fails with the server's message, or `ApiError::EmptyResult` if the
    /// database is empty.
    async fn random_file(&self) -> Result<Record> {
        let query = SearchQuery {
            sort: Some(SortMethod::Random),
            count: Some(1),
            ..SearchQuery::default()
        };
        self.search(&query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::EmptyResult("/api/1/search?sort=random&count=1".into()))
    }

    /// Persist `new` by sending only what differs from `old`
    ///
    /// Without `old`, the current server copy is fetched first (not touching
    /// its last-viewed time). Returns the request that was sent.
    ///
    /// # Errors
    ///
    /// Fails if fetching the old copy or the update itself fails.
    async fn update_record(&self, new: &Record, old: Option<&Record>) -> Result<UpdateRequest> {
        let request = match old {
            Some(old) => UpdateRequest::diff(old, new),
            None => {
                let old = self.get_file(new.id(), false).await?;
                UpdateRequest::diff(&old, new)
            }
        };
        self.update_file(&request).await?;
        Ok(request)
    }
}
