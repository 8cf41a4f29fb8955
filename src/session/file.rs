//! File detail session
//!
//! [`FileSession`] holds one record together with the global tag vocabulary.
//! Edits are staged first: every known tag carries a [`PendingChange`], and
//! nothing reaches the server until [`FileSession::submit`] sends the diff
//! between the record and its edited copy.
//!
//! The session can also step through the record's collection, or through the
//! page of results saved by the last search.

use super::{Result, SessionError};
use crate::api::{FileDbApi, UpdateRequest};
use crate::collection::{self, CollectionCursor, CollectionNamespace};
use crate::record::{Record, RecordError};
use crate::store::StateStore;
use tracing::{debug, info};

/// Staged edit of one tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingChange {
    #[default]
    Unchanged,
    /// Will be added to the file
    PendingAdd,
    /// Will be removed from the file
    PendingRemove,
}

/// A tag of the vocabulary as seen from the current file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagState {
    pub tag: String,
    /// Whether the record carries it right now
    pub on_file: bool,
    pub pending: PendingChange,
}

/// Direction for record navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Detail view of one file
pub struct FileSession<'a, A: ?Sized> {
    api: &'a A,
    record: Record,
    vocabulary: Vec<String>,
    tags: Vec<TagState>,
    pending_stars: Option<u8>,
    collection: Option<CollectionCursor>,
}

impl<'a, A> FileSession<'a, A>
where
    A: FileDbApi + ?Sized,
{
    /// Load file `id` and the tag vocabulary
    ///
    /// `touch` updates the file's last-viewed time on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    pub async fn open(api: &'a A, id: u64, touch: bool) -> Result<Self> {
        let record = api.get_file(id, touch).await?;
        let vocabulary = api.list_tags().await?;
        Ok(Self::with_record(api, record, vocabulary))
    }

    /// Session over an already loaded record
    #[must_use]
    pub fn with_record(api: &'a A, record: Record, vocabulary: Vec<String>) -> Self {
        let tags = tag_states(&record, &vocabulary);
        Self {
            api,
            record,
            vocabulary,
            tags,
            pending_stars: None,
            collection: None,
        }
    }

    #[must_use]
    pub const fn record(&self) -> &Record {
        &self.record
    }

    /// Every known tag with its staged change
    #[must_use]
    pub fn tags(&self) -> &[TagState] {
        &self.tags
    }

    #[must_use]
    pub fn pending(&self, tag: &str) -> PendingChange {
        self.tags
            .iter()
            .find(|t| t.tag == tag)
            .map_or(PendingChange::Unchanged, |t| t.pending)
    }

    /// `true` when an edit is staged
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_stars.is_some()
            || self.tags.iter().any(|t| t.pending != PendingChange::Unchanged)
    }

    #[must_use]
    pub const fn collection(&self) -> Option<&CollectionCursor> {
        self.collection.as_ref()
    }

    /// Flip the staged change of a known tag
    ///
    /// A tag on the file toggles between unchanged and pending removal; any
    /// other tag toggles between unchanged and pending addition.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownTag` if the tag is neither on the file
    /// nor in the vocabulary.
    pub fn toggle(&mut self, tag: &str) -> Result<PendingChange> {
        let state = self
            .tags
            .iter_mut()
            .find(|t| t.tag == tag)
            .ok_or_else(|| SessionError::UnknownTag(tag.to_string()))?;
        state.pending = match (state.on_file, state.pending) {
            (true, PendingChange::Unchanged) => PendingChange::PendingRemove,
            (false, PendingChange::Unchanged) => PendingChange::PendingAdd,
            _ => PendingChange::Unchanged,
        };
        Ok(state.pending)
    }

    /// Stage adding `tag`, which may be new to the vocabulary
    ///
    /// Re-adding a tag staged for removal cancels the removal.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::EmptyTag` for an empty tag and
    /// `RecordError::DuplicateTag` if the file already carries it.
    pub fn stage_add(&mut self, tag: &str) -> Result<()> {
        if tag.is_empty() {
            return Err(RecordError::EmptyTag.into());
        }
        match self.tags.iter_mut().find(|t| t.tag == tag) {
            Some(state) if state.on_file => {
                if state.pending != PendingChange::PendingRemove {
                    return Err(RecordError::DuplicateTag(tag.to_string()).into());
                }
                state.pending = PendingChange::Unchanged;
            }
            Some(state) => state.pending = PendingChange::PendingAdd,
            None => self.tags.push(TagState {
                tag: tag.to_string(),
                on_file: false,
                pending: PendingChange::PendingAdd,
            }),
        }
        Ok(())
    }

    /// Stage removing `tag`; a tag not on the file is left alone
    pub fn stage_remove(&mut self, tag: &str) {
        if let Some(state) = self.tags.iter_mut().find(|t| t.tag == tag) {
            state.pending = if state.on_file {
                PendingChange::PendingRemove
            } else {
                PendingChange::Unchanged
            };
        }
    }

    /// Stage a new star rating
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidRating` unless `stars` is in `0..=5`.
    pub fn set_stars(&mut self, stars: i64) -> Result<()> {
        let mut probe = self.record.clone();
        probe.set_stars(stars)?;
        self.pending_stars = Some(probe.stars());
        Ok(())
    }

    /// Drop every staged edit
    pub fn discard(&mut self) {
        self.pending_stars = None;
        for state in &mut self.tags {
            state.pending = PendingChange::Unchanged;
        }
    }

    /// The edited copy of the record and the update it amounts to
    ///
    /// The session's record is not modified.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if a staged edit is invalid for the record.
    pub fn apply(&self) -> Result<(Record, UpdateRequest)> {
        let mut edited = self.record.clone();
        for state in &self.tags {
            match state.pending {
                PendingChange::PendingAdd => edited.add_tag(state.tag.clone())?,
                PendingChange::PendingRemove => edited.remove_tag(&state.tag),
                PendingChange::Unchanged => {}
            }
        }
        if let Some(stars) = self.pending_stars {
            edited.set_stars(i64::from(stars))?;
        }
        let update = UpdateRequest::diff(&self.record, &edited);
        Ok((edited, update))
    }

    /// Send staged edits to the server
    ///
    /// On success the edited copy becomes the session's record and every tag
    /// is back to unchanged; on failure the staged edits are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if an edit is invalid or the update fails.
    pub async fn submit(&mut self) -> Result<UpdateRequest> {
        let (edited, _) = self.apply()?;
        let sent = self.api.update_record(&edited, Some(&self.record)).await?;
        info!(id = sent.id, "file updated");
        self.set_record(edited);
        Ok(sent)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mark_viewed(&self) -> Result<()> {
        self.api.mark_viewed(self.record.id()).await?;
        Ok(())
    }

    /// MIME type of the file's content
    ///
    /// # Errors
    ///
    /// Returns an error if the content probe fails.
    pub async fn content_type(&self) -> Result<String> {
        Ok(self.api.content_type(self.record.id()).await?)
    }

    /// Load the collection the file belongs to and position on the file
    ///
    /// The first tag in `namespace` names the collection. The previous
    /// collection is only replaced once the new one has loaded and contains
    /// the file.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoCollection` if the file has no such tag,
    /// `SessionError::Collection` if loading or ordering fails, and
    /// `SessionError::NotInCollection` if the file is missing from the result.
    pub async fn load_collection(
        &mut self,
        namespace: CollectionNamespace,
    ) -> Result<&CollectionCursor> {
        let id = self.record.id();
        let name = self
            .record
            .tags_in(namespace.prefix())
            .next()
            .ok_or(SessionError::NoCollection(id, namespace.prefix()))?
            .to_string();

        let members = collection::load_collection(self.api, &name, namespace).await?;
        let cursor = CollectionCursor::at_record(members, id)
            .ok_or_else(|| SessionError::NotInCollection(id, name.clone()))?;
        debug!(collection = %name, position = cursor.position(), len = cursor.len(), "collection loaded");
        Ok(self.collection.insert(cursor))
    }

    /// Switch to the neighbouring member of the loaded collection
    ///
    /// Returns `None` at either end or when no collection is loaded. Staged
    /// edits are discarded.
    pub fn step_collection(&mut self, direction: Direction) -> Option<&Record> {
        let cursor = self.collection.as_mut()?;
        let next = match direction {
            Direction::Next => cursor.next(),
            Direction::Prev => cursor.prev(),
        }?
        .clone();
        self.set_record(next);
        Some(&self.record)
    }

    /// Id of the neighbouring file on the last saved result page
    ///
    /// # Errors
    ///
    /// Returns an error if the saved page cannot be read.
    pub fn page_neighbor<S>(&self, store: &S, direction: Direction) -> Result<Option<u64>>
    where
        S: StateStore + ?Sized,
    {
        let ids = store.load_page_ids()?;
        Ok(neighbor(&ids, self.record.id(), direction))
    }

    fn set_record(&mut self, record: Record) {
        self.tags = tag_states(&record, &self.vocabulary);
        self.record = record;
        self.pending_stars = None;
    }
}

/// Vocabulary order first, then file tags missing from the vocabulary
fn tag_states(record: &Record, vocabulary: &[String]) -> Vec<TagState> {
    let mut states: Vec<TagState> = vocabulary
        .iter()
        .map(|tag| TagState {
            tag: tag.clone(),
            on_file: record.has_tag(tag),
            pending: PendingChange::Unchanged,
        })
        .collect();
    for tag in record.tags() {
        if !vocabulary.contains(tag) {
            states.push(TagState {
                tag: tag.clone(),
                on_file: true,
                pending: PendingChange::Unchanged,
            });
        }
    }
    states
}

/// Neighbour of `current` in `ids`; `None` at either end or if absent
#[must_use]
pub fn neighbor(ids: &[u64], current: u64, direction: Direction) -> Option<u64> {
    let position = ids.iter().position(|&id| id == current)?;
    match direction {
        Direction::Next => ids.get(position + 1).copied(),
        Direction::Prev => position.checked_sub(1).and_then(|p| ids.get(p).copied()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::collection::CollectionError;
    use crate::store::MemoryStateStore;
    use crate::testing::MockApi;

    fn cat_picture() -> Record {
        Record::new(7, "/media/cat.png").with_tags(["cats", "author:ann"])
    }

    fn server() -> MockApi {
        let api = MockApi::with_files([cat_picture()]);
        api.state().tags.push("dogs".into());
        api
    }

    #[tokio::test]
    async fn test_open_lists_vocabulary_with_file_membership() {
        let api = server();
        let session = FileSession::open(&api, 7, true).await.unwrap();

        let on_file: Vec<(&str, bool)> = session
            .tags()
            .iter()
            .map(|t| (t.tag.as_str(), t.on_file))
            .collect();
        assert_eq!(on_file, [("cats", true), ("author:ann", true), ("dogs", false)]);
        assert_eq!(api.state().touched, [7]);
    }

    #[tokio::test]
    async fn test_toggle_cycles_back_to_unchanged() {
        let api = server();
        let mut session = FileSession::open(&api, 7, false).await.unwrap();

        assert_eq!(session.toggle("cats").unwrap(), PendingChange::PendingRemove);
        assert_eq!(session.toggle("cats").unwrap(), PendingChange::Unchanged);
        assert_eq!(session.toggle("dogs").unwrap(), PendingChange::PendingAdd);
        assert_eq!(session.toggle("dogs").unwrap(), PendingChange::Unchanged);
        assert!(!session.has_pending());
        assert!(matches!(session.toggle("birds"), Err(SessionError::UnknownTag(_))));
    }

    #[tokio::test]
    async fn test_apply_leaves_record_untouched() {
        let api = server();
        let mut session = FileSession::open(&api, 7, false).await.unwrap();
        session.toggle("cats").unwrap();
        session.toggle("dogs").unwrap();
        session.set_stars(3).unwrap();

        let (edited, update) = session.apply().unwrap();
        assert_eq!(edited.tags(), ["author:ann", "dogs"]);
        assert_eq!(edited.stars(), 3);
        assert_eq!(update.add_tags, ["dogs"]);
        assert_eq!(update.remove_tags, ["cats"]);
        assert_eq!(update.stars, Some(3));
        assert!(session.record().has_tag("cats"));
        assert_eq!(session.record().stars(), 0);
    }

    #[tokio::test]
    async fn test_submit_sends_diff_and_resets() {
        let api = server();
        let mut session = FileSession::open(&api, 7, false).await.unwrap();
        session.stage_add("birds").unwrap();
        session.stage_remove("author:ann");

        let sent = session.submit().await.unwrap();
        assert_eq!(sent.add_tags, ["birds"]);
        assert_eq!(sent.remove_tags, ["author:ann"]);
        assert_eq!(sent.stars, None);
        assert!(!session.has_pending());
        assert!(session.record().has_tag("birds"));

        let state = api.state();
        assert_eq!(state.updates.len(), 1);
        assert!(state.files[&7].has_tag("birds"));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_staged_edits() {
        let api = server();
        let mut session = FileSession::open(&api, 7, false).await.unwrap();
        session.toggle("dogs").unwrap();
        api.fail_with(400, "Tag 'dogs' does not exist");

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, SessionError::Api(ApiError::Server { code: 400, .. })));
        assert_eq!(session.pending("dogs"), PendingChange::PendingAdd);
        assert!(!session.record().has_tag("dogs"));
    }

    #[tokio::test]
    async fn test_invalid_edits_are_rejected_locally() {
        let api = server();
        let mut session = FileSession::open(&api, 7, false).await.unwrap();

        assert!(matches!(
            session.set_stars(6),
            Err(SessionError::Record(RecordError::InvalidRating(6)))
        ));
        assert!(matches!(
            session.stage_add("cats"),
            Err(SessionError::Record(RecordError::DuplicateTag(_)))
        ));
        assert!(matches!(
            session.stage_add(""),
            Err(SessionError::Record(RecordError::EmptyTag))
        ));
        assert!(!session.has_pending());
        assert!(api.state().updates.is_empty());
    }

    #[tokio::test]
    async fn test_stage_add_cancels_pending_removal() {
        let api = server();
        let mut session = FileSession::open(&api, 7, false).await.unwrap();
        session.stage_remove("cats");
        session.stage_add("cats").unwrap();
        assert_eq!(session.pending("cats"), PendingChange::Unchanged);
    }

    fn trip() -> MockApi {
        MockApi::with_files([
            Record::new(1, "c.png").with_tags(["collection:trip", "colindex:2"]),
            Record::new(2, "b.png").with_tags(["collection:trip"]),
            Record::new(3, "a.png").with_tags(["collection:trip", "colindex:0"]),
        ])
    }

    #[tokio::test]
    async fn test_collection_navigation() {
        let api = trip();
        let mut session = FileSession::open(&api, 2, false).await.unwrap();
        let cursor = session.load_collection(CollectionNamespace::Collection).await.unwrap();
        let order: Vec<u64> = cursor.members().iter().map(Record::id).collect();
        assert_eq!(order, [3, 2, 1]);
        assert_eq!(cursor.position(), 1);

        assert_eq!(session.step_collection(Direction::Next).map(Record::id), Some(1));
        assert_eq!(session.record().id(), 1);
        assert!(session.step_collection(Direction::Next).is_none());
        assert_eq!(session.step_collection(Direction::Prev).map(Record::id), Some(2));
        assert_eq!(session.step_collection(Direction::Prev).map(Record::id), Some(3));
        assert!(session.step_collection(Direction::Prev).is_none());
    }

    #[tokio::test]
    async fn test_broken_collection_keeps_previous_cursor() {
        let api = trip();
        let mut session = FileSession::open(&api, 2, false).await.unwrap();
        session.load_collection(CollectionNamespace::Collection).await.unwrap();

        api.state()
            .files
            .get_mut(&2)
            .unwrap()
            .add_tag("colindex:0")
            .unwrap();
        let err = session
            .load_collection(CollectionNamespace::Collection)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Collection(collection::LoadError::Order(CollectionError::DuplicateIndex(0)))
        ));
        assert_eq!(session.collection().map(CollectionCursor::len), Some(3));
    }

    #[tokio::test]
    async fn test_file_without_collection() {
        let api = server();
        let mut session = FileSession::open(&api, 7, false).await.unwrap();
        assert!(matches!(
            session.load_collection(CollectionNamespace::Collection).await,
            Err(SessionError::NoCollection(7, "collection"))
        ));
        let cursor = session.load_collection(CollectionNamespace::Author).await.unwrap();
        assert_eq!(cursor.len(), 1);
    }

    #[tokio::test]
    async fn test_page_neighbor_from_saved_ids() {
        let api = server();
        let session = FileSession::open(&api, 7, false).await.unwrap();
        let mut store = MemoryStateStore::new();
        store.save_page_ids(&[4, 7, 9]).unwrap();

        assert_eq!(session.page_neighbor(&store, Direction::Next).unwrap(), Some(9));
        assert_eq!(session.page_neighbor(&store, Direction::Prev).unwrap(), Some(4));
    }

    #[test]
    fn test_neighbor_bounds() {
        assert_eq!(neighbor(&[1, 2], 1, Direction::Prev), None);
        assert_eq!(neighbor(&[1, 2], 2, Direction::Next), None);
        assert_eq!(neighbor(&[1, 2], 5, Direction::Next), None);
        assert_eq!(neighbor(&[], 1, Direction::Next), None);
    }
}
