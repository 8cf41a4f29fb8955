//! Paged search results
//!
//! A [`BrowseSession`] owns the current search filter and the page it
//! produced. Every fetched page is persisted together with its filter, so a
//! later `page next` or a detail view's previous/next navigation can pick up
//! where the last search left off.
//!
//! The saved filter's `index` is the offset of the page currently shown.

use super::Result;
use crate::api::query::{DEFAULT_COUNT, validate_count};
use crate::api::{FileDbApi, SearchQuery, SortMethod};
use crate::record::Record;
use crate::record::tags::normalize_filter_tags;
use crate::store::StateStore;
use tracing::debug;

/// Search listing with pagination
pub struct BrowseSession<'a, A: ?Sized, S: ?Sized> {
    api: &'a A,
    store: &'a mut S,
    filter: SearchQuery,
    page: Vec<Record>,
    /// Length of the page last fetched, possibly by an earlier session
    page_len: usize,
}

impl<'a, A, S> BrowseSession<'a, A, S>
where
    A: FileDbApi + ?Sized,
    S: StateStore + ?Sized,
{
    /// Fresh session with an empty filter and the given page size
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is outside `1..=200`.
    pub fn new(api: &'a A, store: &'a mut S, count: u32) -> Result<Self> {
        validate_count(count)?;
        let filter = SearchQuery {
            count: Some(count),
            ..SearchQuery::default()
        };
        Ok(Self {
            api,
            store,
            filter,
            page: Vec::new(),
            page_len: 0,
        })
    }

    /// Session continuing from the saved filter and page
    ///
    /// Falls back to an empty filter with `default_count` when nothing was
    /// saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved state cannot be read.
    pub fn restore(api: &'a A, store: &'a mut S, default_count: u32) -> Result<Self> {
        let mut filter = store.load_filter()?.unwrap_or_default();
        if filter.count.is_none() {
            filter.count = Some(default_count);
        }
        let page_len = store.load_page_ids()?.len();
        Ok(Self {
            api,
            store,
            filter,
            page: Vec::new(),
            page_len,
        })
    }

    #[must_use]
    pub const fn filter(&self) -> &SearchQuery {
        &self.filter
    }

    /// Records on the page fetched by this session
    #[must_use]
    pub fn page(&self) -> &[Record] {
        &self.page
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.filter.count.unwrap_or(DEFAULT_COUNT)
    }

    #[must_use]
    pub fn index(&self) -> u64 {
        self.filter.index.unwrap_or(0)
    }

    /// One-based number of the current page
    #[must_use]
    pub fn page_number(&self) -> u64 {
        self.index() / u64::from(self.count()) + 1
    }

    /// Tags every result must carry; trimmed, lowercased, empties dropped
    pub fn set_whitelist<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.filter.tag_whitelist = normalize_filter_tags(tags);
    }

    /// Tags no result may carry; trimmed, lowercased, empties dropped
    pub fn set_blacklist<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.filter.tag_blacklist = normalize_filter_tags(tags);
    }

    /// Path substring; an empty query clears it
    pub fn set_query(&mut self, query: Option<String>) {
        self.filter.path = query.filter(|q| !q.is_empty());
    }

    pub fn set_path_regex(&mut self, regex: Option<String>) {
        self.filter.path_re = regex.filter(|r| !r.is_empty());
    }

    pub fn set_sort(&mut self, method: SortMethod, reverse: bool) {
        self.filter.sort = Some(method);
        self.filter.sort_reverse = reverse;
    }

    /// # Errors
    ///
    /// Returns an error if `count` is outside `1..=200`; the current count is
    /// kept.
    pub fn set_count(&mut self, count: u32) -> Result<()> {
        validate_count(count)?;
        self.filter.count = Some(count);
        Ok(())
    }

    /// Start offset for the next fetch
    pub fn set_index(&mut self, index: u64) {
        self.filter.index = Some(index);
    }

    /// Fetch the first page of the current filter
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails or the page cannot be saved.
    pub async fn refresh(&mut self) -> Result<&[Record]> {
        self.filter.index = Some(0);
        self.fetch().await
    }

    /// Fetch the page at the current offset
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails or the page cannot be saved.
    pub async fn reload(&mut self) -> Result<&[Record]> {
        self.fetch().await
    }

    /// Fetch the following page
    ///
    /// Returns `None` without a request when the current page was short,
    /// since there is nothing after it.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails or the page cannot be saved.
    pub async fn next_page(&mut self) -> Result<Option<&[Record]>> {
        let count = self.count();
        if self.page_len < count as usize {
            debug!(page_len = self.page_len, count, "last page reached");
            return Ok(None);
        }
        self.filter.index = Some(self.index() + u64::from(count));
        self.fetch().await.map(Some)
    }

    /// Fetch the preceding page
    ///
    /// Returns `None` without a request at offset 0. A page starting less
    /// than one page in steps back to offset 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails or the page cannot be saved.
    pub async fn prev_page(&mut self) -> Result<Option<&[Record]>> {
        let count = u64::from(self.count());
        let index = self.index();
        if index == 0 {
            debug!(count, "first page reached");
            return Ok(None);
        }
        self.filter.index = Some(index.saturating_sub(count));
        self.fetch().await.map(Some)
    }

    async fn fetch(&mut self) -> Result<&[Record]> {
        debug!(index = self.index(), count = self.count(), "fetching page");
        self.page = self.api.search(&self.filter).await?;
        self.page_len = self.page.len();

        let ids: Vec<u64> = self.page.iter().map(Record::id).collect();
        self.store.save_filter(&self.filter)?;
        self.store.save_page_ids(&ids)?;
        Ok(&self.page)
    }
}
