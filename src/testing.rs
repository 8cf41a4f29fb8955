//! Testing utilities for filedb-client
//!
//! This module provides `MockApi`, an in-memory stand-in for a FileDb server
//! that records every mutating call so tests can assert on them.
//!
//! Only available when compiled with `cfg(test)`.

use crate::api::{ApiError, FileDbApi, SearchQuery, StatusInfo, UpdateRequest};
use crate::record::Record;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct MockState {
    pub files: BTreeMap<u64, Record>,
    pub tags: Vec<String>,
    pub status: Option<StatusInfo>,
    pub updates: Vec<UpdateRequest>,
    pub searches: Vec<SearchQuery>,
    pub viewed: Vec<u64>,
    pub touched: Vec<u64>,
    /// When set, every call fails with this envelope code and message
    pub failure: Option<(i64, String)>,
}

/// In-memory FileDb server
///
/// Searches match tags exactly and return files in id order, honouring
/// `index` and `count`. Updates are applied to the stored files.
#[derive(Debug, Default)]
pub struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Server holding `files`, with their tags as the vocabulary
    #[must_use]
    pub fn with_files(files: impl IntoIterator<Item = Record>) -> Self {
        let api = Self::new();
        {
            let mut state = api.state();
            for file in files {
                for tag in file.tags() {
                    if !state.tags.contains(tag) {
                        state.tags.push(tag.clone());
                    }
                }
                state.files.insert(file.id(), file);
            }
        }
        api
    }

    /// Lock the server state for setup or assertions
    ///
    /// # Panics
    /// Panics if a previous test thread panicked while holding the lock.
    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    pub fn fail_with(&self, code: i64, message: &str) {
        self.state().failure = Some((code, message.to_string()));
    }

    fn check(state: &MockState) -> Result<(), ApiError> {
        match &state.failure {
            Some((code, message)) => Err(ApiError::Server {
                code: *code,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn not_found(id: u64) -> ApiError {
        ApiError::Server {
            code: 404,
            message: format!("Failed to find file by id '{id}'"),
        }
    }
}

#[async_trait]
impl FileDbApi for MockApi {
    async fn get_file(&self, id: u64, touch: bool) -> Result<Record, ApiError> {
        let mut state = self.state();
        Self::check(&state)?;
        if touch {
            state.touched.push(id);
        }
        state.files.get(&id).cloned().ok_or_else(|| Self::not_found(id))
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Record>, ApiError> {
        query.validate()?;
        let mut state = self.state();
        Self::check(&state)?;
        state.searches.push(query.clone());

        let matches = state.files.values().filter(|f| {
            query.tag_whitelist.iter().all(|t| f.has_tag(t))
                && !query.tag_blacklist.iter().any(|t| f.has_tag(t))
                && query.path.as_ref().is_none_or(|p| f.path().contains(p.as_str()))
        });
        let index = usize::try_from(query.index.unwrap_or(0)).unwrap_or(usize::MAX);
        let count = query.count.map_or(usize::MAX, |c| c as usize);
        Ok(matches.skip(index).take(count).cloned().collect())
    }

    async fn update_file(&self, request: &UpdateRequest) -> Result<(), ApiError> {
        let mut state = self.state();
        Self::check(&state)?;
        let file = state
            .files
            .get_mut(&request.id)
            .ok_or_else(|| Self::not_found(request.id))?;
        if let Some(stars) = request.stars {
            file.set_stars(i64::from(stars)).map_err(|e| ApiError::Server {
                code: 400,
                message: e.to_string(),
            })?;
        }
        for tag in &request.remove_tags {
            file.remove_tag(tag);
        }
        for tag in &request.add_tags {
            let _ = file.add_tag(tag.clone());
        }
        state.updates.push(request.clone());
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<String>, ApiError> {
        let state = self.state();
        Self::check(&state)?;
        Ok(state.tags.clone())
    }

    async fn add_tag(&self, tag: &str) -> Result<(), ApiError> {
        let mut state = self.state();
        Self::check(&state)?;
        if tag.is_empty() || state.tags.iter().any(|t| t == tag) {
            return Err(ApiError::Server {
                code: 400,
                message: format!("Tag '{tag}' already exists"),
            });
        }
        state.tags.push(tag.to_string());
        Ok(())
    }

    async fn delete_tag(&self, tag: &str) -> Result<(), ApiError> {
        let mut state = self.state();
        Self::check(&state)?;
        state.tags.retain(|t| t != tag);
        Ok(())
    }

    async fn mark_viewed(&self, id: u64) -> Result<(), ApiError> {
        let mut state = self.state();
        Self::check(&state)?;
        state.viewed.push(id);
        Ok(())
    }

    async fn content_type(&self, id: u64) -> Result<String, ApiError> {
        let state = self.state();
        Self::check(&state)?;
        let file = state.files.get(&id).ok_or_else(|| Self::not_found(id))?;
        let mime = match file.path().rsplit_once('.').map(|(_, ext)| ext) {
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("mp4") => "video/mp4",
            _ => "application/octet-stream",
        };
        Ok(mime.to_string())
    }

    async fn status(&self) -> Result<StatusInfo, ApiError> {
        let state = self.state();
        Self::check(&state)?;
        state
            .status
            .clone()
            .ok_or_else(|| ApiError::EmptyResult("/api/1/status".into()))
    }

    async fn delete_file(&self, id: u64) -> Result<(), ApiError> {
        let mut state = self.state();
        Self::check(&state)?;
        state.files.remove(&id).map(|_| ()).ok_or_else(|| Self::not_found(id))
    }
}
