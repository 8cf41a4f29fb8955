//! Minimal update requests
//!
//! The update endpoint takes only what changed: the record id, the new star
//! rating if it differs, and the tags to add and remove. [`UpdateRequest::diff`]
//! computes that from two snapshots of the same record.

use crate::record::Record;

/// Changed fields of one record, as sent to `/api/1/update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub id: u64,
    pub stars: Option<u8>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
}

impl UpdateRequest {
    /// Difference between `old` and `new`, keyed on `new`'s id
    #[must_use]
    pub fn diff(old: &Record, new: &Record) -> Self {
        let stars = (new.stars() != old.stars()).then_some(new.stars());
        let add_tags = new
            .tags()
            .iter()
            .filter(|t| !old.has_tag(t))
            .cloned()
            .collect();
        let remove_tags = old
            .tags()
            .iter()
            .filter(|t| !new.has_tag(t))
            .cloned()
            .collect();
        Self { id: new.id(), stars, add_tags, remove_tags }
    }

    /// `true` when nothing changed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stars.is_none() && self.add_tags.is_empty() && self.remove_tags.is_empty()
    }

    /// Form fields, with `AddTags` and `RemTags` repeated per tag
    #[must_use]
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![("Id", self.id.to_string())];
        if let Some(stars) = self.stars {
            form.push(("Stars", stars.to_string()));
        }
        form.extend(self.add_tags.iter().map(|t| ("AddTags", t.clone())));
        form.extend(self.remove_tags.iter().map(|t| ("RemTags", t.clone())));
        form
    }
}
