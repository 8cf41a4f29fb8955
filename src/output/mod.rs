//! Output formatting for CLI display
//!
//! This module provides utilities for formatting records, tags and server
//! versions in the CLI. Writing goes through [`OutputWriter`] so commands
//! can be run against a buffer in tests.

pub mod writer;

pub use writer::{BufferWriter, MessageLevel, OutputWriter, StdoutWriter};

use crate::api::{Version, VersionCompat};
use crate::record::{Record, TagKind};
use crate::session::{PendingChange, TagState};
use byte_unit::{Byte, UnitType};
use colored::Colorize;

/// Human-readable size with decimal units, e.g. `1.50 MB`
#[must_use]
pub fn human_size(bytes: u64) -> String {
    if bytes < 1000 {
        return format!("{bytes} B");
    }
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Decimal);
    format!("{adjusted:.2}")
}

/// Last-viewed time, or `never`
#[must_use]
pub fn last_viewed(record: &Record) -> String {
    if record.is_never_viewed() {
        "never".to_string()
    } else {
        record.last_viewed().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Star rating as filled and empty stars
#[must_use]
pub fn stars(count: u8) -> String {
    let filled = usize::from(count.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// One line of a result listing
#[must_use]
pub fn record_line(record: &Record, quiet: bool) -> String {
    if quiet {
        return record.id().to_string();
    }
    let tags = if record.tags().is_empty() {
        "(no tags)".dimmed().to_string()
    } else {
        format!("[{}]", record.tags().join(", "))
    };
    format!(
        "  {:>6}  {}  {}  {}  {}",
        record.id().to_string().bold(),
        record.path(),
        tags,
        stars(record.stars()).yellow(),
        human_size(record.size()).dimmed()
    )
}

/// Tags grouped by namespace for the detail view, empty groups left out
///
/// Group order: plain tags, authors, collections, positions, other metadata.
#[must_use]
pub fn grouped_tags(tags: &[String]) -> Vec<(&'static str, Vec<String>)> {
    let mut plain = Vec::new();
    let mut authors = Vec::new();
    let mut collections = Vec::new();
    let mut positions = Vec::new();
    let mut metadata = Vec::new();

    for tag in tags {
        match TagKind::parse(tag) {
            TagKind::Plain(v) => plain.push(v.to_string()),
            TagKind::Author(v) => authors.push(v.to_string()),
            TagKind::Collection(v) => collections.push(v.to_string()),
            TagKind::ColIndex(v) => positions.push(v.to_string()),
            TagKind::Metadata { .. } => metadata.push(tag.clone()),
        }
    }

    [
        ("Tags", plain),
        ("Authors", authors),
        ("Collections", collections),
        ("Position", positions),
        ("Metadata", metadata),
    ]
    .into_iter()
    .filter(|(_, v)| !v.is_empty())
    .collect()
}

/// A tag with its staged change, `+` for additions and `-` for removals
#[must_use]
pub fn tag_state(state: &TagState) -> String {
    match state.pending {
        PendingChange::PendingAdd => format!("+{}", state.tag).green().to_string(),
        PendingChange::PendingRemove => format!("-{}", state.tag).red().to_string(),
        PendingChange::Unchanged if state.on_file => state.tag.bold().to_string(),
        PendingChange::Unchanged => state.tag.dimmed().to_string(),
    }
}

/// `CodeName (String)`, as the server reports it
#[must_use]
pub fn version(version: &Version) -> String {
    format!("{} ({})", version.code_name, version.string)
}

/// Compatibility suffix for the database version; empty when supported
#[must_use]
pub fn compat_label(compat: VersionCompat) -> String {
    match compat {
        VersionCompat::Supported => String::new(),
        VersionCompat::Outdated => " (Outdated)".yellow().to_string(),
        VersionCompat::Unsupported => " (Unsupported)".red().to_string(),
    }
}
