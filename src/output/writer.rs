//! Output abstraction layer
//!
//! Commands report through [`OutputWriter`] instead of printing directly.
//! [`StdoutWriter`] is the terminal implementation; [`BufferWriter`] keeps
//! messages in memory for tests.

use colored::Colorize;
use std::sync::Mutex;

/// Sink for everything a command reports
///
/// Listings and detail lines go through [`write`](Self::write) so quiet mode
/// can still print ids. The other levels carry status: a failed request, an
/// update the server accepted, a best-effort lookup that failed, or a hint
/// like "Already on the last page".
///
/// # Examples
///
/// ```no_run
/// use filedb_client::output::{OutputWriter, StdoutWriter};
///
/// let out = StdoutWriter::new();
/// out.write("/media/trip/a.jpg (#42)");
/// out.success("Updated file 42: +sunset");
/// out.error("Request failed with 404: Failed to find file by id '42'");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Result line: a record, a tag, a setting value
    fn write(&self, message: &str);

    /// Failure that ends the command
    fn error(&self, message: &str);

    /// Change accepted by the server or saved locally
    fn success(&self, message: &str);

    /// Partial failure; the command carries on
    fn warning(&self, message: &str);

    /// Headers and hints, suppressed in quiet mode by the callers
    fn info(&self, message: &str);
}

/// Terminal writer
///
/// Errors go to stderr with a red cross so piped listings stay clean.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutWriter;

impl StdoutWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {message}", "❌".red());
    }

    fn success(&self, message: &str) {
        println!("{} {message}", "✓".green());
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {message}", "!".yellow().bold());
    }

    fn info(&self, message: &str) {
        println!("{}", message.dimmed());
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Success,
    Warning,
    Info,
}

/// Writer that records every message in order
#[derive(Debug, Default)]
pub struct BufferWriter {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl BufferWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages written so far
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Messages of one level, text only
    #[must_use]
    pub fn lines(&self, level: MessageLevel) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    /// Every message joined with newlines
    #[must_use]
    pub fn text(&self) -> String {
        self.messages()
            .into_iter()
            .map(|(_, m)| m)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push(&self, level: MessageLevel, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

impl OutputWriter for BufferWriter {
    fn write(&self, message: &str) {
        self.push(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.push(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.push(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.push(MessageLevel::Info, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_keeps_order_and_levels() {
        let writer = BufferWriter::new();
        writer.write("one");
        writer.success("two");
        writer.error("three");

        assert_eq!(writer.text(), "one\ntwo\nthree");
        assert_eq!(writer.lines(MessageLevel::Error), ["three"]);
        assert_eq!(writer.messages()[1], (MessageLevel::Success, "two".to_string()));
    }
}
