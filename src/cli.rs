//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for fdb using the `clap` crate.
//!
//! # Commands
//!
//! - **status**: server and database versions
//! - **search**: run a search and show the first page of results
//! - **page**: move to the next or previous page of the last search
//! - **show** / **tag** / **untag** / **rate** / **edit** / **viewed** / **delete**: one file
//! - **nav**: move from a file to its neighbour in the last results or its collection
//! - **collection** / **collections**: ordered collections and their index
//! - **tags**: the server's tag vocabulary
//! - **random**: a random file
//! - **config**: local settings
//!
//! # Examples
//!
//! ```
//! use filedb_client::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["fdb", "-q", "search", "-t", "cats", "--count", "20"]);
//! assert!(cli.quiet);
//! assert!(matches!(cli.command, Commands::Search { .. }));
//! ```

use crate::api::SortMethod;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line client for a FileDb media catalog
#[derive(Parser, Debug)]
#[command(name = "fdb", author, version, about, long_about = None)]
pub struct Cli {
    /// Suppress informational output; listings print ids only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log requests and session activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn parse_sort(value: &str) -> Result<SortMethod, String> {
    value.parse().map_err(|e: crate::api::ApiError| e.to_string())
}

/// Search filter flags shared by `search`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Path substring to search for
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Tags every result must carry (can specify multiple: -t tag1 -t tag2)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Exclude files with these tags
    #[arg(short = 'x', long = "exclude", value_name = "TAG")]
    pub exclude: Vec<String>,

    /// Regular expression the path must match
    #[arg(long = "path-re", value_name = "REGEX")]
    pub path_re: Option<String>,

    /// Result order: none, size, stars, date, id or random
    #[arg(short = 's', long, value_parser = parse_sort)]
    pub sort: Option<SortMethod>,

    /// Reverse the result order
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Results per page (1-200)
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<u32>,

    /// Offset of the first result
    #[arg(long, value_name = "N")]
    pub index: Option<u64>,
}

/// Page direction
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show server and database versions
    Status,

    /// Search files and show the first page of results
    #[command(visible_alias = "s")]
    Search {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the next or previous page of the last search
    #[command(visible_alias = "p")]
    Page {
        #[arg(value_enum)]
        step: Step,
    },

    /// Show one file in detail
    Show {
        id: u64,

        /// Update the file's last-viewed time
        #[arg(long)]
        touch: bool,
    },

    /// Add tags to a file
    #[command(visible_alias = "t")]
    Tag {
        id: u64,

        #[arg(required = true, value_name = "TAG")]
        tags: Vec<String>,
    },

    /// Remove tags from a file
    #[command(visible_alias = "u")]
    Untag {
        id: u64,

        #[arg(required = true, value_name = "TAG")]
        tags: Vec<String>,
    },

    /// Set a file's star rating (0-5)
    Rate {
        id: u64,

        #[arg(allow_negative_numbers = true)]
        stars: i64,
    },

    /// Stage several changes to a file and send them as one update
    Edit {
        id: u64,

        /// Tags to add
        #[arg(short = 'a', long = "add", value_name = "TAG")]
        add: Vec<String>,

        /// Tags to remove
        #[arg(short = 'd', long = "remove", value_name = "TAG")]
        remove: Vec<String>,

        /// New star rating (0-5)
        #[arg(long, allow_negative_numbers = true)]
        stars: Option<i64>,

        /// Show the update without sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Mark a file as viewed
    Viewed { id: u64 },

    /// Remove a file from the catalog
    #[command(visible_alias = "rm")]
    Delete {
        id: u64,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the file after or before `ID`
    Nav {
        id: u64,

        #[arg(value_enum)]
        step: Step,

        /// Move within the file's collection instead of the last results
        #[arg(short, long)]
        collection: bool,
    },

    /// Show every file of a collection in order
    #[command(visible_alias = "c")]
    Collection {
        name: String,

        /// Use `author:<name>` instead of `collection:<name>`
        #[arg(long)]
        author: bool,
    },

    /// List collections with their sizes
    Collections,

    /// Manage the tag vocabulary
    Tags {
        #[command(subcommand)]
        command: TagsCommands,
    },

    /// Show a random file
    Random,

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Tag management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TagsCommands {
    /// List all tags known to the server
    List,

    /// Create a tag
    Add { tag: String },

    /// Delete a tag from the server
    #[command(visible_alias = "rm")]
    Delete {
        tag: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Config management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., page_size=100)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., server_url)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_flags() {
        let cli = Cli::parse_from([
            "fdb", "search", "holiday", "-t", "cats", "-t", "dogs", "-x", "nsfw", "--sort", "stars",
            "-r", "--count", "20",
        ]);
        let Commands::Search { filter } = cli.command else {
            panic!("expected search");
        };
        assert_eq!(filter.query.as_deref(), Some("holiday"));
        assert_eq!(filter.tags, ["cats", "dogs"]);
        assert_eq!(filter.exclude, ["nsfw"]);
        assert_eq!(filter.sort, Some(SortMethod::Stars));
        assert!(filter.reverse);
        assert_eq!(filter.count, Some(20));
    }

    #[test]
    fn test_bad_sort_is_rejected() {
        assert!(Cli::try_parse_from(["fdb", "search", "--sort", "rating"]).is_err());
    }

    #[test]
    fn test_negative_rating_parses() {
        let cli = Cli::parse_from(["fdb", "rate", "3", "-1"]);
        assert!(matches!(cli.command, Commands::Rate { id: 3, stars: -1 }));
    }

    #[test]
    fn test_nav_collection() {
        let cli = Cli::parse_from(["fdb", "nav", "5", "next", "--collection"]);
        assert!(matches!(
            cli.command,
            Commands::Nav { id: 5, step: Step::Next, collection: true }
        ));
    }

    #[test]
    fn test_global_flags_after_command() {
        let cli = Cli::parse_from(["fdb", "collections", "-v", "-q"]);
        assert!(cli.verbose && cli.quiet);
    }
}
