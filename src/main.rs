//! fdb - command-line client for a FileDb media catalog
//!
//! # Usage
//!
//! ```bash
//! # Server and database versions
//! fdb status
//!
//! # Search, then page through the results
//! fdb search holiday -t beach -x nsfw --sort stars -r
//! fdb page next
//!
//! # Edit a file with one minimal update
//! fdb edit 42 -a sunset -d draft --stars 4
//!
//! # Walk a collection in order
//! fdb collection trip
//! fdb nav 42 next --collection
//!
//! # Quiet mode (ids only)
//! fdb -q search -t cats
//! ```
//!
//! # Configuration
//!
//! On first run, fdb asks for the server address and account cookie.
//! Settings are stored in `~/.config/filedb-client/config.toml`; the last
//! search is kept in the user's data directory.

use filedb_client::{
    FdbError,
    api::FileDbClient,
    cli::{Cli, Commands},
    collection::CollectionNamespace,
    commands::{self, tag::EditArgs},
    config::FdbConfig,
    output::{OutputWriter, StdoutWriter},
    store::FileStateStore,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, FdbError>;

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "filedb_client=debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, out: &dyn OutputWriter) -> Result<()> {
    if let Commands::Config { command } = &cli.command {
        let path = FdbConfig::config_path()?;
        let mut config = FdbConfig::load()?;
        let quiet = cli.quiet || config.quiet;
        return commands::config(&mut config, &path, command, out, quiet);
    }

    let config = FdbConfig::load_or_setup()?;
    let quiet = cli.quiet || config.quiet;
    let api = FileDbClient::with_account(&config.server_url, config.account_cookie.as_deref())?;
    tracing::debug!(server = %api.base_url(), "Using server");

    match cli.command {
        Commands::Status => commands::status(&api, out, quiet).await,
        Commands::Search { filter } => {
            let mut store = FileStateStore::default_location()?;
            commands::search(&api, &mut store, &config, &filter, out, quiet).await
        }
        Commands::Page { step } => {
            let mut store = FileStateStore::default_location()?;
            commands::search::page(&api, &mut store, &config, step, out, quiet).await
        }
        Commands::Show { id, touch } => commands::show(&api, id, touch, out, quiet).await,
        Commands::Tag { id, tags } => commands::tag::tag(&api, id, &tags, out, quiet).await,
        Commands::Untag { id, tags } => commands::tag::untag(&api, id, &tags, out, quiet).await,
        Commands::Rate { id, stars } => commands::tag::rate(&api, id, stars, out, quiet).await,
        Commands::Edit { id, add, remove, stars, dry_run } => {
            let args = EditArgs { add, remove, stars, dry_run };
            commands::tag::edit(&api, id, &args, out, quiet).await
        }
        Commands::Viewed { id } => commands::tag::viewed(&api, id, out, quiet).await,
        Commands::Delete { id, yes } => commands::delete(&api, id, yes, out, quiet).await,
        Commands::Nav { id, step, collection } => {
            let store = FileStateStore::default_location()?;
            commands::nav(&api, &store, id, step, collection, out, quiet).await
        }
        Commands::Collection { name, author } => {
            let namespace = if author {
                CollectionNamespace::Author
            } else {
                CollectionNamespace::Collection
            };
            commands::collection(&api, &name, namespace, out, quiet).await
        }
        Commands::Collections => commands::collection::index(&api, out, quiet).await,
        Commands::Tags { command } => commands::tags(&api, &command, out, quiet).await,
        Commands::Random => commands::random(&api, out, quiet).await,
        Commands::Config { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let out = StdoutWriter::new();
    match run(cli, &out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            out.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
