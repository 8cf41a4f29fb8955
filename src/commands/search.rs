//! Search and page commands

use crate::FdbError;
use crate::api::FileDbApi;
use crate::cli::{FilterArgs, Step};
use crate::config::FdbConfig;
use crate::output::{self, OutputWriter};
use crate::record::Record;
use crate::session::BrowseSession;
use crate::store::StateStore;

type Result<T> = std::result::Result<T, FdbError>;

/// Execute the search command
///
/// Flags left unset fall back to the configured page size and sort. The
/// filter and the ids of the page shown are saved for `page` and `nav`.
///
/// # Errors
/// Returns an error if the filter is invalid, the search fails, or the
/// results cannot be saved
pub async fn execute<A, S>(
    api: &A,
    store: &mut S,
    config: &FdbConfig,
    filter: &FilterArgs,
    out: &dyn OutputWriter,
    quiet: bool,
) -> Result<()>
where
    A: FileDbApi + ?Sized,
    S: StateStore + ?Sized,
{
    let count = filter.count.unwrap_or(config.page_size);
    let mut session = BrowseSession::new(api, store, count)?;
    session.set_query(filter.query.clone());
    session.set_whitelist(&filter.tags);
    session.set_blacklist(&filter.exclude);
    session.set_path_regex(filter.path_re.clone());
    session.set_sort(
        filter.sort.unwrap_or(config.default_sort),
        filter.reverse || config.sort_reverse,
    );

    if let Some(index) = filter.index {
        session.set_index(index);
        session.reload().await?;
    } else {
        session.refresh().await?;
    }

    print_page(out, session.page(), session.page_number(), quiet);
    Ok(())
}

/// Execute the page command - step through the last search
///
/// # Errors
/// Returns an error if the saved search cannot be read or the search fails
pub async fn page<A, S>(
    api: &A,
    store: &mut S,
    config: &FdbConfig,
    step: Step,
    out: &dyn OutputWriter,
    quiet: bool,
) -> Result<()>
where
    A: FileDbApi + ?Sized,
    S: StateStore + ?Sized,
{
    let mut session = BrowseSession::restore(api, store, config.page_size)?;
    let moved = match step {
        Step::Next => session.next_page().await?.is_some(),
        Step::Prev => session.prev_page().await?.is_some(),
    };

    if moved {
        print_page(out, session.page(), session.page_number(), quiet);
    } else if !quiet {
        out.info(match step {
            Step::Next => "Already on the last page",
            Step::Prev => "Already on the first page",
        });
    }
    Ok(())
}

fn print_page(out: &dyn OutputWriter, page: &[Record], number: u64, quiet: bool) {
    if page.is_empty() {
        if !quiet {
            out.info("No files found.");
        }
        return;
    }

    if !quiet {
        out.info(&format!("Page {number} ({} file(s)):", page.len()));
    }
    for record in page {
        out.write(&output::record_line(record, quiet));
    }
}
