//! Nav command - neighbouring file in the last results or a collection

use crate::FdbError;
use crate::api::FileDbApi;
use crate::cli::Step;
use crate::collection::CollectionNamespace;
use crate::output::{self, OutputWriter};
use crate::session::{Direction, FileSession};
use crate::store::StateStore;

type Result<T> = std::result::Result<T, FdbError>;

impl From<Step> for Direction {
    fn from(step: Step) -> Self {
        match step {
            Step::Next => Self::Next,
            Step::Prev => Self::Prev,
        }
    }
}

/// Execute the nav command
///
/// Without `collection`, moves along the ids of the last result page.
///
/// # Errors
/// Returns an error if a file, the collection or the saved page cannot be loaded
pub async fn execute<A, S>(
    api: &A,
    store: &S,
    id: u64,
    step: Step,
    collection: bool,
    out: &dyn OutputWriter,
    quiet: bool,
) -> Result<()>
where
    A: FileDbApi + ?Sized,
    S: StateStore + ?Sized,
{
    let direction = Direction::from(step);
    let mut session = FileSession::open(api, id, false).await?;

    let neighbour = if collection {
        session.load_collection(CollectionNamespace::Collection).await?;
        session.step_collection(direction).cloned()
    } else {
        match session.page_neighbor(store, direction)? {
            Some(next_id) => Some(api.get_file(next_id, false).await?),
            None => None,
        }
    };

    match neighbour {
        Some(record) => out.write(&output::record_line(&record, quiet)),
        None if !quiet => out.info(match step {
            Step::Next => "No next file",
            Step::Prev => "No previous file",
        }),
        None => {}
    }
    Ok(())
}
