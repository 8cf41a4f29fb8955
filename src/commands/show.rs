//! Show command - file detail view

use crate::FdbError;
use crate::api::FileDbApi;
use crate::collection::{CollectionNamespace, collection_name_of};
use crate::output::{self, OutputWriter};
use crate::session::FileSession;

type Result<T> = std::result::Result<T, FdbError>;

/// Execute the show command
///
/// Content type and collection position are best effort: failures are
/// reported as warnings and the rest of the detail view is still shown.
///
/// # Errors
/// Returns an error if the file or the tag vocabulary cannot be fetched
pub async fn execute<A>(
    api: &A,
    id: u64,
    touch: bool,
    out: &dyn OutputWriter,
    quiet: bool,
) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let mut session = FileSession::open(api, id, touch).await?;
    let record = session.record().clone();

    if quiet {
        out.write(record.path());
        return Ok(());
    }

    out.write(&format!("{} (#{})", record.path(), record.id()));
    out.write(&format!("  Stars:       {}", output::stars(record.stars())));
    out.write(&format!("  Size:        {}", output::human_size(record.size())));
    out.write(&format!("  Last viewed: {}", output::last_viewed(&record)));

    match session.content_type().await {
        Ok(mime) => out.write(&format!("  Type:        {mime}")),
        Err(e) => out.warning(&format!("Could not determine content type: {e}")),
    }

    for (group, values) in output::grouped_tags(record.tags()) {
        out.write(&format!("  {group}: {}", values.join(", ")));
    }

    if let Some(name) = collection_name_of(&record) {
        match session.load_collection(CollectionNamespace::Collection).await {
            Ok(cursor) => out.write(&format!(
                "  In collection '{name}': {} of {}",
                cursor.position() + 1,
                cursor.len()
            )),
            Err(e) => out.warning(&e.to_string()),
        }
    }
    Ok(())
}
