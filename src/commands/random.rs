//! Random command

use crate::FdbError;
use crate::api::FileDbApi;
use crate::output::{self, OutputWriter};

type Result<T> = std::result::Result<T, FdbError>;

/// Execute the random command - show one file picked by the server
///
/// # Errors
/// Returns an error if the search fails or the catalog is empty
pub async fn execute<A>(api: &A, out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let record = api.random_file().await?;
    out.write(&output::record_line(&record, quiet));
    Ok(())
}
