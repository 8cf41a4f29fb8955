//! Delete command - remove a file from the catalog

use crate::FdbError;
use crate::api::FileDbApi;
use crate::output::OutputWriter;
use dialoguer::Confirm;

type Result<T> = std::result::Result<T, FdbError>;

/// Execute the delete command
///
/// Shows the file's path and asks for confirmation unless `yes` or `quiet`.
///
/// # Errors
/// Returns an error if the file cannot be fetched or deleted, or the prompt fails
pub async fn execute<A>(api: &A, id: u64, yes: bool, out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let record = api.get_file(id, false).await?;

    if !yes && !quiet {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} (#{id}) from the catalog?", record.path()))
            .interact()
            .map_err(|e| FdbError::InvalidInput(format!("Confirmation failed: {e}")))?;
        if !confirmed {
            out.info("Cancelled");
            return Ok(());
        }
    }

    api.delete_file(id).await?;
    if !quiet {
        out.success(&format!("Deleted {} (#{id})", record.path()));
    }
    Ok(())
}
