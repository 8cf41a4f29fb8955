//! Tag, untag, rate, edit and viewed commands
//!
//! Every edit goes through a [`FileSession`]: changes are staged, then sent
//! as one minimal update.

use crate::FdbError;
use crate::api::{FileDbApi, UpdateRequest};
use crate::output::{self, OutputWriter};
use crate::session::{FileSession, PendingChange};

type Result<T> = std::result::Result<T, FdbError>;

/// Changes requested for one file
#[derive(Debug, Clone, Default)]
pub struct EditArgs {
    pub add: Vec<String>,
    pub remove: Vec<String>,
    pub stars: Option<i64>,
    pub dry_run: bool,
}

/// Execute the tag command - add tags to a file
///
/// # Errors
/// Returns an error if a tag is empty or already on the file, or the update fails
pub async fn tag<A>(api: &A, id: u64, tags: &[String], out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let args = EditArgs {
        add: tags.to_vec(),
        ..EditArgs::default()
    };
    edit(api, id, &args, out, quiet).await
}

/// Execute the untag command - remove tags from a file
///
/// # Errors
/// Returns an error if the update fails
pub async fn untag<A>(api: &A, id: u64, tags: &[String], out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let args = EditArgs {
        remove: tags.to_vec(),
        ..EditArgs::default()
    };
    edit(api, id, &args, out, quiet).await
}

/// Execute the rate command
///
/// # Errors
/// Returns an error if `stars` is outside 0-5 or the update fails
pub async fn rate<A>(api: &A, id: u64, stars: i64, out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let args = EditArgs {
        stars: Some(stars),
        ..EditArgs::default()
    };
    edit(api, id, &args, out, quiet).await
}

/// Execute the edit command - stage all changes, then send them at once
///
/// Invalid changes are rejected before anything is sent. Nothing is sent
/// when the changes leave the file as it is.
///
/// # Errors
/// Returns an error if a change is invalid or the update fails
pub async fn edit<A>(api: &A, id: u64, args: &EditArgs, out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let mut session = FileSession::open(api, id, false).await?;

    for tag in &args.remove {
        if !session.record().has_tag(tag) && !quiet {
            out.warning(&format!("File {id} has no tag '{tag}'"));
        }
        session.stage_remove(tag);
    }
    for tag in &args.add {
        session.stage_add(tag)?;
    }
    if let Some(stars) = args.stars {
        session.set_stars(stars)?;
    }

    let (_, preview) = session.apply()?;
    if preview.is_empty() {
        if !quiet {
            out.info(&format!("No changes to file {id}"));
        }
        return Ok(());
    }

    if args.dry_run {
        out.write(&describe(&preview));
        if !quiet {
            let tags: Vec<String> = session
                .tags()
                .iter()
                .filter(|t| t.on_file || t.pending != PendingChange::Unchanged)
                .map(output::tag_state)
                .collect();
            out.write(&format!("  Tags: {}", tags.join(" ")));
        }
        return Ok(());
    }

    let sent = session.submit().await?;
    if !quiet {
        out.success(&format!("Updated file {id}: {}", describe(&sent)));
    }
    Ok(())
}

/// Execute the viewed command
///
/// # Errors
/// Returns an error if the request fails
pub async fn viewed<A>(api: &A, id: u64, out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    api.mark_viewed(id).await?;
    if !quiet {
        out.success(&format!("Marked file {id} as viewed"));
    }
    Ok(())
}

/// `+added -removed stars=N`, in that order
fn describe(update: &UpdateRequest) -> String {
    let mut parts: Vec<String> = update.add_tags.iter().map(|t| format!("+{t}")).collect();
    parts.extend(update.remove_tags.iter().map(|t| format!("-{t}")));
    if let Some(stars) = update.stars {
        parts.push(format!("stars={stars}"));
    }
    parts.join(" ")
}
