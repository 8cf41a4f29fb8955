//! Tags command - the server's tag vocabulary

use crate::FdbError;
use crate::api::FileDbApi;
use crate::cli::TagsCommands;
use crate::output::OutputWriter;
use dialoguer::Confirm;

type Result<T> = std::result::Result<T, FdbError>;

/// Execute the tags management command
///
/// # Errors
/// Returns an error if a request fails or user interaction fails
pub async fn execute<A>(api: &A, command: &TagsCommands, out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    match command {
        TagsCommands::List => list_all_tags(api, out, quiet).await,
        TagsCommands::Add { tag } => add_tag(api, tag, out, quiet).await,
        TagsCommands::Delete { tag, yes } => {
            if !*yes && !quiet && !confirm(&format!("Delete tag '{tag}' from the server?"))? {
                out.info("Cancelled");
                return Ok(());
            }
            delete_tag(api, tag, out, quiet).await
        }
    }
}

async fn list_all_tags<A>(api: &A, out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let tags = api.list_tags().await?;

    if tags.is_empty() {
        if !quiet {
            out.info("No tags found.");
        }
        return Ok(());
    }

    if !quiet {
        out.info(&format!("{} tag(s):", tags.len()));
    }
    for tag in &tags {
        out.write(tag);
    }
    Ok(())
}

async fn add_tag<A>(api: &A, tag: &str, out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(FdbError::InvalidInput("Cannot add an empty tag".into()));
    }
    api.add_tag(tag).await?;
    if !quiet {
        out.success(&format!("Added tag '{tag}'"));
    }
    Ok(())
}

async fn delete_tag<A>(api: &A, tag: &str, out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    api.delete_tag(tag).await?;
    if !quiet {
        out.success(&format!("Deleted tag '{tag}'"));
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| FdbError::InvalidInput(format!("Confirmation failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{BufferWriter, MessageLevel};
    use crate::testing::MockApi;

    #[tokio::test]
    async fn test_list_in_server_order() {
        let api = MockApi::new();
        api.state().tags = vec!["zebra".into(), "apple".into()];
        let out = BufferWriter::new();

        execute(&api, &TagsCommands::List, &out, true).await.unwrap();
        assert_eq!(out.lines(MessageLevel::Normal), ["zebra", "apple"]);
    }

    #[tokio::test]
    async fn test_add_and_reject_duplicate() {
        let api = MockApi::new();
        let out = BufferWriter::new();
        let add = TagsCommands::Add { tag: " cats ".into() };

        execute(&api, &add, &out, false).await.unwrap();
        assert_eq!(api.state().tags, ["cats"]);

        let err = execute(&api, &add, &out, false).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_empty_tag_is_rejected_locally() {
        let api = MockApi::new();
        let out = BufferWriter::new();
        let add = TagsCommands::Add { tag: "  ".into() };
        assert!(matches!(
            execute(&api, &add, &out, false).await,
            Err(FdbError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_without_prompt() {
        let api = MockApi::new();
        api.state().tags = vec!["cats".into(), "dogs".into()];
        let out = BufferWriter::new();
        let delete = TagsCommands::Delete { tag: "cats".into(), yes: true };

        execute(&api, &delete, &out, false).await.unwrap();
        assert_eq!(api.state().tags, ["dogs"]);
        assert_eq!(out.lines(MessageLevel::Success), ["Deleted tag 'cats'"]);
    }
}
