//! Collection commands - one ordered collection, or the index of all of them

use crate::FdbError;
use crate::api::FileDbApi;
use crate::collection::{self, CollectionNamespace};
use crate::output::{self, OutputWriter};
use crate::session::CollectionIndex;

type Result<T> = std::result::Result<T, FdbError>;

/// Execute the collection command - list members in collection order
///
/// # Errors
/// Returns an error if the search fails or the members' positions are invalid
pub async fn execute<A>(
    api: &A,
    name: &str,
    namespace: CollectionNamespace,
    out: &dyn OutputWriter,
    quiet: bool,
) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let members = collection::load_collection(api, name, namespace).await?;
    if members.is_empty() {
        if !quiet {
            out.info(&format!("No files in {} '{name}'", namespace.prefix()));
        }
        return Ok(());
    }

    if !quiet {
        out.info(&format!("{} '{name}' ({} file(s)):", namespace.prefix(), members.len()));
    }
    for (position, record) in members.iter().enumerate() {
        if quiet {
            out.write(&output::record_line(record, true));
        } else {
            out.write(&format!("{:>4}. {}", position + 1, output::record_line(record, false).trim_start()));
        }
    }
    Ok(())
}

/// Execute the collections command - every collection with its size
///
/// # Errors
/// Returns an error if the tag vocabulary cannot be fetched
pub async fn index<A>(api: &A, out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let index = CollectionIndex::load(api).await?;
    if index.is_empty() && !quiet {
        out.info("No collections found.");
    }

    for entry in index.entries() {
        if quiet {
            out.write(&entry.name);
            continue;
        }
        let count = entry
            .members
            .map_or_else(|| "(not set)".to_string(), |n| format!("{n} file(s)"));
        out.write(&format!("  {}  {count}", entry.name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionError;
    use crate::output::{BufferWriter, MessageLevel};
    use crate::record::Record;
    use crate::testing::MockApi;

    fn server() -> MockApi {
        MockApi::with_files([
            Record::new(1, "A").with_tags(["collection:trip", "colindex:2"]),
            Record::new(2, "B").with_tags(["collection:trip"]),
            Record::new(3, "C").with_tags(["collection:trip", "colindex:0"]),
            Record::new(4, "D").with_tags(["collection:trip", "author:ann"]),
        ])
    }

    #[tokio::test]
    async fn test_collection_in_position_order() {
        let api = server();
        let out = BufferWriter::new();
        execute(&api, "trip", CollectionNamespace::Collection, &out, true).await.unwrap();
        assert_eq!(out.lines(MessageLevel::Normal), ["3", "2", "1", "4"]);
    }

    #[tokio::test]
    async fn test_author_namespace() {
        let api = server();
        let out = BufferWriter::new();
        execute(&api, "ann", CollectionNamespace::Author, &out, true).await.unwrap();
        assert_eq!(out.lines(MessageLevel::Normal), ["4"]);
    }

    #[tokio::test]
    async fn test_duplicate_position_fails_without_output() {
        let api = server();
        api.state().files.get_mut(&2).unwrap().add_tag("colindex:2").unwrap();
        let out = BufferWriter::new();

        let err = execute(&api, "trip", CollectionNamespace::Collection, &out, false)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FdbError::Collection(collection::LoadError::Order(CollectionError::DuplicateIndex(2)))
        ));
        assert!(out.messages().is_empty());
    }

    #[tokio::test]
    async fn test_index_lists_counts() {
        let api = server();
        let out = BufferWriter::new();
        index(&api, &out, false).await.unwrap();
        assert_eq!(out.lines(MessageLevel::Normal), ["  trip  4 file(s)"]);
    }
}
