//! Ordering of collection members by `colindex` tags

use super::error::CollectionError;
use crate::record::{Record, TagKind};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::trace;

/// Order collection members
///
/// Records tagged `colindex:<n>` go to slot `n`. Untagged records then fill
/// the lowest empty slots in their input order, and whatever is left is
/// appended. A record with several `colindex` tags is placed once per tag.
///
/// # Errors
///
/// * `CollectionError::Parse` if a `colindex` value is not a non-negative integer
/// * `CollectionError::DuplicateIndex` if a slot is claimed twice
///
/// # Examples
///
/// ```
/// use filedb_client::collection::assemble;
/// use filedb_client::record::Record;
///
/// let records = vec![
///     Record::new(1, "a").with_tags(["colindex:2"]),
///     Record::new(2, "b"),
///     Record::new(3, "c").with_tags(["colindex:0"]),
///     Record::new(4, "d"),
/// ];
/// let ids: Vec<u64> = assemble(records).unwrap().iter().map(Record::id).collect();
/// assert_eq!(ids, [3, 2, 1, 4]);
/// ```
pub fn assemble(records: Vec<Record>) -> Result<Vec<Record>, CollectionError> {
    let mut placed: BTreeMap<usize, Record> = BTreeMap::new();
    let mut overflow = Vec::new();

    for record in records {
        let positions = colindex_positions(&record)?;
        if positions.is_empty() {
            overflow.push(record);
            continue;
        }
        for n in positions {
            match placed.entry(n) {
                Entry::Occupied(_) => return Err(CollectionError::DuplicateIndex(n)),
                Entry::Vacant(slot) => {
                    trace!(record_id = record.id(), slot = n, "placing collection member");
                    slot.insert(record.clone());
                }
            }
        }
    }

    // Lowest free slot; past the highest placed slot this appends.
    let mut gap = 0;
    for record in overflow {
        while placed.contains_key(&gap) {
            gap += 1;
        }
        placed.insert(gap, record);
    }

    Ok(placed.into_values().collect())
}

/// All `colindex` positions declared by a record, in tag order
fn colindex_positions(record: &Record) -> Result<Vec<usize>, CollectionError> {
    record
        .tags()
        .iter()
        .filter_map(|tag| match TagKind::parse(tag) {
            TagKind::ColIndex(value) => Some(value),
            _ => None,
        })
        .map(|value| {
            value.trim().parse::<usize>().map_err(|_| CollectionError::Parse {
                record_id: record.id(),
                value: value.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: u64, tags: &[&str]) -> Record {
        Record::new(id, format!("/f/{id}")).with_tags(tags.iter().copied())
    }

    fn ids(records: &[Record]) -> Vec<u64> {
        records.iter().map(Record::id).collect()
    }

    #[test]
    fn test_no_colindex_keeps_input_order() {
        let records = vec![rec(5, &["x"]), rec(2, &[]), rec(9, &["collection:a"])];
        let ordered = assemble(records).unwrap();
        assert_eq!(ids(&ordered), [5, 2, 9]);
    }

    #[test]
    fn test_permutation_sorts_by_index() {
        let records = vec![
            rec(1, &["colindex:3"]),
            rec(2, &["colindex:0"]),
            rec(3, &["colindex:2"]),
            rec(4, &["colindex:1"]),
        ];
        let ordered = assemble(records).unwrap();
        assert_eq!(ids(&ordered), [2, 4, 3, 1]);
    }

    #[test]
    fn test_mixed_fills_gaps_then_appends() {
        let records = vec![
            rec(1, &["colindex:2"]),
            rec(2, &[]),
            rec(3, &["colindex:0"]),
            rec(4, &[]),
        ];
        let ordered = assemble(records).unwrap();
        assert_eq!(ids(&ordered), [3, 2, 1, 4]);
    }

    #[test]
    fn test_duplicate_index_fails() {
        let records = vec![rec(1, &["colindex:2"]), rec(2, &["colindex:2"])];
        assert_eq!(assemble(records), Err(CollectionError::DuplicateIndex(2)));
    }

    #[test]
    fn test_non_numeric_index_fails() {
        let records = vec![rec(1, &["colindex:1"]), rec(7, &["colindex:abc"])];
        assert_eq!(
            assemble(records),
            Err(CollectionError::Parse { record_id: 7, value: "abc".into() })
        );
    }

    #[test]
    fn test_negative_index_fails() {
        let records = vec![rec(1, &["colindex:-1"])];
        assert!(matches!(assemble(records), Err(CollectionError::Parse { .. })));
    }

    #[test]
    fn test_sparse_indices_compact_without_gaps() {
        let records = vec![rec(1, &["colindex:5"]), rec(2, &[])];
        let ordered = assemble(records).unwrap();
        assert_eq!(ids(&ordered), [2, 1]);
    }

    #[test]
    fn test_huge_indices_keep_order_without_allocating() {
        let records = vec![
            rec(1, &["colindex:18446744073709551615"]),
            rec(2, &["colindex:1000000000"]),
            rec(3, &[]),
            rec(4, &["colindex:0"]),
        ];
        let ordered = assemble(records).unwrap();
        assert_eq!(ids(&ordered), [4, 3, 2, 1]);
    }

    #[test]
    fn test_index_beyond_usize_fails() {
        let records = vec![rec(1, &["colindex:99999999999999999999999"])];
        assert!(matches!(assemble(records), Err(CollectionError::Parse { .. })));
    }

    #[test]
    fn test_duplicate_huge_index_fails() {
        let records = vec![
            rec(1, &["colindex:18446744073709551615"]),
            rec(2, &["colindex:18446744073709551615"]),
        ];
        assert!(matches!(assemble(records), Err(CollectionError::DuplicateIndex(_))));
    }

    #[test]
    fn test_record_with_two_indices_is_placed_twice() {
        let records = vec![rec(1, &["colindex:0", "colindex:2"]), rec(2, &[])];
        let ordered = assemble(records).unwrap();
        assert_eq!(ids(&ordered), [1, 2, 1]);
    }

    #[test]
    fn test_record_with_two_equal_indices_fails() {
        let records = vec![rec(1, &["colindex:1", "colindex:1"])];
        assert_eq!(assemble(records), Err(CollectionError::DuplicateIndex(1)));
    }

    #[test]
    fn test_empty_input() {
        assert!(assemble(Vec::new()).unwrap().is_empty());
    }
}
