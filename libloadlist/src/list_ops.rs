//! Index-set based list mutation
//!
//! Both operations take their index sets as a snapshot against the original
//! sequence. Elements are partitioned by original index before anything is
//! removed, so earlier removals never shift the meaning of later indices.

use std::collections::BTreeSet;

use crate::error::ListOpsError;

/// A set of row indices, ordered and free of duplicates
pub type IndexSet = BTreeSet<usize>;

/// Move the rows at `source` so they land before the row currently at `destination`
///
/// `destination` is an offset into the original sequence, where `len` means
/// "after the last row". The moved rows keep their relative order. This is
/// the drag-to-reorder convention: moving row 0 to offset 3 of
/// `[A, B, C, D, E]` yields `[B, C, A, D, E]`.
///
/// # Errors
///
/// Returns [`ListOpsError::IndexOutOfRange`] if any source index is `>= len`
/// or `destination > len`. The input is left untouched in that case.
pub fn move_rows<T>(
    items: &[T],
    source: &IndexSet,
    destination: usize,
) -> Result<Vec<T>, ListOpsError>
where
    T: Clone,
{
    let len = items.len();
    check_indices(source, len)?;
    if destination > len {
        return Err(ListOpsError::IndexOutOfRange {
            index: destination,
            len,
        });
    }

    let (moved, mut kept) = partition(items, source);
    let insert_at = destination - source.range(..destination).count();

    let tail = kept.split_off(insert_at);
    kept.extend(moved);
    kept.extend(tail);
    Ok(kept)
}

/// Remove the rows at `indices`, preserving the order of the survivors
///
/// # Errors
///
/// Returns [`ListOpsError::IndexOutOfRange`] if any index is `>= len`.
pub fn delete_rows<T>(items: &[T], indices: &IndexSet) -> Result<Vec<T>, ListOpsError>
where
    T: Clone,
{
    check_indices(indices, items.len())?;
    let (_, kept) = partition(items, indices);
    Ok(kept)
}

fn check_indices(indices: &IndexSet, len: usize) -> Result<(), ListOpsError> {
    // BTreeSet iterates ascending, so the last index is the largest
    match indices.last() {
        Some(&index) if index >= len => Err(ListOpsError::IndexOutOfRange { index, len }),
        _ => Ok(()),
    }
}

/// Split into (selected, rest) by original index
fn partition<T: Clone>(items: &[T], selected: &IndexSet) -> (Vec<T>, Vec<T>) {
    let mut chosen = Vec::with_capacity(selected.len());
    let mut rest = Vec::with_capacity(items.len().saturating_sub(selected.len()));
    for (index, item) in items.iter().enumerate() {
        if selected.contains(&index) {
            chosen.push(item.clone());
        } else {
            rest.push(item.clone());
        }
    }
    (chosen, rest)
}
