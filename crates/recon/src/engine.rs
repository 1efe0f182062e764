use std::hash::Hash;

use crate::compare::{Comparator, Natural};
use crate::index::IdentityIndex;
use crate::model::{DiffResult, IndexedDiffResult, IndexedElement, IndexedUpdate, Updated};

/// Reconcile with natural value equality: identity is the whole value, so
/// the result is a plain set difference and `updated` is always empty.
pub fn reconcile<'a, T: Eq + Hash>(current: &'a [T], baseline: &'a [T]) -> DiffResult<'a, T> {
    reconcile_with(current, baseline, &Natural)
}

/// Classify every element of `current` and `baseline` as added, removed,
/// updated or unchanged under `comparator`.
///
/// `added` and `updated` follow the order in which identities first appear
/// in `current`; `removed` follows `baseline`. An identity that repeats
/// within one input is represented by its last occurrence only.
/// `content_changed` is called exactly once per matched identity.
pub fn reconcile_with<'a, T, C>(current: &'a [T], baseline: &'a [T], comparator: &C) -> DiffResult<'a, T>
where
    C: Comparator<T> + ?Sized,
{
    let baseline_index = IdentityIndex::build(baseline, comparator);
    let current_index = IdentityIndex::build(current, comparator);
    log_duplicates(&current_index, &baseline_index);

    let mut added = Vec::new();
    let mut updated = Vec::new();
    let mut unchanged = 0;

    for entry in current_index.iter() {
        match baseline_index.find(entry.value, entry.hash, comparator) {
            None => added.push(entry.value),
            Some(previous) => {
                if comparator.content_changed(entry.value, previous.value) {
                    updated.push(Updated { old: previous.value, updated: entry.value });
                } else {
                    unchanged += 1;
                }
            }
        }
    }

    let removed: Vec<&T> = baseline_index
        .iter()
        .filter(|entry| !current_index.contains(entry.value, entry.hash, comparator))
        .map(|entry| entry.value)
        .collect();

    log::debug!(
        "reconcile: current={} baseline={} added={} removed={} updated={} unchanged={}",
        current.len(),
        baseline.len(),
        added.len(),
        removed.len(),
        updated.len(),
        unchanged
    );

    DiffResult { removed, added, updated, actual: current, unchanged }
}

/// [`reconcile`] with positions attached to every record.
pub fn reconcile_indexed<'a, T: Eq + Hash>(current: &'a [T], baseline: &'a [T]) -> IndexedDiffResult<'a, T> {
    reconcile_indexed_with(current, baseline, &Natural)
}

/// Like [`reconcile_with`], but every record also carries the position of
/// its element(s): baseline positions for removals, current positions for
/// additions, both for updates.
///
/// Use this when the result drives position-aware edits such as splicing.
/// It does more bookkeeping per element than [`reconcile_with`].
pub fn reconcile_indexed_with<'a, T, C>(
    current: &'a [T],
    baseline: &'a [T],
    comparator: &C,
) -> IndexedDiffResult<'a, T>
where
    C: Comparator<T> + ?Sized,
{
    let baseline_index = IdentityIndex::build(baseline, comparator);
    let current_index = IdentityIndex::build(current, comparator);
    log_duplicates(&current_index, &baseline_index);

    let mut added = Vec::new();
    let mut updated = Vec::new();
    let mut unchanged = 0;

    for entry in current_index.iter() {
        let here = IndexedElement { index: entry.index, value: entry.value };
        match baseline_index.find(entry.value, entry.hash, comparator) {
            None => added.push(here),
            Some(previous) => {
                if comparator.content_changed(entry.value, previous.value) {
                    updated.push(IndexedUpdate {
                        old: IndexedElement { index: previous.index, value: previous.value },
                        updated: here,
                    });
                } else {
                    unchanged += 1;
                }
            }
        }
    }

    let removed: Vec<IndexedElement<'a, T>> = baseline_index
        .iter()
        .filter(|entry| !current_index.contains(entry.value, entry.hash, comparator))
        .map(|entry| IndexedElement { index: entry.index, value: entry.value })
        .collect();

    log::debug!(
        "reconcile_indexed: current={} baseline={} added={} removed={} updated={} unchanged={}",
        current.len(),
        baseline.len(),
        added.len(),
        removed.len(),
        updated.len(),
        unchanged
    );

    IndexedDiffResult { removed, added, updated, actual: current, unchanged }
}

fn log_duplicates<T>(current: &IdentityIndex<'_, T>, baseline: &IdentityIndex<'_, T>) {
    if current.overwritten() > 0 || baseline.overwritten() > 0 {
        log::debug!(
            "duplicate identities replaced (last write wins): current={} of {} baseline={} of {}",
            current.overwritten(),
            current.len() + current.overwritten(),
            baseline.overwritten(),
            baseline.len() + baseline.overwritten()
        );
    }
}
