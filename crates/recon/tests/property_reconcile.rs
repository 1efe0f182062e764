// Property-based tests for collection reconciliation.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::cell::Cell;
use std::collections::{BTreeMap, HashSet};

use collection_recon::*;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Row {
    id: u8,
    value: u8,
}

/// Rows with unique ids; values drawn from a small range so that matched
/// ids sometimes keep and sometimes change their value.
fn arb_unique_rows(max: usize) -> impl Strategy<Value = Vec<Row>> {
    proptest::collection::btree_map(0u8..40, 0u8..3, 0..=max)
        .prop_map(|m: BTreeMap<u8, u8>| m.into_iter().map(|(id, value)| Row { id, value }).collect::<Vec<Row>>())
        .prop_shuffle()
}

/// Rows where ids may repeat.
fn arb_rows_with_duplicates(max: usize) -> impl Strategy<Value = Vec<Row>> {
    proptest::collection::vec((0u8..12, 0u8..3), 0..=max)
        .prop_map(|v| v.into_iter().map(|(id, value)| Row { id, value }).collect::<Vec<Row>>())
}

fn arb_ints(max: usize) -> impl Strategy<Value = Vec<i16>> {
    proptest::collection::vec(-50i16..50, 0..=max)
}

fn by_id<'f>() -> Rules<'f, Row> {
    Rules::by_key(|r: &Row| r.id)
}

fn ids<'a>(rows: impl IntoIterator<Item = &'a Row>) -> HashSet<u8> {
    rows.into_iter().map(|r| r.id).collect()
}

fn int_set(values: &[&i16]) -> HashSet<i16> {
    values.iter().map(|x| **x).collect()
}

// ---------------------------------------------------------------------------
// Partition: every element lands in exactly one bucket
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn partition_is_total(
        current in arb_unique_rows(25),
        baseline in arb_unique_rows(25),
    ) {
        let rules = by_id();
        let diff = reconcile_with(&current, &baseline, &rules);

        let added = ids(diff.added.iter().copied());
        let updated_new = ids(diff.updated.iter().map(|u| u.updated));
        let updated_old = ids(diff.updated.iter().map(|u| u.old));
        let removed = ids(diff.removed.iter().copied());
        let baseline_ids = ids(&baseline);
        let current_ids = ids(&current);

        prop_assert!(added.is_disjoint(&updated_new));
        prop_assert!(removed.is_disjoint(&updated_old));

        for row in &current {
            let in_added = added.contains(&row.id);
            let in_updated = updated_new.contains(&row.id);
            let old = baseline.iter().find(|b| b.id == row.id);
            match old {
                None => prop_assert!(in_added, "id {} should be added", row.id),
                Some(b) if b.value != row.value => prop_assert!(in_updated, "id {} should be updated", row.id),
                Some(_) => prop_assert!(!in_added && !in_updated, "id {} should be unchanged", row.id),
            }
        }
        for row in &baseline {
            prop_assert_eq!(removed.contains(&row.id), !current_ids.contains(&row.id));
        }
        prop_assert!(removed.is_subset(&baseline_ids));
        prop_assert!(added.is_subset(&current_ids));
    }
}

// ---------------------------------------------------------------------------
// Self comparison is a no-op
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn self_comparison_has_no_difference(xs in arb_ints(30), rows in arb_rows_with_duplicates(20)) {
        let copy = xs.clone();
        prop_assert!(!reconcile(&xs, &xs).has_difference());
        prop_assert!(!reconcile(&xs, &copy).has_difference());
        prop_assert!(!reconcile_indexed(&xs, &copy).has_difference());
        prop_assert!(!reconcile_with(&rows, &rows, &by_id()).has_difference());
    }
}

// ---------------------------------------------------------------------------
// Symmetry: swapping sides swaps added and removed
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn swapping_sides_swaps_added_and_removed(a in arb_ints(30), b in arb_ints(30)) {
        let forward = reconcile(&a, &b);
        let backward = reconcile(&b, &a);

        prop_assert_eq!(int_set(&forward.added), int_set(&backward.removed));
        prop_assert_eq!(int_set(&forward.removed), int_set(&backward.added));
        prop_assert!(forward.updated.is_empty());
    }

    #[test]
    fn swapping_sides_with_custom_identity(
        a in arb_rows_with_duplicates(20),
        b in arb_rows_with_duplicates(20),
    ) {
        let rules = by_id();
        let forward = reconcile_with(&a, &b, &rules);
        let backward = reconcile_with(&b, &a, &rules);

        prop_assert_eq!(ids(forward.added.iter().copied()), ids(backward.removed.iter().copied()));
        prop_assert_eq!(ids(forward.removed.iter().copied()), ids(backward.added.iter().copied()));
        prop_assert_eq!(forward.updated.len(), backward.updated.len());
    }
}

// ---------------------------------------------------------------------------
// Default comparators reduce to set difference
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn natural_is_set_difference(a in arb_ints(30), b in arb_ints(30)) {
        let diff = reconcile(&a, &b);
        let sa: HashSet<i16> = a.iter().copied().collect();
        let sb: HashSet<i16> = b.iter().copied().collect();

        let added: HashSet<i16> = diff.added.iter().map(|x| **x).collect();
        let removed: HashSet<i16> = diff.removed.iter().map(|x| **x).collect();
        prop_assert_eq!(added, &sa - &sb);
        prop_assert_eq!(removed, &sb - &sa);
        prop_assert!(diff.updated.is_empty());

        // Dedup: each value reported once.
        prop_assert_eq!(diff.added.len(), (&sa - &sb).len());
        prop_assert_eq!(diff.removed.len(), (&sb - &sa).len());
    }
}

// ---------------------------------------------------------------------------
// content_changed invocation count
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn content_check_runs_once_per_match(
        current in arb_rows_with_duplicates(20),
        baseline in arb_rows_with_duplicates(20),
    ) {
        let calls = Cell::new(0usize);
        let rules = by_id().with_content_changed(|a: &Row, b: &Row| {
            calls.set(calls.get() + 1);
            a != b
        });
        let diff = reconcile_indexed_with(&current, &baseline, &rules);
        let matched = ids(&current).intersection(&ids(&baseline)).count();
        prop_assert_eq!(calls.get(), matched);
        prop_assert!(diff.updated.len() <= matched);
    }

    #[test]
    fn summary_partitions_current(
        current in arb_rows_with_duplicates(20),
        baseline in arb_rows_with_duplicates(20),
    ) {
        let diff = reconcile_with(&current, &baseline, &by_id());
        let summary = diff.summary();
        let matched = ids(&current).intersection(&ids(&baseline)).count();

        prop_assert_eq!(summary.unchanged + summary.updated, matched);
        prop_assert_eq!(summary.duplicates, current.len() - ids(&current).len());
        prop_assert_eq!(
            summary.added + summary.updated + summary.unchanged + summary.duplicates,
            summary.current_len
        );
    }
}

// ---------------------------------------------------------------------------
// Positional variant
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn indices_point_at_reported_elements(
        current in arb_rows_with_duplicates(20),
        baseline in arb_rows_with_duplicates(20),
    ) {
        let rules = by_id();
        let diff = reconcile_indexed_with(&current, &baseline, &rules);

        for e in &diff.added {
            prop_assert!(std::ptr::eq(&current[e.index], e.value));
        }
        for e in &diff.removed {
            prop_assert!(std::ptr::eq(&baseline[e.index], e.value));
        }
        for u in &diff.updated {
            prop_assert!(std::ptr::eq(&current[u.index()], u.updated.value));
            prop_assert!(std::ptr::eq(&baseline[u.old.index], u.old.value));
        }
    }

    #[test]
    fn indexed_matches_unordered(
        current in arb_rows_with_duplicates(20),
        baseline in arb_rows_with_duplicates(20),
    ) {
        let rules = by_id();
        let plain = reconcile_with(&current, &baseline, &rules);
        let indexed = reconcile_indexed_with(&current, &baseline, &rules);
        prop_assert_eq!(indexed.forget_positions(), plain);
    }

    #[test]
    fn duplicates_resolve_to_last_occurrence(
        current in arb_rows_with_duplicates(20),
    ) {
        let rules = by_id();
        let diff = reconcile_indexed_with(&current, &[], &rules);
        for e in &diff.added {
            let last = current.iter().rposition(|r| r.id == e.value.id);
            prop_assert_eq!(last, Some(e.index));
        }
        prop_assert_eq!(diff.added.len(), ids(&current).len());
    }
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn determinism(
        current in arb_rows_with_duplicates(20),
        baseline in arb_rows_with_duplicates(20),
    ) {
        let rules = by_id();
        let r1 = reconcile_indexed_with(&current, &baseline, &rules);
        let r2 = reconcile_indexed_with(&current, &baseline, &rules);
        prop_assert_eq!(r1, r2);
    }
}
