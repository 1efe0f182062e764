use serde::Serialize;

// ---------------------------------------------------------------------------
// Sides
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Current,
    Baseline,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Current => "current",
            Side::Baseline => "baseline",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Unordered result
// ---------------------------------------------------------------------------

/// An identity present on both sides whose content changed.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Updated<'a, T> {
    pub old: &'a T,
    pub updated: &'a T,
}

/// Outcome of [`reconcile`](crate::reconcile): what changed between a
/// baseline and the current collection, ignoring positions.
///
/// Elements are borrowed from the inputs. `added` and `updated` follow the
/// current collection's order; `removed` follows the baseline's.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DiffResult<'a, T> {
    pub removed: Vec<&'a T>,
    pub added: Vec<&'a T>,
    pub updated: Vec<Updated<'a, T>>,
    /// The current collection, verbatim.
    pub actual: &'a [T],
    /// Matched identities whose content did not change.
    #[serde(skip)]
    pub(crate) unchanged: usize,
}

impl<'a, T> DiffResult<'a, T> {
    pub fn has_added(&self) -> bool {
        !self.added.is_empty()
    }

    pub fn has_removed(&self) -> bool {
        !self.removed.is_empty()
    }

    pub fn has_updated(&self) -> bool {
        !self.updated.is_empty()
    }

    pub fn has_difference(&self) -> bool {
        self.has_added() || self.has_removed() || self.has_updated()
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary::count(self.actual.len(), self.added.len(), self.removed.len(), self.updated.len(), self.unchanged)
    }
}

// ---------------------------------------------------------------------------
// Positional result
// ---------------------------------------------------------------------------

/// An element together with its position in the collection it came from.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
pub struct IndexedElement<'a, T> {
    pub index: usize,
    #[serde(rename = "data")]
    pub value: &'a T,
}

#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
pub struct IndexedUpdate<'a, T> {
    /// Position and value in the baseline.
    pub old: IndexedElement<'a, T>,
    /// Position and value in the current collection.
    pub updated: IndexedElement<'a, T>,
}

impl<T> IndexedUpdate<'_, T> {
    /// Position in the current collection, so patches can be applied by
    /// walking it.
    pub fn index(&self) -> usize {
        self.updated.index
    }
}

/// Outcome of [`reconcile_indexed`](crate::reconcile_indexed).
///
/// `removed` indices refer to the baseline; `added` indices to the current
/// collection; updates carry both.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
pub struct IndexedDiffResult<'a, T> {
    pub removed: Vec<IndexedElement<'a, T>>,
    pub added: Vec<IndexedElement<'a, T>>,
    pub updated: Vec<IndexedUpdate<'a, T>>,
    pub actual: &'a [T],
    #[serde(skip)]
    pub(crate) unchanged: usize,
}

impl<'a, T> IndexedDiffResult<'a, T> {
    pub fn has_added(&self) -> bool {
        !self.added.is_empty()
    }

    pub fn has_removed(&self) -> bool {
        !self.removed.is_empty()
    }

    pub fn has_updated(&self) -> bool {
        !self.updated.is_empty()
    }

    pub fn has_difference(&self) -> bool {
        self.has_added() || self.has_removed() || self.has_updated()
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary::count(self.actual.len(), self.added.len(), self.removed.len(), self.updated.len(), self.unchanged)
    }

    /// Drop positions, keeping the same classification and order.
    pub fn forget_positions(&self) -> DiffResult<'a, T> {
        DiffResult {
            removed: self.removed.iter().map(|e| e.value).collect(),
            added: self.added.iter().map(|e| e.value).collect(),
            updated: self
                .updated
                .iter()
                .map(|u| Updated { old: u.old.value, updated: u.updated.value })
                .collect(),
            actual: self.actual,
            unchanged: self.unchanged,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Counts for reporting.
///
/// `unchanged` counts matched identities whose content did not change.
/// `duplicates` counts current elements dropped because a later element
/// had the same identity, so `added + updated + unchanged + duplicates`
/// is always `current_len`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DiffSummary {
    pub current_len: usize,
    pub added: usize,
    pub removed: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub duplicates: usize,
}

impl DiffSummary {
    fn count(current_len: usize, added: usize, removed: usize, updated: usize, unchanged: usize) -> Self {
        Self {
            current_len,
            added,
            removed,
            updated,
            unchanged,
            duplicates: current_len.saturating_sub(added + updated + unchanged),
        }
    }
}

// Manual Clone/Copy: the results only hold references, so they are
// copyable regardless of `T`.
impl<T> Clone for Updated<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Updated<'_, T> {}

impl<T> Clone for IndexedElement<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IndexedElement<'_, T> {}

impl<T> Clone for IndexedUpdate<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IndexedUpdate<'_, T> {}

impl<T> Clone for DiffResult<'_, T> {
    fn clone(&self) -> Self {
        Self {
            removed: self.removed.clone(),
            added: self.added.clone(),
            updated: self.updated.clone(),
            actual: self.actual,
            unchanged: self.unchanged,
        }
    }
}

impl<T> Clone for IndexedDiffResult<'_, T> {
    fn clone(&self) -> Self {
        Self {
            removed: self.removed.clone(),
            added: self.added.clone(),
            updated: self.updated.clone(),
            actual: self.actual,
            unchanged: self.unchanged,
        }
    }
}
