//! `collection-recon` — identity-based collection reconciliation.
//!
//! Pure engine crate: receives a current and a baseline collection, returns
//! which elements were added, removed or updated. Two variants:
//!
//! - [`reconcile`] / [`reconcile_with`] report what changed;
//! - [`reconcile_indexed`] / [`reconcile_indexed_with`] also report where.
//!
//! Matching is driven by a [`Comparator`]. Without one, whole-value
//! equality is used and the result is a set difference.
//!
//! Duplicate identities within one input are collapsed, last write wins:
//! only the final occurrence takes part in matching and earlier ones are
//! not reported anywhere. Callers that care should deduplicate first.
//!
//! No IO, no global state.

pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
mod index;
pub mod model;
pub mod record;

pub use compare::{Comparator, Natural, Rules};
pub use config::{KeyTransform, RecordDiffConfig};
pub use engine::{reconcile, reconcile_indexed, reconcile_indexed_with, reconcile_with};
pub use error::DiffError;
pub use model::{
    DiffResult, DiffSummary, IndexedDiffResult, IndexedElement, IndexedUpdate, Side, Updated,
};
pub use record::{check_records, reconcile_records, reconcile_records_indexed, RecordComparator};
