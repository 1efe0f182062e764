//! Identity and content rules used to match elements across two collections.
//!
//! A [`Comparator`] answers three questions about elements of type `T`:
//!
//! - are two elements the same logical entity (`same_identity`)?
//! - what bucket does an element's identity hash to (`identity_hash`)?
//! - has an entity's content changed between baseline and current
//!   (`content_changed`)?
//!
//! `identity_hash` must agree with `same_identity`: whenever
//! `same_identity(a, b)` holds, `identity_hash(a) == identity_hash(b)`.
//! This is not checked. A comparator that breaks it makes lookups miss,
//! so entities that should be reported as updated come out as one removal
//! plus one addition.

use std::hash::{BuildHasher, Hash};
use std::rc::Rc;

use rustc_hash::FxBuildHasher;

pub trait Comparator<T: ?Sized> {
    fn same_identity(&self, a: &T, b: &T) -> bool;

    fn identity_hash(&self, item: &T) -> u64;

    /// Only called for elements whose identities matched.
    fn content_changed(&self, current: &T, previous: &T) -> bool;
}

impl<T: ?Sized, C: Comparator<T> + ?Sized> Comparator<T> for &C {
    fn same_identity(&self, a: &T, b: &T) -> bool {
        (**self).same_identity(a, b)
    }

    fn identity_hash(&self, item: &T) -> u64 {
        (**self).identity_hash(item)
    }

    fn content_changed(&self, current: &T, previous: &T) -> bool {
        (**self).content_changed(current, previous)
    }
}

/// Hash any value with the crate's fixed hasher. Deterministic across runs.
pub fn fx_hash<K: Hash + ?Sized>(value: &K) -> u64 {
    FxBuildHasher.hash_one(value)
}

// ---------------------------------------------------------------------------
// Natural
// ---------------------------------------------------------------------------

/// Identity is full value equality. Since identity and content coincide,
/// a match can never be an update and reconciliation reduces to set
/// difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Eq + Hash + ?Sized> Comparator<T> for Natural {
    fn same_identity(&self, a: &T, b: &T) -> bool {
        a == b
    }

    fn identity_hash(&self, item: &T) -> u64 {
        fx_hash(item)
    }

    fn content_changed(&self, current: &T, previous: &T) -> bool {
        current != previous
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

type EqFn<'f, T> = Box<dyn Fn(&T, &T) -> bool + 'f>;
type HashFn<'f, T> = Box<dyn Fn(&T) -> u64 + 'f>;

/// Comparator assembled from caller-supplied closures.
///
/// Start from [`Rules::natural`] or [`Rules::by_key`] and override the
/// pieces you need, or pass all three functions to [`Rules::new`].
///
/// ```
/// use collection_recon::{reconcile_with, Rules};
///
/// #[derive(Debug, PartialEq)]
/// struct User { id: u32, name: &'static str }
///
/// let before = [User { id: 1, name: "ann" }];
/// let after = [User { id: 1, name: "anne" }];
/// let rules = Rules::by_key(|u: &User| u.id);
/// let diff = reconcile_with(&after, &before, &rules);
/// assert_eq!(diff.updated.len(), 1);
/// ```
pub struct Rules<'f, T: ?Sized> {
    identity_equals: EqFn<'f, T>,
    identity_hash: HashFn<'f, T>,
    content_changed: EqFn<'f, T>,
}

impl<'f, T: ?Sized + 'f> Rules<'f, T> {
    pub fn new(
        identity_equals: impl Fn(&T, &T) -> bool + 'f,
        identity_hash: impl Fn(&T) -> u64 + 'f,
        content_changed: impl Fn(&T, &T) -> bool + 'f,
    ) -> Self {
        Self {
            identity_equals: Box::new(identity_equals),
            identity_hash: Box::new(identity_hash),
            content_changed: Box::new(content_changed),
        }
    }

    /// Same behavior as [`Natural`], but with replaceable parts.
    pub fn natural() -> Self
    where
        T: Eq + Hash,
    {
        Self::new(|a, b| a == b, |item| fx_hash(item), |a, b| a != b)
    }

    /// Identity is the extracted key; content changes when the values differ.
    pub fn by_key<K, F>(key: F) -> Self
    where
        K: Eq + Hash,
        F: Fn(&T) -> K + 'f,
        T: PartialEq,
    {
        let key = Rc::new(key);
        let hash_key = Rc::clone(&key);
        Self::new(
            move |a, b| (*key)(a) == (*key)(b),
            move |item| fx_hash(&(*hash_key)(item)),
            |a, b| a != b,
        )
    }

    /// Replace the identity pair. Both functions must stay consistent.
    pub fn with_identity(
        mut self,
        identity_equals: impl Fn(&T, &T) -> bool + 'f,
        identity_hash: impl Fn(&T) -> u64 + 'f,
    ) -> Self {
        self.identity_equals = Box::new(identity_equals);
        self.identity_hash = Box::new(identity_hash);
        self
    }

    pub fn with_content_changed(mut self, content_changed: impl Fn(&T, &T) -> bool + 'f) -> Self {
        self.content_changed = Box::new(content_changed);
        self
    }
}

impl<'f, T: Eq + Hash + ?Sized + 'f> Default for Rules<'f, T> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<T: ?Sized> Comparator<T> for Rules<'_, T> {
    fn same_identity(&self, a: &T, b: &T) -> bool {
        (self.identity_equals)(a, b)
    }

    fn identity_hash(&self, item: &T) -> u64 {
        (self.identity_hash)(item)
    }

    fn content_changed(&self, current: &T, previous: &T) -> bool {
        (self.content_changed)(current, previous)
    }
}

impl<T: ?Sized> std::fmt::Debug for Rules<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules").finish_non_exhaustive()
    }
}
