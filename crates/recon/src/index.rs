use rustc_hash::FxHashMap;

use crate::compare::Comparator;

/// One surviving entry of an identity index.
#[derive(Debug)]
pub(crate) struct Entry<'a, T> {
    /// Position of `value` in the input slice.
    pub index: usize,
    pub value: &'a T,
    pub hash: u64,
}

// Manual impls: derive would require `T: Clone`/`T: Copy`.
impl<T> Clone for Entry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Entry<'_, T> {}

/// Insertion-ordered index of one input collection keyed by identity.
///
/// Iteration follows the order in which identities were first seen.
/// When an identity repeats, the later element replaces the earlier one
/// in place (last write wins), so the entry keeps its first position in
/// iteration order but carries the last value and index.
pub(crate) struct IdentityIndex<'a, T> {
    entries: Vec<Entry<'a, T>>,
    buckets: FxHashMap<u64, Vec<usize>>,
    overwritten: usize,
}

impl<'a, T> IdentityIndex<'a, T> {
    pub fn build<C: Comparator<T> + ?Sized>(items: &'a [T], comparator: &C) -> Self {
        let mut index = Self {
            entries: Vec::with_capacity(items.len()),
            buckets: FxHashMap::default(),
            overwritten: 0,
        };
        for (position, value) in items.iter().enumerate() {
            let hash = comparator.identity_hash(value);
            index.insert(Entry { index: position, value, hash }, comparator);
        }
        index
    }

    fn insert<C: Comparator<T> + ?Sized>(&mut self, entry: Entry<'a, T>, comparator: &C) {
        let slots = self.buckets.entry(entry.hash).or_default();
        let existing = slots
            .iter()
            .copied()
            .find(|&slot| comparator.same_identity(self.entries[slot].value, entry.value));

        match existing {
            Some(slot) => {
                self.entries[slot] = entry;
                self.overwritten += 1;
            }
            None => {
                slots.push(self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Find the entry sharing `probe`'s identity. `hash` must be
    /// `comparator.identity_hash(probe)`.
    pub fn find<C: Comparator<T> + ?Sized>(
        &self,
        probe: &T,
        hash: u64,
        comparator: &C,
    ) -> Option<&Entry<'a, T>> {
        self.buckets.get(&hash)?.iter().find_map(|&slot| {
            let entry = &self.entries[slot];
            comparator.same_identity(entry.value, probe).then_some(entry)
        })
    }

    pub fn contains<C: Comparator<T> + ?Sized>(&self, probe: &T, hash: u64, comparator: &C) -> bool {
        self.find(probe, hash, comparator).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<'a, T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of input elements dropped because a later element shared
    /// their identity.
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}
