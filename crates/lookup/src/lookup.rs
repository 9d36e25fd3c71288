//! The Lookup engine: a key-to-group index built in one pass.
//!
//! Groups are kept in a vector in the order their keys were first seen; a
//! `HashTable` of group positions makes key lookup O(1) on average. Elements
//! inside a group keep source order. Nothing is re-sorted or re-scanned after
//! the build pass.

use crate::comparer::{DefaultEquality, EqualityComparer};
use alloc::rc::Rc;
use alloc::vec::Vec;
use cinq_core::{Cursor, RandomAccess, Sequence, SharedIter};
use hashbrown::HashTable;

/// A key together with the elements that share it.
#[derive(Debug)]
pub struct Grouping<K, E> {
    key: K,
    elements: Rc<[E]>,
}

impl<K: Clone, E> Clone for Grouping<K, E> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            elements: Rc::clone(&self.elements),
        }
    }
}

impl<K, E> Grouping<K, E> {
    pub fn new(key: K, elements: Vec<E>) -> Self {
        Self {
            key,
            elements: elements.into(),
        }
    }

    /// A group with no elements, used for unmatched group-join rows.
    pub fn empty(key: K) -> Self {
        Self::new(key, Vec::new())
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Owning iterator over the elements that shares the group's storage.
    pub fn shared_elements(&self) -> SharedIter<E> {
        SharedIter::new(Rc::clone(&self.elements))
    }
}

impl<K, E: Clone> Sequence for Grouping<K, E> {
    type Item = E;

    fn cursor(&self) -> Cursor<'_, E> {
        Cursor::new(self.elements.iter().cloned())
    }

    fn random_access(&self) -> Option<&dyn RandomAccess<E>> {
        Some(self)
    }
}

impl<K, E: Clone> RandomAccess<E> for Grouping<K, E> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn get(&self, index: usize) -> Option<E> {
        self.elements.get(index).cloned()
    }
}

impl<K, E: Clone> IntoIterator for Grouping<K, E> {
    type Item = E;
    type IntoIter = SharedIter<E>;

    fn into_iter(self) -> SharedIter<E> {
        SharedIter::new(self.elements)
    }
}

impl<'a, K, E> IntoIterator for &'a Grouping<K, E> {
    type Item = &'a E;
    type IntoIter = core::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Index of groups keyed by `K`, compared with `C`.
pub struct Lookup<K, E, C = DefaultEquality> {
    groups: Vec<Grouping<K, E>>,
    slots: HashTable<usize>,
    comparer: C,
}

impl<K, E> Lookup<K, E, DefaultEquality>
where
    K: Eq + core::hash::Hash,
{
    /// Builds a lookup over `source` with default key equality.
    pub fn build<S, KF, EF>(source: &S, key: KF, element: EF) -> Self
    where
        S: Sequence + ?Sized,
        KF: Fn(&S::Item) -> K,
        EF: Fn(S::Item) -> E,
    {
        Self::build_with(source, key, element, DefaultEquality::new())
    }
}

impl<K, E, C: EqualityComparer<K>> Lookup<K, E, C> {
    /// Builds a lookup over `source`, comparing keys with `comparer`.
    ///
    /// Consumes exactly one pass of `source`.
    pub fn build_with<S, KF, EF>(source: &S, key: KF, element: EF, comparer: C) -> Self
    where
        S: Sequence + ?Sized,
        KF: Fn(&S::Item) -> K,
        EF: Fn(S::Item) -> E,
    {
        Self::from_pairs(
            source.cursor().untracked().map(|item| {
                let k = key(&item);
                (k, element(item))
            }),
            comparer,
        )
    }

    /// Builds a lookup from already keyed elements.
    pub fn from_pairs<I>(pairs: I, comparer: C) -> Self
    where
        I: IntoIterator<Item = (K, E)>,
    {
        let mut pending: Vec<(K, Vec<E>)> = Vec::new();
        let mut slots = HashTable::new();

        for (key, element) in pairs {
            let hash = comparer.hash(&key);
            let found = slots
                .find(hash, |&slot: &usize| comparer.equals(&pending[slot].0, &key))
                .copied();
            match found {
                Some(slot) => pending[slot].1.push(element),
                None => {
                    let slot = pending.len();
                    pending.push((key, alloc::vec![element]));
                    slots.insert_unique(hash, slot, |&s: &usize| comparer.hash(&pending[s].0));
                }
            }
        }

        let groups: Vec<Grouping<K, E>> = pending
            .into_iter()
            .map(|(key, elements)| Grouping::new(key, elements))
            .collect();

        #[cfg(feature = "debug-log")]
        tracing::trace!(
            groups = groups.len(),
            elements = groups.iter().map(Grouping::len).sum::<usize>(),
            "lookup built"
        );

        Self {
            groups,
            slots,
            comparer,
        }
    }

    /// Returns the group for `key`, or `None` if the key was never seen.
    pub fn get(&self, key: &K) -> Option<&Grouping<K, E>> {
        let hash = self.comparer.hash(key);
        self.slots
            .find(hash, |&slot| self.comparer.equals(&self.groups[slot].key, key))
            .map(|&slot| &self.groups[slot])
    }

    /// Returns true if at least one element had `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group at `position` in first-seen key order.
    pub fn group_at(&self, position: usize) -> Option<&Grouping<K, E>> {
        self.groups.get(position)
    }

    /// Groups in first-seen key order.
    pub fn iter(&self) -> core::slice::Iter<'_, Grouping<K, E>> {
        self.groups.iter()
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }
}

impl<K: Clone, E, C> Sequence for Lookup<K, E, C> {
    type Item = Grouping<K, E>;

    fn cursor(&self) -> Cursor<'_, Grouping<K, E>> {
        Cursor::new(self.groups.iter().cloned())
    }

    fn random_access(&self) -> Option<&dyn RandomAccess<Grouping<K, E>>> {
        Some(self)
    }
}

impl<K: Clone, E, C> RandomAccess<Grouping<K, E>> for Lookup<K, E, C> {
    fn len(&self) -> usize {
        self.groups.len()
    }

    fn get(&self, index: usize) -> Option<Grouping<K, E>> {
        self.groups.get(index).cloned()
    }
}

impl<'a, K, E, C> IntoIterator for &'a Lookup<K, E, C> {
    type Item = &'a Grouping<K, E>;
    type IntoIter = core::slice::Iter<'a, Grouping<K, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl<K: core::fmt::Debug, E: core::fmt::Debug, C> core::fmt::Debug for Lookup<K, E, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.groups.iter()).finish()
    }
}
