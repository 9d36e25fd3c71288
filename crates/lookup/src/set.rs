//! Membership set backing the set operators.

use crate::comparer::{DefaultEquality, EqualityComparer};
use cinq_core::Sequence;
use hashbrown::HashTable;

/// A set of elements compared with `C`.
pub struct MembershipSet<T, C = DefaultEquality> {
    table: HashTable<T>,
    comparer: C,
}

impl<T: Eq + core::hash::Hash> MembershipSet<T, DefaultEquality> {
    pub fn new() -> Self {
        Self::with_comparer(DefaultEquality::new())
    }
}

impl<T: Eq + core::hash::Hash> Default for MembershipSet<T, DefaultEquality> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: EqualityComparer<T>> MembershipSet<T, C> {
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            table: HashTable::new(),
            comparer,
        }
    }

    /// Collects one full pass of `source`.
    pub fn from_sequence<S>(source: &S, comparer: C) -> Self
    where
        S: Sequence<Item = T> + ?Sized,
        T: Clone,
    {
        let mut set = Self::with_comparer(comparer);
        for item in source.cursor().untracked() {
            set.insert(item);
        }
        set
    }

    /// Adds `value`. Returns true if no equal element was present.
    pub fn insert(&mut self, value: T) -> bool {
        let Self { table, comparer } = self;
        let hash = comparer.hash(&value);
        if table.find(hash, |probe| comparer.equals(probe, &value)).is_some() {
            return false;
        }
        table.insert_unique(hash, value, |stored| comparer.hash(stored));
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        let hash = self.comparer.hash(value);
        self.table
            .find(hash, |probe| self.comparer.equals(probe, value))
            .is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
