//! Unique-key dictionary produced by `to_dictionary`.

use crate::comparer::{DefaultEquality, EqualityComparer};
use alloc::vec::Vec;
use cinq_core::{Error, Result};
use hashbrown::HashTable;

/// Insertion-ordered map that rejects repeated keys.
pub struct Dictionary<K, V, C = DefaultEquality> {
    entries: Vec<(K, V)>,
    slots: HashTable<usize>,
    comparer: C,
}

impl<K: Eq + core::hash::Hash, V> Dictionary<K, V, DefaultEquality> {
    pub fn new() -> Self {
        Self::with_comparer(DefaultEquality::new())
    }
}

impl<K: Eq + core::hash::Hash, V> Default for Dictionary<K, V, DefaultEquality> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: EqualityComparer<K>> Dictionary<K, V, C> {
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            entries: Vec::new(),
            slots: HashTable::new(),
            comparer,
        }
    }

    fn slot(&self, key: &K) -> Option<usize> {
        let hash = self.comparer.hash(key);
        self.slots
            .find(hash, |&slot| self.comparer.equals(&self.entries[slot].0, key))
            .copied()
    }

    /// Adds an entry. Fails with [`Error::DuplicateKey`] if an equal key is
    /// already present; the dictionary is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<()>
    where
        K: core::fmt::Debug,
    {
        if self.slot(&key).is_some() {
            return Err(Error::duplicate_key(&key));
        }
        let Self {
            entries,
            slots,
            comparer,
        } = self;
        let hash = comparer.hash(&key);
        let slot = entries.len();
        entries.push((key, value));
        slots.insert_unique(hash, slot, |&s| comparer.hash(&entries[s].0));
        Ok(())
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.slot(key).map(|slot| &self.entries[slot].1)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.slot(key).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Consumes the dictionary, returning its entries in insertion order.
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K: core::fmt::Debug, V: core::fmt::Debug, C> core::fmt::Debug for Dictionary<K, V, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::eq_by_key;
    use alloc::vec;

    #[test]
    fn test_insert_and_get() {
        let mut dict = Dictionary::new();
        dict.insert(1, "one").unwrap();
        dict.insert(2, "two").unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get(&2), Some(&"two"));
        assert_eq!(dict.get(&3), None);
        assert_eq!(dict.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut dict = Dictionary::new();
        dict.insert(1, 'a').unwrap();
        let result = dict.insert(1, 'b');
        assert!(matches!(result, Err(Error::DuplicateKey { .. })));
        assert_eq!(dict.get(&1), Some(&'a'));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_custom_comparer_duplicates() {
        let mut dict = Dictionary::with_comparer(eq_by_key(|k: &i32| k.abs()));
        dict.insert(-3, ()).unwrap();
        assert!(dict.insert(3, ()).is_err());
        assert!(dict.contains_key(&3));
    }
}
