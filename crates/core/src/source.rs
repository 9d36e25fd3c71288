//! Fixed-collection sources.
//!
//! A [`Source`] shares its backing slice through an `Rc`, so cloning the
//! source or handing it to several stages never copies the elements.

use crate::sequence::{Cursor, RandomAccess, Sequence};
use alloc::rc::Rc;
use alloc::vec::Vec;

/// A sequence over a fixed, shared collection.
#[derive(Debug)]
pub struct Source<T> {
    items: Rc<[T]>,
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
        }
    }
}

impl<T> Source<T> {
    /// Creates a source that takes ownership of `items`.
    pub fn new(items: Vec<T>) -> Self {
        Self { items: items.into() }
    }

    /// Creates a source over an already shared slice.
    pub fn from_shared(items: Rc<[T]>) -> Self {
        Self { items }
    }

    /// Returns the backing elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the source holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> Source<T> {
    /// Creates a source from a borrowed slice, copying its elements once.
    pub fn from_slice(items: &[T]) -> Self {
        Self { items: items.into() }
    }
}

impl<T: Clone> Sequence for Source<T> {
    type Item = T;

    fn cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.items.iter().cloned())
    }

    fn random_access(&self) -> Option<&dyn RandomAccess<T>> {
        Some(self)
    }
}

impl<T: Clone> RandomAccess<T> for Source<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<T> {
        self.items.get(index).cloned()
    }
}

impl<T> FromIterator<T> for Source<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> From<Vec<T>> for Source<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Clone> IntoIterator for Source<T> {
    type Item = T;
    type IntoIter = SharedIter<T>;

    fn into_iter(self) -> SharedIter<T> {
        SharedIter::new(self.items)
    }
}

/// Owning iterator over a shared slice.
///
/// Used wherever an element set must outlive the pass that produced it, such
/// as the inner sequences returned from a `select_many` callback.
#[derive(Debug, Clone)]
pub struct SharedIter<T> {
    items: Rc<[T]>,
    position: usize,
}

impl<T> SharedIter<T> {
    /// Starts at the front of `items`.
    pub fn new(items: Rc<[T]>) -> Self {
        Self { items, position: 0 }
    }
}

impl<T: Clone> Iterator for SharedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.position)?.clone();
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for SharedIter<T> {}

/// Creates a source that takes ownership of `items`.
pub fn from_vec<T>(items: Vec<T>) -> Source<T> {
    Source::new(items)
}

/// Creates a source by draining an iterator eagerly.
///
/// Use [`crate::from_once`] instead when the iterator should be consumed
/// lazily.
pub fn from_iter<I: IntoIterator>(iter: I) -> Source<I::Item> {
    iter.into_iter().collect()
}

/// Creates an empty source.
pub fn empty<T>() -> Source<T> {
    Source::new(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_source_restarts() {
        let source = from_vec(vec![1, 2, 3]);
        let first: Vec<_> = source.cursor().collect();
        let second: Vec<_> = source.cursor().collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_source_random_access() {
        let source = from_vec(vec!['a', 'b']);
        let access = source.random_access().unwrap();
        assert_eq!(access.len(), 2);
        assert_eq!(access.get(1), Some('b'));
        assert_eq!(access.get(2), None);
    }

    #[test]
    fn test_clone_shares_backing_data() {
        let source = from_vec(vec![1, 2]);
        let copy = source.clone();
        assert!(core::ptr::eq(source.as_slice(), copy.as_slice()));
    }

    #[test]
    fn test_shared_iter_is_owned() {
        let items: Vec<_> = from_vec(vec![4, 5, 6]).into_iter().collect();
        assert_eq!(items, vec![4, 5, 6]);
    }

    #[test]
    fn test_empty_source() {
        let source: Source<u8> = empty();
        assert!(source.is_empty());
        assert_eq!(source.cursor().count(), 0);
    }
}
