//! Restartable adapter over single-use iterators.
//!
//! The first pass pulls from the wrapped iterator and records every element
//! into an append-only buffer. Later passes replay the buffer and only pull
//! the iterator for positions that were never recorded, so an abandoned pass
//! loses nothing and two interleaved passes see the same elements.

use crate::sequence::{Cursor, Sequence};
use alloc::vec::Vec;
use core::cell::RefCell;

struct BufferState<I: Iterator> {
    source: Option<I>,
    buffer: Vec<I::Item>,
}

/// A sequence built from a one-shot pull source.
pub struct Buffered<I: Iterator> {
    state: RefCell<BufferState<I>>,
}

impl<I: Iterator> Buffered<I> {
    /// Wraps `source`; nothing is pulled until a cursor is advanced.
    pub fn new(source: I) -> Self {
        Self {
            state: RefCell::new(BufferState {
                source: Some(source),
                buffer: Vec::new(),
            }),
        }
    }

    /// Number of elements recorded so far.
    pub fn buffered_len(&self) -> usize {
        self.state.borrow().buffer.len()
    }

    /// Returns true once the wrapped iterator has reported exhaustion.
    pub fn is_exhausted(&self) -> bool {
        self.state.borrow().source.is_none()
    }
}

impl<I> Buffered<I>
where
    I: Iterator,
    I::Item: Clone,
{
    fn fetch(&self, position: usize) -> Option<I::Item> {
        let mut state = self.state.borrow_mut();
        if let Some(item) = state.buffer.get(position) {
            return Some(item.clone());
        }
        // Positions are only ever requested one past the recorded tail.
        debug_assert_eq!(position, state.buffer.len());
        let pulled = state.source.as_mut()?.next();
        match pulled {
            Some(item) => {
                state.buffer.push(item.clone());
                Some(item)
            }
            None => {
                state.source = None;
                None
            }
        }
    }
}

impl<I> Sequence for Buffered<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn cursor(&self) -> Cursor<'_, I::Item> {
        Cursor::new(ReplayCursor {
            owner: self,
            position: 0,
        })
    }
}

struct ReplayCursor<'a, I: Iterator> {
    owner: &'a Buffered<I>,
    position: usize,
}

impl<I> Iterator for ReplayCursor<'_, I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.owner.fetch(self.position)?;
        self.position += 1;
        Some(item)
    }
}

/// Wraps a single-use iterator so it can be traversed any number of times.
pub fn from_once<I: IntoIterator>(source: I) -> Buffered<I::IntoIter> {
    Buffered::new(source.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::Cell;

    #[test]
    fn test_replays_after_first_pass() {
        let pulls = Cell::new(0);
        let seq = from_once((1..=3).inspect(|_| pulls.set(pulls.get() + 1)));

        let first: Vec<_> = seq.cursor().collect();
        let second: Vec<_> = seq.cursor().collect();

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(second, first);
        assert_eq!(pulls.get(), 3);
        assert!(seq.is_exhausted());
    }

    #[test]
    fn test_abandoned_pass_is_resumed() {
        let seq = from_once(vec!['a', 'b', 'c']);
        let mut partial = seq.cursor();
        assert_eq!(partial.next(), Some('a'));
        drop(partial);
        assert_eq!(seq.buffered_len(), 1);

        let all: Vec<_> = seq.cursor().collect();
        assert_eq!(all, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_interleaved_passes() {
        let seq = from_once(vec![1, 2]);
        let mut left = seq.cursor();
        let mut right = seq.cursor();
        assert_eq!(left.next(), Some(1));
        assert_eq!(right.next(), Some(1));
        assert_eq!(right.next(), Some(2));
        assert_eq!(left.next(), Some(2));
        assert_eq!(left.next(), None);
        assert_eq!(right.next(), None);
    }
}
