//! Partitioning stages: `skip`, `take` and their `_while` and `_last`
//! variants.

use crate::func::Predicate;
use alloc::collections::VecDeque;
use cinq_core::{Cursor, RandomAccess, Sequence};

/// Bypasses the first `count` upstream elements.
#[derive(Clone, Debug)]
pub struct Skip<S> {
    source: S,
    count: usize,
}

impl<S> Skip<S> {
    pub fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S: Sequence> Sequence for Skip<S> {
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(SkipCursor {
            upstream: self.source.cursor().untracked(),
            pending: self.count,
        })
    }

    fn random_access(&self) -> Option<&dyn RandomAccess<S::Item>> {
        self.source.random_access()?;
        Some(self)
    }
}

impl<S: Sequence> RandomAccess<S::Item> for Skip<S> {
    fn len(&self) -> usize {
        self.source
            .random_access()
            .map_or(0, |ra| ra.len().saturating_sub(self.count))
    }

    fn get(&self, index: usize) -> Option<S::Item> {
        self.source.random_access()?.get(index.checked_add(self.count)?)
    }
}

struct SkipCursor<'a, T> {
    upstream: Cursor<'a, T>,
    pending: usize,
}

impl<T: Clone> Iterator for SkipCursor<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.pending > 0 {
            let count = core::mem::take(&mut self.pending);
            self.upstream.nth(count - 1)?;
        }
        self.upstream.next()
    }
}

/// Yields at most the first `count` upstream elements.
#[derive(Clone, Debug)]
pub struct Take<S> {
    source: S,
    count: usize,
}

impl<S> Take<S> {
    pub fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(TakeCursor {
            upstream: self.source.cursor().untracked(),
            remaining: self.count,
        })
    }

    fn random_access(&self) -> Option<&dyn RandomAccess<S::Item>> {
        self.source.random_access()?;
        Some(self)
    }
}

impl<S: Sequence> RandomAccess<S::Item> for Take<S> {
    fn len(&self) -> usize {
        self.source
            .random_access()
            .map_or(0, |ra| ra.len().min(self.count))
    }

    fn get(&self, index: usize) -> Option<S::Item> {
        if index >= self.count {
            return None;
        }
        self.source.random_access()?.get(index)
    }
}

struct TakeCursor<'a, T> {
    upstream: Cursor<'a, T>,
    remaining: usize,
}

impl<T: Clone> Iterator for TakeCursor<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        // Never pull upstream once the quota is spent.
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.upstream.next()
    }
}

/// Bypasses elements while the predicate holds, then yields the rest.
#[derive(Clone, Debug)]
pub struct SkipWhile<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> SkipWhile<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<S, P> Sequence for SkipWhile<S, P>
where
    S: Sequence,
    P: Predicate<S::Item>,
{
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(SkipWhileCursor {
            upstream: self.source.cursor().untracked(),
            predicate: &self.predicate,
            position: 0,
            yielding: false,
        })
    }
}

struct SkipWhileCursor<'a, T, P> {
    upstream: Cursor<'a, T>,
    predicate: &'a P,
    position: usize,
    yielding: bool,
}

impl<T: Clone, P: Predicate<T>> Iterator for SkipWhileCursor<'_, T, P> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.yielding {
            return self.upstream.next();
        }
        for item in self.upstream.by_ref() {
            let index = self.position;
            self.position += 1;
            if !self.predicate.test(&item, index) {
                // Latch: the predicate is never consulted again this pass.
                self.yielding = true;
                return Some(item);
            }
        }
        None
    }
}

/// Yields elements while the predicate holds and stops at the first failure.
#[derive(Clone, Debug)]
pub struct TakeWhile<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> TakeWhile<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<S, P> Sequence for TakeWhile<S, P>
where
    S: Sequence,
    P: Predicate<S::Item>,
{
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(TakeWhileCursor {
            upstream: self.source.cursor().untracked(),
            predicate: &self.predicate,
            position: 0,
            done: false,
        })
    }
}

struct TakeWhileCursor<'a, T, P> {
    upstream: Cursor<'a, T>,
    predicate: &'a P,
    position: usize,
    done: bool,
}

impl<T: Clone, P: Predicate<T>> Iterator for TakeWhileCursor<'_, T, P> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        let item = self.upstream.next()?;
        let index = self.position;
        self.position += 1;
        if self.predicate.test(&item, index) {
            Some(item)
        } else {
            self.done = true;
            None
        }
    }
}

/// Yields all but the last `count` upstream elements.
///
/// Holds back a FIFO of `count` elements; the oldest one is released each
/// time a new element arrives at a full buffer.
#[derive(Clone, Debug)]
pub struct SkipLast<S> {
    source: S,
    count: usize,
}

impl<S> SkipLast<S> {
    pub fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S: Sequence> Sequence for SkipLast<S> {
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(SkipLastCursor {
            upstream: self.source.cursor().untracked(),
            buffer: VecDeque::with_capacity(self.count.min(64)),
            count: self.count,
        })
    }
}

struct SkipLastCursor<'a, T> {
    upstream: Cursor<'a, T>,
    buffer: VecDeque<T>,
    count: usize,
}

impl<T: Clone> Iterator for SkipLastCursor<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.count == 0 {
            return self.upstream.next();
        }
        for item in self.upstream.by_ref() {
            if self.buffer.len() == self.count {
                let released = self.buffer.pop_front();
                self.buffer.push_back(item);
                return released;
            }
            self.buffer.push_back(item);
        }
        // Whatever is still buffered lies within `count` of the end.
        self.buffer.clear();
        None
    }
}

/// Yields the last `count` upstream elements in their original order.
#[derive(Clone, Debug)]
pub struct TakeLast<S> {
    source: S,
    count: usize,
}

impl<S> TakeLast<S> {
    pub fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S: Sequence> Sequence for TakeLast<S> {
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(TakeLastCursor {
            upstream: Some(self.source.cursor().untracked()),
            buffer: VecDeque::new(),
            count: self.count,
        })
    }
}

struct TakeLastCursor<'a, T> {
    upstream: Option<Cursor<'a, T>>,
    buffer: VecDeque<T>,
    count: usize,
}

impl<T: Clone> TakeLastCursor<'_, T> {
    fn fill(&mut self, upstream: Cursor<'_, T>) {
        if self.count == 0 {
            return;
        }
        for item in upstream {
            if self.buffer.len() == self.count {
                self.buffer.pop_front();
            }
            self.buffer.push_back(item);
            if self.buffer.len() > self.count {
                unreachable!(
                    "take_last buffer holds {} elements for a window of {}",
                    self.buffer.len(),
                    self.count
                );
            }
        }

        #[cfg(feature = "debug-log")]
        tracing::trace!(retained = self.buffer.len(), "take_last window filled");
    }
}

impl<T: Clone> Iterator for TakeLastCursor<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(upstream) = self.upstream.take() {
            self.fill(upstream);
        }
        self.buffer.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::func::{Indexed, Plain};
    use alloc::vec;
    use alloc::vec::Vec;
    use cinq_core::{from_once, from_vec};

    fn collect<S: Sequence>(s: &S) -> Vec<S::Item> {
        s.cursor().collect()
    }

    #[test]
    fn test_skip_and_take() {
        let source = from_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(collect(&Skip::new(source.clone(), 2)), vec![3, 4, 5]);
        assert_eq!(collect(&Skip::new(source.clone(), 9)), Vec::<i32>::new());
        assert_eq!(collect(&Take::new(source.clone(), 2)), vec![1, 2]);
        assert_eq!(collect(&Take::new(source, 0)), Vec::<i32>::new());
    }

    #[test]
    fn test_take_does_not_overpull() {
        let source = from_once(1..=10);
        let take = Take::new(&source, 3);
        assert_eq!(collect(&take), vec![1, 2, 3]);
        assert_eq!(source.buffered_len(), 3);
    }

    #[test]
    fn test_skip_take_random_access() {
        let source = from_vec(vec![1, 2, 3, 4, 5]);
        let window = Take::new(Skip::new(source, 1), 3);
        let ra = window.random_access().unwrap();
        assert_eq!(ra.len(), 3);
        assert_eq!(ra.get(0), Some(2));
        assert_eq!(ra.get(2), Some(4));
        assert_eq!(ra.get(3), None);
    }

    #[test]
    fn test_skip_while_latches() {
        let stage = SkipWhile::new(from_vec(vec![1, 2, 5, 1, 6]), Plain(|x: &i32| *x < 3));
        assert_eq!(collect(&stage), vec![5, 1, 6]);
    }

    #[test]
    fn test_take_while_stops_permanently() {
        let stage = TakeWhile::new(from_vec(vec![1, 2, 5, 1]), Plain(|x: &i32| *x < 3));
        assert_eq!(collect(&stage), vec![1, 2]);

        let mut cursor = stage.cursor();
        cursor.by_ref().for_each(drop);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_take_while_indexed() {
        let stage = TakeWhile::new(from_vec(vec!['a'; 5]), Indexed(|_: &char, i: usize| i < 2));
        assert_eq!(collect(&stage).len(), 2);
    }

    #[test]
    fn test_skip_last() {
        let source = from_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(collect(&SkipLast::new(source.clone(), 2)), vec![1, 2, 3]);
        assert_eq!(collect(&SkipLast::new(source.clone(), 0)), vec![1, 2, 3, 4, 5]);
        assert_eq!(collect(&SkipLast::new(source, 7)), Vec::<i32>::new());
    }

    #[test]
    fn test_take_last() {
        let source = from_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(collect(&TakeLast::new(source.clone(), 2)), vec![4, 5]);
        assert_eq!(collect(&TakeLast::new(source.clone(), 0)), Vec::<i32>::new());
        assert_eq!(collect(&TakeLast::new(source, 9)), vec![1, 2, 3, 4, 5]);
    }
}
