//! Combining stages: `append`, `prepend`, `concat`, `reverse`, `zip` and
//! `default_if_empty`.

use crate::func::Combine;
use alloc::vec::Vec;
use cinq_core::{Cursor, RandomAccess, Sequence};

/// Yields the upstream elements followed by one extra element.
#[derive(Clone, Debug)]
pub struct Append<S: Sequence> {
    source: S,
    element: S::Item,
}

impl<S: Sequence> Append<S> {
    pub fn new(source: S, element: S::Item) -> Self {
        Self { source, element }
    }
}

impl<S: Sequence> Sequence for Append<S> {
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(EdgeCursor {
            upstream: self.source.cursor().untracked(),
            extra: Some(&self.element),
            leading: false,
        })
    }
}

/// Yields one extra element followed by the upstream elements.
#[derive(Clone, Debug)]
pub struct Prepend<S: Sequence> {
    source: S,
    element: S::Item,
}

impl<S: Sequence> Prepend<S> {
    pub fn new(source: S, element: S::Item) -> Self {
        Self { source, element }
    }
}

impl<S: Sequence> Sequence for Prepend<S> {
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(EdgeCursor {
            upstream: self.source.cursor().untracked(),
            extra: Some(&self.element),
            leading: true,
        })
    }
}

struct EdgeCursor<'a, T> {
    upstream: Cursor<'a, T>,
    extra: Option<&'a T>,
    leading: bool,
}

impl<T: Clone> Iterator for EdgeCursor<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.leading {
            if let Some(extra) = self.extra.take() {
                return Some(extra.clone());
            }
            return self.upstream.next();
        }
        if self.extra.is_none() {
            return None;
        }
        match self.upstream.next() {
            Some(item) => Some(item),
            None => self.extra.take().cloned(),
        }
    }
}

/// Yields every element of `first`, then every element of `second`.
#[derive(Clone, Debug)]
pub struct Concat<S, T> {
    first: S,
    second: T,
}

impl<S, T> Concat<S, T> {
    pub fn new(first: S, second: T) -> Self {
        Self { first, second }
    }
}

impl<S, T> Sequence for Concat<S, T>
where
    S: Sequence,
    T: Sequence<Item = S::Item>,
{
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(ConcatCursor {
            first: Some(self.first.cursor().untracked()),
            second: &self.second,
            rest: None,
        })
    }
}

struct ConcatCursor<'a, T, S> {
    first: Option<Cursor<'a, T>>,
    second: &'a S,
    rest: Option<Cursor<'a, T>>,
}

impl<T, S> Iterator for ConcatCursor<'_, T, S>
where
    T: Clone,
    S: Sequence<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(first) = self.first.as_mut() {
            if let Some(item) = first.next() {
                return Some(item);
            }
            // The second input is only opened once the first is exhausted.
            self.first = None;
            self.rest = Some(self.second.cursor().untracked());
        }
        self.rest.as_mut()?.next()
    }
}

/// Yields the upstream elements back to front.
///
/// The upstream is read in full on the first pull of each pass.
#[derive(Clone, Debug)]
pub struct Reverse<S> {
    source: S,
}

impl<S> Reverse<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: Sequence> Sequence for Reverse<S> {
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(ReverseCursor {
            upstream: Some(self.source.cursor().untracked()),
            buffer: Vec::new(),
        })
    }

    fn random_access(&self) -> Option<&dyn RandomAccess<S::Item>> {
        self.source.random_access()?;
        Some(self)
    }
}

impl<S: Sequence> RandomAccess<S::Item> for Reverse<S> {
    fn len(&self) -> usize {
        self.source.random_access().map_or(0, |ra| ra.len())
    }

    fn get(&self, index: usize) -> Option<S::Item> {
        let ra = self.source.random_access()?;
        let last = ra.len().checked_sub(1)?;
        ra.get(last.checked_sub(index)?)
    }
}

struct ReverseCursor<'a, T> {
    upstream: Option<Cursor<'a, T>>,
    buffer: Vec<T>,
}

impl<T: Clone> Iterator for ReverseCursor<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(upstream) = self.upstream.take() {
            self.buffer.extend(upstream);

            #[cfg(feature = "debug-log")]
            tracing::trace!(buffered = self.buffer.len(), "reverse buffer filled");
        }
        self.buffer.pop()
    }
}

/// Pairs elements of two sequences by position.
///
/// Both cursors advance together; the output ends as soon as either input
/// ends, so its length is that of the shorter input.
#[derive(Clone, Debug)]
pub struct Zip<A, B, F> {
    first: A,
    second: B,
    result: F,
}

impl<A, B, F> Zip<A, B, F> {
    pub fn new(first: A, second: B, result: F) -> Self {
        Self {
            first,
            second,
            result,
        }
    }
}

impl<A, B, F> Sequence for Zip<A, B, F>
where
    A: Sequence,
    B: Sequence,
    F: Combine<A::Item, B::Item>,
    F::Output: Clone,
{
    type Item = F::Output;

    fn cursor(&self) -> Cursor<'_, F::Output> {
        Cursor::new(ZipCursor {
            first: self.first.cursor().untracked(),
            second: self.second.cursor().untracked(),
            result: &self.result,
        })
    }
}

struct ZipCursor<'a, T, U, F> {
    first: Cursor<'a, T>,
    second: Cursor<'a, U>,
    result: &'a F,
}

impl<T: Clone, U: Clone, F: Combine<T, U>> Iterator for ZipCursor<'_, T, U, F> {
    type Item = F::Output;

    fn next(&mut self) -> Option<F::Output> {
        let a = self.first.next()?;
        let b = self.second.next()?;
        Some(self.result.combine(a, b))
    }
}

/// Yields the upstream elements, or a single default element when the
/// upstream is empty.
#[derive(Clone, Debug)]
pub struct DefaultIfEmpty<S: Sequence> {
    source: S,
    default: S::Item,
}

impl<S: Sequence> DefaultIfEmpty<S> {
    pub fn new(source: S, default: S::Item) -> Self {
        Self { source, default }
    }
}

impl<S: Sequence> Sequence for DefaultIfEmpty<S> {
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(DefaultIfEmptyCursor {
            upstream: self.source.cursor().untracked(),
            default: Some(&self.default),
        })
    }
}

struct DefaultIfEmptyCursor<'a, T> {
    upstream: Cursor<'a, T>,
    default: Option<&'a T>,
}

impl<T: Clone> Iterator for DefaultIfEmptyCursor<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.upstream.next() {
            Some(item) => {
                self.default = None;
                Some(item)
            }
            None => self.default.take().cloned(),
        }
    }
}
