//! The sequence contract shared by every source and stage.
//!
//! A [`Sequence`] is a restartable producer: each call to [`Sequence::cursor`]
//! starts an independent pass over the same logical elements. Nothing is
//! evaluated until a cursor is pulled.

use alloc::boxed::Box;

/// A lazily evaluated, restartable sequence of elements.
///
/// Elements are produced by value on every pass, which is why they must be
/// `Clone`: a pass over a fixed collection hands out copies of the backing
/// data rather than moving it out.
pub trait Sequence {
    /// Element type produced by each pass.
    type Item: Clone;

    /// Starts a fresh pass over the sequence.
    fn cursor(&self) -> Cursor<'_, Self::Item>;

    /// Returns the O(1) length/indexing capability when the sequence has one.
    ///
    /// Operators consult this before falling back to a linear scan.
    fn random_access(&self) -> Option<&dyn RandomAccess<Self::Item>> {
        None
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;

    #[inline]
    fn cursor(&self) -> Cursor<'_, S::Item> {
        (**self).cursor()
    }

    #[inline]
    fn random_access(&self) -> Option<&dyn RandomAccess<S::Item>> {
        (**self).random_access()
    }
}

/// O(1) length and positional access over a sequence.
pub trait RandomAccess<T> {
    /// Number of elements a full pass yields.
    fn len(&self) -> usize;

    /// Element at `index`, or `None` past the end.
    fn get(&self, index: usize) -> Option<T>;

    /// Returns true if a full pass yields nothing.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-pass traversal state over a [`Sequence`].
///
/// `index` is `None` (the "-1" position) before the first element and again
/// once the pass has observed exhaustion; `current` follows the same rule.
///
/// Stages pull their upstream through [`Cursor::untracked`] cursors, so only
/// the cursor handed to the caller keeps a copy of the current element.
pub struct Cursor<'a, T: 'a> {
    inner: Box<dyn Iterator<Item = T> + 'a>,
    index: Option<usize>,
    current: Option<T>,
    track_current: bool,
}

impl<'a, T> Cursor<'a, T> {
    /// Wraps a per-pass iterator.
    pub fn new<I>(inner: I) -> Self
    where
        I: Iterator<Item = T> + 'a,
    {
        Self {
            inner: Box::new(inner),
            index: None,
            current: None,
            track_current: true,
        }
    }

    /// Stops keeping a copy of the current element; `current()` stays `None`.
    ///
    /// For cursors consumed internally by another stage or a terminal
    /// operation, where nothing reads `current()`.
    pub fn untracked(mut self) -> Self {
        self.track_current = false;
        self.current = None;
        self
    }

    /// A cursor that yields nothing.
    pub fn empty() -> Self {
        Self::new(core::iter::empty())
    }

    /// Zero-based position of the last element yielded in this pass.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Last element yielded in this pass.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        self.index = None;
        self.current = None;
    }
}

impl<T: Clone> Iterator for Cursor<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.inner.next() {
            Some(item) => {
                self.index = Some(self.index.map_or(0, |i| i + 1));
                if self.track_current {
                    self.current = Some(item.clone());
                }
                Some(item)
            }
            None => {
                self.reset();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> core::fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor").field("index", &self.index).finish_non_exhaustive()
    }
}
