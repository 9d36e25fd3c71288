//! Set stages: `distinct`, `union`, `except` and `intersect`.
//!
//! Membership is decided by an [`EqualityComparer`]. Each pass builds its own
//! [`MembershipSet`]; nothing is shared between passes.

use cinq_core::{Cursor, Sequence};
use cinq_lookup::{EqualityComparer, MembershipSet};

/// Yields the first occurrence of every distinct element.
#[derive(Clone, Debug)]
pub struct Distinct<S, C> {
    source: S,
    comparer: C,
}

impl<S, C> Distinct<S, C> {
    pub fn new(source: S, comparer: C) -> Self {
        Self { source, comparer }
    }
}

impl<S, C> Sequence for Distinct<S, C>
where
    S: Sequence,
    C: EqualityComparer<S::Item>,
{
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(FirstSightCursor {
            first: self.source.cursor().untracked(),
            second: None,
            seen: MembershipSet::with_comparer(&self.comparer),
        })
    }
}

/// Yields the first occurrence of every distinct element of `first` followed
/// by `second`.
#[derive(Clone, Debug)]
pub struct Union<S, T, C> {
    first: S,
    second: T,
    comparer: C,
}

impl<S, T, C> Union<S, T, C> {
    pub fn new(first: S, second: T, comparer: C) -> Self {
        Self {
            first,
            second,
            comparer,
        }
    }
}

impl<S, T, C> Sequence for Union<S, T, C>
where
    S: Sequence,
    T: Sequence<Item = S::Item>,
    C: EqualityComparer<S::Item>,
{
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(FirstSightCursor {
            first: self.first.cursor().untracked(),
            second: Some(self.second.cursor().untracked()),
            seen: MembershipSet::with_comparer(&self.comparer),
        })
    }
}

struct FirstSightCursor<'a, T, C> {
    first: Cursor<'a, T>,
    second: Option<Cursor<'a, T>>,
    seen: MembershipSet<T, &'a C>,
}

impl<T, C> Iterator for FirstSightCursor<'_, T, C>
where
    T: Clone,
    C: EqualityComparer<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let item = match self.first.next() {
                Some(item) => item,
                None => self.second.as_mut()?.next()?,
            };
            if self.seen.insert(item.clone()) {
                return Some(item);
            }
        }
    }
}

/// Which side of a snapshot test lets an element through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Keep {
    Absent,
    Present,
}

/// Yields source elements that do not occur in `other`.
///
/// Source duplicates are kept; only membership in `other` is tested.
#[derive(Clone, Debug)]
pub struct Except<S, O, C> {
    source: S,
    other: O,
    comparer: C,
}

impl<S, O, C> Except<S, O, C> {
    pub fn new(source: S, other: O, comparer: C) -> Self {
        Self {
            source,
            other,
            comparer,
        }
    }
}

impl<S, O, C> Sequence for Except<S, O, C>
where
    S: Sequence,
    O: Sequence<Item = S::Item>,
    C: EqualityComparer<S::Item>,
{
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(SnapshotCursor {
            upstream: self.source.cursor().untracked(),
            other: &self.other,
            comparer: &self.comparer,
            snapshot: None,
            keep: Keep::Absent,
        })
    }
}

/// Yields source elements that also occur in `other`.
///
/// Source duplicates are kept; only membership in `other` is tested.
#[derive(Clone, Debug)]
pub struct Intersect<S, O, C> {
    source: S,
    other: O,
    comparer: C,
}

impl<S, O, C> Intersect<S, O, C> {
    pub fn new(source: S, other: O, comparer: C) -> Self {
        Self {
            source,
            other,
            comparer,
        }
    }
}

impl<S, O, C> Sequence for Intersect<S, O, C>
where
    S: Sequence,
    O: Sequence<Item = S::Item>,
    C: EqualityComparer<S::Item>,
{
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(SnapshotCursor {
            upstream: self.source.cursor().untracked(),
            other: &self.other,
            comparer: &self.comparer,
            snapshot: None,
            keep: Keep::Present,
        })
    }
}

struct SnapshotCursor<'a, T, O, C> {
    upstream: Cursor<'a, T>,
    other: &'a O,
    comparer: &'a C,
    snapshot: Option<MembershipSet<T, &'a C>>,
    keep: Keep,
}

impl<T, O, C> Iterator for SnapshotCursor<'_, T, O, C>
where
    T: Clone,
    O: Sequence<Item = T>,
    C: EqualityComparer<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let (other, comparer) = (self.other, self.comparer);
        // The other side is read in full on the first pull of each pass.
        let snapshot = self
            .snapshot
            .get_or_insert_with(|| MembershipSet::from_sequence(other, comparer));
        let keep_present = self.keep == Keep::Present;
        self.upstream
            .by_ref()
            .find(|item| snapshot.contains(item) == keep_present)
    }
}
