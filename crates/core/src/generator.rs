//! Generative sources: numeric ranges, repeated elements and callback-driven
//! producers.
//!
//! Each generator keeps its parameters in the sequence value and its running
//! position in a per-pass state struct, so passes never share counters.

use crate::error::{Error, Result};
use crate::sequence::{Cursor, RandomAccess, Sequence};

/// Arithmetic progression `start, start + step, ...` stopping before `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    start: i64,
    end: i64,
    step: i64,
}

impl Range {
    /// Creates a range. `step` must be positive.
    pub fn new(start: i64, end: i64, step: i64) -> Result<Self> {
        if step <= 0 {
            return Err(Error::invalid_argument("step", "must be greater than zero"));
        }
        Ok(Self { start, end, step })
    }

    fn value_at(&self, index: usize) -> i64 {
        self.start.wrapping_add(self.step.wrapping_mul(index as i64))
    }

    fn span(&self) -> u64 {
        if self.end <= self.start {
            0
        } else {
            self.end.abs_diff(self.start)
        }
    }
}

impl Sequence for Range {
    type Item = i64;

    fn cursor(&self) -> Cursor<'_, i64> {
        Cursor::new(RangeState {
            range: *self,
            offset: 0,
        })
    }

    fn random_access(&self) -> Option<&dyn RandomAccess<i64>> {
        Some(self)
    }
}

impl RandomAccess<i64> for Range {
    fn len(&self) -> usize {
        self.span().div_ceil(self.step as u64) as usize
    }

    fn get(&self, index: usize) -> Option<i64> {
        (index < RandomAccess::len(self)).then(|| self.value_at(index))
    }
}

struct RangeState {
    range: Range,
    offset: u64,
}

impl Iterator for RangeState {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.offset >= self.range.span() {
            return None;
        }
        let value = self.range.start.wrapping_add(self.offset as i64);
        self.offset = self.offset.saturating_add(self.range.step as u64);
        Some(value)
    }
}

/// A single element repeated `count` times.
#[derive(Clone, Debug)]
pub struct Repeat<T> {
    element: T,
    count: usize,
}

impl<T: Clone> Sequence for Repeat<T> {
    type Item = T;

    fn cursor(&self) -> Cursor<'_, T> {
        Cursor::new(RepeatState {
            element: &self.element,
            remaining: self.count,
        })
    }

    fn random_access(&self) -> Option<&dyn RandomAccess<T>> {
        Some(self)
    }
}

impl<T: Clone> RandomAccess<T> for Repeat<T> {
    fn len(&self) -> usize {
        self.count
    }

    fn get(&self, index: usize) -> Option<T> {
        (index < self.count).then(|| self.element.clone())
    }
}

struct RepeatState<'a, T> {
    element: &'a T,
    remaining: usize,
}

impl<T: Clone> Iterator for RepeatState<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.element.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Calls a producer for each slot `0..count`; slots where it returns `None`
/// are skipped.
#[derive(Clone)]
pub struct Generate<F> {
    producer: F,
    count: usize,
}

impl<T, F> Sequence for Generate<F>
where
    T: Clone,
    F: Fn(usize) -> Option<T>,
{
    type Item = T;

    fn cursor(&self) -> Cursor<'_, T> {
        Cursor::new(GenerateState {
            producer: &self.producer,
            slot: 0,
            count: self.count,
        })
    }
}

struct GenerateState<'a, F> {
    producer: &'a F,
    slot: usize,
    count: usize,
}

impl<T, F> Iterator for GenerateState<'_, F>
where
    F: Fn(usize) -> Option<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while self.slot < self.count {
            let slot = self.slot;
            self.slot += 1;
            if let Some(value) = (self.producer)(slot) {
                return Some(value);
            }
        }
        None
    }
}

/// Integers from `start` up to (not including) `end`, advancing by `step`.
pub fn range(start: i64, end: i64, step: i64) -> Result<Range> {
    Range::new(start, end, step)
}

/// `element` repeated `count` times.
pub fn repeat<T: Clone>(element: T, count: usize) -> Repeat<T> {
    Repeat { element, count }
}

/// Producer-driven sequence over `count` slots.
pub fn generate<T, F>(count: usize, producer: F) -> Generate<F>
where
    F: Fn(usize) -> Option<T>,
{
    Generate { producer, count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_range_with_step() {
        let r = range(0, 10, 3).unwrap();
        assert_eq!(r.cursor().collect::<Vec<_>>(), vec![0, 3, 6, 9]);
        assert_eq!(RandomAccess::len(&r), 4);
        assert_eq!(r.get(2), Some(6));
        assert_eq!(r.get(4), None);
    }

    #[test]
    fn test_range_empty_when_end_before_start() {
        let r = range(5, 2, 1).unwrap();
        assert_eq!(r.cursor().count(), 0);
        assert_eq!(RandomAccess::len(&r), 0);
    }

    #[test]
    fn test_range_rejects_non_positive_step() {
        assert!(matches!(range(0, 3, 0), Err(Error::InvalidArgument { .. })));
        assert!(range(0, 3, -1).is_err());
    }

    #[test]
    fn test_repeat() {
        let r = repeat("x", 3);
        assert_eq!(r.cursor().collect::<Vec<_>>(), vec!["x", "x", "x"]);
        assert_eq!(r.cursor().count(), 3);
    }

    #[test]
    fn test_generate_skips_none() {
        let g = generate(6, |i| (i % 2 == 0).then_some(i * 10));
        assert_eq!(g.cursor().collect::<Vec<_>>(), vec![0, 20, 40]);
        // Second pass starts from slot zero again.
        assert_eq!(g.cursor().collect::<Vec<_>>(), vec![0, 20, 40]);
    }

    #[test]
    fn test_generate_borrowed_elements() {
        let words = vec![String::from("ab"), String::from("cd")];
        let g = generate(words.len(), |i| words.get(i).map(String::as_str));
        let mut cursor = g.cursor();
        assert_eq!(cursor.next(), Some("ab"));
        assert_eq!(cursor.current(), Some(&"ab"));
        assert_eq!(cursor.next(), Some("cd"));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.index(), None);
    }
}
