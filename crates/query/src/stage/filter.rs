//! Filtering stages: `filter` and `of_type`.

use crate::func::Predicate;
use cinq_core::{Cursor, ElementKind, Sequence};
use core::marker::PhantomData;

/// Yields upstream elements for which the predicate holds.
///
/// The index handed to the predicate is the upstream position, not the
/// position among elements yielded so far.
#[derive(Clone, Debug)]
pub struct Where<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> Where<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<S, P> Sequence for Where<S, P>
where
    S: Sequence,
    P: Predicate<S::Item>,
{
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(WhereCursor {
            upstream: self.source.cursor().untracked(),
            predicate: &self.predicate,
            position: 0,
        })
    }
}

struct WhereCursor<'a, T, P> {
    upstream: Cursor<'a, T>,
    predicate: &'a P,
    position: usize,
}

impl<T: Clone, P: Predicate<T>> Iterator for WhereCursor<'_, T, P> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        for item in self.upstream.by_ref() {
            let index = self.position;
            self.position += 1;
            if self.predicate.test(&item, index) {
                return Some(item);
            }
        }
        None
    }
}

/// Yields the upstream elements of kind `R`, extracted as `R`.
pub struct OfType<S, R> {
    source: S,
    _kind: PhantomData<fn() -> R>,
}

impl<S, R> OfType<S, R> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            _kind: PhantomData,
        }
    }
}

impl<S: Clone, R> Clone for OfType<S, R> {
    fn clone(&self) -> Self {
        Self::new(self.source.clone())
    }
}

impl<S, R> Sequence for OfType<S, R>
where
    S: Sequence,
    R: ElementKind<S::Item> + Clone,
{
    type Item = R;

    fn cursor(&self) -> Cursor<'_, R> {
        Cursor::new(OfTypeCursor::<_, R> {
            upstream: self.source.cursor().untracked(),
            _kind: PhantomData,
        })
    }
}

struct OfTypeCursor<'a, T, R> {
    upstream: Cursor<'a, T>,
    _kind: PhantomData<fn() -> R>,
}

impl<T: Clone, R: ElementKind<T>> Iterator for OfTypeCursor<'_, T, R> {
    type Item = R;

    fn next(&mut self) -> Option<R> {
        self.upstream.by_ref().find_map(|item| R::from_element(&item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::func::{Indexed, Plain};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use cinq_core::{from_vec, Value};

    #[test]
    fn test_where_plain() {
        let stage = Where::new(from_vec(vec![1, 2, 3, 4]), Plain(|x: &i32| x % 2 == 0));
        assert_eq!(stage.cursor().collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_where_index_is_upstream_position() {
        let seen = core::cell::RefCell::new(Vec::new());
        let stage = Where::new(
            from_vec(vec!['a', 'b', 'c', 'd']),
            Indexed(|c: &char, i: usize| {
                seen.borrow_mut().push(i);
                *c != 'b' && i != 3
            }),
        );
        assert_eq!(stage.cursor().collect::<Vec<_>>(), vec!['a', 'c']);
        assert_eq!(*seen.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_where_restarts_index_per_pass() {
        let stage = Where::new(from_vec(vec![5, 6, 7]), Indexed(|_: &i32, i: usize| i == 0));
        assert_eq!(stage.cursor().collect::<Vec<_>>(), vec![5]);
        assert_eq!(stage.cursor().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_of_type_extracts_variant() {
        let values = from_vec(vec![
            Value::Int32(1),
            Value::String("a".into()),
            Value::Null,
            Value::Int32(2),
        ]);
        let ints: OfType<_, i32> = OfType::new(values.clone());
        assert_eq!(ints.cursor().collect::<Vec<_>>(), vec![1, 2]);

        let strings: OfType<_, String> = OfType::new(values);
        assert_eq!(strings.cursor().collect::<Vec<_>>(), vec![String::from("a")]);
    }
}
