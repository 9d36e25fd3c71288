//! Projection stages: `select` and `select_many`.

use crate::func::Selector;
use cinq_core::{Cursor, RandomAccess, Sequence};

/// Applies a 1:1 transform to every upstream element.
#[derive(Clone, Debug)]
pub struct Select<S, F> {
    source: S,
    selector: F,
}

impl<S, F> Select<S, F> {
    pub fn new(source: S, selector: F) -> Self {
        Self { source, selector }
    }
}

impl<S, F> Sequence for Select<S, F>
where
    S: Sequence,
    F: Selector<S::Item>,
    F::Output: Clone,
{
    type Item = F::Output;

    fn cursor(&self) -> Cursor<'_, F::Output> {
        Cursor::new(SelectCursor {
            upstream: self.source.cursor().untracked(),
            selector: &self.selector,
            position: 0,
        })
    }

    fn random_access(&self) -> Option<&dyn RandomAccess<F::Output>> {
        self.source.random_access()?;
        Some(self)
    }
}

impl<S, F> RandomAccess<F::Output> for Select<S, F>
where
    S: Sequence,
    F: Selector<S::Item>,
    F::Output: Clone,
{
    fn len(&self) -> usize {
        self.source.random_access().map_or(0, |ra| ra.len())
    }

    fn get(&self, index: usize) -> Option<F::Output> {
        let item = self.source.random_access()?.get(index)?;
        Some(self.selector.select(item, index))
    }
}

struct SelectCursor<'a, T, F> {
    upstream: Cursor<'a, T>,
    selector: &'a F,
    position: usize,
}

impl<T: Clone, F: Selector<T>> Iterator for SelectCursor<'_, T, F> {
    type Item = F::Output;

    fn next(&mut self) -> Option<F::Output> {
        let item = self.upstream.next()?;
        let index = self.position;
        self.position += 1;
        Some(self.selector.select(item, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

/// Applies a 1:N transform and flattens the results, outer order first.
#[derive(Clone, Debug)]
pub struct SelectMany<S, F> {
    source: S,
    selector: F,
}

impl<S, F> SelectMany<S, F> {
    pub fn new(source: S, selector: F) -> Self {
        Self { source, selector }
    }
}

impl<S, F> Sequence for SelectMany<S, F>
where
    S: Sequence,
    F: Selector<S::Item>,
    F::Output: IntoIterator,
    <F::Output as IntoIterator>::Item: Clone,
{
    type Item = <F::Output as IntoIterator>::Item;

    fn cursor(&self) -> Cursor<'_, Self::Item> {
        Cursor::new(SelectManyCursor {
            upstream: self.source.cursor().untracked(),
            selector: &self.selector,
            position: 0,
            inner: None,
        })
    }
}

struct SelectManyCursor<'a, T, F>
where
    F: Selector<T>,
    F::Output: IntoIterator,
{
    upstream: Cursor<'a, T>,
    selector: &'a F,
    position: usize,
    inner: Option<<F::Output as IntoIterator>::IntoIter>,
}

impl<T, F> Iterator for SelectManyCursor<'_, T, F>
where
    T: Clone,
    F: Selector<T>,
    F::Output: IntoIterator,
{
    type Item = <F::Output as IntoIterator>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                if let Some(item) = inner.next() {
                    return Some(item);
                }
                self.inner = None;
            }
            let outer = self.upstream.next()?;
            let index = self.position;
            self.position += 1;
            self.inner = Some(self.selector.select(outer, index).into_iter());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::func::{Indexed, Plain};
    use alloc::vec;
    use alloc::vec::Vec;
    use cinq_core::from_vec;

    #[test]
    fn test_select() {
        let stage = Select::new(from_vec(vec![1, 2, 3]), Plain(|x: i32| x * x));
        assert_eq!(stage.cursor().collect::<Vec<_>>(), vec![1, 4, 9]);
    }

    #[test]
    fn test_select_indexed() {
        let stage = Select::new(from_vec(vec!['a', 'b']), Indexed(|c: char, i: usize| (i, c)));
        assert_eq!(stage.cursor().collect::<Vec<_>>(), vec![(0, 'a'), (1, 'b')]);
    }

    #[test]
    fn test_select_forwards_random_access() {
        let stage = Select::new(from_vec(vec![10, 20, 30]), Indexed(|x: i32, i: usize| x + i as i32));
        let ra = stage.random_access().unwrap();
        assert_eq!(ra.len(), 3);
        assert_eq!(ra.get(2), Some(32));
        assert_eq!(ra.get(3), None);
    }

    #[test]
    fn test_select_many_flattens_in_order() {
        let stage = SelectMany::new(
            from_vec(vec![1, 2, 3]),
            Plain(|n: i32| (0..n).map(move |k| n * 10 + k)),
        );
        assert_eq!(
            stage.cursor().collect::<Vec<_>>(),
            vec![10, 20, 21, 30, 31, 32]
        );
    }

    #[test]
    fn test_select_many_skips_empty_inners() {
        let stage = SelectMany::new(
            from_vec(vec![vec![], vec![1], vec![], vec![2, 3]]),
            Plain(|v: Vec<i32>| v),
        );
        assert_eq!(stage.cursor().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
