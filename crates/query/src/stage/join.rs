//! Join stages: `join` and `group_join`.
//!
//! Both build a [`Lookup`] over the inner sequence on the first pull of each
//! pass, then stream the outer sequence and probe it.

use crate::func::{Combine, KeySelector};
use cinq_core::{Cursor, Sequence, SharedIter};
use cinq_lookup::{EqualityComparer, Grouping, Lookup};

/// Inner equi-join: one result per matching (outer, inner) pair, in outer
/// order and then inner order. Outer elements without a match are dropped.
#[derive(Clone, Debug)]
pub struct Join<O, I, OK, IK, RF, C> {
    outer: O,
    inner: I,
    outer_key: OK,
    inner_key: IK,
    result: RF,
    comparer: C,
}

impl<O, I, OK, IK, RF, C> Join<O, I, OK, IK, RF, C> {
    pub fn new(outer: O, inner: I, outer_key: OK, inner_key: IK, result: RF, comparer: C) -> Self {
        Self {
            outer,
            inner,
            outer_key,
            inner_key,
            result,
            comparer,
        }
    }
}

impl<O, I, OK, IK, RF, C> Join<O, I, OK, IK, RF, C>
where
    I: Sequence,
    IK: KeySelector<I::Item>,
    C: EqualityComparer<IK::Key>,
{
    fn inner_lookup(&self) -> Lookup<IK::Key, I::Item, &C> {
        Lookup::build_with(&self.inner, |item| self.inner_key.key(item), |item| item, &self.comparer)
    }
}

impl<O, I, OK, IK, RF, C> Sequence for Join<O, I, OK, IK, RF, C>
where
    O: Sequence,
    I: Sequence,
    OK: KeySelector<O::Item, Key = IK::Key>,
    IK: KeySelector<I::Item>,
    RF: Combine<O::Item, I::Item>,
    RF::Output: Clone,
    C: EqualityComparer<IK::Key>,
{
    type Item = RF::Output;

    fn cursor(&self) -> Cursor<'_, RF::Output> {
        Cursor::new(JoinCursor {
            owner: self,
            outer: self.outer.cursor().untracked(),
            lookup: None,
            current: None,
        })
    }
}

struct JoinCursor<'a, O, I, OK, IK, RF, C>
where
    O: Sequence,
    I: Sequence,
    IK: KeySelector<I::Item>,
{
    owner: &'a Join<O, I, OK, IK, RF, C>,
    outer: Cursor<'a, O::Item>,
    lookup: Option<Lookup<IK::Key, I::Item, &'a C>>,
    current: Option<(O::Item, SharedIter<I::Item>)>,
}

impl<O, I, OK, IK, RF, C> Iterator for JoinCursor<'_, O, I, OK, IK, RF, C>
where
    O: Sequence,
    I: Sequence,
    OK: KeySelector<O::Item, Key = IK::Key>,
    IK: KeySelector<I::Item>,
    RF: Combine<O::Item, I::Item>,
    C: EqualityComparer<IK::Key>,
{
    type Item = RF::Output;

    fn next(&mut self) -> Option<RF::Output> {
        let owner = self.owner;
        let lookup = self.lookup.get_or_insert_with(|| owner.inner_lookup());
        loop {
            if let Some((outer, matches)) = self.current.as_mut() {
                if let Some(inner) = matches.next() {
                    return Some(owner.result.combine(outer.clone(), inner));
                }
                self.current = None;
            }
            let outer = self.outer.next()?;
            let key = owner.outer_key.key(&outer);
            if let Some(group) = lookup.get(&key) {
                self.current = Some((outer, group.shared_elements()));
            }
        }
    }
}

/// Group join: exactly one result per outer element, paired with the group
/// of matching inner elements (empty when nothing matches).
#[derive(Clone, Debug)]
pub struct GroupJoin<O, I, OK, IK, RF, C> {
    outer: O,
    inner: I,
    outer_key: OK,
    inner_key: IK,
    result: RF,
    comparer: C,
}

impl<O, I, OK, IK, RF, C> GroupJoin<O, I, OK, IK, RF, C> {
    pub fn new(outer: O, inner: I, outer_key: OK, inner_key: IK, result: RF, comparer: C) -> Self {
        Self {
            outer,
            inner,
            outer_key,
            inner_key,
            result,
            comparer,
        }
    }
}

impl<O, I, OK, IK, RF, C> Sequence for GroupJoin<O, I, OK, IK, RF, C>
where
    O: Sequence,
    I: Sequence,
    OK: KeySelector<O::Item, Key = IK::Key>,
    IK: KeySelector<I::Item>,
    IK::Key: Clone,
    RF: Combine<O::Item, Grouping<IK::Key, I::Item>>,
    RF::Output: Clone,
    C: EqualityComparer<IK::Key>,
{
    type Item = RF::Output;

    fn cursor(&self) -> Cursor<'_, RF::Output> {
        Cursor::new(GroupJoinCursor {
            owner: self,
            outer: self.outer.cursor().untracked(),
            lookup: None,
        })
    }
}

struct GroupJoinCursor<'a, O, I, OK, IK, RF, C>
where
    O: Sequence,
    I: Sequence,
    IK: KeySelector<I::Item>,
{
    owner: &'a GroupJoin<O, I, OK, IK, RF, C>,
    outer: Cursor<'a, O::Item>,
    lookup: Option<Lookup<IK::Key, I::Item, &'a C>>,
}

impl<O, I, OK, IK, RF, C> Iterator for GroupJoinCursor<'_, O, I, OK, IK, RF, C>
where
    O: Sequence,
    I: Sequence,
    OK: KeySelector<O::Item, Key = IK::Key>,
    IK: KeySelector<I::Item>,
    IK::Key: Clone,
    RF: Combine<O::Item, Grouping<IK::Key, I::Item>>,
    C: EqualityComparer<IK::Key>,
{
    type Item = RF::Output;

    fn next(&mut self) -> Option<RF::Output> {
        let owner = self.owner;
        let lookup = self.lookup.get_or_insert_with(|| {
            Lookup::build_with(
                &owner.inner,
                |item| owner.inner_key.key(item),
                |item| item,
                &owner.comparer,
            )
        });
        let outer = self.outer.next()?;
        let key = owner.outer_key.key(&outer);
        let group = match lookup.get(&key) {
            Some(group) => group.clone(),
            None => Grouping::empty(key),
        };
        Some(owner.result.combine(outer, group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use cinq_core::from_vec;
    use cinq_lookup::DefaultEquality;

    #[test]
    fn test_join_pairs_in_outer_then_inner_order() {
        let stage = Join::new(
            from_vec(vec![1, 2, 3]),
            from_vec(vec![(1, "a"), (1, "b"), (2, "c")]),
            |o: &i32| *o,
            |i: &(i32, &str)| i.0,
            |o: i32, i: (i32, &'static str)| (o, i.0, i.1),
            DefaultEquality::new(),
        );
        assert_eq!(
            stage.cursor().collect::<Vec<_>>(),
            vec![(1, 1, "a"), (1, 1, "b"), (2, 2, "c")]
        );
    }

    #[test]
    fn test_group_join_keeps_unmatched_outer() {
        let stage = GroupJoin::new(
            from_vec(vec![1, 2, 3]),
            from_vec(vec![(1, "a"), (1, "b"), (2, "c")]),
            |o: &i32| *o,
            |i: &(i32, &str)| i.0,
            |o: i32, g: Grouping<i32, (i32, &'static str)>| {
                (o, g.elements().iter().map(|p| p.1).collect::<Vec<_>>())
            },
            DefaultEquality::new(),
        );
        assert_eq!(
            stage.cursor().collect::<Vec<_>>(),
            vec![(1, vec!["a", "b"]), (2, vec!["c"]), (3, vec![])]
        );
    }

    #[test]
    fn test_join_rebuilds_inner_per_pass() {
        let inner = cinq_core::from_once(vec![5, 6]);
        let stage = Join::new(
            from_vec(vec![5, 7]),
            &inner,
            |o: &i32| *o,
            |i: &i32| *i,
            |o: i32, i: i32| o + i,
            DefaultEquality::new(),
        );
        let cursor = stage.cursor();
        assert_eq!(inner.buffered_len(), 0);
        assert_eq!(cursor.collect::<Vec<_>>(), vec![10]);
        assert_eq!(stage.cursor().collect::<Vec<_>>(), vec![10]);
    }
}
