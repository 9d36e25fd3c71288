//! Grouping stage.
//!
//! A [`GroupBy`] builds its [`Lookup`] on the first pull of the first pass
//! and keeps it for the lifetime of the stage; later passes iterate the same
//! groups.

use crate::func::{KeySelector, Project, Selector};
use cinq_core::{Cursor, Sequence};
use cinq_lookup::{EqualityComparer, Grouping, Lookup};
use core::cell::OnceCell;

type GroupLookup<S, KF, EF, C> = Lookup<
    <KF as KeySelector<<S as Sequence>::Item>>::Key,
    <EF as Project<<S as Sequence>::Item>>::Output,
    C,
>;

/// Groups upstream elements by key, in first-seen key order.
pub struct GroupBy<S, KF, EF, C>
where
    S: Sequence,
    KF: KeySelector<S::Item>,
    EF: Project<S::Item>,
{
    source: S,
    key: KF,
    element: EF,
    comparer: C,
    lookup: OnceCell<GroupLookup<S, KF, EF, C>>,
}

impl<S, KF, EF, C> GroupBy<S, KF, EF, C>
where
    S: Sequence,
    KF: KeySelector<S::Item>,
    EF: Project<S::Item>,
    C: EqualityComparer<KF::Key> + Clone,
{
    pub fn new(source: S, key: KF, element: EF, comparer: C) -> Self {
        Self {
            source,
            key,
            element,
            comparer,
            lookup: OnceCell::new(),
        }
    }

    /// The memoized lookup, built from one pass of the source on first use.
    pub fn lookup(&self) -> &GroupLookup<S, KF, EF, C> {
        self.lookup.get_or_init(|| {
            Lookup::build_with(
                &self.source,
                |item| self.key.key(item),
                |item| self.element.project(item),
                self.comparer.clone(),
            )
        })
    }
}

impl<S, KF, EF, C> Sequence for GroupBy<S, KF, EF, C>
where
    S: Sequence,
    KF: KeySelector<S::Item>,
    KF::Key: Clone,
    EF: Project<S::Item>,
    C: EqualityComparer<KF::Key> + Clone,
{
    type Item = Grouping<KF::Key, EF::Output>;

    fn cursor(&self) -> Cursor<'_, Self::Item> {
        Cursor::new(GroupCursor {
            owner: self,
            position: 0,
        })
    }
}

struct GroupCursor<'a, S, KF, EF, C>
where
    S: Sequence,
    KF: KeySelector<S::Item>,
    EF: Project<S::Item>,
{
    owner: &'a GroupBy<S, KF, EF, C>,
    position: usize,
}

impl<S, KF, EF, C> Iterator for GroupCursor<'_, S, KF, EF, C>
where
    S: Sequence,
    KF: KeySelector<S::Item>,
    KF::Key: Clone,
    EF: Project<S::Item>,
    C: EqualityComparer<KF::Key> + Clone,
{
    type Item = Grouping<KF::Key, EF::Output>;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.owner.lookup().group_at(self.position)?.clone();
        self.position += 1;
        Some(group)
    }
}

/// Result selector over a finished group: receives the key and the group.
#[derive(Clone, Copy, Debug)]
pub struct GroupResult<F>(pub F);

impl<K, E, R, F> Selector<Grouping<K, E>> for GroupResult<F>
where
    K: Clone,
    F: Fn(K, Grouping<K, E>) -> R,
{
    type Output = R;

    fn select(&self, group: Grouping<K, E>, _index: usize) -> R {
        (self.0)(group.key().clone(), group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Select;
    use alloc::vec;
    use alloc::vec::Vec;
    use cinq_core::{from_once, from_vec};
    use cinq_lookup::DefaultEquality;

    fn identity<T>(x: T) -> T {
        x
    }

    #[test]
    fn test_group_by_first_seen_order() {
        let stage = GroupBy::new(
            from_vec(vec![1, 2, 3, 4, 5]),
            |x: &i32| x % 2,
            identity,
            DefaultEquality::new(),
        );
        let groups: Vec<_> = stage
            .cursor()
            .map(|g| (*g.key(), g.elements().to_vec()))
            .collect();
        assert_eq!(groups, vec![(1, vec![1, 3, 5]), (0, vec![2, 4])]);
    }

    #[test]
    fn test_lookup_is_memoized() {
        let source = from_once(vec!['a', 'b', 'a']);
        let stage = GroupBy::new(&source, |c: &char| *c, |c: char| c.to_ascii_uppercase(), DefaultEquality::new());

        let cursor = stage.cursor();
        assert_eq!(source.buffered_len(), 0);
        assert_eq!(cursor.count(), 2);
        assert!(core::ptr::eq(stage.lookup(), stage.lookup()));
        assert_eq!(stage.lookup().get(&'a').unwrap().elements(), &['A', 'A']);
    }

    #[test]
    fn test_group_result_selector() {
        let groups = GroupBy::new(
            from_vec(vec!["ant", "bee", "asp"]),
            |s: &&str| s.as_bytes()[0],
            identity,
            DefaultEquality::new(),
        );
        let stage = Select::new(groups, GroupResult(|k: u8, g: Grouping<u8, &str>| (k as char, g.len())));
        assert_eq!(stage.cursor().collect::<Vec<_>>(), vec![('a', 2), ('b', 1)]);
    }
}
