//! Ordered views.
//!
//! An [`Ordered`] stage reads its whole upstream, sorts it stably with its
//! comparer and keeps the result for the lifetime of the stage. `then_by`
//! consumes the stage and composes a new comparer on top of the existing
//! one, so the chain is never rebuilt from its first key.

use super::comparer::{Comparer, FnComparer, KeyComparer, Order, ThenComparer};
use alloc::rc::Rc;
use alloc::vec::Vec;
use cinq_core::{Cursor, RandomAccess, Sequence, SharedIter};
use core::cell::OnceCell;
use core::cmp::Ordering;

/// A stably sorted view of `S` under comparer `C`.
pub struct Ordered<S: Sequence, C> {
    source: S,
    comparer: C,
    view: OnceCell<Rc<[S::Item]>>,
}

impl<S: Sequence, C: Comparer<S::Item>> Ordered<S, C> {
    pub fn new(source: S, comparer: C) -> Self {
        Self {
            source,
            comparer,
            view: OnceCell::new(),
        }
    }

    /// The composite comparer behind this view.
    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// The sorted elements, materialized on first use.
    pub fn view(&self) -> &[S::Item] {
        self.shared_view()
    }

    fn shared_view(&self) -> &Rc<[S::Item]> {
        self.view.get_or_init(|| {
            let mut items: Vec<S::Item> = self.source.cursor().untracked().collect();
            // `sort_by` is stable: full ties keep their upstream order.
            items.sort_by(|a, b| self.comparer.compare(a, b));

            #[cfg(feature = "debug-log")]
            tracing::trace!(elements = items.len(), "ordered view sorted");

            items.into()
        })
    }

    /// Adds an ascending secondary key.
    pub fn then_by<F, K>(self, key: F) -> Ordered<S, ThenComparer<C, KeyComparer<F>>>
    where
        F: Fn(&S::Item) -> K,
        K: Ord,
    {
        self.then_with(KeyComparer::new(key, Order::Asc))
    }

    /// Adds a descending secondary key.
    pub fn then_by_descending<F, K>(self, key: F) -> Ordered<S, ThenComparer<C, KeyComparer<F>>>
    where
        F: Fn(&S::Item) -> K,
        K: Ord,
    {
        self.then_with(KeyComparer::new(key, Order::Desc))
    }

    /// Adds a secondary comparison in the given direction.
    pub fn then_by_with<F>(self, compare: F, order: Order) -> Ordered<S, ThenComparer<C, FnComparer<F>>>
    where
        F: Fn(&S::Item, &S::Item) -> Ordering,
    {
        self.then_with(FnComparer::new(compare, order))
    }

    /// Adds an arbitrary secondary comparer.
    pub fn then_with<D>(self, secondary: D) -> Ordered<S, ThenComparer<C, D>>
    where
        D: Comparer<S::Item>,
    {
        Ordered::new(self.source, ThenComparer::new(self.comparer, secondary))
    }
}

impl<S, C> Sequence for Ordered<S, C>
where
    S: Sequence,
    C: Comparer<S::Item>,
{
    type Item = S::Item;

    fn cursor(&self) -> Cursor<'_, S::Item> {
        Cursor::new(OrderedCursor {
            owner: self,
            items: None,
        })
    }

    fn random_access(&self) -> Option<&dyn RandomAccess<S::Item>> {
        Some(self)
    }
}

impl<S, C> RandomAccess<S::Item> for Ordered<S, C>
where
    S: Sequence,
    C: Comparer<S::Item>,
{
    fn len(&self) -> usize {
        self.view().len()
    }

    fn get(&self, index: usize) -> Option<S::Item> {
        self.view().get(index).cloned()
    }
}

struct OrderedCursor<'a, S: Sequence, C> {
    owner: &'a Ordered<S, C>,
    items: Option<SharedIter<S::Item>>,
}

impl<S, C> Iterator for OrderedCursor<'_, S, C>
where
    S: Sequence,
    C: Comparer<S::Item>,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let owner = self.owner;
        self.items
            .get_or_insert_with(|| SharedIter::new(Rc::clone(owner.shared_view())))
            .next()
    }
}

impl<S, C> Clone for Ordered<S, C>
where
    S: Sequence + Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            comparer: self.comparer.clone(),
            view: self.view.clone(),
        }
    }
}
