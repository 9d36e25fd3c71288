//! The operator surface.
//!
//! [`Enumerable`] is implemented for every [`Sequence`]. Chainable operators
//! consume the receiver and wrap it in a stage; nothing runs until a cursor of
//! the result is pulled. Terminal operators borrow the receiver and run one
//! pass. Pass `&seq` instead of `seq` to keep using a sequence after chaining
//! from it.

use crate::func::{Indexed, Plain};
use crate::ordering::{FnComparer, KeyComparer, Order, Ordered};
use crate::stage::{
    Append, Concat, DefaultIfEmpty, Distinct, Except, GroupBy, GroupJoin, GroupResult, Intersect,
    Join, OfType, Prepend, Reverse, Select, SelectMany, Skip, SkipLast, SkipWhile, Take, TakeLast,
    TakeWhile, Union, Where, Zip,
};
use crate::terminal;
use alloc::vec::Vec;
use cinq_core::{ElementKind, Error, Result, Sequence};
use cinq_lookup::{DefaultEquality, Dictionary, EqualityComparer, Grouping, Lookup};
use core::cmp::Ordering;
use core::fmt::Debug;
use core::hash::Hash;

/// Identity element selector used by grouping operators without one.
pub type Same<T> = fn(T) -> T;

fn same<T>(item: T) -> T {
    item
}

/// Query operators over any [`Sequence`].
pub trait Enumerable: Sequence + Sized {
    // ---- filtering and projection ----

    /// Elements satisfying `predicate`.
    fn filter<F>(self, predicate: F) -> Where<Self, Plain<F>>
    where
        F: Fn(&Self::Item) -> bool,
    {
        Where::new(self, Plain(predicate))
    }

    /// Like [`filter`](Self::filter), also passing the upstream index.
    fn filter_indexed<F>(self, predicate: F) -> Where<Self, Indexed<F>>
    where
        F: Fn(&Self::Item, usize) -> bool,
    {
        Where::new(self, Indexed(predicate))
    }

    fn select<F, R>(self, selector: F) -> Select<Self, Plain<F>>
    where
        F: Fn(Self::Item) -> R,
        R: Clone,
    {
        Select::new(self, Plain(selector))
    }

    fn select_indexed<F, R>(self, selector: F) -> Select<Self, Indexed<F>>
    where
        F: Fn(Self::Item, usize) -> R,
        R: Clone,
    {
        Select::new(self, Indexed(selector))
    }

    /// Maps every element to a collection and flattens the results.
    fn select_many<F, I>(self, selector: F) -> SelectMany<Self, Plain<F>>
    where
        F: Fn(Self::Item) -> I,
        I: IntoIterator,
        I::Item: Clone,
    {
        SelectMany::new(self, Plain(selector))
    }

    fn select_many_indexed<F, I>(self, selector: F) -> SelectMany<Self, Indexed<F>>
    where
        F: Fn(Self::Item, usize) -> I,
        I: IntoIterator,
        I::Item: Clone,
    {
        SelectMany::new(self, Indexed(selector))
    }

    /// Elements of kind `R`, extracted from the element type.
    fn of_type<R>(self) -> OfType<Self, R>
    where
        R: ElementKind<Self::Item> + Clone,
    {
        OfType::new(self)
    }

    // ---- set operators ----

    fn distinct(self) -> Distinct<Self, DefaultEquality>
    where
        Self::Item: Eq + Hash,
    {
        Distinct::new(self, DefaultEquality::new())
    }

    fn distinct_with<C>(self, comparer: C) -> Distinct<Self, C>
    where
        C: EqualityComparer<Self::Item>,
    {
        Distinct::new(self, comparer)
    }

    fn union<T>(self, other: T) -> Union<Self, T, DefaultEquality>
    where
        T: Sequence<Item = Self::Item>,
        Self::Item: Eq + Hash,
    {
        Union::new(self, other, DefaultEquality::new())
    }

    fn union_with<T, C>(self, other: T, comparer: C) -> Union<Self, T, C>
    where
        T: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        Union::new(self, other, comparer)
    }

    fn except<T>(self, other: T) -> Except<Self, T, DefaultEquality>
    where
        T: Sequence<Item = Self::Item>,
        Self::Item: Eq + Hash,
    {
        Except::new(self, other, DefaultEquality::new())
    }

    fn except_with<T, C>(self, other: T, comparer: C) -> Except<Self, T, C>
    where
        T: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        Except::new(self, other, comparer)
    }

    fn intersect<T>(self, other: T) -> Intersect<Self, T, DefaultEquality>
    where
        T: Sequence<Item = Self::Item>,
        Self::Item: Eq + Hash,
    {
        Intersect::new(self, other, DefaultEquality::new())
    }

    fn intersect_with<T, C>(self, other: T, comparer: C) -> Intersect<Self, T, C>
    where
        T: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        Intersect::new(self, other, comparer)
    }

    // ---- partitioning ----

    fn skip(self, count: usize) -> Skip<Self> {
        Skip::new(self, count)
    }

    fn take(self, count: usize) -> Take<Self> {
        Take::new(self, count)
    }

    fn skip_while<F>(self, predicate: F) -> SkipWhile<Self, Plain<F>>
    where
        F: Fn(&Self::Item) -> bool,
    {
        SkipWhile::new(self, Plain(predicate))
    }

    fn skip_while_indexed<F>(self, predicate: F) -> SkipWhile<Self, Indexed<F>>
    where
        F: Fn(&Self::Item, usize) -> bool,
    {
        SkipWhile::new(self, Indexed(predicate))
    }

    fn take_while<F>(self, predicate: F) -> TakeWhile<Self, Plain<F>>
    where
        F: Fn(&Self::Item) -> bool,
    {
        TakeWhile::new(self, Plain(predicate))
    }

    fn take_while_indexed<F>(self, predicate: F) -> TakeWhile<Self, Indexed<F>>
    where
        F: Fn(&Self::Item, usize) -> bool,
    {
        TakeWhile::new(self, Indexed(predicate))
    }

    fn skip_last(self, count: usize) -> SkipLast<Self> {
        SkipLast::new(self, count)
    }

    fn take_last(self, count: usize) -> TakeLast<Self> {
        TakeLast::new(self, count)
    }

    // ---- combining ----

    fn append(self, element: Self::Item) -> Append<Self> {
        Append::new(self, element)
    }

    fn prepend(self, element: Self::Item) -> Prepend<Self> {
        Prepend::new(self, element)
    }

    fn concat<T>(self, other: T) -> Concat<Self, T>
    where
        T: Sequence<Item = Self::Item>,
    {
        Concat::new(self, other)
    }

    fn reverse(self) -> Reverse<Self> {
        Reverse::new(self)
    }

    /// Pairs elements by position; the shorter input bounds the output.
    fn zip<T, F, R>(self, other: T, result: F) -> Zip<Self, T, F>
    where
        T: Sequence,
        F: Fn(Self::Item, T::Item) -> R,
        R: Clone,
    {
        Zip::new(self, other, result)
    }

    fn default_if_empty(self, default: Self::Item) -> DefaultIfEmpty<Self> {
        DefaultIfEmpty::new(self, default)
    }

    // ---- grouping and joins ----

    fn group_by<KF, K>(self, key: KF) -> GroupBy<Self, KF, Same<Self::Item>, DefaultEquality>
    where
        KF: Fn(&Self::Item) -> K,
        K: Eq + Hash,
    {
        GroupBy::new(self, key, same as Same<Self::Item>, DefaultEquality::new())
    }

    /// Groups projected elements.
    fn group_by_element<KF, K, EF, E>(self, key: KF, element: EF) -> GroupBy<Self, KF, EF, DefaultEquality>
    where
        KF: Fn(&Self::Item) -> K,
        K: Eq + Hash,
        EF: Fn(Self::Item) -> E,
    {
        GroupBy::new(self, key, element, DefaultEquality::new())
    }

    /// Groups projected elements, comparing keys with `comparer`.
    fn group_by_with<KF, K, EF, E, C>(self, key: KF, element: EF, comparer: C) -> GroupBy<Self, KF, EF, C>
    where
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> E,
        C: EqualityComparer<K> + Clone,
    {
        GroupBy::new(self, key, element, comparer)
    }

    /// Groups elements and maps each finished group through `result`, which
    /// receives the key and the group.
    #[allow(clippy::type_complexity)]
    fn group_by_result<KF, K, RF, R>(
        self,
        key: KF,
        result: RF,
    ) -> Select<GroupBy<Self, KF, Same<Self::Item>, DefaultEquality>, GroupResult<RF>>
    where
        KF: Fn(&Self::Item) -> K,
        K: Eq + Hash + Clone,
        RF: Fn(K, Grouping<K, Self::Item>) -> R,
        R: Clone,
    {
        Select::new(self.group_by(key), GroupResult(result))
    }

    /// Inner equi-join against `inner`.
    fn join<I, OK, IK, K, RF, R>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Join<Self, I, OK, IK, RF, DefaultEquality>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        K: Eq + Hash,
        RF: Fn(Self::Item, I::Item) -> R,
        R: Clone,
    {
        Join::new(self, inner, outer_key, inner_key, result, DefaultEquality::new())
    }

    #[allow(clippy::too_many_arguments)]
    fn join_with<I, OK, IK, K, RF, R, C>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: RF,
        comparer: C,
    ) -> Join<Self, I, OK, IK, RF, C>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        RF: Fn(Self::Item, I::Item) -> R,
        R: Clone,
        C: EqualityComparer<K>,
    {
        Join::new(self, inner, outer_key, inner_key, result, comparer)
    }

    /// One result per outer element, paired with its (possibly empty) group
    /// of matching inner elements.
    fn group_join<I, OK, IK, K, RF, R>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> GroupJoin<Self, I, OK, IK, RF, DefaultEquality>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        K: Eq + Hash + Clone,
        RF: Fn(Self::Item, Grouping<K, I::Item>) -> R,
        R: Clone,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result, DefaultEquality::new())
    }

    #[allow(clippy::too_many_arguments)]
    fn group_join_with<I, OK, IK, K, RF, R, C>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: RF,
        comparer: C,
    ) -> GroupJoin<Self, I, OK, IK, RF, C>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        K: Clone,
        RF: Fn(Self::Item, Grouping<K, I::Item>) -> R,
        R: Clone,
        C: EqualityComparer<K>,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result, comparer)
    }

    // ---- ordering ----

    fn order_by<F, K>(self, key: F) -> Ordered<Self, KeyComparer<F>>
    where
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        Ordered::new(self, KeyComparer::new(key, Order::Asc))
    }

    fn order_by_descending<F, K>(self, key: F) -> Ordered<Self, KeyComparer<F>>
    where
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        Ordered::new(self, KeyComparer::new(key, Order::Desc))
    }

    /// Orders with a caller comparison, e.g. for float keys.
    fn order_by_with<F>(self, compare: F, order: Order) -> Ordered<Self, FnComparer<F>>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        Ordered::new(self, FnComparer::new(compare, order))
    }

    // ---- materialization ----

    fn to_vec(&self) -> Vec<Self::Item> {
        self.cursor().untracked().collect()
    }

    /// Builds a unique-key dictionary; a repeated key is an error.
    fn to_dictionary<KF, K, EF, V>(&self, key: KF, element: EF) -> Result<Dictionary<K, V>>
    where
        KF: Fn(&Self::Item) -> K,
        K: Eq + Hash + Debug,
        EF: Fn(Self::Item) -> V,
    {
        self.to_dictionary_with(key, element, DefaultEquality::new())
    }

    fn to_dictionary_with<KF, K, EF, V, C>(
        &self,
        key: KF,
        element: EF,
        comparer: C,
    ) -> Result<Dictionary<K, V, C>>
    where
        KF: Fn(&Self::Item) -> K,
        K: Debug,
        EF: Fn(Self::Item) -> V,
        C: EqualityComparer<K>,
    {
        let mut dict = Dictionary::with_comparer(comparer);
        for item in self.cursor().untracked() {
            let k = key(&item);
            dict.insert(k, element(item))?;
        }
        Ok(dict)
    }

    /// Builds a lookup eagerly; unlike `group_by` nothing is deferred.
    fn to_lookup<KF, K, EF, E>(&self, key: KF, element: EF) -> Lookup<K, E>
    where
        KF: Fn(&Self::Item) -> K,
        K: Eq + Hash,
        EF: Fn(Self::Item) -> E,
    {
        Lookup::build(self, key, element)
    }

    fn to_lookup_with<KF, K, EF, E, C>(&self, key: KF, element: EF, comparer: C) -> Lookup<K, E, C>
    where
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> E,
        C: EqualityComparer<K>,
    {
        Lookup::build_with(self, key, element, comparer)
    }

    // ---- quantifiers and counting ----

    fn count(&self) -> usize {
        terminal::count(self)
    }

    fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Self::Item) -> bool,
    {
        self.cursor().untracked().filter(|item| predicate(item)).count()
    }

    /// Returns true if the sequence yields at least one element.
    fn any(&self) -> bool {
        match self.random_access() {
            Some(ra) => !ra.is_empty(),
            None => self.cursor().untracked().next().is_some(),
        }
    }

    fn any_where<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Self::Item) -> bool,
    {
        self.cursor().untracked().any(|item| predicate(&item))
    }

    /// Returns true if every element satisfies `predicate` (vacuously true
    /// when empty).
    fn all<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Self::Item) -> bool,
    {
        self.cursor().untracked().all(|item| predicate(&item))
    }

    fn contains(&self, value: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        self.cursor().untracked().any(|item| item == *value)
    }

    fn contains_with<C>(&self, value: &Self::Item, comparer: C) -> bool
    where
        C: EqualityComparer<Self::Item>,
    {
        self.cursor().untracked().any(|item| comparer.equals(&item, value))
    }

    fn sequence_equal<T>(&self, other: &T) -> bool
    where
        T: Sequence<Item = Self::Item>,
        Self::Item: PartialEq,
    {
        terminal::sequence_equal(self, other, |a, b| a == b)
    }

    fn sequence_equal_with<T, C>(&self, other: &T, comparer: C) -> bool
    where
        T: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        terminal::sequence_equal(self, other, |a, b| comparer.equals(a, b))
    }

    // ---- element access ----

    fn element_at(&self, index: usize) -> Result<Self::Item> {
        terminal::element_at(self, index)
    }

    fn element_at_or_default(&self, index: usize) -> Self::Item
    where
        Self::Item: Default,
    {
        terminal::element_at(self, index).unwrap_or_default()
    }

    fn first(&self) -> Result<Self::Item> {
        self.cursor().untracked().next().ok_or(Error::NoElements)
    }

    fn first_where<F>(&self, predicate: F) -> Result<Self::Item>
    where
        F: Fn(&Self::Item) -> bool,
    {
        terminal::first_where(self, predicate).ok_or(Error::NoElements)
    }

    fn first_or_default(&self) -> Self::Item
    where
        Self::Item: Default,
    {
        self.cursor().untracked().next().unwrap_or_default()
    }

    fn first_or_default_where<F>(&self, predicate: F) -> Self::Item
    where
        F: Fn(&Self::Item) -> bool,
        Self::Item: Default,
    {
        terminal::first_where(self, predicate).unwrap_or_default()
    }

    fn last(&self) -> Result<Self::Item> {
        terminal::last(self).ok_or(Error::NoElements)
    }

    fn last_where<F>(&self, predicate: F) -> Result<Self::Item>
    where
        F: Fn(&Self::Item) -> bool,
    {
        terminal::last_where(self, predicate).ok_or(Error::NoElements)
    }

    fn last_or_default(&self) -> Self::Item
    where
        Self::Item: Default,
    {
        terminal::last(self).unwrap_or_default()
    }

    fn last_or_default_where<F>(&self, predicate: F) -> Self::Item
    where
        F: Fn(&Self::Item) -> bool,
        Self::Item: Default,
    {
        terminal::last_where(self, predicate).unwrap_or_default()
    }

    /// The only element; fails when there are none or several.
    fn single(&self) -> Result<Self::Item> {
        terminal::single_where(self, |_| true).required()
    }

    fn single_where<F>(&self, predicate: F) -> Result<Self::Item>
    where
        F: Fn(&Self::Item) -> bool,
    {
        terminal::single_where(self, predicate).required()
    }

    /// The only element, or the default when there is not exactly one.
    fn single_or_default(&self) -> Self::Item
    where
        Self::Item: Default,
    {
        terminal::single_where(self, |_| true).or_default()
    }

    fn single_or_default_where<F>(&self, predicate: F) -> Self::Item
    where
        F: Fn(&Self::Item) -> bool,
        Self::Item: Default,
    {
        terminal::single_where(self, predicate).or_default()
    }

    // ---- folds ----

    /// Folds without a seed; the first element seeds the accumulator.
    fn aggregate<F>(&self, func: F) -> Result<Self::Item>
    where
        F: Fn(Self::Item, Self::Item) -> Self::Item,
    {
        terminal::aggregate(self, func)
    }

    /// Folds from `seed`; an empty sequence returns the seed.
    fn fold_with<A, F>(&self, seed: A, func: F) -> A
    where
        F: Fn(A, Self::Item) -> A,
    {
        self.cursor().untracked().fold(seed, func)
    }

    /// Folds from `seed` and maps the final accumulator through `result`.
    fn aggregate_with_result<A, F, RF, R>(&self, seed: A, func: F, result: RF) -> R
    where
        F: Fn(A, Self::Item) -> A,
        RF: FnOnce(A) -> R,
    {
        result(self.fold_with(seed, func))
    }
}

impl<S: Sequence> Enumerable for S {}
