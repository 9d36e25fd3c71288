//! Element comparers for ordered views.

use crate::func::KeySelector;
use core::cmp::Ordering;

/// Sort direction of one ordering key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl Order {
    /// Applies this order to a comparison result.
    #[inline]
    pub fn apply(&self, ord: Ordering) -> Ordering {
        match self {
            Order::Asc => ord,
            Order::Desc => ord.reverse(),
        }
    }
}

/// Total order over elements.
pub trait Comparer<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns true if `a` sorts strictly before `b`.
    fn is_less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Returns true if neither element sorts before the other.
    fn is_tie(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// Orders elements by the natural order of a selected key.
#[derive(Clone, Debug)]
pub struct KeyComparer<F> {
    key: F,
    order: Order,
}

impl<F> KeyComparer<F> {
    pub fn new(key: F, order: Order) -> Self {
        Self { key, order }
    }

    pub fn order(&self) -> Order {
        self.order
    }
}

impl<T, F> Comparer<T> for KeyComparer<F>
where
    F: KeySelector<T>,
    F::Key: Ord,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.order.apply(self.key.key(a).cmp(&self.key.key(b)))
    }
}

/// Orders elements with a caller comparison, e.g. `f64::total_cmp` on a
/// float field.
#[derive(Clone, Debug)]
pub struct FnComparer<F> {
    compare: F,
    order: Order,
}

impl<F> FnComparer<F> {
    pub fn new(compare: F, order: Order) -> Self {
        Self { compare, order }
    }
}

impl<T, F> Comparer<T> for FnComparer<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.order.apply((self.compare)(a, b))
    }
}

/// Consults `secondary` only where `primary` reports a tie.
#[derive(Clone, Debug)]
pub struct ThenComparer<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> ThenComparer<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }
}

impl<T, P, S> Comparer<T> for ThenComparer<P, S>
where
    P: Comparer<T>,
    S: Comparer<T>,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.primary
            .compare(a, b)
            .then_with(|| self.secondary.compare(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_apply() {
        assert_eq!(Order::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Order::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Order::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn test_key_comparer() {
        let asc = KeyComparer::new(|p: &(i32, i32)| p.0, Order::Asc);
        let desc = KeyComparer::new(|p: &(i32, i32)| p.0, Order::Desc);
        assert!(asc.is_less(&(1, 9), &(2, 0)));
        assert!(desc.is_less(&(2, 0), &(1, 9)));
        assert!(asc.is_tie(&(1, 0), &(1, 5)));
    }

    #[test]
    fn test_fn_comparer_floats() {
        let cmp = FnComparer::new(|a: &f64, b: &f64| a.total_cmp(b), Order::Asc);
        assert!(cmp.is_less(&-0.5, &0.25));
    }

    #[test]
    fn test_then_comparer_breaks_ties_only() {
        let cmp = ThenComparer::new(
            KeyComparer::new(|p: &(i32, i32)| p.0, Order::Asc),
            KeyComparer::new(|p: &(i32, i32)| p.1, Order::Desc),
        );
        assert!(cmp.is_less(&(0, 0), &(1, 9)));
        assert!(cmp.is_less(&(1, 9), &(1, 2)));
        assert!(cmp.is_tie(&(3, 3), &(3, 3)));
    }
}
