//! Callback adapters.
//!
//! Operators accept caller callbacks through small traits so that one stage
//! type serves both the plain and the index-aware form of an operator.
//! [`Plain`] wraps a callback that only sees the element; [`Indexed`] wraps
//! one that also receives the element's zero-based upstream position.

/// Per-element test used by `filter`, `skip_while` and `take_while`.
pub trait Predicate<T> {
    fn test(&self, item: &T, index: usize) -> bool;
}

/// Per-element transform used by `select` and `select_many`.
pub trait Selector<T> {
    type Output;

    fn select(&self, item: T, index: usize) -> Self::Output;
}

/// Callback that ignores the element index.
#[derive(Clone, Copy, Debug)]
pub struct Plain<F>(pub F);

/// Callback that receives the element index as its last argument.
#[derive(Clone, Copy, Debug)]
pub struct Indexed<F>(pub F);

impl<T, F> Predicate<T> for Plain<F>
where
    F: Fn(&T) -> bool,
{
    #[inline]
    fn test(&self, item: &T, _index: usize) -> bool {
        (self.0)(item)
    }
}

impl<T, F> Predicate<T> for Indexed<F>
where
    F: Fn(&T, usize) -> bool,
{
    #[inline]
    fn test(&self, item: &T, index: usize) -> bool {
        (self.0)(item, index)
    }
}

impl<T, R, F> Selector<T> for Plain<F>
where
    F: Fn(T) -> R,
{
    type Output = R;

    #[inline]
    fn select(&self, item: T, _index: usize) -> R {
        (self.0)(item)
    }
}

impl<T, R, F> Selector<T> for Indexed<F>
where
    F: Fn(T, usize) -> R,
{
    type Output = R;

    #[inline]
    fn select(&self, item: T, index: usize) -> R {
        (self.0)(item, index)
    }
}

/// Key extraction by reference, used by grouping, joins and ordering.
pub trait KeySelector<T> {
    type Key;

    fn key(&self, item: &T) -> Self::Key;
}

impl<T, K, F> KeySelector<T> for F
where
    F: Fn(&T) -> K,
{
    type Key = K;

    #[inline]
    fn key(&self, item: &T) -> K {
        self(item)
    }
}

/// By-value projection, used for group element selectors.
pub trait Project<T> {
    type Output;

    fn project(&self, item: T) -> Self::Output;
}

impl<T, R, F> Project<T> for F
where
    F: Fn(T) -> R,
{
    type Output = R;

    #[inline]
    fn project(&self, item: T) -> R {
        self(item)
    }
}

/// Two-argument result selector, used by `zip`, `join` and `group_join`.
pub trait Combine<A, B> {
    type Output;

    fn combine(&self, a: A, b: B) -> Self::Output;
}

impl<A, B, R, F> Combine<A, B> for F
where
    F: Fn(A, B) -> R,
{
    type Output = R;

    #[inline]
    fn combine(&self, a: A, b: B) -> R {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ignores_index() {
        let p = Plain(|x: &i32| *x > 2);
        assert!(p.test(&3, 0));
        assert!(!p.test(&1, 99));

        let s = Plain(|x: i32| x * 10);
        assert_eq!(s.select(4, 7), 40);
    }

    #[test]
    fn test_indexed_sees_index() {
        let p = Indexed(|_: &char, i: usize| i % 2 == 0);
        assert!(p.test(&'a', 0));
        assert!(!p.test(&'a', 1));

        let s = Indexed(|x: &str, i: usize| (i, x.len()));
        assert_eq!(s.select("abc", 5), (5, 3));
    }

    #[test]
    fn test_blanket_closures() {
        let key = |p: &(i32, char)| p.1;
        assert_eq!(key.key(&(1, 'z')), 'z');

        let add = |a: i32, b: i32| a + b;
        assert_eq!(add.combine(2, 3), 5);

        let double = |x: u8| x * 2;
        assert_eq!(double.project(4), 8);
    }
}
