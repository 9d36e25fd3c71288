//! Equality comparers.
//!
//! Every hashed structure in this crate is parameterized by an
//! [`EqualityComparer`] so callers can group or deduplicate by something other
//! than `Eq`. Implementations must keep `hash` consistent with `equals`:
//! values that compare equal must hash alike.

use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use hashbrown::hash_map::DefaultHashBuilder;

/// Equality and hashing over `T`.
pub trait EqualityComparer<T: ?Sized> {
    /// Returns true if `a` and `b` are considered the same element.
    fn equals(&self, a: &T, b: &T) -> bool;

    /// Hash of `value`; equal values must produce equal hashes.
    fn hash(&self, value: &T) -> u64;
}

impl<T: ?Sized, C: EqualityComparer<T> + ?Sized> EqualityComparer<T> for &C {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }

    #[inline]
    fn hash(&self, value: &T) -> u64 {
        (**self).hash(value)
    }
}

/// `Eq` + `Hash` of the value itself.
#[derive(Clone, Debug, Default)]
pub struct DefaultEquality {
    state: DefaultHashBuilder,
}

impl DefaultEquality {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Eq + Hash + ?Sized> EqualityComparer<T> for DefaultEquality {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn hash(&self, value: &T) -> u64 {
        self.state.hash_one(value)
    }
}

/// Compares elements by a projected key.
///
/// ```
/// use cinq_lookup::{eq_by_key, EqualityComparer};
///
/// let caseless = eq_by_key(|s: &&str| s.to_ascii_lowercase());
/// assert!(caseless.equals(&"Foo", &"fOO"));
/// assert_eq!(caseless.hash(&"Foo"), caseless.hash(&"foo"));
/// ```
#[derive(Clone)]
pub struct KeyEquality<F> {
    key: F,
    state: DefaultHashBuilder,
}

impl<T, K, F> EqualityComparer<T> for KeyEquality<F>
where
    F: Fn(&T) -> K,
    K: Eq + Hash,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.key)(a) == (self.key)(b)
    }

    fn hash(&self, value: &T) -> u64 {
        self.state.hash_one((self.key)(value))
    }
}

/// Compares elements with an arbitrary equality closure.
///
/// No hash can be derived from a bare closure, so every element hashes to the
/// same bucket and lookups fall back to a linear probe.
pub struct FnEquality<T: ?Sized, F> {
    eq: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F: Clone> Clone for FnEquality<T, F> {
    fn clone(&self) -> Self {
        Self {
            eq: self.eq.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, F> EqualityComparer<T> for FnEquality<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }

    #[inline]
    fn hash(&self, _value: &T) -> u64 {
        0
    }
}

/// Comparer keyed on a projection of each element.
pub fn eq_by_key<T, K, F>(key: F) -> KeyEquality<F>
where
    F: Fn(&T) -> K,
    K: Eq + Hash,
{
    KeyEquality {
        key,
        state: DefaultHashBuilder::default(),
    }
}

/// Comparer from an equality closure.
pub fn eq_by<T: ?Sized, F>(eq: F) -> FnEquality<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    FnEquality {
        eq,
        _marker: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_equality() {
        let cmp = DefaultEquality::new();
        assert!(cmp.equals(&1, &1));
        assert!(!cmp.equals(&1, &2));
        assert_eq!(cmp.hash(&"abc"), cmp.hash(&"abc"));
    }

    #[test]
    fn test_key_equality() {
        let by_len = eq_by_key(|s: &&str| s.len());
        assert!(by_len.equals(&"ab", &"cd"));
        assert!(!by_len.equals(&"ab", &"c"));
        assert_eq!(by_len.hash(&"ab"), by_len.hash(&"xy"));
    }

    #[test]
    fn test_fn_equality_constant_hash() {
        let near = eq_by(|a: &i32, b: &i32| (a - b).abs() <= 1);
        assert!(near.equals(&3, &4));
        assert!(!near.equals(&3, &5));
        assert_eq!(near.hash(&3), near.hash(&100));
    }

    #[test]
    fn test_reference_forwarding() {
        let cmp = DefaultEquality::new();
        let by_ref = &cmp;
        assert!(EqualityComparer::<i32>::equals(&by_ref, &7, &7));
        assert_eq!(
            EqualityComparer::<i32>::hash(&by_ref, &7),
            EqualityComparer::<i32>::hash(&cmp, &7)
        );
    }
}
