//! Terminal operations.
//!
//! These consume a pass of the sequence and return a value instead of a new
//! sequence. Operations that only need the length or one position use the
//! [`RandomAccess`](cinq_core::RandomAccess) capability when the sequence
//! has it and fall back to a linear scan otherwise.

use cinq_core::{Error, Result, Sequence};

/// Number of elements a full pass yields.
pub fn count<S: Sequence + ?Sized>(source: &S) -> usize {
    match source.random_access() {
        Some(ra) => ra.len(),
        None => source.cursor().untracked().count(),
    }
}

/// Element at `index`, or `IndexOutOfRange` when the sequence is shorter.
pub fn element_at<S: Sequence + ?Sized>(source: &S, index: usize) -> Result<S::Item> {
    if let Some(ra) = source.random_access() {
        return ra
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, Some(ra.len())));
    }
    source
        .cursor().untracked()
        .nth(index)
        .ok_or_else(|| Error::index_out_of_range(index, None))
}

/// First element satisfying `predicate`.
pub fn first_where<S, P>(source: &S, predicate: P) -> Option<S::Item>
where
    S: Sequence + ?Sized,
    P: Fn(&S::Item) -> bool,
{
    source.cursor().untracked().find(|item| predicate(item))
}

/// Last element; reads one position when random access is available.
pub fn last<S: Sequence + ?Sized>(source: &S) -> Option<S::Item> {
    match source.random_access() {
        Some(ra) => ra.len().checked_sub(1).and_then(|i| ra.get(i)),
        None => source.cursor().untracked().last(),
    }
}

/// Last element satisfying `predicate`, scanning the whole sequence.
pub fn last_where<S, P>(source: &S, predicate: P) -> Option<S::Item>
where
    S: Sequence + ?Sized,
    P: Fn(&S::Item) -> bool,
{
    source.cursor().untracked().filter(|item| predicate(item)).last()
}

/// Outcome of scanning for a single match.
pub enum Single<T> {
    None,
    One(T),
    Many,
}

/// Scans until a second match is seen.
pub fn single_where<S, P>(source: &S, predicate: P) -> Single<S::Item>
where
    S: Sequence + ?Sized,
    P: Fn(&S::Item) -> bool,
{
    let mut matches = source.cursor().untracked().filter(|item| predicate(item));
    match (matches.next(), matches.next()) {
        (None, _) => Single::None,
        (Some(item), None) => Single::One(item),
        (Some(_), Some(_)) => Single::Many,
    }
}

impl<T> Single<T> {
    /// Exactly one match, or the matching cardinality error.
    pub fn required(self) -> Result<T> {
        match self {
            Single::One(item) => Ok(item),
            Single::None => Err(Error::NoElements),
            Single::Many => Err(Error::MoreThanOneElement),
        }
    }

    /// The match when there is exactly one, otherwise the default.
    pub fn or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Single::One(item) => item,
            Single::None | Single::Many => T::default(),
        }
    }
}

/// Folds without a seed: the first element seeds the accumulator.
pub fn aggregate<S, F>(source: &S, func: F) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    F: Fn(S::Item, S::Item) -> S::Item,
{
    let mut cursor = source.cursor().untracked();
    let seed = cursor.next().ok_or(Error::NoElements)?;
    Ok(cursor.fold(seed, func))
}

/// Element-wise comparison of two sequences.
pub fn sequence_equal<S, O, F>(source: &S, other: &O, eq: F) -> bool
where
    S: Sequence + ?Sized,
    O: Sequence<Item = S::Item> + ?Sized,
    F: Fn(&S::Item, &S::Item) -> bool,
{
    if let (Some(a), Some(b)) = (source.random_access(), other.random_access()) {
        if a.len() != b.len() {
            return false;
        }
    }
    let mut left = source.cursor().untracked();
    let mut right = other.cursor().untracked();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if eq(&a, &b) => {}
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use cinq_core::{empty, from_once, from_vec};

    #[test]
    fn test_count_uses_random_access() {
        let once = from_once(vec![1, 2, 3]);
        assert_eq!(count(&once), 3);
        assert_eq!(count(&from_vec(vec![1, 2])), 2);
    }

    #[test]
    fn test_element_at() {
        let source = from_vec(vec!['a', 'b']);
        assert_eq!(element_at(&source, 1), Ok('b'));
        assert_eq!(
            element_at(&source, 2),
            Err(Error::IndexOutOfRange { index: 2, len: Some(2) })
        );
        let once = from_once(vec!['a']);
        assert_eq!(
            element_at(&once, 4),
            Err(Error::IndexOutOfRange { index: 4, len: None })
        );
    }

    #[test]
    fn test_last() {
        assert_eq!(last(&from_vec(vec![1, 2, 3])), Some(3));
        assert_eq!(last(&from_once(vec![1, 2])), Some(2));
        assert_eq!(last(&empty::<u8>()), None);
        assert_eq!(last_where(&from_vec(vec![1, 2, 3, 4]), |x| x % 2 == 1), Some(3));
    }

    #[test]
    fn test_single_cardinality() {
        let source = from_vec(vec![1, 2, 2]);
        assert_eq!(single_where(&source, |x| *x == 1).required(), Ok(1));
        assert_eq!(single_where(&source, |x| *x == 2).required(), Err(Error::MoreThanOneElement));
        assert_eq!(single_where(&source, |x| *x == 3).required(), Err(Error::NoElements));
        assert_eq!(single_where(&source, |x| *x == 2).or_default(), 0);
    }

    #[test]
    fn test_aggregate() {
        assert_eq!(aggregate(&from_vec(vec![1, 2, 3]), |a, b| a * 10 + b), Ok(123));
        assert_eq!(aggregate(&empty::<i32>(), |a, b| a + b), Err(Error::NoElements));
    }

    #[test]
    fn test_sequence_equal() {
        let a = from_vec(vec![1, 2, 3]);
        assert!(sequence_equal(&a, &from_once(vec![1, 2, 3]), |x, y| x == y));
        assert!(!sequence_equal(&a, &from_vec(vec![1, 2]), |x, y| x == y));
        assert!(!sequence_equal(&a, &from_once(vec![1, 2, 4]), |x, y| x == y));
    }
}
