//! Property-based tests for cinq-query pipelines using proptest.

use cinq_query::{from_once, from_vec, Enumerable, Sequence};
use proptest::prelude::*;

fn values_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-100i32..100, 0..80)
}

proptest! {
    /// Property: enumerating the same constructed pipeline twice yields the
    /// same elements in the same order.
    #[test]
    fn re_enumeration_is_stable(values in values_strategy(), k in 0usize..10) {
        let source = from_vec(values);
        let pipeline = (&source)
            .filter(|x| x % 3 != 0)
            .select(|x| x * 2)
            .skip(k)
            .distinct()
            .order_by(|x| *x);
        prop_assert_eq!(pipeline.to_vec(), pipeline.to_vec());
    }

    /// Property: a pipeline over a one-shot iterator behaves like one over a
    /// fixed collection, on every pass.
    #[test]
    fn one_shot_source_matches_fixed(values in values_strategy(), m in 0usize..20) {
        let once = from_once(values.clone());
        let pipeline = (&once).filter(|x| *x > 0).take(m);
        let expected: Vec<i32> = values.iter().copied().filter(|x| *x > 0).take(m).collect();

        let first = pipeline.to_vec();
        prop_assert_eq!(&first, &expected);
        prop_assert_eq!(pipeline.to_vec(), first);
    }

    /// Property: filter then select equals filtering then mapping a Vec.
    #[test]
    fn filter_select_matches_vec(values in values_strategy(), threshold in -100i32..100) {
        let source = from_vec(values.clone());
        let piped = (&source).filter(|x| *x >= threshold).select(|x| x * 7 - 1).to_vec();
        let manual: Vec<i32> = values.iter().filter(|x| **x >= threshold).map(|x| x * 7 - 1).collect();
        prop_assert_eq!(piped, manual);
    }

    /// Property: skip(k).take(m) is the slice [k, k + m) clamped to the input.
    #[test]
    fn skip_take_is_slice(values in values_strategy(), k in 0usize..100, m in 0usize..100) {
        let source = from_vec(values.clone());
        let start = k.min(values.len());
        let end = (k + m).min(values.len());
        prop_assert_eq!((&source).skip(k).take(m).to_vec(), values[start..end].to_vec());
        prop_assert_eq!((&source).skip(k).take(m).count(), end - start);
    }

    /// Property: skip_last(k) followed by the last k elements rebuilds the
    /// input; take_last(k) is the last min(k, len) elements in order.
    #[test]
    fn skip_last_take_last_rebuild(values in values_strategy(), k in 0usize..100) {
        let source = from_vec(values.clone());
        let k = k % (values.len() + 1);

        let mut rebuilt = (&source).skip_last(k).to_vec();
        rebuilt.extend_from_slice(&values[values.len() - k..]);
        prop_assert_eq!(&rebuilt, &values);

        let tail = (&source).take_last(k).to_vec();
        prop_assert_eq!(tail, values[values.len() - k..].to_vec());
    }

    /// Property: ordering is a stable sort by key.
    #[test]
    fn order_by_is_stable_sort(pairs in prop::collection::vec((0u8..5, any::<u16>()), 0..60)) {
        let source = from_vec(pairs.clone());
        let ordered = (&source).order_by(|p| p.0).to_vec();
        let mut expected = pairs;
        expected.sort_by_key(|p| p.0);
        prop_assert_eq!(ordered, expected);
    }

    /// Property: groups partition the input in first-seen key order.
    #[test]
    fn group_by_partitions_input(values in values_strategy(), modulus in 1i32..6) {
        let source = from_vec(values.clone());
        let groups = (&source).group_by(|x| x.rem_euclid(modulus));

        let total: usize = groups.cursor().map(|g| g.len()).sum();
        prop_assert_eq!(total, values.len());

        let mut first_seen = Vec::new();
        for v in &values {
            let key = v.rem_euclid(modulus);
            if !first_seen.contains(&key) {
                first_seen.push(key);
            }
        }
        let keys: Vec<i32> = groups.cursor().map(|g| *g.key()).collect();
        prop_assert_eq!(keys, first_seen);
    }

    /// Property: union keeps the first occurrence of every element across
    /// both inputs.
    #[test]
    fn union_matches_manual_dedupe(a in values_strategy(), b in values_strategy()) {
        let union = from_vec(a.clone()).union(from_vec(b.clone())).to_vec();
        let mut expected = Vec::new();
        for v in a.iter().chain(b.iter()) {
            if !expected.contains(v) {
                expected.push(*v);
            }
        }
        prop_assert_eq!(union, expected);
    }

    /// Property: except and intersect split the source by membership in the
    /// other input.
    #[test]
    fn except_intersect_split_source(a in values_strategy(), b in values_strategy()) {
        let left = from_vec(a.clone());
        let right = from_vec(b.clone());
        let except = (&left).except(&right).to_vec();
        let intersect = (&left).intersect(&right).to_vec();

        let expected_except: Vec<i32> = a.iter().copied().filter(|x| !b.contains(x)).collect();
        prop_assert_eq!(except.len() + intersect.len(), a.len());
        prop_assert_eq!(except, expected_except);
    }

    /// Property: joins pair every outer element with each inner match.
    #[test]
    fn join_matches_nested_loop(outer in values_strategy(), inner in values_strategy()) {
        let joined = from_vec(outer.clone())
            .join(from_vec(inner.clone()), |o| o % 7, |i| i % 7, |o, i| (o, i))
            .to_vec();
        let mut expected = Vec::new();
        for o in &outer {
            for i in &inner {
                if o % 7 == i % 7 {
                    expected.push((*o, *i));
                }
            }
        }
        prop_assert_eq!(joined, expected);
    }
}
