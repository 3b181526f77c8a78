//! Set-algebra laws for OrdSet and OrdMap.

mod common;

use std::collections::BTreeSet;

use bhc_rbtree::{OrdMap, OrdSet};
use common::{elements, entries, init_tracing};
use proptest::prelude::*;

fn set() -> impl Strategy<Value = OrdSet<i32>> {
    proptest::collection::vec(-100..100i32, 0..120).prop_map(|xs| OrdSet::from_elements(xs))
}

fn model(s: &OrdSet<i32>) -> BTreeSet<i32> {
    s.iter().copied().collect()
}

proptest! {
    #[test]
    fn diff_is_subset(a in set(), b in set()) {
        prop_assert!(a.diff(&b).is_subset(&a));
    }

    #[test]
    fn diff_meets_nothing(a in set(), b in set()) {
        prop_assert!(a.diff(&b).intersect(&b).is_empty());
        prop_assert!(a.diff(&b).is_disjoint(&b));
    }

    #[test]
    fn self_union_and_diff(a in set()) {
        prop_assert_eq!(a.union(&a), a.clone());
        prop_assert!(a.diff(&a).is_empty());
        prop_assert_eq!(a.intersect(&a), a.clone());
    }

    #[test]
    fn operations_match_btreeset(a in set(), b in set()) {
        init_tracing();
        let (ma, mb) = (model(&a), model(&b));

        let u = a.union(&b);
        let i = a.intersect(&b);
        let d = a.diff(&b);
        prop_assert_eq!(elements(&u), ma.union(&mb).copied().collect::<Vec<_>>());
        prop_assert_eq!(elements(&i), ma.intersection(&mb).copied().collect::<Vec<_>>());
        prop_assert_eq!(elements(&d), ma.difference(&mb).copied().collect::<Vec<_>>());
        prop_assert_eq!(a.is_subset(&b), ma.is_subset(&mb));
        prop_assert_eq!(a.is_disjoint(&b), ma.is_disjoint(&mb));

        for s in [&u, &i, &d] {
            prop_assert!(s.check_invariants().is_ok());
        }
    }

    #[test]
    fn union_is_commutative_on_keys(a in set(), b in set()) {
        prop_assert_eq!(a.union(&b), b.union(&a));
        prop_assert_eq!(a.intersect(&b), b.intersect(&a));
    }

    #[test]
    fn equality_ignores_insertion_history(xs in proptest::collection::vec(-100..100i32, 0..80)) {
        let forward = OrdSet::from_elements(xs.iter().copied());
        let backward = OrdSet::from_elements(xs.iter().rev().copied());
        prop_assert!(forward.equals(&backward));
    }

    #[test]
    fn results_stay_usable(a in set(), b in set(), x in -100..100i32) {
        // Algebra results accept further updates.
        let u = a.union(&b).put(x).delete(&(x + 1));
        prop_assert!(u.check_invariants().is_ok());
        prop_assert!(u.contains(&x));
    }
}

#[test]
fn map_union_prefers_left_values() {
    let left = OrdMap::from_entries(vec![(1, 10), (2, 20), (3, 30)]);
    let right = OrdMap::from_entries(vec![(2, -2), (3, -3), (4, -4)]);

    assert_eq!(entries(&left.union(&right)), vec![(1, 10), (2, 20), (3, 30), (4, -4)]);
    assert_eq!(entries(&right.union(&left)), vec![(1, 10), (2, -2), (3, -3), (4, -4)]);
    assert_eq!(entries(&left.intersect(&right)), vec![(2, 20), (3, 30)]);
    assert_eq!(entries(&left.diff(&right)), vec![(1, 10)]);
}

#[test]
fn map_equality_compares_values() {
    let a = OrdMap::from_entries(vec![(1, 1), (2, 2)]);
    let b = OrdMap::from_entries(vec![(2, 2), (1, 1)]);
    let c = OrdMap::from_entries(vec![(1, 1), (2, 3)]);
    assert!(a.equals(&b));
    assert!(!a.equals(&c));
    // Same keys, so each is a subset of the other.
    assert!(a.is_subset(&c) && c.is_subset(&a));
}

#[test]
fn empty_operands() {
    let empty: OrdSet<i32> = OrdSet::empty();
    let s = OrdSet::from_elements(1..=3);
    assert_eq!(s.union(&empty), s);
    assert_eq!(empty.union(&s), s);
    assert!(s.intersect(&empty).is_empty());
    assert_eq!(s.diff(&empty), s);
    assert!(empty.diff(&s).is_empty());
    assert!(empty.is_subset(&s));
    assert!(!s.is_subset(&empty));
    assert!(empty.equals(&OrdSet::empty()));
}
