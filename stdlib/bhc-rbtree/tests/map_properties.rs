//! Property tests for OrdMap
//!
//! These tests check the map laws against `std::collections::BTreeMap` as
//! a model, and the red-black invariants after long random update runs.

mod common;

use std::collections::BTreeMap;

use bhc_rbtree::OrdMap;
use common::{entries, init_tracing, map_of};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum MapOp {
    Put(i32, i32),
    Remove(i32),
}

fn key() -> impl Strategy<Value = i32> {
    -500..500i32
}

fn map_op() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        3 => (key(), any::<i32>()).prop_map(|(k, v)| MapOp::Put(k, v)),
        2 => key().prop_map(MapOp::Remove),
    ]
}

fn pairs() -> impl Strategy<Value = Vec<(i32, i32)>> {
    proptest::collection::vec((key(), any::<i32>()), 0..200)
}

// ============================================================
// Lookup and update laws
// ============================================================

proptest! {
    #[test]
    fn get_after_put(ps in pairs(), k in key(), v in any::<i32>()) {
        let m = map_of(&ps);
        let updated = m.put(k, v);
        prop_assert_eq!(updated.get(&k), Some(&v));
    }

    #[test]
    fn last_write_wins(ps in pairs(), k in key(), v1 in any::<i32>(), v2 in any::<i32>()) {
        let m = map_of(&ps);
        let updated = m.put(k, v1).put(k, v2);
        prop_assert_eq!(updated.get(&k), Some(&v2));
    }

    #[test]
    fn delete_absent_is_identity(ps in pairs(), k in key()) {
        let m = map_of(&ps);
        prop_assume!(m.get(&k).is_none());
        prop_assert_eq!(entries(&m.delete(&k)), entries(&m));
    }

    #[test]
    fn delete_undoes_put(ps in pairs(), k in key(), v in any::<i32>()) {
        let m = map_of(&ps);
        prop_assert_eq!(entries(&m.put(k, v).delete(&k)), entries(&m.delete(&k)));
    }

    #[test]
    fn size_after_put(ps in pairs(), k in key(), v in any::<i32>()) {
        let m = map_of(&ps);
        let grew = usize::from(!m.contains_key(&k));
        prop_assert_eq!(m.put(k, v).size(), m.size() + grew);
    }

    #[test]
    fn replace_and_remove_report_old_value(ps in pairs(), k in key(), v in any::<i32>()) {
        let m = map_of(&ps);
        let before = m.get(&k).copied();
        let (m2, old) = m.replace(k, v);
        prop_assert_eq!(old, before);
        let (_, removed) = m2.remove(&k);
        prop_assert_eq!(removed, Some(v));
    }

    #[test]
    fn entries_round_trip(ps in pairs()) {
        let m = map_of(&ps);
        let rebuilt: OrdMap<i32, i32> = m.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&rebuilt, &m);

        let mut forward = entries(&m);
        forward.reverse();
        let backward: Vec<_> = m.entries_rev().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(backward, forward);
    }

    #[test]
    fn matches_btreemap(ps in pairs()) {
        let m = map_of(&ps);
        let model: BTreeMap<i32, i32> = ps.iter().copied().collect();
        prop_assert_eq!(entries(&m), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn folds_follow_key_order(ps in pairs()) {
        let m = map_of(&ps);
        let asc = m.fold_left(Vec::new(), |mut acc, k, _| { acc.push(*k); acc });
        let desc = m.fold_right(Vec::new(), |k, _, mut acc| { acc.push(*k); acc });
        let keys: Vec<_> = m.keys().copied().collect();
        prop_assert_eq!(&asc, &keys);
        prop_assert_eq!(desc, keys.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn filter_keeps_invariants(ps in pairs(), modulus in 1..7i32) {
        let m = map_of(&ps);
        let kept = m.filter(|k, _| k.rem_euclid(modulus) == 0);
        prop_assert!(kept.check_invariants().is_ok());
        prop_assert!(kept.all(|k, _| k.rem_euclid(modulus) == 0));
        prop_assert_eq!(kept.size(), m.keys().filter(|k| k.rem_euclid(modulus) == 0).count());
    }
}

// ============================================================
// Invariants under long random runs
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_updates_keep_invariants(ops in proptest::collection::vec(map_op(), 0..3000)) {
        init_tracing();
        let mut m = OrdMap::empty();
        let mut model = BTreeMap::new();

        for op in &ops {
            match *op {
                MapOp::Put(k, v) => {
                    let (next, old) = m.replace(k, v);
                    prop_assert_eq!(old, model.insert(k, v), "put({})", k);
                    m = next;
                }
                MapOp::Remove(k) => {
                    let (next, old) = m.remove(&k);
                    prop_assert_eq!(old, model.remove(&k), "remove({})", k);
                    m = next;
                }
            }
            prop_assert!(m.check_invariants().is_ok());
        }

        prop_assert_eq!(m.size(), model.len());
        prop_assert_eq!(entries(&m), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn remove_shuffled_keys_in_order(keys in Just((0..1000).collect::<Vec<i32>>()).prop_shuffle()) {
        let mut m: OrdMap<i32, i32> = keys.iter().map(|&k| (k, k)).collect();
        prop_assert_eq!(m.size(), 1000);

        let ascending: Vec<i32> = m.keys().copied().collect();
        for k in ascending {
            m = m.delete(&k);
            prop_assert!(m.check_invariants().is_ok());
        }
        prop_assert!(m.is_empty());
        prop_assert_eq!(m.size(), 0);
        prop_assert_eq!(m, OrdMap::empty());
    }
}

// ============================================================
// Fixed scenarios
// ============================================================

#[test]
fn insertion_order_does_not_matter() {
    let expected = vec![(0, "0"), (1, "1"), (2, "2")];
    for order in [[2, 1, 0], [2, 0, 1], [0, 2, 1], [0, 1, 2]] {
        let m = order
            .iter()
            .fold(OrdMap::empty(), |m, &k| m.put(k, ["0", "1", "2"][k as usize]));
        let got: Vec<_> = m.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(got, expected, "order {order:?}");
        assert!(m.check_invariants().is_ok());
    }
}

#[test]
fn versions_are_independent() {
    let base = map_of(&(0..100).map(|i| (i, i)).collect::<Vec<_>>());
    let snapshot = entries(&base);

    let a = base.put(1000, 1000).delete(&3);
    let b = base.delete(&50).put(3, -3);
    let c = a.union(&b);

    assert_eq!(entries(&base), snapshot);
    assert_eq!(a.get(&3), None);
    assert_eq!(b.get(&3), Some(&-3));
    assert_eq!(b.get(&1000), None);
    assert_eq!(c.get(&3), Some(&-3));
    assert_eq!(c.get(&1000), Some(&1000));
    for m in [&base, &a, &b, &c] {
        assert!(m.check_invariants().is_ok());
    }
}

#[test]
fn delete_from_empty() {
    let m: OrdMap<i32, i32> = OrdMap::empty();
    let (m2, old) = m.remove(&1);
    assert_eq!(old, None);
    assert!(m2.is_empty());
}
