//! Folds and transforms over a tree.
//!
//! None of these touch the input tree. Value-only transforms keep the
//! exact shape and colouring; anything that drops entries rebuilds the
//! result by ordered re-insertion, since cutting nodes out of a red-black
//! tree in place would break the black-height invariant.

use std::rc::Rc;

use tracing::trace;

use crate::compare::Compare;
use crate::iter::Iter;
use crate::tree::{insert, tree_size, Node, Tree};

pub(crate) fn fold_left<K, V, B, F>(tree: &Tree<K, V>, init: B, f: &mut F) -> B
where
    F: FnMut(B, &K, &V) -> B,
{
    match tree {
        None => init,
        Some(n) => {
            let acc = fold_left(&n.left, init, f);
            let acc = f(acc, &n.key, &n.value);
            fold_left(&n.right, acc, f)
        }
    }
}

pub(crate) fn fold_right<K, V, B, F>(tree: &Tree<K, V>, init: B, f: &mut F) -> B
where
    F: FnMut(&K, &V, B) -> B,
{
    match tree {
        None => init,
        Some(n) => {
            let acc = fold_right(&n.right, init, f);
            let acc = f(&n.key, &n.value, acc);
            fold_right(&n.left, acc, f)
        }
    }
}

/// Transform every value in key order, keeping keys, shape and colours.
pub(crate) fn map_values<K: Clone, V, U, F>(tree: &Tree<K, V>, f: &mut F) -> Tree<K, U>
where
    F: FnMut(&K, &V) -> U,
{
    tree.as_ref().map(|n| {
        let left = map_values(&n.left, f);
        let value = f(&n.key, &n.value);
        let right = map_values(&n.right, f);
        Rc::new(Node {
            color: n.color,
            key: n.key.clone(),
            value,
            size: n.size,
            left,
            right,
        })
    })
}

/// Keep the entries for which `f` returns `Some`, re-inserting them in
/// ascending order into a fresh tree.
pub(crate) fn map_filter<K, V, U, C, F>(tree: &Tree<K, V>, cmp: &C, mut f: F) -> Tree<K, U>
where
    K: Clone,
    U: Clone,
    C: Compare<K>,
    F: FnMut(&K, &V) -> Option<U>,
{
    let mut result: Tree<K, U> = None;
    let mut kept = 0usize;
    for (k, v) in Iter::new(tree) {
        if let Some(u) = f(k, v) {
            result = Some(insert(&result, k.clone(), u, cmp).0);
            kept += 1;
        }
    }
    trace!(input = tree_size(tree), kept, "rebuilt filtered tree");
    result
}

pub(crate) fn all<K, V, F>(tree: &Tree<K, V>, mut pred: F) -> bool
where
    F: FnMut(&K, &V) -> bool,
{
    Iter::new(tree).all(|(k, v)| pred(k, v))
}

pub(crate) fn some<K, V, F>(tree: &Tree<K, V>, mut pred: F) -> bool
where
    F: FnMut(&K, &V) -> bool,
{
    Iter::new(tree).any(|(k, v)| pred(k, v))
}
