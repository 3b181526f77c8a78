//! Set algebra over two trees ordered by the same comparator.
//!
//! Operations that produce a tree fold the smaller operand into the larger
//! one with the engine's path-copying `insert` and `remove`, so the result
//! shares every untouched subtree with its inputs. The predicates walk both
//! trees in key order at once through [`Merge`].
//!
//! When a key is present on both sides the left operand's entry is kept.

use std::cmp::Ordering;
use std::iter::{FusedIterator, Peekable};
use std::rc::Rc;

use tracing::trace;

use crate::compare::Compare;
use crate::iter::Iter;
use crate::tree::{build_sorted, insert, lookup, remove, tree_size, Tree};

type Entry<'a, K, V> = (&'a K, &'a V);

/// Lock-step walk over two trees, yielding each key once together with
/// the entry on each side that holds it.
pub(crate) struct Merge<'a, 'c, K, V, C> {
    a: Peekable<Iter<'a, K, V>>,
    b: Peekable<Iter<'a, K, V>>,
    cmp: &'c C,
}

impl<'a, 'c, K, V, C: Compare<K>> Merge<'a, 'c, K, V, C> {
    pub(crate) fn new(a: &'a Tree<K, V>, b: &'a Tree<K, V>, cmp: &'c C) -> Self {
        Merge {
            a: Iter::new(a).peekable(),
            b: Iter::new(b).peekable(),
            cmp,
        }
    }
}

impl<'a, K, V, C: Compare<K>> Iterator for Merge<'a, '_, K, V, C> {
    type Item = (Option<Entry<'a, K, V>>, Option<Entry<'a, K, V>>);

    fn next(&mut self) -> Option<Self::Item> {
        let order = match (self.a.peek(), self.b.peek()) {
            (None, None) => return None,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some((ka, _)), Some((kb, _))) => self.cmp.compare(ka, kb),
        };
        Some(match order {
            Ordering::Less => (self.a.next(), None),
            Ordering::Greater => (None, self.b.next()),
            Ordering::Equal => (self.a.next(), self.b.next()),
        })
    }
}

impl<K, V, C: Compare<K>> FusedIterator for Merge<'_, '_, K, V, C> {}

fn rebuild<K: Clone, V: Clone>(entries: Vec<Entry<'_, K, V>>) -> Tree<K, V> {
    build_sorted(entries.into_iter().map(|(k, v)| (k.clone(), v.clone())))
}

pub(crate) fn union<K: Clone, V: Clone, C: Compare<K>>(
    a: &Tree<K, V>,
    b: &Tree<K, V>,
    cmp: &C,
) -> Tree<K, V> {
    if b.is_none() {
        return a.clone();
    }
    if a.is_none() {
        return b.clone();
    }
    let result = if tree_size(b) <= tree_size(a) {
        // Keys already in `a` keep their entry.
        Iter::new(b).fold(a.clone(), |acc, (k, v)| {
            if lookup(a, k, cmp).is_some() {
                acc
            } else {
                Some(insert(&acc, k.clone(), v.clone(), cmp).0)
            }
        })
    } else {
        Iter::new(a).fold(b.clone(), |acc, (k, v)| {
            Some(insert(&acc, k.clone(), v.clone(), cmp).0)
        })
    };
    trace!(left = tree_size(a), right = tree_size(b), result = tree_size(&result), "union");
    result
}

pub(crate) fn intersect<K: Clone, V: Clone, C: Compare<K>>(
    a: &Tree<K, V>,
    b: &Tree<K, V>,
    cmp: &C,
) -> Tree<K, V> {
    if a.is_none() || b.is_none() {
        return None;
    }
    let result = if tree_size(a) <= tree_size(b) {
        Iter::new(a)
            .filter(|(k, _)| lookup(b, k, cmp).is_none())
            .fold(a.clone(), |acc, (k, _)| remove(&acc, k, cmp).0)
    } else {
        let kept: Vec<_> = Iter::new(b).filter_map(|(k, _)| lookup(a, k, cmp)).collect();
        rebuild(kept)
    };
    trace!(left = tree_size(a), right = tree_size(b), result = tree_size(&result), "intersect");
    result
}

pub(crate) fn diff<K: Clone, V: Clone, C: Compare<K>>(
    a: &Tree<K, V>,
    b: &Tree<K, V>,
    cmp: &C,
) -> Tree<K, V> {
    if a.is_none() || b.is_none() {
        return a.clone();
    }
    // Removing an absent key hands back the same root, so an untouched `a`
    // comes out as `a` itself.
    let result = if tree_size(b) < tree_size(a) {
        Iter::new(b).fold(a.clone(), |acc, (k, _)| remove(&acc, k, cmp).0)
    } else {
        Iter::new(a)
            .filter(|(k, _)| lookup(b, k, cmp).is_some())
            .fold(a.clone(), |acc, (k, _)| remove(&acc, k, cmp).0)
    };
    trace!(left = tree_size(a), right = tree_size(b), result = tree_size(&result), "diff");
    result
}

/// Every key of `a` is also a key of `b`.
pub(crate) fn is_subset<K, V, C: Compare<K>>(a: &Tree<K, V>, b: &Tree<K, V>, cmp: &C) -> bool {
    if tree_size(a) > tree_size(b) {
        return false;
    }
    Merge::new(a, b, cmp).all(|pair| !matches!(pair, (Some(_), None)))
}

/// No key is shared between `a` and `b`.
pub(crate) fn is_disjoint<K, V, C: Compare<K>>(a: &Tree<K, V>, b: &Tree<K, V>, cmp: &C) -> bool {
    Merge::new(a, b, cmp).all(|pair| !matches!(pair, (Some(_), Some(_))))
}

/// Same keys in the same order, with equal values.
pub(crate) fn equals<K, V: PartialEq, C: Compare<K>>(a: &Tree<K, V>, b: &Tree<K, V>, cmp: &C) -> bool {
    match (a, b) {
        (Some(x), Some(y)) if Rc::ptr_eq(x, y) => true,
        _ if tree_size(a) != tree_size(b) => false,
        _ => Iter::new(a)
            .zip(Iter::new(b))
            .all(|((ka, va), (kb, vb))| cmp.compare(ka, kb) == Ordering::Equal && va == vb),
    }
}
