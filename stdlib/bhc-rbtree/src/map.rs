//! Immutable ordered maps
//!
//! This module provides an immutable map backed by a persistent red-black
//! tree. Every update returns a new map that shares all untouched nodes with
//! the old one, so old versions stay valid and cloning a map is O(1).
//!
//! # Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | get       | O(log n)   |
//! | put       | O(log n)   |
//! | remove    | O(log n)   |
//! | size      | O(1)       |
//! | union     | O(n + m)   |
//!
//! # Example
//!
//! ```
//! use bhc_rbtree::OrdMap;
//!
//! let m = OrdMap::empty()
//!     .put(1, "one")
//!     .put(2, "two")
//!     .put(3, "three");
//!
//! assert_eq!(m.get(&2), Some(&"two"));
//! assert_eq!(m.size(), 3);
//!
//! let (m2, old) = m.remove(&2);
//! assert_eq!(old, Some("two"));
//! assert_eq!(m2.size(), 2);
//! assert_eq!(m.size(), 3);
//! ```

use std::fmt::{self, Debug};
use std::iter::Rev;

use tracing::{debug, trace};

use crate::algebra;
use crate::combinators;
use crate::compare::{Compare, Natural};
use crate::iter::{Iter, Keys, Values};
use crate::tree::{self, Tree};
use crate::validate::{validate, InvariantError};

/// An immutable ordered map based on persistent red-black trees.
///
/// The comparator `C` is fixed when the map is created and inherited by
/// every map derived from it.
pub struct OrdMap<K, V, C = Natural> {
    root: Tree<K, V>,
    cmp: C,
}

impl<K: Ord, V> OrdMap<K, V> {
    /// Create an empty map ordered by `K`'s [`Ord`].
    ///
    /// O(1) time and space.
    #[inline]
    pub fn empty() -> Self {
        OrdMap {
            root: None,
            cmp: Natural,
        }
    }

    /// Alias for [`OrdMap::empty`].
    #[inline]
    pub fn new() -> Self {
        OrdMap::empty()
    }

    /// Create a map with a single entry.
    pub fn singleton(key: K, value: V) -> Self
    where
        K: Clone,
        V: Clone,
    {
        OrdMap::empty().put(key, value)
    }

    /// Create a map from key-value pairs. Later pairs overwrite earlier
    /// ones with the same key.
    ///
    /// O(n log n) time.
    pub fn from_entries(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Clone,
        V: Clone,
    {
        OrdMap::from_entries_with(Natural, pairs)
    }
}

impl<K, V, C: Compare<K>> OrdMap<K, V, C> {
    /// Create an empty map ordered by `cmp`.
    #[inline]
    pub fn with_comparator(cmp: C) -> Self {
        OrdMap { root: None, cmp }
    }

    /// Create a map ordered by `cmp` from key-value pairs.
    pub fn from_entries_with(cmp: C, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Clone,
        V: Clone,
    {
        let mut root = None;
        let mut count = 0usize;
        for (k, v) in pairs {
            root = Some(tree::insert(&root, k, v, &cmp).0);
            count += 1;
        }
        trace!(pairs = count, size = tree::tree_size(&root), "built map");
        Self::checked(root, cmp)
    }

    fn checked<U>(root: Tree<K, U>, cmp: C) -> OrdMap<K, U, C> {
        let map = OrdMap { root, cmp };
        map.assert_valid();
        map
    }

    /// Panic on a broken invariant when `check-invariants` is enabled.
    fn assert_valid(&self) {
        if cfg!(feature = "check-invariants") {
            if let Err(err) = self.check_invariants() {
                panic!("red-black invariant broken: {err}");
            }
        }
    }

    fn derive<U>(&self, root: Tree<K, U>) -> OrdMap<K, U, C>
    where
        C: Clone,
    {
        Self::checked(root, self.cmp.clone())
    }

    /// The comparator ordering this map.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Check if the map is empty.
    ///
    /// O(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return the number of entries in the map.
    ///
    /// O(1) time.
    #[inline]
    pub fn size(&self) -> usize {
        tree::tree_size(&self.root)
    }

    /// Look up the value stored under `key`.
    ///
    /// O(log n) time.
    pub fn get(&self, key: &K) -> Option<&V> {
        tree::lookup(&self.root, key, &self.cmp).map(|(_, v)| v)
    }

    /// Look up the stored key and value for `key`.
    pub fn get_entry(&self, key: &K) -> Option<(&K, &V)> {
        tree::lookup(&self.root, key, &self.cmp)
    }

    /// Check if a key is in the map.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_entry(key).is_some()
    }

    /// Insert a key-value pair, replacing any existing value for the key.
    ///
    /// O(log n) time.
    pub fn put(&self, key: K, value: V) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        self.replace(key, value).0
    }

    /// Insert a key-value pair and return the value it replaced.
    ///
    /// Replacing an existing key keeps the tree's shape and colouring.
    pub fn replace(&self, key: K, value: V) -> (Self, Option<V>)
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        let (root, old) = tree::insert(&self.root, key, value, &self.cmp);
        (self.derive(Some(root)), old)
    }

    /// Remove `key`, returning the new map and the removed value.
    ///
    /// If the key is absent the returned map shares this map's root
    /// unchanged.
    pub fn remove(&self, key: &K) -> (Self, Option<V>)
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        let (root, old) = tree::remove(&self.root, key, &self.cmp);
        (self.derive(root), old)
    }

    /// Remove `key`, discarding the removed value.
    ///
    /// O(log n) time.
    pub fn delete(&self, key: &K) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        self.remove(key).0
    }

    /// Get the entry with the smallest key.
    pub fn min(&self) -> Option<(&K, &V)> {
        tree::min(&self.root)
    }

    /// Get the entry with the largest key.
    pub fn max(&self) -> Option<(&K, &V)> {
        tree::max(&self.root)
    }

    /// Iterate over entries in ascending key order.
    ///
    /// The iterator is double-ended; `.rev()` walks in descending order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root)
    }

    /// Same as [`iter`](Self::iter).
    #[inline]
    pub fn entries(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// Iterate over entries in descending key order.
    #[inline]
    pub fn entries_rev(&self) -> Rev<Iter<'_, K, V>> {
        self.iter().rev()
    }

    /// Iterate over keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Iterate over values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Fold over entries in ascending key order.
    ///
    /// O(n) time.
    pub fn fold_left<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(B, &K, &V) -> B,
    {
        combinators::fold_left(&self.root, init, &mut f)
    }

    /// Fold over entries in descending key order.
    ///
    /// O(n) time.
    pub fn fold_right<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(&K, &V, B) -> B,
    {
        combinators::fold_right(&self.root, init, &mut f)
    }

    /// Map a function over all values. Keys and tree shape are unchanged.
    ///
    /// O(n) time.
    pub fn map<U, F>(&self, mut f: F) -> OrdMap<K, U, C>
    where
        K: Clone,
        C: Clone,
        F: FnMut(&V) -> U,
    {
        self.derive(combinators::map_values(&self.root, &mut |_, v| f(v)))
    }

    /// Map a function over all keys and values.
    ///
    /// O(n) time.
    pub fn map_with_key<U, F>(&self, mut f: F) -> OrdMap<K, U, C>
    where
        K: Clone,
        C: Clone,
        F: FnMut(&K, &V) -> U,
    {
        self.derive(combinators::map_values(&self.root, &mut f))
    }

    /// Transform entries, dropping those for which `f` returns `None`.
    ///
    /// O(k log k) time for k kept entries.
    pub fn map_filter<U, F>(&self, f: F) -> OrdMap<K, U, C>
    where
        K: Clone,
        U: Clone,
        C: Clone,
        F: FnMut(&K, &V) -> Option<U>,
    {
        self.derive(combinators::map_filter(&self.root, &self.cmp, f))
    }

    /// Keep the entries satisfying `pred`.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        self.map_filter(|k, v| pred(k, v).then(|| v.clone()))
    }

    /// Check whether every entry satisfies `pred`, stopping at the first
    /// that does not.
    pub fn all<F>(&self, pred: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        combinators::all(&self.root, pred)
    }

    /// Check whether some entry satisfies `pred`, stopping at the first
    /// that does.
    pub fn some<F>(&self, pred: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        combinators::some(&self.root, pred)
    }

    /// Union of two maps. If a key exists in both, the value from `self` is
    /// used.
    ///
    /// Both maps are compared with `self`'s comparator.
    pub fn union(&self, other: &Self) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        self.derive(algebra::union(&self.root, &other.root, &self.cmp))
    }

    /// Intersection of two maps, keeping the values from `self`.
    pub fn intersect(&self, other: &Self) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        self.derive(algebra::intersect(&self.root, &other.root, &self.cmp))
    }

    /// Entries of `self` whose keys are not in `other`.
    pub fn diff(&self, other: &Self) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        self.derive(algebra::diff(&self.root, &other.root, &self.cmp))
    }

    /// Check whether every key of `self` is a key of `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        algebra::is_subset(&self.root, &other.root, &self.cmp)
    }

    /// Check whether the two maps share no key.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        algebra::is_disjoint(&self.root, &other.root, &self.cmp)
    }

    /// Check whether both maps hold the same entries, regardless of how
    /// they were built.
    pub fn equals(&self, other: &Self) -> bool
    where
        V: PartialEq,
    {
        algebra::equals(&self.root, &other.root, &self.cmp)
    }

    /// Verify the red-black invariants, returning the tree's black height.
    ///
    /// Only a bug (or an inconsistent comparator) makes this fail.
    pub fn check_invariants(&self) -> Result<usize, InvariantError> {
        validate(&self.root, &self.cmp).map_err(|err| {
            debug!(%err, size = self.size(), "map invariant check failed");
            err
        })
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Tree<K, V> {
        &self.root
    }
}

// Trait implementations

impl<K, V, C: Clone> Clone for OrdMap<K, V, C> {
    fn clone(&self) -> Self {
        OrdMap {
            root: self.root.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<K, V, C: Compare<K> + Default> Default for OrdMap<K, V, C> {
    fn default() -> Self {
        OrdMap::with_comparator(C::default())
    }
}

impl<K: Clone, V: Clone, C: Compare<K> + Default> FromIterator<(K, V)> for OrdMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        OrdMap::from_entries_with(C::default(), iter)
    }
}

impl<K: Clone, V: Clone, C: Compare<K>> Extend<(K, V)> for OrdMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.root = Some(tree::insert(&self.root, k, v, &self.cmp).0);
        }
        self.assert_valid();
    }
}

impl<'a, K, V, C: Compare<K>> IntoIterator for &'a OrdMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K: Debug, V: Debug, C: Compare<K>> Debug for OrdMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V: PartialEq, C: Compare<K>> PartialEq for OrdMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<K, V: Eq, C: Compare<K>> Eq for OrdMap<K, V, C> {}
