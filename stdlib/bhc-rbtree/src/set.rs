//! Immutable ordered sets
//!
//! This module provides an immutable set backed by the same persistent
//! red-black tree as [`OrdMap`], implemented as a wrapper around
//! `OrdMap<T, ()>`.
//!
//! # Performance
//!
//! | Operation    | Complexity |
//! |--------------|------------|
//! | contains     | O(log n)   |
//! | put          | O(log n)   |
//! | delete       | O(log n)   |
//! | union        | O(n + m)   |
//! | is_subset    | O(n + m)   |
//!
//! # Example
//!
//! ```
//! use bhc_rbtree::OrdSet;
//!
//! let s = OrdSet::empty()
//!     .put(1)
//!     .put(2)
//!     .put(3);
//!
//! assert!(s.contains(&2));
//! assert_eq!(s.size(), 3);
//! ```

use std::fmt::{self, Debug};
use std::iter::Rev;

use crate::compare::{Compare, Natural};
use crate::iter::Keys;
use crate::map::OrdMap;
use crate::validate::InvariantError;

/// An immutable ordered set based on persistent red-black trees.
pub struct OrdSet<T, C = Natural> {
    map: OrdMap<T, (), C>,
}

/// Iterator over a set in ascending order.
pub type SetIter<'a, T> = Keys<'a, T, ()>;

impl<T: Ord> OrdSet<T> {
    /// Create an empty set ordered by `T`'s [`Ord`].
    ///
    /// O(1) time and space.
    #[inline]
    pub fn empty() -> Self {
        OrdSet {
            map: OrdMap::empty(),
        }
    }

    /// Alias for [`OrdSet::empty`].
    #[inline]
    pub fn new() -> Self {
        OrdSet::empty()
    }

    /// Create a set with a single element.
    pub fn singleton(x: T) -> Self
    where
        T: Clone,
    {
        OrdSet {
            map: OrdMap::singleton(x, ()),
        }
    }

    /// Create a set from elements. Duplicates collapse to the last one.
    ///
    /// O(n log n) time.
    pub fn from_elements(xs: impl IntoIterator<Item = T>) -> Self
    where
        T: Clone,
    {
        OrdSet::from_elements_with(Natural, xs)
    }
}

impl<T, C: Compare<T>> OrdSet<T, C> {
    /// Create an empty set ordered by `cmp`.
    #[inline]
    pub fn with_comparator(cmp: C) -> Self {
        OrdSet {
            map: OrdMap::with_comparator(cmp),
        }
    }

    /// Create a set ordered by `cmp` from elements.
    pub fn from_elements_with(cmp: C, xs: impl IntoIterator<Item = T>) -> Self
    where
        T: Clone,
    {
        OrdSet {
            map: OrdMap::from_entries_with(cmp, xs.into_iter().map(|x| (x, ()))),
        }
    }

    /// The comparator ordering this set.
    #[inline]
    pub fn comparator(&self) -> &C {
        self.map.comparator()
    }

    /// Check if the set is empty.
    ///
    /// O(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Return the number of elements in the set.
    ///
    /// O(1) time.
    #[inline]
    pub fn size(&self) -> usize {
        self.map.size()
    }

    /// Check if an element is in the set.
    ///
    /// O(log n) time.
    #[inline]
    pub fn contains(&self, x: &T) -> bool {
        self.map.contains_key(x)
    }

    /// Insert an element into the set.
    ///
    /// O(log n) time.
    pub fn put(&self, x: T) -> Self
    where
        T: Clone,
        C: Clone,
    {
        OrdSet {
            map: self.map.put(x, ()),
        }
    }

    /// Remove an element, reporting whether it was present.
    pub fn remove(&self, x: &T) -> (Self, bool)
    where
        T: Clone,
        C: Clone,
    {
        let (map, old) = self.map.remove(x);
        (OrdSet { map }, old.is_some())
    }

    /// Delete an element from the set.
    ///
    /// O(log n) time.
    pub fn delete(&self, x: &T) -> Self
    where
        T: Clone,
        C: Clone,
    {
        OrdSet {
            map: self.map.delete(x),
        }
    }

    /// Get the minimum element.
    pub fn min(&self) -> Option<&T> {
        self.map.min().map(|(k, _)| k)
    }

    /// Get the maximum element.
    pub fn max(&self) -> Option<&T> {
        self.map.max().map(|(k, _)| k)
    }

    /// Iterate over elements in ascending order.
    pub fn iter(&self) -> SetIter<'_, T> {
        self.map.keys()
    }

    /// Iterate over elements in descending order.
    pub fn iter_rev(&self) -> Rev<SetIter<'_, T>> {
        self.map.keys().rev()
    }

    /// Fold the set in ascending order.
    pub fn fold_left<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.map.fold_left(init, |acc, k, _| f(acc, k))
    }

    /// Fold the set in descending order.
    pub fn fold_right<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(&T, B) -> B,
    {
        self.map.fold_right(init, |k, _, acc| f(k, acc))
    }

    /// Map a function over all elements into a naturally ordered set.
    ///
    /// This may produce a smaller set if the function maps distinct
    /// elements to the same value.
    ///
    /// O(n log n) time.
    pub fn map<U, F>(&self, f: F) -> OrdSet<U>
    where
        U: Ord + Clone,
        F: FnMut(&T) -> U,
    {
        self.map_with(Natural, f)
    }

    /// Map a function over all elements into a set ordered by `cmp`.
    pub fn map_with<U, D, F>(&self, cmp: D, f: F) -> OrdSet<U, D>
    where
        U: Clone,
        D: Compare<U>,
        F: FnMut(&T) -> U,
    {
        OrdSet::from_elements_with(cmp, self.iter().map(f))
    }

    /// Keep the elements satisfying `pred`.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        T: Clone,
        C: Clone,
        F: FnMut(&T) -> bool,
    {
        OrdSet {
            map: self.map.filter(|k, _| pred(k)),
        }
    }

    /// Check whether every element satisfies `pred`.
    pub fn all<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.map.all(|k, _| pred(k))
    }

    /// Check whether some element satisfies `pred`.
    pub fn some<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.map.some(|k, _| pred(k))
    }

    /// Union of two sets. Where both hold an element comparing equal, the
    /// one from `self` is kept.
    pub fn union(&self, other: &Self) -> Self
    where
        T: Clone,
        C: Clone,
    {
        OrdSet {
            map: self.map.union(&other.map),
        }
    }

    /// Intersection of two sets.
    pub fn intersect(&self, other: &Self) -> Self
    where
        T: Clone,
        C: Clone,
    {
        OrdSet {
            map: self.map.intersect(&other.map),
        }
    }

    /// Difference of two sets (elements in self but not in other).
    pub fn diff(&self, other: &Self) -> Self
    where
        T: Clone,
        C: Clone,
    {
        OrdSet {
            map: self.map.diff(&other.map),
        }
    }

    /// Check if this set is a subset of another.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.map.is_subset(&other.map)
    }

    /// Check if two sets have no common elements.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.map.is_disjoint(&other.map)
    }

    /// Check whether both sets hold the same elements.
    pub fn equals(&self, other: &Self) -> bool {
        self.map.equals(&other.map)
    }

    /// Verify the red-black invariants, returning the tree's black height.
    pub fn check_invariants(&self) -> Result<usize, InvariantError> {
        self.map.check_invariants()
    }
}

// Trait implementations

impl<T, C: Clone> Clone for OrdSet<T, C> {
    fn clone(&self) -> Self {
        OrdSet {
            map: self.map.clone(),
        }
    }
}

impl<T, C: Compare<T> + Default> Default for OrdSet<T, C> {
    fn default() -> Self {
        OrdSet::with_comparator(C::default())
    }
}

impl<T: Clone, C: Compare<T> + Default> FromIterator<T> for OrdSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        OrdSet::from_elements_with(C::default(), iter)
    }
}

impl<'a, T, C: Compare<T>> IntoIterator for &'a OrdSet<T, C> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> SetIter<'a, T> {
        self.iter()
    }
}

impl<T: Debug, C: Compare<T>> Debug for OrdSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Compare<T>> PartialEq for OrdSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T, C: Compare<T>> Eq for OrdSet<T, C> {}
