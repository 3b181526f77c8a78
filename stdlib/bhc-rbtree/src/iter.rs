//! Ordered cursors over a tree.
//!
//! Each end of an [`Iter`] keeps an explicit stack of the nodes still to be
//! visited on that side, so the auxiliary state is bounded by the tree
//! height rather than by the number of entries. Trees are immutable, so any
//! number of iterators over any versions may be alive at the same time.

use std::fmt::{self, Debug};
use std::iter::FusedIterator;

use smallvec::SmallVec;

use crate::tree::{tree_size, Node, Tree};

/// Inline stack depth. A red-black tree with n entries is at most
/// 2·log2(n + 1) tall, so every tree of up to 65 535 entries fits inline;
/// taller trees spill to the heap.
const INLINE_DEPTH: usize = 32;

type Stack<'a, K, V> = SmallVec<[&'a Node<K, V>; INLINE_DEPTH]>;

fn push_left<'a, K, V>(tree: &'a Tree<K, V>, stack: &mut Stack<'a, K, V>) {
    let mut current = tree;
    while let Some(n) = current {
        stack.push(n);
        current = &n.left;
    }
}

fn push_right<'a, K, V>(tree: &'a Tree<K, V>, stack: &mut Stack<'a, K, V>) {
    let mut current = tree;
    while let Some(n) = current {
        stack.push(n);
        current = &n.right;
    }
}

/// Iterator over the entries of a map in key order.
///
/// Iterates ascending with [`next`](Iterator::next) and descending with
/// [`next_back`](DoubleEndedIterator::next_back); the two ends never cross.
pub struct Iter<'a, K, V> {
    front: Stack<'a, K, V>,
    back: Stack<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a Tree<K, V>) -> Self {
        let mut front = SmallVec::new();
        let mut back = SmallVec::new();
        push_left(tree, &mut front);
        push_right(tree, &mut back);
        Iter {
            front,
            back,
            remaining: tree_size(tree),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        push_left(&node.right, &mut self.front);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        push_right(&node.left, &mut self.back);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: Debug, V: Debug> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Iterator over the keys of a map in ascending order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Keys { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

/// Iterator over the values of a map in ascending key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Values { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}
