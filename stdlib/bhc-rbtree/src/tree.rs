//! The red-black tree engine shared by [`OrdMap`](crate::OrdMap) and
//! [`OrdSet`](crate::OrdSet).
//!
//! Trees are `Option<Rc<Node>>` values. Nodes are never written after
//! construction: every mutating operation copies the path from the root to
//! the affected node and shares every other subtree with the input tree.
//!
//! All functions here take the comparator explicitly; the facades thread
//! their own comparator through every call.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::compare::Compare;

/// Node colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A possibly empty tree. `None` is a leaf and counts as black.
pub(crate) type Tree<K, V> = Option<Rc<Node<K, V>>>;

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) color: Color,
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) size: usize,
    pub(crate) left: Tree<K, V>,
    pub(crate) right: Tree<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(color: Color, key: K, value: V, left: Tree<K, V>, right: Tree<K, V>) -> Self {
        let size = 1 + tree_size(&left) + tree_size(&right);
        Node {
            color,
            key,
            value,
            size,
            left,
            right,
        }
    }
}

#[inline]
pub(crate) fn tree_size<K, V>(tree: &Tree<K, V>) -> usize {
    tree.as_ref().map_or(0, |n| n.size)
}

#[inline]
pub(crate) fn is_red<K, V>(tree: &Tree<K, V>) -> bool {
    matches!(tree, Some(n) if n.color == Color::Red)
}

#[inline]
fn red_child<K, V>(tree: &Tree<K, V>) -> Option<&Rc<Node<K, V>>> {
    tree.as_ref().filter(|n| n.color == Color::Red)
}

#[inline]
fn make<K, V>(
    color: Color,
    key: K,
    value: V,
    left: Tree<K, V>,
    right: Tree<K, V>,
) -> Rc<Node<K, V>> {
    Rc::new(Node::new(color, key, value, left, right))
}

/// Paint a node black. Copies the node unless this is the only reference.
pub(crate) fn blacken<K: Clone, V: Clone>(mut node: Rc<Node<K, V>>) -> Rc<Node<K, V>> {
    if node.color == Color::Red {
        Rc::make_mut(&mut node).color = Color::Black;
    }
    node
}

// Queries

pub(crate) fn lookup<'a, K, V, C: Compare<K>>(
    tree: &'a Tree<K, V>,
    key: &K,
    cmp: &C,
) -> Option<(&'a K, &'a V)> {
    let mut current = tree;
    while let Some(node) = current {
        match cmp.compare(key, &node.key) {
            Ordering::Less => current = &node.left,
            Ordering::Greater => current = &node.right,
            Ordering::Equal => return Some((&node.key, &node.value)),
        }
    }
    None
}

pub(crate) fn min<K, V>(tree: &Tree<K, V>) -> Option<(&K, &V)> {
    let mut node = tree.as_ref()?;
    while let Some(left) = &node.left {
        node = left;
    }
    Some((&node.key, &node.value))
}

pub(crate) fn max<K, V>(tree: &Tree<K, V>) -> Option<(&K, &V)> {
    let mut node = tree.as_ref()?;
    while let Some(right) = &node.right {
        node = right;
    }
    Some((&node.key, &node.value))
}

// Insertion

/// Insert `key`, returning the new root and the value it superseded.
///
/// An existing key keeps its position and colour; only the stored key and
/// value are swapped for the new ones.
pub(crate) fn insert<K: Clone, V: Clone, C: Compare<K>>(
    tree: &Tree<K, V>,
    key: K,
    value: V,
    cmp: &C,
) -> (Rc<Node<K, V>>, Option<V>) {
    let (root, old) = insert_node(tree, key, value, cmp);
    (blacken(root), old)
}

fn insert_node<K: Clone, V: Clone, C: Compare<K>>(
    tree: &Tree<K, V>,
    key: K,
    value: V,
    cmp: &C,
) -> (Rc<Node<K, V>>, Option<V>) {
    match tree {
        None => (make(Color::Red, key, value, None, None), None),
        Some(n) => match cmp.compare(&key, &n.key) {
            Ordering::Less => {
                let (left, old) = insert_node(&n.left, key, value, cmp);
                let node = balance_left(n.color, n.key.clone(), n.value.clone(), left, n.right.clone());
                (node, old)
            }
            Ordering::Greater => {
                let (right, old) = insert_node(&n.right, key, value, cmp);
                let node = balance_right(n.color, n.key.clone(), n.value.clone(), n.left.clone(), right);
                (node, old)
            }
            Ordering::Equal => {
                let node = Rc::new(Node {
                    color: n.color,
                    key,
                    value,
                    size: n.size,
                    left: n.left.clone(),
                    right: n.right.clone(),
                });
                (node, Some(n.value.clone()))
            }
        },
    }
}

/// Rebuild a node whose left child may have come back red with a red child.
fn balance_left<K: Clone, V: Clone>(
    color: Color,
    key: K,
    value: V,
    left: Rc<Node<K, V>>,
    right: Tree<K, V>,
) -> Rc<Node<K, V>> {
    if color == Color::Black && left.color == Color::Red {
        // left-left: single rotation to the right
        if let Some(ll) = red_child(&left.left) {
            return make(
                Color::Red,
                left.key.clone(),
                left.value.clone(),
                Some(blacken(Rc::clone(ll))),
                Some(make(Color::Black, key, value, left.right.clone(), right)),
            );
        }
        // left-right: double rotation
        if let Some(lr) = red_child(&left.right) {
            return make(
                Color::Red,
                lr.key.clone(),
                lr.value.clone(),
                Some(make(
                    Color::Black,
                    left.key.clone(),
                    left.value.clone(),
                    left.left.clone(),
                    lr.left.clone(),
                )),
                Some(make(Color::Black, key, value, lr.right.clone(), right)),
            );
        }
    }
    make(color, key, value, Some(left), right)
}

/// Mirror image of [`balance_left`].
fn balance_right<K: Clone, V: Clone>(
    color: Color,
    key: K,
    value: V,
    left: Tree<K, V>,
    right: Rc<Node<K, V>>,
) -> Rc<Node<K, V>> {
    if color == Color::Black && right.color == Color::Red {
        // right-right
        if let Some(rr) = red_child(&right.right) {
            return make(
                Color::Red,
                right.key.clone(),
                right.value.clone(),
                Some(make(Color::Black, key, value, left, right.left.clone())),
                Some(blacken(Rc::clone(rr))),
            );
        }
        // right-left
        if let Some(rl) = red_child(&right.left) {
            return make(
                Color::Red,
                rl.key.clone(),
                rl.value.clone(),
                Some(make(Color::Black, key, value, left, rl.left.clone())),
                Some(make(
                    Color::Black,
                    right.key.clone(),
                    right.value.clone(),
                    rl.right.clone(),
                    right.right.clone(),
                )),
            );
        }
    }
    make(color, key, value, left, Some(right))
}

// Removal

/// Result of removing one entry from a subtree.
struct Removed<K, V> {
    tree: Tree<K, V>,
    /// The subtree's black height dropped by one.
    short: bool,
    entry: (K, V),
}

/// Remove `key`, returning the new root and the removed value.
///
/// A node with two children takes over the entry of its in-order
/// predecessor, which is then unlinked from the left subtree. If `key` is
/// absent the input root is returned as is.
pub(crate) fn remove<K: Clone, V: Clone, C: Compare<K>>(
    tree: &Tree<K, V>,
    key: &K,
    cmp: &C,
) -> (Tree<K, V>, Option<V>) {
    match tree.as_ref().and_then(|root| remove_node(root, key, cmp)) {
        Some(removed) => (removed.tree.map(blacken), Some(removed.entry.1)),
        None => (tree.clone(), None),
    }
}

fn remove_node<K: Clone, V: Clone, C: Compare<K>>(
    node: &Rc<Node<K, V>>,
    key: &K,
    cmp: &C,
) -> Option<Removed<K, V>> {
    match cmp.compare(key, &node.key) {
        Ordering::Less => {
            let removed = remove_node(node.left.as_ref()?, key, cmp)?;
            let (tree, short) = rebuild_left(
                node.color,
                node.key.clone(),
                node.value.clone(),
                removed.tree,
                removed.short,
                node.right.clone(),
            );
            Some(Removed {
                tree: Some(tree),
                short,
                entry: removed.entry,
            })
        }
        Ordering::Greater => {
            let removed = remove_node(node.right.as_ref()?, key, cmp)?;
            let (tree, short) = rebuild_right(
                node.color,
                node.key.clone(),
                node.value.clone(),
                node.left.clone(),
                removed.tree,
                removed.short,
            );
            Some(Removed {
                tree: Some(tree),
                short,
                entry: removed.entry,
            })
        }
        Ordering::Equal => {
            let entry = (node.key.clone(), node.value.clone());
            match (&node.left, &node.right) {
                (Some(left), Some(_)) => {
                    let pred = remove_max(left);
                    let (pred_key, pred_value) = pred.entry;
                    let (tree, short) = rebuild_left(
                        node.color,
                        pred_key,
                        pred_value,
                        pred.tree,
                        pred.short,
                        node.right.clone(),
                    );
                    Some(Removed {
                        tree: Some(tree),
                        short,
                        entry,
                    })
                }
                _ => {
                    let (tree, short) = unlink(node);
                    Some(Removed { tree, short, entry })
                }
            }
        }
    }
}

fn remove_max<K: Clone, V: Clone>(node: &Rc<Node<K, V>>) -> Removed<K, V> {
    match &node.right {
        None => {
            let (tree, short) = unlink(node);
            Removed {
                tree,
                short,
                entry: (node.key.clone(), node.value.clone()),
            }
        }
        Some(right) => {
            let removed = remove_max(right);
            let (tree, short) = rebuild_right(
                node.color,
                node.key.clone(),
                node.value.clone(),
                node.left.clone(),
                removed.tree,
                removed.short,
            );
            Removed {
                tree: Some(tree),
                short,
                entry: removed.entry,
            }
        }
    }
}

/// Replace a node that has at most one child by that child.
fn unlink<K: Clone, V: Clone>(node: &Node<K, V>) -> (Tree<K, V>, bool) {
    let child = node.left.clone().or_else(|| node.right.clone());
    if node.color == Color::Red {
        return (child, false);
    }
    match child {
        Some(c) if c.color == Color::Red => (Some(blacken(c)), false),
        child => (child, true),
    }
}

fn rebuild_left<K: Clone, V: Clone>(
    color: Color,
    key: K,
    value: V,
    left: Tree<K, V>,
    short: bool,
    right: Tree<K, V>,
) -> (Rc<Node<K, V>>, bool) {
    if short {
        fix_left(color, key, value, left, right)
    } else {
        (make(color, key, value, left, right), false)
    }
}

fn rebuild_right<K: Clone, V: Clone>(
    color: Color,
    key: K,
    value: V,
    left: Tree<K, V>,
    right: Tree<K, V>,
    short: bool,
) -> (Rc<Node<K, V>>, bool) {
    if short {
        fix_right(color, key, value, left, right)
    } else {
        (make(color, key, value, left, right), false)
    }
}

/// Restore black height when `left` is one black node short of `right`.
///
/// Returns the rebuilt subtree and whether it is itself still short.
fn fix_left<K: Clone, V: Clone>(
    color: Color,
    key: K,
    value: V,
    left: Tree<K, V>,
    right: Tree<K, V>,
) -> (Rc<Node<K, V>>, bool) {
    let Some(sibling) = right else {
        unreachable!("short subtree without a sibling");
    };

    // Red sibling: rotate it above us so the short side gets a black sibling.
    if sibling.color == Color::Red {
        let (inner, _) = fix_left(Color::Red, key, value, left, sibling.left.clone());
        let node = make(
            Color::Black,
            sibling.key.clone(),
            sibling.value.clone(),
            Some(inner),
            sibling.right.clone(),
        );
        return (node, false);
    }

    // Far nephew red: single rotation.
    if let Some(far) = red_child(&sibling.right) {
        let node = make(
            color,
            sibling.key.clone(),
            sibling.value.clone(),
            Some(make(Color::Black, key, value, left, sibling.left.clone())),
            Some(blacken(Rc::clone(far))),
        );
        return (node, false);
    }

    // Near nephew red: double rotation.
    if let Some(near) = red_child(&sibling.left) {
        let node = make(
            color,
            near.key.clone(),
            near.value.clone(),
            Some(make(Color::Black, key, value, left, near.left.clone())),
            Some(make(
                Color::Black,
                sibling.key.clone(),
                sibling.value.clone(),
                near.right.clone(),
                sibling.right.clone(),
            )),
        );
        return (node, false);
    }

    // Both nephews black: recolour the sibling and pass the deficit up
    // unless this node was red.
    let sibling = make(
        Color::Red,
        sibling.key.clone(),
        sibling.value.clone(),
        sibling.left.clone(),
        sibling.right.clone(),
    );
    (
        make(Color::Black, key, value, left, Some(sibling)),
        color == Color::Black,
    )
}

/// Mirror image of [`fix_left`].
fn fix_right<K: Clone, V: Clone>(
    color: Color,
    key: K,
    value: V,
    left: Tree<K, V>,
    right: Tree<K, V>,
) -> (Rc<Node<K, V>>, bool) {
    let Some(sibling) = left else {
        unreachable!("short subtree without a sibling");
    };

    if sibling.color == Color::Red {
        let (inner, _) = fix_right(Color::Red, key, value, sibling.right.clone(), right);
        let node = make(
            Color::Black,
            sibling.key.clone(),
            sibling.value.clone(),
            sibling.left.clone(),
            Some(inner),
        );
        return (node, false);
    }

    if let Some(far) = red_child(&sibling.left) {
        let node = make(
            color,
            sibling.key.clone(),
            sibling.value.clone(),
            Some(blacken(Rc::clone(far))),
            Some(make(Color::Black, key, value, sibling.right.clone(), right)),
        );
        return (node, false);
    }

    if let Some(near) = red_child(&sibling.right) {
        let node = make(
            color,
            near.key.clone(),
            near.value.clone(),
            Some(make(
                Color::Black,
                sibling.key.clone(),
                sibling.value.clone(),
                sibling.left.clone(),
                near.left.clone(),
            )),
            Some(make(Color::Black, key, value, near.right.clone(), right)),
        );
        return (node, false);
    }

    let sibling = make(
        Color::Red,
        sibling.key.clone(),
        sibling.value.clone(),
        sibling.left.clone(),
        sibling.right.clone(),
    );
    (
        make(Color::Black, key, value, Some(sibling), right),
        color == Color::Black,
    )
}

// Bulk construction

/// Build a tree from entries already sorted and free of duplicates.
///
/// The result is perfectly balanced: every level is black except the
/// deepest one when it is incomplete, which is red.
pub(crate) fn build_sorted<K, V, I>(entries: I) -> Tree<K, V>
where
    I: ExactSizeIterator<Item = (K, V)>,
{
    let len = entries.len();
    let red_depth = (len + 1).ilog2() as usize;
    let mut entries = entries;
    build(&mut entries, len, 0, red_depth)
}

fn build<K, V, I: Iterator<Item = (K, V)>>(
    entries: &mut I,
    len: usize,
    depth: usize,
    red_depth: usize,
) -> Tree<K, V> {
    if len == 0 {
        return None;
    }
    let left_len = len / 2;
    let left = build(entries, left_len, depth + 1, red_depth);
    let (key, value) = entries.next()?;
    let right = build(entries, len - left_len - 1, depth + 1, red_depth);
    let color = if depth == red_depth {
        Color::Red
    } else {
        Color::Black
    };
    Some(make(color, key, value, left, right))
}
