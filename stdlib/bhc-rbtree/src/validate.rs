//! Red-black invariant checking.
//!
//! This is diagnostic tooling for tests and debugging; no map or set
//! operation ever returns these errors. A failure means a bug in the tree
//! engine (or an inconsistent comparator).

use std::cmp::Ordering;

use thiserror::Error;

use crate::compare::Compare;
use crate::tree::{is_red, Color, Tree};

/// A broken tree invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A key is not strictly between its ancestors' bounds.
    #[error("keys out of order")]
    OutOfOrder,

    /// A red node has a red child.
    #[error("red node has a red child")]
    RedRedViolation,

    /// Two sibling subtrees have different black heights.
    #[error("black height mismatch: left {left}, right {right}")]
    BlackHeightMismatch {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },

    /// The root of a non-empty tree is red.
    #[error("root is red")]
    RedRoot,

    /// A node's cached size disagrees with its subtree.
    #[error("cached size {cached} but subtree holds {actual} entries")]
    SizeMismatch {
        /// The size stored in the node.
        cached: usize,
        /// The number of entries actually below it.
        actual: usize,
    },
}

struct Summary {
    black_height: usize,
    size: usize,
}

/// Check every invariant of `tree`, returning its black height.
///
/// Leaves count as black, so the empty tree has black height 1.
pub(crate) fn validate<K, V, C: Compare<K>>(tree: &Tree<K, V>, cmp: &C) -> Result<usize, InvariantError> {
    if is_red(tree) {
        return Err(InvariantError::RedRoot);
    }
    check(tree, None, None, cmp).map(|s| s.black_height)
}

fn check<K, V, C: Compare<K>>(
    tree: &Tree<K, V>,
    lower: Option<&K>,
    upper: Option<&K>,
    cmp: &C,
) -> Result<Summary, InvariantError> {
    let Some(node) = tree else {
        return Ok(Summary {
            black_height: 1,
            size: 0,
        });
    };

    let above_lower = lower.map_or(true, |lo| cmp.compare(lo, &node.key) == Ordering::Less);
    let below_upper = upper.map_or(true, |hi| cmp.compare(&node.key, hi) == Ordering::Less);
    if !(above_lower && below_upper) {
        return Err(InvariantError::OutOfOrder);
    }
    if node.color == Color::Red && (is_red(&node.left) || is_red(&node.right)) {
        return Err(InvariantError::RedRedViolation);
    }

    let left = check(&node.left, lower, Some(&node.key), cmp)?;
    let right = check(&node.right, Some(&node.key), upper, cmp)?;
    if left.black_height != right.black_height {
        return Err(InvariantError::BlackHeightMismatch {
            left: left.black_height,
            right: right.black_height,
        });
    }

    let size = left.size + right.size + 1;
    if node.size != size {
        return Err(InvariantError::SizeMismatch {
            cached: node.size,
            actual: size,
        });
    }

    Ok(Summary {
        black_height: left.black_height + usize::from(node.color == Color::Black),
        size,
    })
}
