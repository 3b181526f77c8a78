//! BHC persistent ordered containers.
//!
//! Immutable ordered maps and sets backed by a persistent red-black tree.
//! Updates never modify an existing tree: they copy the O(log n) nodes on
//! the path to the change and share everything else, so any number of
//! versions of a container can coexist and be read independently.
//!
//! - [`OrdMap`]: key-value map, ordered by a [`Compare`] implementation
//! - [`OrdSet`]: set of keys over the same engine
//!
//! The ordering is fixed when a container is created ([`Natural`] for
//! [`Ord`] keys, or any comparator via `with_comparator`) and is reused by
//! every derived version. Binary operations such as
//! [`OrdMap::union`] order both operands with the left operand's
//! comparator.
//!
//! # Features
//!
//! - `check-invariants`: validate every tree produced by a map or set
//!   update and panic on the first broken red-black invariant.

#![warn(missing_docs)]

mod algebra;
mod combinators;
pub mod compare;
pub mod iter;
pub mod map;
pub mod set;
mod tree;
pub mod validate;

pub use compare::{Compare, Natural, Reverse};
pub use map::OrdMap;
pub use set::{OrdSet, SetIter};
pub use validate::InvariantError;
