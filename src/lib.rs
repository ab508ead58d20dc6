//! Order-statistic AVL tree collections for Rust.
//!
//! This crate provides [`OSAvlSet`], an ordered set backed by a
//! height-balanced binary search tree in which every node caches the height,
//! element count, and element sum of its subtree. On top of the usual
//! ordered-set operations it answers, all in O(log n):
//!
//! - [`select`](OSAvlSet::select) - the k-th smallest element (one-based)
//! - [`rank`](OSAvlSet::rank) - the one-based sorted position of a value
//! - [`successor`](OSAvlSet::successor) / [`predecessor`](OSAvlSet::predecessor) -
//!   the nearest element strictly beyond a probe value
//! - [`sum`](OSAvlSet::sum) - the aggregate of every element, maintained
//!   incrementally across inserts, removals, and rebalancing
//!
//! # Example
//!
//! ```
//! use kiri_tree::OSAvlSet;
//!
//! let mut scores: OSAvlSet<i64> = (0..10).collect();
//!
//! assert_eq!(scores.select(4), Ok(&3));
//! assert_eq!(scores.rank(&7), 8);
//! assert_eq!(scores.sum(), 45);
//!
//! scores.remove(&3).unwrap();
//! assert_eq!(scores.rank(&7), 7);
//! assert_eq!(scores.sum(), 42);
//! ```
//!
//! # Element contract
//!
//! Placement in the tree needs only [`Ord`]. The aggregate needs a second,
//! independent capability: [`Summand`], a zero identity plus an associative
//! accumulation. The two bounds are kept separate so queries that touch only
//! one of them demand only that one.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library
//!   dependency
//! - **Fail-stop queries** - Empty-tree and out-of-bounds conditions are
//!   reported through [`Error`], never through panics
//! - **Arena storage** - Nodes live in a slab with stable indices and an
//!   explicit free list, so removal releases storage eagerly and dropping
//!   the set never recurses
//!
//! # Implementation
//!
//! The set is an AVL tree: rotations on the insertion and removal return
//! paths keep sibling heights within one of each other, bounding the height
//! by ~1.44·log2(n). Rank and select descend by the cached subtree sizes;
//! the sum cache folds elements in ascending order, so even non-commutative
//! accumulations (string concatenation, say) are independent of the
//! rebalancing history.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;
mod summand;

pub mod os_avl_set;

pub use error::Error;
pub use order_statistic::Rank;
pub use os_avl_set::OSAvlSet;
pub use summand::Summand;
