//! # threaded-tree
//!
//! An ordered multimap built on a threaded binary search tree, together with
//! a lazy pull-based iterator protocol for post-processing its results.
//!
//! ## Overview
//!
//! - **Threaded Tree**: a binary search tree whose nodes also form a doubly
//!   linked list in key order, so range scans and proximity queries step
//!   through sorted order in O(1) without re-descending
//! - **Pluggable Balancing**: structural mutation is delegated to a strategy
//!   (AVL rotations by default, or a plain unbalanced tree)
//! - **Lazy Iterators**: `has_next`/`peek`/`next` with single-element
//!   lookahead and the combinators `map`, `select`, `exclude`, `take`,
//!   `take_while`, `skip` and `skip_while`
//! - **Proximity Queries**: inclusive key ranges, fixed-size neighbor windows
//!   and k-nearest-neighbor search under a caller-supplied distance
//!
//! ## Feature Flags
//!
//! - `iter`: the lazy iterator protocol and combinators
//! - `tree`: nodes, balancing strategies and [`ThreadedTree`](tree::ThreadedTree)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use threaded_tree::prelude::*;
//!
//! let mut tree = ThreadedTree::new();
//! for (key, label) in [(5, "e"), (1, "a"), (3, "c"), (2, "b"), (4, "d")] {
//!     tree.insert(key, label);
//! }
//!
//! let labels = tree
//!     .get_range(&2, &4)
//!     .map(|node| *node.value().unwrap_or(&"?"))
//!     .to_vec();
//! assert_eq!(labels, vec!["b", "c", "d"]);
//!
//! let distance = |left: &i32, right: &i32| f64::from((left - right).abs());
//! let nearest = tree
//!     .get_nearest_neighbors(&3, 3, distance)
//!     .map(|node| *node.key())
//!     .to_vec();
//! assert_eq!(nearest, vec![3, 4, 2]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use threaded_tree::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "iter")]
    pub use crate::iter::*;

    #[cfg(feature = "tree")]
    pub use crate::tree::*;

    #[cfg(feature = "tree")]
    pub use crate::error::*;
}

#[cfg(feature = "iter")]
pub mod iter;

#[cfg(feature = "tree")]
pub mod tree;

#[cfg(feature = "tree")]
pub mod error;
