//! Threaded binary search trees.
//!
//! This module provides [`ThreadedTree`], an ordered multimap whose nodes are
//! linked both as a binary search tree and as a doubly linked list in key
//! order (the neighbor chain):
//!
//! - [`Node`] and [`NodeId`]: tree elements and the handles linking them
//! - [`NodeArena`]: slot storage owning every node of a tree
//! - [`Balancing`]: the strategy that attaches and excises nodes, with the
//!   [`Avl`] and [`Unbalanced`] disciplines
//! - [`Comparator`]: the three-way key order a tree is built with
//!
//! Range scans and nearest-neighbor queries descend the tree once and then
//! walk the chain, paying O(1) per element produced.
//!
//! # Examples
//!
//! ```rust
//! use threaded_tree::iter::LazyIterator;
//! use threaded_tree::tree::ThreadedTree;
//!
//! let mut tree = ThreadedTree::new();
//! tree.insert(10, "ten").insert(20, "twenty").insert(10, "dix");
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.get(&10), Some(&["ten", "dix"][..]));
//!
//! let keys = tree.nodes().map(|node| *node.key()).to_vec();
//! assert_eq!(keys, vec![10, 20]);
//! ```

mod arena;
mod balancing;
mod comparator;
mod node;
mod threaded;

pub use arena::NodeArena;
pub use balancing::{Avl, Balancing, Unbalanced, rotate_left, rotate_right};
pub use comparator::{Comparator, NaturalOrder, ReverseOrder};
pub use node::{Node, NodeId, NodeRef, Values};
pub use threaded::ThreadedTree;
