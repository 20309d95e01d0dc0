//! Forward walks over the neighbor chain up to an inclusive bound.

use super::{LazyIterator, Lookahead};
use crate::tree::{Comparator, NodeArena, NodeId, NodeRef};
use std::cmp::Ordering;

/// Yields nodes along `greater_neighbor` links while their keys compare at
/// most an upper key.
///
/// The walk only moves forward: once a node beyond the bound (or the end of
/// the chain) is reached, the iterator is exhausted for good. The starting
/// node is assumed to already lie within the range.
///
/// Created by [`ThreadedTree::get_range`], [`ThreadedTree::get_neighbors`]
/// and [`ThreadedTree::nodes`], or directly over an arena with
/// [`RangeIterator::new`].
///
/// [`ThreadedTree::get_range`]: crate::tree::ThreadedTree::get_range
/// [`ThreadedTree::get_neighbors`]: crate::tree::ThreadedTree::get_neighbors
/// [`ThreadedTree::nodes`]: crate::tree::ThreadedTree::nodes
///
/// # Examples
///
/// ```rust
/// use threaded_tree::iter::LazyIterator;
/// use threaded_tree::tree::ThreadedTree;
///
/// let tree: ThreadedTree<i32, &str> =
///     [(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e")].into_iter().collect();
///
/// let keys = tree.get_range(&2, &4).map(|node| *node.key()).to_vec();
/// assert_eq!(keys, vec![2, 3, 4]);
/// ```
pub struct RangeIterator<'a, K, V, C: ?Sized> {
    arena: &'a NodeArena<K, V>,
    compare: &'a C,
    cursor: Option<NodeId>,
    upper_key: Option<&'a K>,
    lookahead: Lookahead<NodeRef<'a, K, V>>,
}

impl<'a, K, V, C> RangeIterator<'a, K, V, C>
where
    C: Comparator<K> + ?Sized,
{
    /// Walks from `start` while keys compare less than or equal to `upper_key`.
    pub const fn new(
        arena: &'a NodeArena<K, V>,
        compare: &'a C,
        start: Option<NodeId>,
        upper_key: &'a K,
    ) -> Self {
        Self {
            arena,
            compare,
            cursor: start,
            upper_key: Some(upper_key),
            lookahead: Lookahead::new(),
        }
    }

    /// Returns an iterator that yields nothing.
    pub const fn exhausted(arena: &'a NodeArena<K, V>, compare: &'a C) -> Self {
        Self {
            arena,
            compare,
            cursor: None,
            upper_key: None,
            lookahead: Lookahead::new(),
        }
    }
}

impl<'a, K, V, C> LazyIterator for RangeIterator<'a, K, V, C>
where
    C: Comparator<K> + ?Sized,
{
    type Item = NodeRef<'a, K, V>;

    fn lookahead(&self) -> &Lookahead<Self::Item> {
        &self.lookahead
    }

    fn lookahead_mut(&mut self) -> &mut Lookahead<Self::Item> {
        &mut self.lookahead
    }

    fn advance(&mut self) {
        if !self.lookahead.needs_advance() {
            return;
        }
        let (Some(id), Some(upper_key)) = (self.cursor, self.upper_key) else {
            return;
        };
        let arena = self.arena;
        let node = &arena[id];
        if self.compare.compare(node.key(), upper_key) == Ordering::Greater {
            self.cursor = None;
        } else {
            self.lookahead.fill(NodeRef::new(id, node));
            self.cursor = node.greater_neighbor();
        }
    }
}
