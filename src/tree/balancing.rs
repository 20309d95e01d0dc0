//! Structural mutation strategies.
//!
//! A [`ThreadedTree`](super::ThreadedTree) never rewires links itself. It
//! delegates attaching a new node and excising an old one to a
//! [`Balancing`] strategy, which must leave the tree satisfying:
//!
//! 1. every key under a lesser child compares less, and every key under a
//!    greater child compares greater, than the node's own key
//! 2. following `greater_neighbor` from the least node visits every node in
//!    key order, and `lesser_neighbor` walks the same chain backwards
//! 3. every child's `parent` points at the node owning it, and the root
//!    has no parent
//! 4. every cached height is one more than the larger child height
//!
//! The provided [`add_descendant`](Balancing::add_descendant) and
//! [`remove_node`](Balancing::remove_node) handle placement and threading;
//! a strategy only supplies [`repair`](Balancing::repair), which walks from
//! the lowest touched node to the root fixing heights and, if it wants to,
//! reshaping the tree with [`rotate_left`] and [`rotate_right`]. Rotations
//! never change the in-order sequence, so they never touch neighbor links.

use super::arena::NodeArena;
use super::comparator::Comparator;
use super::node::NodeId;
use log::trace;
use std::cmp::Ordering;

/// A discipline for attaching and excising nodes.
///
/// # Examples
///
/// ```rust
/// use threaded_tree::tree::{Avl, ThreadedTree, Unbalanced};
///
/// let mut balanced = ThreadedTree::new();
/// let mut degenerate = ThreadedTree::with_parts(Unbalanced, threaded_tree::tree::NaturalOrder);
/// for key in 0..64 {
///     balanced.insert(key, ());
///     degenerate.insert(key, ());
/// }
///
/// assert_eq!(balanced.height(), 6);
/// assert_eq!(degenerate.height(), 63);
/// ```
pub trait Balancing {
    /// Restores cached heights (and, for balancing disciplines, shape) on the
    /// path from `from` to the root. Returns the root afterwards.
    fn repair<K, V>(&self, arena: &mut NodeArena<K, V>, from: NodeId) -> NodeId;

    /// Returns `true` if the strategy keeps every node's child heights within one.
    fn keeps_balance(&self) -> bool {
        false
    }

    /// Attaches the unlinked node `node` below `ancestor` and threads it into
    /// the neighbor chain. Returns the root of the tree afterwards.
    ///
    /// `node`'s key must not already be present below `ancestor`.
    fn add_descendant<K, V, C>(
        &self,
        arena: &mut NodeArena<K, V>,
        ancestor: NodeId,
        node: NodeId,
        compare: &C,
    ) -> NodeId
    where
        C: Comparator<K> + ?Sized,
    {
        let parent = attach(arena, ancestor, node, compare);
        trace!("attached {node} under {parent}");
        self.repair(arena, parent)
    }

    /// Detaches `node`, joins its neighbors, releases it from the arena and
    /// returns the root of the remaining tree.
    fn remove_node<K, V>(&self, arena: &mut NodeArena<K, V>, node: NodeId) -> Option<NodeId> {
        let (repair_from, replacement) = detach(arena, node);
        trace!("excised {node}");
        match repair_from {
            Some(from) => Some(self.repair(arena, from)),
            None => replacement,
        }
    }
}

// =============================================================================
// Strategies
// =============================================================================

/// Plain binary search tree placement without reshaping.
///
/// Heights and parent links are still maintained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unbalanced;

impl Balancing for Unbalanced {
    fn repair<K, V>(&self, arena: &mut NodeArena<K, V>, from: NodeId) -> NodeId {
        let mut current = from;
        loop {
            arena.update_height(current);
            match arena[current].parent() {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }
}

/// Height-balanced (AVL) placement.
///
/// After every mutation the child heights of every node differ by at most
/// one, which bounds the height by about `1.44 log2(n)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Avl;

impl Balancing for Avl {
    fn repair<K, V>(&self, arena: &mut NodeArena<K, V>, from: NodeId) -> NodeId {
        let mut current = from;
        loop {
            arena.update_height(current);
            let balance = arena.balance(current);
            if balance > 1 {
                if let Some(lesser) = arena[current].lesser_child()
                    && arena.balance(lesser) < 0
                {
                    rotate_left(arena, lesser);
                }
                current = rotate_right(arena, current);
            } else if balance < -1 {
                if let Some(greater) = arena[current].greater_child()
                    && arena.balance(greater) > 0
                {
                    rotate_right(arena, greater);
                }
                current = rotate_left(arena, current);
            }
            match arena[current].parent() {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }

    fn keeps_balance(&self) -> bool {
        true
    }
}

// =============================================================================
// Link Surgery
// =============================================================================

/// Points `parent`'s link to `old` at `new` instead.
fn replace_child<K, V>(
    arena: &mut NodeArena<K, V>,
    parent: Option<NodeId>,
    old: NodeId,
    new: Option<NodeId>,
) {
    if let Some(parent) = parent {
        let parent_node = &mut arena[parent];
        if parent_node.lesser_child() == Some(old) {
            parent_node.set_lesser_child(new);
        } else {
            parent_node.set_greater_child(new);
        }
    }
}

/// Descends from `ancestor` to the free child slot for `node`'s key, links
/// `node` there as a leaf and splices it into the neighbor chain.
///
/// A key comparing equal to an existing one is placed after it.
/// Returns the new parent.
fn attach<K, V, C>(arena: &mut NodeArena<K, V>, ancestor: NodeId, node: NodeId, compare: &C) -> NodeId
where
    C: Comparator<K> + ?Sized,
{
    let mut current = ancestor;
    loop {
        let ordering = compare.compare(arena[node].key(), arena[current].key());
        if ordering == Ordering::Less {
            match arena[current].lesser_child() {
                Some(child) => current = child,
                None => {
                    let predecessor = arena[current].lesser_neighbor();
                    arena[current]
                        .set_lesser_child(Some(node))
                        .set_lesser_neighbor(Some(node));
                    if let Some(predecessor) = predecessor {
                        arena[predecessor].set_greater_neighbor(Some(node));
                    }
                    arena[node]
                        .set_lesser_neighbor(predecessor)
                        .set_greater_neighbor(Some(current));
                    break;
                }
            }
        } else {
            match arena[current].greater_child() {
                Some(child) => current = child,
                None => {
                    let successor = arena[current].greater_neighbor();
                    arena[current]
                        .set_greater_child(Some(node))
                        .set_greater_neighbor(Some(node));
                    if let Some(successor) = successor {
                        arena[successor].set_lesser_neighbor(Some(node));
                    }
                    arena[node]
                        .set_lesser_neighbor(Some(current))
                        .set_greater_neighbor(successor);
                    break;
                }
            }
        }
    }
    arena[node]
        .set_parent(Some(current))
        .set_lesser_child(None)
        .set_greater_child(None)
        .set_height(0);
    current
}

/// Unlinks `node` from the tree and the neighbor chain, then releases it.
///
/// Returns the lowest node whose subtree changed, if any, and the node that
/// took `node`'s place, if any.
fn detach<K, V>(arena: &mut NodeArena<K, V>, node: NodeId) -> (Option<NodeId>, Option<NodeId>) {
    let (lesser_neighbor, greater_neighbor, lesser_child, greater_child, parent, height) = {
        let removed = &arena[node];
        (
            removed.lesser_neighbor(),
            removed.greater_neighbor(),
            removed.lesser_child(),
            removed.greater_child(),
            removed.parent(),
            removed.height(),
        )
    };

    if let Some(predecessor) = lesser_neighbor {
        arena[predecessor].set_greater_neighbor(greater_neighbor);
    }
    if let Some(successor) = greater_neighbor {
        arena[successor].set_lesser_neighbor(lesser_neighbor);
    }

    let result = match (lesser_child, greater_child) {
        (Some(lesser_child), Some(greater_child)) => {
            // The successor is the least node of the greater subtree.
            let mut successor = greater_child;
            while let Some(child) = arena[successor].lesser_child() {
                successor = child;
            }

            let repair_from = if successor == greater_child {
                successor
            } else {
                let successor_parent = arena[successor].parent().unwrap_or(greater_child);
                let orphan = arena[successor].greater_child();
                arena[successor_parent].set_lesser_child(orphan);
                if let Some(orphan) = orphan {
                    arena[orphan].set_parent(Some(successor_parent));
                }
                arena[successor].set_greater_child(Some(greater_child));
                arena[greater_child].set_parent(Some(successor));
                successor_parent
            };

            arena[successor]
                .set_lesser_child(Some(lesser_child))
                .set_parent(parent)
                .set_height(height);
            arena[lesser_child].set_parent(Some(successor));
            replace_child(arena, parent, node, Some(successor));
            (Some(repair_from), Some(successor))
        }
        (child, None) | (None, child) => {
            if let Some(child) = child {
                arena[child].set_parent(parent);
            }
            replace_child(arena, parent, node, child);
            (parent, child)
        }
    };

    arena.release(node);
    result
}

/// Rotates the subtree at `node` to the left and returns its new top.
///
/// Does nothing if `node` has no greater child.
pub fn rotate_left<K, V>(arena: &mut NodeArena<K, V>, node: NodeId) -> NodeId {
    let Some(pivot) = arena[node].greater_child() else {
        return node;
    };
    let parent = arena[node].parent();
    let inner = arena[pivot].lesser_child();

    arena[node].set_greater_child(inner).set_parent(Some(pivot));
    if let Some(inner) = inner {
        arena[inner].set_parent(Some(node));
    }
    replace_child(arena, parent, node, Some(pivot));
    arena[pivot].set_lesser_child(Some(node)).set_parent(parent);

    arena.update_height(node);
    arena.update_height(pivot);
    trace!("rotated {node} left under {pivot}");
    pivot
}

/// Rotates the subtree at `node` to the right and returns its new top.
///
/// Does nothing if `node` has no lesser child.
pub fn rotate_right<K, V>(arena: &mut NodeArena<K, V>, node: NodeId) -> NodeId {
    let Some(pivot) = arena[node].lesser_child() else {
        return node;
    };
    let parent = arena[node].parent();
    let inner = arena[pivot].greater_child();

    arena[node].set_lesser_child(inner).set_parent(Some(pivot));
    if let Some(inner) = inner {
        arena[inner].set_parent(Some(node));
    }
    replace_child(arena, parent, node, Some(pivot));
    arena[pivot].set_greater_child(Some(node)).set_parent(parent);

    arena.update_height(node);
    arena.update_height(pivot);
    trace!("rotated {node} right under {pivot}");
    pivot
}

#[cfg(test)]
mod tests {
    use super::super::comparator::NaturalOrder;
    use super::super::node::Node;
    use super::*;
    use rstest::rstest;

    /// Inserts `keys` in order through `strategy`, returning the arena and root.
    fn build<S: Balancing>(strategy: &S, keys: &[i32]) -> (NodeArena<i32, ()>, Option<NodeId>) {
        let mut arena = NodeArena::new();
        let mut root = None;
        for &key in keys {
            let id = arena.insert(Node::new(key, ()));
            root = Some(match root {
                None => id,
                Some(root) => strategy.add_descendant(&mut arena, root, id, &NaturalOrder),
            });
        }
        (arena, root)
    }

    fn chain_keys(arena: &NodeArena<i32, ()>, root: Option<NodeId>) -> Vec<i32> {
        let mut keys = Vec::new();
        let Some(mut current) = root else {
            return keys;
        };
        while let Some(lesser) = arena[current].lesser_child() {
            current = lesser;
        }
        let mut cursor = Some(current);
        while let Some(id) = cursor {
            keys.push(*arena[id].key());
            cursor = arena[id].greater_neighbor();
        }
        keys
    }

    fn assert_balanced(arena: &NodeArena<i32, ()>) {
        for node in arena.iter() {
            assert!(arena.is_balanced(node.id()), "node {} out of balance", node.key());
        }
    }

    #[rstest]
    fn test_unbalanced_attach_threads_neighbors() {
        let (arena, root) = build(&Unbalanced, &[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(chain_keys(&arena, root), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(root.map(|root| arena[root].height()), Some(2));
    }

    #[rstest]
    fn test_unbalanced_sorted_input_degenerates() {
        let (arena, root) = build(&Unbalanced, &[1, 2, 3, 4]);
        let root = root.map(|root| *arena[root].key());
        assert_eq!(root, Some(1));
    }

    #[rstest]
    #[case(&[1, 2, 3])]
    #[case(&[3, 2, 1])]
    #[case(&[1, 3, 2])]
    #[case(&[3, 1, 2])]
    fn test_avl_rotations_center_middle_key(#[case] keys: &[i32]) {
        let (arena, root) = build(&Avl, keys);
        let root = root.unwrap();
        assert_eq!(arena[root].key(), &2);
        assert_eq!(arena[root].height(), 1);
        assert_eq!(arena[root].parent(), None);
        assert_eq!(chain_keys(&arena, Some(root)), vec![1, 2, 3]);
        assert_balanced(&arena);
    }

    #[rstest]
    fn test_avl_sequential_inserts_stay_balanced() {
        let keys: Vec<i32> = (0..100).collect();
        let (arena, root) = build(&Avl, &keys);
        assert_balanced(&arena);
        assert_eq!(chain_keys(&arena, root), keys);
        assert!(root.is_some_and(|root| arena[root].height() <= 9));
    }

    #[rstest]
    fn test_remove_node_with_two_children_promotes_successor() {
        let (mut arena, root) = build(&Unbalanced, &[4, 2, 8, 6, 9, 5]);
        let new_root = Unbalanced.remove_node(&mut arena, root.unwrap()).unwrap();

        assert_eq!(arena[new_root].key(), &5);
        assert_eq!(arena[new_root].parent(), None);
        assert_eq!(chain_keys(&arena, Some(new_root)), vec![2, 5, 6, 8, 9]);
        assert_eq!(arena.len(), 5);
    }

    #[rstest]
    fn test_remove_last_node_empties_tree() {
        let (mut arena, root) = build(&Avl, &[1]);
        assert_eq!(Avl.remove_node(&mut arena, root.unwrap()), None);
        assert!(arena.is_empty());
    }

    #[rstest]
    fn test_avl_removals_stay_balanced() {
        let keys: Vec<i32> = (0..64).collect();
        let (mut arena, mut root) = build(&Avl, &keys);
        for key in (0..64).filter(|key| key % 3 != 0) {
            let id = arena
                .iter()
                .find(|node| *node.key() == key)
                .map(|node| node.id())
                .unwrap();
            root = Avl.remove_node(&mut arena, id);
            assert_balanced(&arena);
        }
        let expected: Vec<i32> = (0..64).filter(|key| key % 3 == 0).collect();
        assert_eq!(chain_keys(&arena, root), expected);
    }

    #[rstest]
    fn test_rotate_without_pivot_is_noop() {
        let mut arena: NodeArena<i32, ()> = NodeArena::new();
        let lone = arena.insert(Node::new(1, ()));
        assert_eq!(rotate_left(&mut arena, lone), lone);
        assert_eq!(rotate_right(&mut arena, lone), lone);
    }
}
