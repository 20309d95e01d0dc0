//! Slot storage for threaded tree nodes.
//!
//! Nodes live in a [`NodeArena`] and refer to one another by [`NodeId`].
//! Child links form the ownership tree: [`NodeArena::release_subtree`]
//! frees a node together with everything below it. Neighbor and parent
//! links are never followed when releasing.

use super::node::{Node, NodeId, NodeRef};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Slot storage for [`Node`]s with slot reuse.
///
/// # Examples
///
/// ```rust
/// use threaded_tree::tree::{Node, NodeArena};
///
/// let mut arena = NodeArena::new();
/// let first = arena.insert(Node::new(1, 'a'));
/// assert_eq!(arena[first].key(), &1);
///
/// let released = arena.release(first);
/// assert!(released.is_some());
/// assert!(arena.get(first).is_none());
/// assert!(arena.is_empty());
/// ```
pub struct NodeArena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    live: usize,
}

impl<K, V> NodeArena<K, V> {
    /// Creates an empty arena.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Returns the number of live nodes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no node is live.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Stores `node` and returns its handle.
    pub fn insert(&mut self, node: Node<K, V>) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            self.slots[index] = Some(node);
            NodeId::new(index)
        } else {
            self.slots.push(Some(node));
            NodeId::new(self.slots.len() - 1)
        }
    }

    /// Returns the node behind `id`, or `None` if the slot is free.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Returns the node behind `id` mutably, or `None` if the slot is free.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Returns a borrowed view of the node behind `id`.
    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_, K, V>> {
        self.get(id).map(|node| NodeRef::new(id, node))
    }

    /// Frees the slot behind `id` without touching any other node.
    ///
    /// Links pointing at the released node are left dangling; callers
    /// re-link the surrounding nodes first.
    pub fn release(&mut self, id: NodeId) -> Option<Node<K, V>> {
        let node = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id.index());
        self.live -= 1;
        Some(node)
    }

    /// Frees `id` and every node reachable from it through child links.
    ///
    /// Returns the number of values held by the released nodes.
    pub fn release_subtree(&mut self, id: NodeId) -> usize {
        let mut released_values = 0;
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.release(current) {
                pending.extend(node.lesser_child());
                pending.extend(node.greater_child());
                released_values += node.values().len();
            }
        }
        released_values
    }

    /// Frees every node.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    /// Follows parent links from `id` to the top of its tree.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self[current].parent() {
            current = parent;
        }
        current
    }

    /// Returns the cached height of `id`, or `-1` when absent.
    #[inline]
    pub fn height_of(&self, id: Option<NodeId>) -> i32 {
        id.map_or(-1, |id| self[id].height())
    }

    /// Returns the larger of the two child heights of `id`.
    pub fn max_child_height(&self, id: NodeId) -> i32 {
        let node = &self[id];
        self.height_of(node.lesser_child())
            .max(self.height_of(node.greater_child()))
    }

    /// Returns the lesser child height minus the greater child height.
    pub fn balance(&self, id: NodeId) -> i32 {
        let node = &self[id];
        self.height_of(node.lesser_child()) - self.height_of(node.greater_child())
    }

    /// Returns `true` if the child heights of `id` differ by at most one.
    pub fn is_balanced(&self, id: NodeId) -> bool {
        (-1..=1).contains(&self.balance(id))
    }

    /// Recomputes the cached height of `id` from its children.
    ///
    /// Returns `true` if the height changed.
    pub fn update_height(&mut self, id: NodeId) -> bool {
        let height = self.max_child_height(id) + 1;
        let node = &mut self[id];
        let changed = node.height() != height;
        node.set_height(height);
        changed
    }

    /// Iterates over every live node in slot order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_, K, V>> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|node| NodeRef::new(NodeId::new(index), node)))
    }
}

impl<K, V> Default for NodeArena<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Index<NodeId> for NodeArena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node handle {id} refers to a released slot"),
        }
    }
}

impl<K, V> IndexMut<NodeId> for NodeArena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("node handle {id} refers to a released slot"),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeArena<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.iter().map(|node| (node.id(), node.node())))
            .finish()
    }
}
