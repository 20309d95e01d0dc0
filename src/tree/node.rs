//! Threaded tree nodes and the handles used to refer to them.

use smallvec::SmallVec;
use static_assertions::{assert_eq_size, assert_impl_all};
use std::fmt;

// =============================================================================
// NodeId
// =============================================================================

/// A handle to a node slot in a [`NodeArena`](super::NodeArena).
///
/// Handles are plain indices. Child links built from them express ownership
/// through the tree shape; neighbor and parent links are lookups only. A
/// handle to a released node must not be used again.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

assert_eq_size!(NodeId, usize);
assert_impl_all!(NodeId: Copy, Send, Sync, std::hash::Hash);

impl NodeId {
    /// Wraps a raw slot index.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

// =============================================================================
// Node
// =============================================================================

/// Storage for the values of one key. Most keys hold a single value.
pub type Values<V> = SmallVec<[V; 1]>;

/// An element of a threaded binary search tree.
///
/// Besides its two children, a node links to its in-order predecessor
/// (`lesser_neighbor`) and successor (`greater_neighbor`), so that sorted
/// walks never have to climb the tree. The key is fixed at creation.
///
/// A height of `0` is a leaf; an absent child counts as `-1`.
///
/// # Examples
///
/// ```rust
/// use threaded_tree::tree::{Node, NodeArena};
///
/// let mut arena = NodeArena::new();
/// let root = arena.insert(Node::new(2, "two"));
/// let child = arena.insert(Node::new(1, "one"));
/// arena[root].set_lesser_child(Some(child)).set_lesser_neighbor(Some(child));
/// arena[child].set_parent(Some(root)).set_greater_neighbor(Some(root));
///
/// assert!(arena[root].is_branch());
/// assert!(arena[child].is_leaf());
/// ```
pub struct Node<K, V> {
    key: K,
    values: Values<V>,
    lesser_child: Option<NodeId>,
    greater_child: Option<NodeId>,
    lesser_neighbor: Option<NodeId>,
    greater_neighbor: Option<NodeId>,
    parent: Option<NodeId>,
    height: i32,
}

impl<K, V> Node<K, V> {
    /// Creates an unlinked node holding one value.
    #[must_use]
    pub fn new(key: K, value: V) -> Self {
        let mut values = Values::new();
        values.push(value);
        Self::with_values(key, values)
    }

    /// Creates an unlinked node holding `values`.
    #[must_use]
    pub const fn with_values(key: K, values: Values<V>) -> Self {
        Self {
            key,
            values,
            lesser_child: None,
            greater_child: None,
            lesser_neighbor: None,
            greater_neighbor: None,
            parent: None,
            height: 0,
        }
    }

    /// Returns the key.
    #[inline]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the values in insertion order.
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Returns the first value inserted under this key.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.values.first()
    }

    /// Appends a value.
    pub fn add_value(&mut self, value: V) -> &mut Self {
        self.values.push(value);
        self
    }

    /// Removes the first value equal to `value`, returning whether one was found.
    pub fn remove_value(&mut self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values
            .iter()
            .position(|candidate| candidate == value)
            .map(|position| self.values.remove(position))
            .is_some()
    }

    /// Returns the lesser child.
    #[inline]
    pub const fn lesser_child(&self) -> Option<NodeId> {
        self.lesser_child
    }

    /// Returns the greater child.
    #[inline]
    pub const fn greater_child(&self) -> Option<NodeId> {
        self.greater_child
    }

    /// Returns the in-order predecessor.
    #[inline]
    pub const fn lesser_neighbor(&self) -> Option<NodeId> {
        self.lesser_neighbor
    }

    /// Returns the in-order successor.
    #[inline]
    pub const fn greater_neighbor(&self) -> Option<NodeId> {
        self.greater_neighbor
    }

    /// Returns the parent, absent for the root.
    #[inline]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the cached height.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Sets the lesser child link.
    pub const fn set_lesser_child(&mut self, child: Option<NodeId>) -> &mut Self {
        self.lesser_child = child;
        self
    }

    /// Sets the greater child link.
    pub const fn set_greater_child(&mut self, child: Option<NodeId>) -> &mut Self {
        self.greater_child = child;
        self
    }

    /// Sets the in-order predecessor link.
    pub const fn set_lesser_neighbor(&mut self, neighbor: Option<NodeId>) -> &mut Self {
        self.lesser_neighbor = neighbor;
        self
    }

    /// Sets the in-order successor link.
    pub const fn set_greater_neighbor(&mut self, neighbor: Option<NodeId>) -> &mut Self {
        self.greater_neighbor = neighbor;
        self
    }

    /// Sets the parent back-reference.
    pub const fn set_parent(&mut self, parent: Option<NodeId>) -> &mut Self {
        self.parent = parent;
        self
    }

    /// Sets the cached height.
    pub const fn set_height(&mut self, height: i32) -> &mut Self {
        self.height = height;
        self
    }

    /// Returns `true` if the node has no children.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        self.lesser_child.is_none() && self.greater_child.is_none()
    }

    /// Returns `true` if the node has exactly one child.
    #[inline]
    pub const fn is_branch(&self) -> bool {
        self.lesser_child.is_none() != self.greater_child.is_none()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Node")
            .field("key", &self.key)
            .field("values", &self.values.as_slice())
            .field("lesser_child", &self.lesser_child)
            .field("greater_child", &self.greater_child)
            .field("lesser_neighbor", &self.lesser_neighbor)
            .field("greater_neighbor", &self.greater_neighbor)
            .field("parent", &self.parent)
            .field("height", &self.height)
            .finish()
    }
}

// =============================================================================
// NodeRef
// =============================================================================

/// A borrowed view of a live node together with its handle.
///
/// Tree queries and iterators yield `NodeRef`s. The borrow keeps the tree
/// from being mutated while the reference is alive.
pub struct NodeRef<'a, K, V> {
    id: NodeId,
    node: &'a Node<K, V>,
}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) const fn new(id: NodeId, node: &'a Node<K, V>) -> Self {
        Self { id, node }
    }

    /// Returns the handle of the node.
    #[inline]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the key.
    #[inline]
    pub const fn key(&self) -> &'a K {
        &self.node.key
    }

    /// Returns the values in insertion order.
    #[inline]
    pub fn values(&self) -> &'a [V] {
        &self.node.values
    }

    /// Returns the first value inserted under this key.
    #[inline]
    pub fn value(&self) -> Option<&'a V> {
        self.node.values.first()
    }

    /// Returns the underlying node.
    #[inline]
    pub const fn node(&self) -> &'a Node<K, V> {
        self.node
    }
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K, V> PartialEq for NodeRef<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K, V> Eq for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", &self.node.key)
            .field("values", &self.node.values.as_slice())
            .finish()
    }
}
