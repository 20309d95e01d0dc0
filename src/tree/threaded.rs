//! The threaded tree orchestrator.

use super::arena::NodeArena;
use super::balancing::{Avl, Balancing};
use super::comparator::{Comparator, NaturalOrder};
use super::node::{Node, NodeId, NodeRef};
use crate::error::InvariantViolation;
use crate::iter::{LazyIterator, NearestNeighborIterator, RangeIterator};
use log::{debug, trace};
use std::cmp::Ordering;
use std::fmt;

/// An ordered multimap stored as a threaded binary search tree.
///
/// Each distinct key owns one node holding every value inserted under it, in
/// insertion order. Besides the usual child links, nodes are threaded into a
/// doubly linked list in key order, which range scans, neighbor windows and
/// nearest-neighbor searches walk after a single descent.
///
/// Keys are ordered by a [`Comparator`] fixed at construction and the shape
/// is maintained by a [`Balancing`] strategy (AVL by default).
///
/// Iterators returned by the query methods borrow the tree, so it cannot be
/// mutated while they are alive.
///
/// # Type Parameters
///
/// - `K`: the key type
/// - `V`: the value type
/// - `S`: the balancing strategy
/// - `C`: the key comparator
///
/// # Examples
///
/// ```rust
/// use threaded_tree::iter::LazyIterator;
/// use threaded_tree::tree::ThreadedTree;
///
/// let mut tree = ThreadedTree::new();
/// for (key, value) in [(3, 'c'), (1, 'a'), (4, 'd'), (1, 'A'), (5, 'e')] {
///     tree.insert(key, value);
/// }
///
/// assert_eq!(tree.len(), 5);
/// assert_eq!(tree.node_count(), 4);
///
/// let window = tree.get_range(&2, &4).map(|node| *node.key()).to_vec();
/// assert_eq!(window, vec![3, 4]);
///
/// assert!(tree.remove(&1));
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.to_string(), "{3: [c], 4: [d], 5: [e]}");
/// ```
pub struct ThreadedTree<K, V, S = Avl, C = NaturalOrder> {
    arena: NodeArena<K, V>,
    root: Option<NodeId>,
    size: usize,
    strategy: S,
    comparator: C,
}

/// Which point of a depth-first walk visits the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pre,
    In,
    Post,
}

/// A pending step of the validation walk.
#[derive(Debug, Clone, Copy)]
enum Check {
    /// Check `node`, which hangs under `parent` and whose key must lie
    /// strictly between the keys of `lower` and `upper`.
    Enter {
        node: NodeId,
        parent: Option<NodeId>,
        lower: Option<NodeId>,
        upper: Option<NodeId>,
    },
    /// Record `node` in key order.
    Record(NodeId),
    /// Check `node` once both of its subtrees are done.
    Exit(NodeId),
}

/// State gathered while validating the tree.
#[derive(Default)]
struct Audit {
    in_order: Vec<NodeId>,
    values: usize,
}

impl<K: Ord, V> ThreadedTree<K, V> {
    /// Creates an empty AVL tree ordered by `K`'s [`Ord`] implementation.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_parts(Avl, NaturalOrder)
    }
}

impl<K, V, C> ThreadedTree<K, V, Avl, C> {
    /// Creates an empty AVL tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threaded_tree::iter::LazyIterator;
    /// use threaded_tree::tree::ThreadedTree;
    ///
    /// let mut tree = ThreadedTree::with_comparator(|left: &i32, right: &i32| right.cmp(left));
    /// tree.insert(1, ()).insert(3, ()).insert(2, ());
    ///
    /// let keys = tree.nodes().map(|node| *node.key()).to_vec();
    /// assert_eq!(keys, vec![3, 2, 1]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self::with_parts(Avl, comparator)
    }
}

impl<K, V, S, C> ThreadedTree<K, V, S, C> {
    /// Creates an empty tree from a balancing strategy and a comparator.
    #[inline]
    #[must_use]
    pub const fn with_parts(strategy: S, comparator: C) -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            size: 0,
            strategy,
            comparator,
        }
    }

    /// Returns the number of values stored, counting every value of every key.
    #[inline]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree holds no values.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of distinct keys.
    #[inline]
    pub const fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Returns the height of the root, or `0` for an empty tree.
    pub fn height(&self) -> i32 {
        self.root.map_or(0, |root| self.arena[root].height())
    }

    /// Returns the root node.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.and_then(|root| self.arena.node_ref(root))
    }

    /// Returns the node behind `id`, if it is still part of the tree.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K, V>> {
        self.arena.node_ref(id)
    }

    /// Returns the node storage.
    #[inline]
    pub const fn arena(&self) -> &NodeArena<K, V> {
        &self.arena
    }

    /// Returns the balancing strategy.
    #[inline]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Returns the key comparator.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the node with the least key.
    pub fn least(&self) -> Option<NodeRef<'_, K, V>> {
        self.least_id().and_then(|id| self.arena.node_ref(id))
    }

    /// Returns the node with the greatest key.
    pub fn greatest(&self) -> Option<NodeRef<'_, K, V>> {
        self.greatest_id().and_then(|id| self.arena.node_ref(id))
    }

    /// Removes every key and value.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            let released = self.arena.release_subtree(root);
            trace!("cleared {released} values");
        }
        self.arena.clear();
        self.size = 0;
    }

    /// Visits every node, parents before their children.
    pub fn preorder<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(NodeRef<'a, K, V>),
    {
        self.traverse(self.root, Visit::Pre, &mut visit);
    }

    /// Visits every node in key order.
    pub fn inorder<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(NodeRef<'a, K, V>),
    {
        self.traverse(self.root, Visit::In, &mut visit);
    }

    /// Visits every node, children before their parents.
    pub fn postorder<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(NodeRef<'a, K, V>),
    {
        self.traverse(self.root, Visit::Post, &mut visit);
    }

    /// Walks the subtree at `id` with an explicit stack, calling `visit` at
    /// the point of each node's walk selected by `order`.
    fn traverse<'a, F>(&'a self, id: Option<NodeId>, order: Visit, visit: &mut F)
    where
        F: FnMut(NodeRef<'a, K, V>),
    {
        // `true` marks a node whose children are already scheduled.
        let mut pending: Vec<(NodeId, bool)> = id.map(|id| (id, false)).into_iter().collect();
        while let Some((id, expanded)) = pending.pop() {
            let node = &self.arena[id];
            if expanded {
                visit(NodeRef::new(id, node));
                continue;
            }
            let lesser = node.lesser_child().map(|child| (child, false));
            let greater = node.greater_child().map(|child| (child, false));
            match order {
                Visit::Pre => pending.extend(greater.into_iter().chain(lesser).chain([(id, true)])),
                Visit::In => pending.extend(greater.into_iter().chain([(id, true)]).chain(lesser)),
                Visit::Post => pending.extend([(id, true)].into_iter().chain(greater).chain(lesser)),
            }
        }
    }

    fn least_id(&self) -> Option<NodeId> {
        let mut current = self.root?;
        while let Some(child) = self.arena[current].lesser_child() {
            current = child;
        }
        Some(current)
    }

    fn greatest_id(&self) -> Option<NodeId> {
        let mut current = self.root?;
        while let Some(child) = self.arena[current].greater_child() {
            current = child;
        }
        Some(current)
    }

    /// Follows `step` from `from` at most `steps - 1` times, stopping at the
    /// end of the chain. `from` itself is always reached, even for zero steps.
    fn walk(
        &self,
        from: Option<NodeId>,
        steps: usize,
        step: fn(&Node<K, V>) -> Option<NodeId>,
    ) -> Option<NodeId> {
        let mut current = from?;
        for _ in 1..steps {
            match step(&self.arena[current]) {
                Some(next) => current = next,
                None => break,
            }
        }
        Some(current)
    }
}

// =============================================================================
// Search
// =============================================================================

impl<K, V, S, C> ThreadedTree<K, V, S, C>
where
    C: Comparator<K>,
{
    /// Descends toward `key` and returns the last node visited together with
    /// how `key` compares to it.
    fn descend(&self, key: &K) -> Option<(NodeId, Ordering)> {
        let mut current = self.root?;
        loop {
            let node = &self.arena[current];
            let ordering = self.comparator.compare(key, node.key());
            let next = match ordering {
                Ordering::Less => node.lesser_child(),
                Ordering::Greater => node.greater_child(),
                Ordering::Equal => None,
            };
            match next {
                Some(child) => current = child,
                None => return Some((current, ordering)),
            }
        }
    }

    fn find_id(&self, key: &K) -> Option<NodeId> {
        self.descend(key)
            .and_then(|(id, ordering)| (ordering == Ordering::Equal).then_some(id))
    }

    fn find_nearest_gte_id(&self, key: &K) -> Option<NodeId> {
        let mut cursor = self.descend(key).map(|(id, _)| id);
        while let Some(id) = cursor {
            let node = &self.arena[id];
            if self.comparator.compare(node.key(), key) != Ordering::Less {
                break;
            }
            cursor = node.greater_neighbor();
        }
        cursor
    }

    fn find_nearest_lte_id(&self, key: &K) -> Option<NodeId> {
        let mut cursor = self.descend(key).map(|(id, _)| id);
        while let Some(id) = cursor {
            let node = &self.arena[id];
            if self.comparator.compare(node.key(), key) != Ordering::Greater {
                break;
            }
            cursor = node.lesser_neighbor();
        }
        cursor
    }

    /// Returns the node whose key equals `key`.
    pub fn find(&self, key: &K) -> Option<NodeRef<'_, K, V>> {
        self.find_id(key).and_then(|id| self.arena.node_ref(id))
    }

    /// Returns the node where a descent toward `key` ends: the node itself
    /// if present, otherwise the node a new `key` would be attached under.
    ///
    /// `None` only for an empty tree.
    pub fn find_nearest(&self, key: &K) -> Option<NodeRef<'_, K, V>> {
        self.descend(key).and_then(|(id, _)| self.arena.node_ref(id))
    }

    /// Returns the node with the least key comparing greater than or equal
    /// to `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threaded_tree::tree::ThreadedTree;
    ///
    /// let tree: ThreadedTree<i32, ()> = [10, 20, 30].into_iter().map(|key| (key, ())).collect();
    ///
    /// assert_eq!(tree.find_nearest_gte(&15).map(|node| *node.key()), Some(20));
    /// assert_eq!(tree.find_nearest_gte(&20).map(|node| *node.key()), Some(20));
    /// assert!(tree.find_nearest_gte(&31).is_none());
    /// ```
    pub fn find_nearest_gte(&self, key: &K) -> Option<NodeRef<'_, K, V>> {
        self.find_nearest_gte_id(key)
            .and_then(|id| self.arena.node_ref(id))
    }

    /// Returns the node with the greatest key comparing less than or equal
    /// to `key`.
    pub fn find_nearest_lte(&self, key: &K) -> Option<NodeRef<'_, K, V>> {
        self.find_nearest_lte_id(key)
            .and_then(|id| self.arena.node_ref(id))
    }

    /// Returns `true` if a node with `key` exists.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_id(key).is_some()
    }

    /// Returns the values stored under `key`, in insertion order.
    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.find_id(key).map(|id| self.arena[id].values())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the nodes whose keys lie between `lower` and `upper`, both
    /// inclusive, in key order.
    pub fn get_range<'a>(&'a self, lower: &K, upper: &'a K) -> RangeIterator<'a, K, V, C> {
        match self.find_nearest_gte_id(lower) {
            Some(start) => RangeIterator::new(&self.arena, &self.comparator, Some(start), upper),
            None => RangeIterator::exhausted(&self.arena, &self.comparator),
        }
    }

    /// Returns a window of the chain around `key`, in key order: the node for
    /// `key` itself if present, flanked by up to `n_less` nodes with lesser
    /// keys and up to `n_greater` nodes with greater keys.
    ///
    /// The closest lesser and greater nodes are always part of the window,
    /// so a count of `0` widens that side exactly like a count of `1`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threaded_tree::iter::LazyIterator;
    /// use threaded_tree::tree::ThreadedTree;
    ///
    /// let tree: ThreadedTree<i32, ()> = (1..=9).map(|key| (key * 10, ())).collect();
    ///
    /// let around_50 = tree.get_neighbors(&50, 2, 1).map(|node| *node.key()).to_vec();
    /// assert_eq!(around_50, vec![30, 40, 50, 60]);
    ///
    /// let around_55 = tree.get_neighbors(&55, 0, 2).map(|node| *node.key()).to_vec();
    /// assert_eq!(around_55, vec![50, 60, 70]);
    /// ```
    pub fn get_neighbors(&self, key: &K, n_less: usize, n_greater: usize) -> RangeIterator<'_, K, V, C> {
        let Some((nearest, ordering)) = self.descend(key) else {
            return RangeIterator::exhausted(&self.arena, &self.comparator);
        };
        let node = &self.arena[nearest];
        let below = match ordering {
            Ordering::Greater => Some(nearest),
            Ordering::Less | Ordering::Equal => node.lesser_neighbor(),
        };
        let above = match ordering {
            Ordering::Less => Some(nearest),
            Ordering::Greater | Ordering::Equal => node.greater_neighbor(),
        };

        let start = self
            .walk(below, n_less, Node::lesser_neighbor)
            .unwrap_or(nearest);
        let end = self
            .walk(above, n_greater, Node::greater_neighbor)
            .unwrap_or(nearest);
        RangeIterator::new(&self.arena, &self.comparator, Some(start), self.arena[end].key())
    }

    /// Returns up to `k` nodes in order of increasing `distance` to `key`.
    ///
    /// Equal distances favor the greater key. `distance` must be unimodal
    /// along the key order around `key`; see [`NearestNeighborIterator`].
    pub fn get_nearest_neighbors<'a, D>(
        &'a self,
        key: &'a K,
        k: usize,
        distance: D,
    ) -> NearestNeighborIterator<'a, K, V, D>
    where
        D: Fn(&K, &K) -> f64,
    {
        let start = self.descend(key).map(|(id, _)| id);
        NearestNeighborIterator::new(&self.arena, key, distance, k, start)
    }

    /// Returns every node in key order.
    pub fn nodes(&self) -> RangeIterator<'_, K, V, C> {
        match (self.least_id(), self.greatest_id()) {
            (Some(least), Some(greatest)) => RangeIterator::new(
                &self.arena,
                &self.comparator,
                Some(least),
                self.arena[greatest].key(),
            ),
            _ => RangeIterator::exhausted(&self.arena, &self.comparator),
        }
    }
}

// =============================================================================
// Mutation
// =============================================================================

impl<K, V, S, C> ThreadedTree<K, V, S, C>
where
    S: Balancing,
    C: Comparator<K>,
{
    fn attach_new(&mut self, node: Node<K, V>) {
        let id = self.arena.insert(node);
        self.root = Some(match self.root {
            None => id,
            Some(root) => {
                self.strategy
                    .add_descendant(&mut self.arena, root, id, &self.comparator)
            }
        });
    }

    /// Inserts `value` under `key` only if `key` is absent.
    ///
    /// Returns `false`, leaving the tree untouched, if `key` already exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threaded_tree::tree::ThreadedTree;
    ///
    /// let mut tree = ThreadedTree::new();
    /// assert!(tree.try_insert("key", 1));
    /// assert!(!tree.try_insert("key", 2));
    /// assert_eq!(tree.get(&"key"), Some(&[1][..]));
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> bool {
        if self.find_id(&key).is_some() {
            debug!("try_insert rejected a key already present");
            return false;
        }
        self.attach_new(Node::new(key, value));
        self.size += 1;
        true
    }

    /// Appends `value` to the values of `key`, creating its node if needed.
    pub fn insert(&mut self, key: K, value: V) -> &mut Self {
        match self.find_id(&key) {
            Some(id) => {
                self.arena[id].add_value(value);
            }
            None => self.attach_new(Node::new(key, value)),
        }
        self.size += 1;
        self
    }

    /// Removes `key` with all of its values.
    ///
    /// Returns `false` if `key` is absent.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(id) = self.find_id(key) else {
            return false;
        };
        self.size -= self.arena[id].values().len();
        self.root = self.strategy.remove_node(&mut self.arena, id);
        true
    }

    /// Removes the first value equal to `value` stored under `key`. A key
    /// left without values is removed.
    ///
    /// Returns `false` if no such value exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threaded_tree::tree::ThreadedTree;
    ///
    /// let mut tree = ThreadedTree::new();
    /// tree.insert(7, "a").insert(7, "b");
    ///
    /// assert!(tree.remove_value(&7, &"a"));
    /// assert!(tree.contains_key(&7));
    /// assert!(tree.remove_value(&7, &"b"));
    /// assert!(!tree.contains_key(&7));
    /// assert!(!tree.remove_value(&7, &"b"));
    /// ```
    pub fn remove_value(&mut self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        let Some(id) = self.find_id(key) else {
            return false;
        };
        if !self.arena[id].remove_value(value) {
            return false;
        }
        self.size -= 1;
        if self.arena[id].values().is_empty() {
            self.root = self.strategy.remove_node(&mut self.arena, id);
        }
        true
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Walks the whole tree and verifies its structural invariants: key
    /// order, neighbor threading, parent links, cached heights, non-empty
    /// value lists, the value count and, for strategies that keep balance,
    /// the AVL bound.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut audit = Audit::default();
        let mut pending: Vec<Check> = self
            .root
            .map(|root| Check::Enter {
                node: root,
                parent: None,
                lower: None,
                upper: None,
            })
            .into_iter()
            .collect();
        while let Some(check) = pending.pop() {
            match check {
                Check::Enter {
                    node: id,
                    parent,
                    lower,
                    upper,
                } => {
                    self.check_node(id, parent, lower, upper)?;
                    let node = &self.arena[id];
                    pending.push(Check::Exit(id));
                    if let Some(greater) = node.greater_child() {
                        pending.push(Check::Enter {
                            node: greater,
                            parent: Some(id),
                            lower: Some(id),
                            upper,
                        });
                    }
                    pending.push(Check::Record(id));
                    if let Some(lesser) = node.lesser_child() {
                        pending.push(Check::Enter {
                            node: lesser,
                            parent: Some(id),
                            lower,
                            upper: Some(id),
                        });
                    }
                }
                Check::Record(id) => {
                    audit.in_order.push(id);
                    audit.values += self.arena[id].values().len();
                }
                Check::Exit(id) => self.check_height(id)?,
            }
        }

        let mut previous = None;
        for (position, &id) in audit.in_order.iter().enumerate() {
            let node = &self.arena[id];
            let next = audit.in_order.get(position + 1).copied();
            if node.lesser_neighbor() != previous || node.greater_neighbor() != next {
                return Err(InvariantViolation::ThreadingBroken { node: id });
            }
            previous = Some(id);
        }

        if audit.values != self.size {
            return Err(InvariantViolation::SizeMismatch {
                recorded: self.size,
                counted: audit.values,
            });
        }
        if audit.in_order.len() != self.arena.len() {
            return Err(InvariantViolation::NodeCountMismatch {
                allocated: self.arena.len(),
                reachable: audit.in_order.len(),
            });
        }
        Ok(())
    }

    /// Checks the parent link, key bounds and values of `id`. Its key must
    /// lie strictly between the keys of `lower` and `upper`.
    fn check_node(
        &self,
        id: NodeId,
        parent: Option<NodeId>,
        lower: Option<NodeId>,
        upper: Option<NodeId>,
    ) -> Result<(), InvariantViolation> {
        let node = &self.arena[id];
        if node.parent() != parent {
            return Err(InvariantViolation::ParentMismatch { node: id });
        }
        let key = node.key();
        let above_lower = lower.is_none_or(|lower| {
            self.comparator.compare(key, self.arena[lower].key()) == Ordering::Greater
        });
        let below_upper = upper.is_none_or(|upper| {
            self.comparator.compare(key, self.arena[upper].key()) == Ordering::Less
        });
        if !(above_lower && below_upper) {
            return Err(InvariantViolation::OrderViolated { node: id });
        }
        if node.values().is_empty() {
            return Err(InvariantViolation::EmptyValues { node: id });
        }
        Ok(())
    }

    /// Checks the cached height of `id` and, if the strategy keeps balance,
    /// its balance. Both children must already be checked.
    fn check_height(&self, id: NodeId) -> Result<(), InvariantViolation> {
        let node = &self.arena[id];
        let lesser = self.arena.height_of(node.lesser_child());
        let greater = self.arena.height_of(node.greater_child());
        let expected = lesser.max(greater) + 1;
        if node.height() != expected {
            return Err(InvariantViolation::HeightMismatch {
                node: id,
                cached: node.height(),
                expected,
            });
        }
        let balance = lesser - greater;
        if self.strategy.keeps_balance() && !(-1..=1).contains(&balance) {
            return Err(InvariantViolation::Unbalanced { node: id, balance });
        }
        Ok(())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<K, V, S, C> Default for ThreadedTree<K, V, S, C>
where
    S: Default,
    C: Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_parts(S::default(), C::default())
    }
}

impl<K, V, S, C> FromIterator<(K, V)> for ThreadedTree<K, V, S, C>
where
    S: Balancing + Default,
    C: Comparator<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iterable);
        tree
    }
}

impl<K, V, S, C> Extend<(K, V)> for ThreadedTree<K, V, S, C>
where
    S: Balancing,
    C: Comparator<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.insert(key, value);
        }
    }
}

impl<K, V, S, C> fmt::Debug for ThreadedTree<K, V, S, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Comparator<K>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.nodes().into_std().map(|node| (node.key(), node.values())))
            .finish()
    }
}

impl<K, V, S, C> fmt::Display for ThreadedTree<K, V, S, C>
where
    K: fmt::Display,
    V: fmt::Display,
    C: Comparator<K>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (position, node) in self.nodes().into_std().enumerate() {
            if position > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{}: [", node.key())?;
            for (index, value) in node.values().iter().enumerate() {
                if index > 0 {
                    write!(formatter, ", ")?;
                }
                write!(formatter, "{value}")?;
            }
            write!(formatter, "]")?;
        }
        write!(formatter, "}}")
    }
}
