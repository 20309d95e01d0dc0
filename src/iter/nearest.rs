//! K-nearest-neighbor search along the neighbor chain.

use super::{LazyIterator, Lookahead};
use crate::tree::{NodeArena, NodeId, NodeRef};

/// A chain position paired with its distance to the target key.
///
/// The frontier on one side of the emitted run. `distance` only counts
/// while `node` is present, so nodes at an infinite distance are still
/// emitted.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    node: Option<NodeId>,
    distance: f64,
}

/// Yields up to `limit` nodes in order of increasing distance to a target key.
///
/// Starting from any node, the iterator first slides along the chain to a
/// node closer to the target than both of its neighbors. It then expands
/// outwards, each step emitting whichever frontier node, lesser or greater,
/// is closer. Equal distances favor the greater side. Once one side runs
/// out, the other is drained in chain order whatever its distances.
///
/// The distance function must be unimodal along the key order around the
/// target: non-increasing up to the nearest key and non-decreasing after
/// it. `|a - b|` over numeric keys qualifies. With any other function the
/// slide can stop at a local minimum and the order is unspecified.
///
/// Created by [`ThreadedTree::get_nearest_neighbors`], or directly over an
/// arena with [`NearestNeighborIterator::new`].
///
/// [`ThreadedTree::get_nearest_neighbors`]: crate::tree::ThreadedTree::get_nearest_neighbors
///
/// # Examples
///
/// ```rust
/// use threaded_tree::iter::LazyIterator;
/// use threaded_tree::tree::ThreadedTree;
///
/// let tree: ThreadedTree<i32, ()> = (1..=5).map(|key| (key, ())).collect();
/// let distance = |left: &i32, right: &i32| f64::from((left - right).abs());
///
/// let nearest = tree
///     .get_nearest_neighbors(&3, 3, distance)
///     .map(|node| *node.key())
///     .to_vec();
/// assert_eq!(nearest, vec![3, 4, 2]);
/// ```
pub struct NearestNeighborIterator<'a, K, V, D> {
    arena: &'a NodeArena<K, V>,
    key: &'a K,
    distance: D,
    limit: usize,
    emitted: usize,
    lesser: Candidate,
    greater: Candidate,
    lookahead: Lookahead<NodeRef<'a, K, V>>,
}

impl<'a, K, V, D> NearestNeighborIterator<'a, K, V, D>
where
    D: Fn(&K, &K) -> f64,
{
    /// Searches for the `limit` nodes nearest to `key`, starting the slide
    /// from `start`.
    ///
    /// With no start node or a limit of zero the iterator yields nothing.
    pub fn new(
        arena: &'a NodeArena<K, V>,
        key: &'a K,
        distance: D,
        limit: usize,
        start: Option<NodeId>,
    ) -> Self {
        let unreached = Candidate {
            node: None,
            distance: f64::INFINITY,
        };
        let mut iterator = Self {
            arena,
            key,
            distance,
            limit,
            emitted: 0,
            lesser: unreached,
            greater: unreached,
            lookahead: Lookahead::new(),
        };
        if limit > 0
            && let Some(start) = start
        {
            let nearest = iterator.localize(start);
            let node = &arena[nearest];
            iterator.lesser = iterator.candidate(node.lesser_neighbor());
            iterator.greater = iterator.candidate(node.greater_neighbor());
            iterator.lookahead.fill(NodeRef::new(nearest, node));
            iterator.emitted = 1;
        }
        iterator
    }

    fn distance_to(&self, id: NodeId) -> f64 {
        (self.distance)(self.arena[id].key(), self.key)
    }

    fn candidate(&self, node: Option<NodeId>) -> Candidate {
        Candidate {
            node,
            distance: node.map_or(f64::INFINITY, |id| self.distance_to(id)),
        }
    }

    /// Slides from `start` toward the target until neither neighbor is
    /// strictly closer than the current node.
    fn localize(&self, start: NodeId) -> NodeId {
        let mut current = start;
        loop {
            let node = &self.arena[current];
            let here = self.distance_to(current);
            let lesser = node.lesser_neighbor().map(|id| (id, self.distance_to(id)));
            let greater = node.greater_neighbor().map(|id| (id, self.distance_to(id)));

            let closer = match (lesser, greater) {
                (Some((lesser, to_lesser)), Some((greater, to_greater))) => {
                    if to_lesser < here {
                        Some(if to_greater < to_lesser { greater } else { lesser })
                    } else if to_greater < here {
                        Some(greater)
                    } else {
                        None
                    }
                }
                (Some((lesser, to_lesser)), None) => (to_lesser < here).then_some(lesser),
                (None, Some((greater, to_greater))) => (to_greater < here).then_some(greater),
                (None, None) => None,
            };

            match closer {
                Some(next) => current = next,
                None => return current,
            }
        }
    }
}

impl<'a, K, V, D> LazyIterator for NearestNeighborIterator<'a, K, V, D>
where
    D: Fn(&K, &K) -> f64,
{
    type Item = NodeRef<'a, K, V>;

    fn lookahead(&self) -> &Lookahead<Self::Item> {
        &self.lookahead
    }

    fn lookahead_mut(&mut self) -> &mut Lookahead<Self::Item> {
        &mut self.lookahead
    }

    fn advance(&mut self) {
        if !self.lookahead.needs_advance() || self.emitted >= self.limit {
            return;
        }
        let take_lesser = match (self.lesser.node, self.greater.node) {
            (Some(_), Some(_)) => self.lesser.distance < self.greater.distance,
            (lesser, _) => lesser.is_some(),
        };
        if take_lesser && let Some(id) = self.lesser.node {
            let arena = self.arena;
            let node = &arena[id];
            self.lesser = self.candidate(node.lesser_neighbor());
            self.lookahead.fill(NodeRef::new(id, node));
            self.emitted += 1;
        } else if let Some(id) = self.greater.node {
            let arena = self.arena;
            let node = &arena[id];
            self.greater = self.candidate(node.greater_neighbor());
            self.lookahead.fill(NodeRef::new(id, node));
            self.emitted += 1;
        }
    }
}
