#![cfg(feature = "tree")]
//! Property-based tests for ThreadedTree.
//!
//! These tests verify that the tree keeps its structural invariants and
//! answers queries like a sorted reference model, using proptest.

use proptest::prelude::*;
use std::collections::BTreeMap;
use threaded_tree::iter::LazyIterator;
use threaded_tree::tree::{Avl, Balancing, NaturalOrder, ThreadedTree, Unbalanced};

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

/// An insert or a removal, applied in sequence to a tree.
#[derive(Debug, Clone)]
enum Operation {
    Insert(i16, u8),
    Remove(i16),
    RemoveValue(i16, u8),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (-50i16..50, 0u8..4).prop_map(|(key, value)| Operation::Insert(key, value)),
        1 => (-50i16..50).prop_map(Operation::Remove),
        1 => (-50i16..50, 0u8..4).prop_map(|(key, value)| Operation::RemoveValue(key, value)),
    ]
}

/// Applies `operations` to both a tree and a `BTreeMap` of value lists.
fn replay<S: Balancing>(
    tree: &mut ThreadedTree<i16, u8, S>,
    operations: &[Operation],
) -> BTreeMap<i16, Vec<u8>> {
    let mut model: BTreeMap<i16, Vec<u8>> = BTreeMap::new();
    for operation in operations {
        match *operation {
            Operation::Insert(key, value) => {
                tree.insert(key, value);
                model.entry(key).or_default().push(value);
            }
            Operation::Remove(key) => {
                assert_eq!(tree.remove(&key), model.remove(&key).is_some());
            }
            Operation::RemoveValue(key, value) => {
                let expected = model.get_mut(&key).and_then(|values| {
                    let position = values.iter().position(|candidate| *candidate == value)?;
                    values.remove(position);
                    Some(())
                });
                if model.get(&key).is_some_and(Vec::is_empty) {
                    model.remove(&key);
                }
                assert_eq!(tree.remove_value(&key, &value), expected.is_some());
            }
        }
    }
    model
}

fn chain_keys<S>(tree: &ThreadedTree<i16, u8, S>) -> Vec<i16> {
    let mut keys = Vec::new();
    let mut cursor = tree.least();
    while let Some(node) = cursor {
        keys.push(*node.key());
        cursor = node.node().greater_neighbor().and_then(|id| tree.node(id));
    }
    keys
}

// =============================================================================
// Structural Laws
// =============================================================================

proptest! {
    /// Law: an in-order traversal visits the same keys as the neighbor chain,
    /// strictly increasing.
    #[test]
    fn prop_inorder_equals_neighbor_chain(keys in prop::collection::vec(any::<i16>(), 0..64)) {
        let tree: ThreadedTree<i16, u8> = keys.into_iter().map(|key| (key, 0)).collect();
        let mut inorder = Vec::new();
        tree.inorder(|node| inorder.push(*node.key()));

        prop_assert_eq!(&inorder, &chain_keys(&tree));
        prop_assert!(inorder.windows(2).all(|pair| pair[0] < pair[1]));
    }

    /// Law: AVL trees keep every invariant, including balance, across any
    /// mix of inserts and removals.
    #[test]
    fn prop_avl_invariants_hold(operations in prop::collection::vec(operation(), 0..120)) {
        let mut tree = ThreadedTree::with_parts(Avl, NaturalOrder);
        replay(&mut tree, &operations);
        prop_assert_eq!(tree.check_invariants(), Ok(()));
    }

    /// Law: unbalanced trees keep every invariant except the balance bound.
    #[test]
    fn prop_unbalanced_invariants_hold(operations in prop::collection::vec(operation(), 0..120)) {
        let mut tree = ThreadedTree::with_parts(Unbalanced, NaturalOrder);
        replay(&mut tree, &operations);
        prop_assert_eq!(tree.check_invariants(), Ok(()));
    }

    /// Law: the tree holds exactly the values of a sorted reference model.
    #[test]
    fn prop_matches_reference_model(operations in prop::collection::vec(operation(), 0..120)) {
        let mut tree = ThreadedTree::new();
        let model = replay(&mut tree, &operations);

        prop_assert_eq!(tree.len(), model.values().map(Vec::len).sum::<usize>());
        prop_assert_eq!(tree.node_count(), model.len());
        for (key, values) in &model {
            prop_assert_eq!(tree.get(key), Some(values.as_slice()));
        }
        prop_assert_eq!(chain_keys(&tree), model.keys().copied().collect::<Vec<_>>());
    }
}

// =============================================================================
// Query Laws
// =============================================================================

proptest! {
    /// Law: get_range yields exactly the keys within both inclusive bounds,
    /// in increasing order.
    #[test]
    fn prop_range_is_filtered_chain(
        keys in prop::collection::vec(-100i16..100, 0..64),
        lower in -120i16..120,
        upper in -120i16..120,
    ) {
        let tree: ThreadedTree<i16, u8> = keys.iter().map(|key| (*key, 0)).collect();
        let expected: Vec<i16> = chain_keys(&tree)
            .into_iter()
            .filter(|key| (lower..=upper).contains(key))
            .collect();
        let actual = tree.get_range(&lower, &upper).map(|node| *node.key()).to_vec();
        prop_assert_eq!(actual, expected);
    }

    /// Law: get_neighbors yields the requested window around the key, where a
    /// zero count widens by one just like a count of one.
    #[test]
    fn prop_neighbors_window(
        keys in prop::collection::vec(-100i16..100, 0..64),
        key in -120i16..120,
        n_less in 0usize..6,
        n_greater in 0usize..6,
    ) {
        let tree: ThreadedTree<i16, u8> = keys.iter().map(|key| (*key, 0)).collect();
        let sorted = chain_keys(&tree);
        let below: Vec<i16> = sorted.iter().copied().filter(|candidate| *candidate < key).collect();
        let above: Vec<i16> = sorted.iter().copied().filter(|candidate| *candidate > key).collect();

        let mut expected: Vec<i16> = below[below.len().saturating_sub(n_less.max(1))..].to_vec();
        if tree.contains_key(&key) {
            expected.push(key);
        }
        expected.extend(above.iter().take(n_greater.max(1)));

        let actual = tree.get_neighbors(&key, n_less, n_greater).map(|node| *node.key()).to_vec();
        prop_assert_eq!(actual, expected);
    }

    /// Law: nearest neighbors come in non-decreasing distance and cover the
    /// closest keys.
    #[test]
    fn prop_nearest_neighbors_sorted_by_distance(
        keys in prop::collection::vec(-100i16..100, 0..64),
        target in -120i16..120,
        limit in 0usize..10,
    ) {
        let tree: ThreadedTree<i16, u8> = keys.iter().map(|key| (*key, 0)).collect();
        let distance = |left: &i16, right: &i16| f64::from((i32::from(*left) - i32::from(*right)).abs());

        let found = tree
            .get_nearest_neighbors(&target, limit, distance)
            .map(|node| *node.key())
            .to_vec();
        let distances: Vec<f64> = found.iter().map(|key| distance(key, &target)).collect();

        prop_assert_eq!(found.len(), limit.min(tree.node_count()));
        prop_assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));

        let mut all: Vec<f64> = chain_keys(&tree).iter().map(|key| distance(key, &target)).collect();
        all.sort_by(f64::total_cmp);
        prop_assert_eq!(distances, all[..found.len()].to_vec());
    }
}
