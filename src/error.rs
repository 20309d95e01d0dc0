//! Error types for structural validation of a [`ThreadedTree`].
//!
//! Lookups and mutations never fail: absence is reported with `Option` and
//! `bool`. The only fallible operation is
//! [`ThreadedTree::check_invariants`], which walks the whole structure and
//! reports the first invariant it finds broken.
//!
//! [`ThreadedTree`]: crate::tree::ThreadedTree
//! [`ThreadedTree::check_invariants`]: crate::tree::ThreadedTree::check_invariants

use crate::tree::NodeId;

/// A broken structural invariant found by
/// [`ThreadedTree::check_invariants`](crate::tree::ThreadedTree::check_invariants).
///
/// # Examples
///
/// ```rust
/// use threaded_tree::error::InvariantViolation;
/// use threaded_tree::tree::NodeId;
///
/// let error = InvariantViolation::SizeMismatch { recorded: 3, counted: 2 };
/// assert_eq!(
///     format!("{error}"),
///     "size mismatch: tree records 3 values but nodes hold 2"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A key in a child subtree is on the wrong side of its ancestor.
    OrderViolated {
        /// The node whose subtree is out of order.
        node: NodeId,
    },
    /// The neighbor chain disagrees with the in-order sequence.
    ThreadingBroken {
        /// The first node where the chain and the in-order walk diverge.
        node: NodeId,
    },
    /// A child does not point back at its parent.
    ParentMismatch {
        /// The child carrying the wrong back-reference.
        node: NodeId,
    },
    /// A cached height differs from the height of the subtree.
    HeightMismatch {
        /// The node with the stale height.
        node: NodeId,
        /// The height stored on the node.
        cached: i32,
        /// The height computed from its children.
        expected: i32,
    },
    /// Child heights differ by more than one under a balancing strategy.
    Unbalanced {
        /// The node out of balance.
        node: NodeId,
        /// Lesser child height minus greater child height.
        balance: i32,
    },
    /// A live node holds no values.
    EmptyValues {
        /// The empty node.
        node: NodeId,
    },
    /// The recorded value count differs from the values actually stored.
    SizeMismatch {
        /// The value count the tree records.
        recorded: usize,
        /// The value count summed over reachable nodes.
        counted: usize,
    },
    /// The arena holds nodes that are not reachable from the root.
    NodeCountMismatch {
        /// Live slots in the arena.
        allocated: usize,
        /// Nodes reachable through child links.
        reachable: usize,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrderViolated { node } => {
                write!(formatter, "order violated: subtree of {node} is not sorted")
            }
            Self::ThreadingBroken { node } => write!(
                formatter,
                "threading broken: neighbor chain diverges from in-order walk at {node}"
            ),
            Self::ParentMismatch { node } => {
                write!(formatter, "parent mismatch: {node} does not point at its parent")
            }
            Self::HeightMismatch {
                node,
                cached,
                expected,
            } => write!(
                formatter,
                "height mismatch: {node} caches {cached} but its height is {expected}"
            ),
            Self::Unbalanced { node, balance } => {
                write!(formatter, "unbalanced: {node} has balance {balance}")
            }
            Self::EmptyValues { node } => write!(formatter, "empty values: {node} holds no values"),
            Self::SizeMismatch { recorded, counted } => write!(
                formatter,
                "size mismatch: tree records {recorded} values but nodes hold {counted}"
            ),
            Self::NodeCountMismatch {
                allocated,
                reachable,
            } => write!(
                formatter,
                "node count mismatch: {allocated} allocated but {reachable} reachable"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InvariantViolation::OrderViolated { node: NodeId::new(1) }, "order violated: subtree of #1 is not sorted")]
    #[case(InvariantViolation::Unbalanced { node: NodeId::new(4), balance: -2 }, "unbalanced: #4 has balance -2")]
    #[case(
        InvariantViolation::HeightMismatch { node: NodeId::new(0), cached: 3, expected: 1 },
        "height mismatch: #0 caches 3 but its height is 1"
    )]
    #[case(
        InvariantViolation::NodeCountMismatch { allocated: 5, reachable: 4 },
        "node count mismatch: 5 allocated but 4 reachable"
    )]
    fn test_invariant_violation_display(#[case] error: InvariantViolation, #[case] expected: &str) {
        assert_eq!(format!("{error}"), expected);
    }

    #[rstest]
    fn test_invariant_violation_is_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&InvariantViolation::EmptyValues { node: NodeId::new(2) });
    }
}
