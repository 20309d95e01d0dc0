//! Three-way key comparators.

use std::cmp::Ordering;

/// A total order over keys, supplied to a [`ThreadedTree`](super::ThreadedTree)
/// at construction.
///
/// Every closure `Fn(&K, &K) -> Ordering` is a comparator.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use threaded_tree::tree::{Comparator, NaturalOrder, ReverseOrder};
///
/// assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
/// assert_eq!(ReverseOrder.compare(&1, &2), Ordering::Greater);
///
/// let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
/// assert_eq!(by_length.compare(&"abc", &"de"), Ordering::Greater);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares `left` with `right`.
    fn compare(&self, left: &K, right: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

/// Orders keys opposite to their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseOrder;

impl<K: Ord + ?Sized> Comparator<K> for ReverseOrder {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        right.cmp(left)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self(left, right)
    }
}
