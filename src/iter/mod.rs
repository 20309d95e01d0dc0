//! Lazy pull iterators with single-step lookahead.
//!
//! This module provides [`LazyIterator`], a pull protocol in which every
//! element is computed only when the caller asks for it through
//! [`has_next`](LazyIterator::has_next), [`peek`](LazyIterator::peek) or
//! [`next`](LazyIterator::next). At most one element is ever computed ahead
//! of the caller, and it is cached in a [`Lookahead`] slot until consumed.
//!
//! Concrete iterators implement a single hook, [`advance`](LazyIterator::advance),
//! which fills the slot when it is empty and leaves it empty when the source
//! is exhausted. Everything else is provided:
//!
//! - [`map`](LazyIterator::map), [`select`](LazyIterator::select),
//!   [`exclude`](LazyIterator::exclude), [`take`](LazyIterator::take) and
//!   [`take_while`](LazyIterator::take_while) wrap the receiver, taking
//!   ownership of it as their upstream source
//! - [`skip`](LazyIterator::skip) and [`skip_while`](LazyIterator::skip_while)
//!   drop elements from the receiver immediately and hand it back
//! - [`to_vec`](LazyIterator::to_vec), [`each`](LazyIterator::each) and
//!   [`count`](LazyIterator::count) drain the iterator
//!
//! Releasing the outermost iterator of a pipeline releases the whole
//! upstream chain; there is no separate cancel operation.
//!
//! # Examples
//!
//! ```rust
//! use threaded_tree::iter::{LazyIterator, elements};
//!
//! let evens_squared = elements(1..=10)
//!     .select(|number| number % 2 == 0)
//!     .map(|number| number * number)
//!     .take(3)
//!     .to_vec();
//! assert_eq!(evens_squared, vec![4, 16, 36]);
//! ```
//!
//! ## Lookahead
//!
//! ```rust
//! use threaded_tree::iter::{LazyIterator, elements};
//!
//! let mut iterator = elements(vec!["a", "b"]);
//! assert_eq!(iterator.peek(), Some(&"a"));
//! assert_eq!(iterator.peek(), Some(&"a")); // peeking does not advance
//! assert_eq!(iterator.next(), Some("a"));
//! assert_eq!(iterator.next(), Some("b"));
//! assert!(!iterator.has_next());
//! ```

mod combinators;
#[cfg(feature = "tree")]
mod nearest;
#[cfg(feature = "tree")]
mod range;

pub use combinators::{Exclude, Map, Select, Take, TakeWhile};
#[cfg(feature = "tree")]
pub use nearest::NearestNeighborIterator;
#[cfg(feature = "tree")]
pub use range::RangeIterator;

use std::fmt;

// =============================================================================
// Lookahead Slot
// =============================================================================

/// The pending-element slot shared by every [`LazyIterator`].
///
/// An empty slot means the iterator needs to advance before it can answer
/// `has_next`, `peek` or `next`. A filled slot holds the element the next
/// call to `next` will return.
pub struct Lookahead<T> {
    pending: Option<T>,
}

impl<T> Lookahead<T> {
    /// Creates an empty slot.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Returns `true` if no element is cached.
    #[inline]
    #[must_use]
    pub const fn needs_advance(&self) -> bool {
        self.pending.is_none()
    }

    /// Caches `element` as the next element to return.
    #[inline]
    pub fn fill(&mut self, element: T) {
        self.pending = Some(element);
    }

    /// Returns the cached element without consuming it.
    #[inline]
    #[must_use]
    pub const fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Removes and returns the cached element, leaving the slot empty.
    #[inline]
    pub const fn take(&mut self) -> Option<T> {
        self.pending.take()
    }
}

impl<T> Default for Lookahead<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Lookahead<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Lookahead")
            .field("pending", &self.pending)
            .finish()
    }
}

// =============================================================================
// LazyIterator Trait
// =============================================================================

/// A pull-based iterator that computes at most one element ahead.
///
/// Implementors own a [`Lookahead`] slot and implement [`advance`](Self::advance).
/// `advance` must do nothing when the slot is already filled, and must leave
/// the slot empty when no further element exists.
///
/// # Examples
///
/// A source that counts down to one:
///
/// ```rust
/// use threaded_tree::iter::{LazyIterator, Lookahead};
///
/// struct Countdown {
///     remaining: u32,
///     lookahead: Lookahead<u32>,
/// }
///
/// impl LazyIterator for Countdown {
///     type Item = u32;
///
///     fn lookahead(&self) -> &Lookahead<u32> {
///         &self.lookahead
///     }
///
///     fn lookahead_mut(&mut self) -> &mut Lookahead<u32> {
///         &mut self.lookahead
///     }
///
///     fn advance(&mut self) {
///         if self.lookahead.needs_advance() && self.remaining > 0 {
///             self.lookahead.fill(self.remaining);
///             self.remaining -= 1;
///         }
///     }
/// }
///
/// let countdown = Countdown { remaining: 3, lookahead: Lookahead::new() };
/// assert_eq!(countdown.to_vec(), vec![3, 2, 1]);
/// ```
pub trait LazyIterator {
    /// The type of the elements produced.
    type Item;

    /// Returns the pending-element slot.
    fn lookahead(&self) -> &Lookahead<Self::Item>;

    /// Returns the pending-element slot mutably.
    fn lookahead_mut(&mut self) -> &mut Lookahead<Self::Item>;

    /// Computes the next element into the slot if the slot is empty.
    fn advance(&mut self);

    /// Returns `true` if another element is available.
    fn has_next(&mut self) -> bool {
        self.advance();
        !self.lookahead().needs_advance()
    }

    /// Returns the next element without consuming it.
    ///
    /// Repeated calls return the same element.
    fn peek(&mut self) -> Option<&Self::Item> {
        self.advance();
        self.lookahead().pending()
    }

    /// Returns and consumes the next element.
    fn next(&mut self) -> Option<Self::Item> {
        self.advance();
        self.lookahead_mut().take()
    }

    /// Drains the iterator into a vector.
    fn to_vec(mut self) -> Vec<Self::Item>
    where
        Self: Sized,
    {
        let mut elements = Vec::new();
        while let Some(element) = self.next() {
            elements.push(element);
        }
        elements
    }

    /// Feeds elements to `visit` until it returns `false`.
    ///
    /// Returns `false` if `visit` stopped the walk early and `true` if the
    /// iterator was exhausted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threaded_tree::iter::{LazyIterator, elements};
    ///
    /// let mut seen = Vec::new();
    /// let exhausted = elements(1..10).each(|number| {
    ///     seen.push(number);
    ///     number < 3
    /// });
    /// assert!(!exhausted);
    /// assert_eq!(seen, vec![1, 2, 3]);
    /// ```
    fn each<F>(&mut self, mut visit: F) -> bool
    where
        Self: Sized,
        F: FnMut(Self::Item) -> bool,
    {
        while let Some(element) = self.next() {
            if !visit(element) {
                return false;
            }
        }
        true
    }

    /// Drains the iterator and returns the number of elements.
    fn count(mut self) -> usize
    where
        Self: Sized,
    {
        let mut count = 0;
        while self.next().is_some() {
            count += 1;
        }
        count
    }

    /// Transforms every element with `transform`.
    fn map<U, F>(self, transform: F) -> Map<Self, U, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> U,
    {
        Map::new(self, transform)
    }

    /// Keeps only the elements satisfying `predicate`.
    fn select<F>(self, predicate: F) -> Select<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> bool,
    {
        Select::new(self, predicate)
    }

    /// Keeps only the elements not satisfying `predicate`.
    fn exclude<F>(self, predicate: F) -> Exclude<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> bool,
    {
        Exclude::new(self, predicate)
    }

    /// Yields at most `limit` elements.
    fn take(self, limit: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take::new(self, limit)
    }

    /// Yields elements up to, and excluding, the first one failing `predicate`.
    ///
    /// Once an element fails, the iterator is exhausted even if later
    /// elements would pass.
    fn take_while<F>(self, predicate: F) -> TakeWhile<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> bool,
    {
        TakeWhile::new(self, predicate)
    }

    /// Drops up to `limit` elements immediately and returns the iterator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threaded_tree::iter::{LazyIterator, elements};
    ///
    /// assert_eq!(elements(vec![2, 3]).skip(1).to_vec(), vec![3]);
    /// assert!(elements(vec![2, 3]).skip(5).to_vec().is_empty());
    /// ```
    #[must_use]
    fn skip(mut self, limit: usize) -> Self
    where
        Self: Sized,
    {
        for _ in 0..limit {
            if self.next().is_none() {
                break;
            }
        }
        self
    }

    /// Drops elements while `predicate` holds and returns the iterator
    /// positioned at the first element that fails it.
    #[must_use]
    fn skip_while<F>(mut self, mut predicate: F) -> Self
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> bool,
    {
        while self.peek().is_some_and(&mut predicate) {
            self.next();
        }
        self
    }

    /// Adapts this iterator to [`std::iter::Iterator`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threaded_tree::iter::{LazyIterator, elements};
    ///
    /// let total: i32 = elements(vec![1, 2, 3]).into_std().sum();
    /// assert_eq!(total, 6);
    /// ```
    fn into_std(self) -> IntoStd<Self>
    where
        Self: Sized,
    {
        IntoStd { inner: self }
    }
}

impl<I: LazyIterator + ?Sized> LazyIterator for Box<I> {
    type Item = I::Item;

    #[inline]
    fn lookahead(&self) -> &Lookahead<Self::Item> {
        (**self).lookahead()
    }

    #[inline]
    fn lookahead_mut(&mut self) -> &mut Lookahead<Self::Item> {
        (**self).lookahead_mut()
    }

    #[inline]
    fn advance(&mut self) {
        (**self).advance();
    }
}

// =============================================================================
// Sources
// =============================================================================

/// A [`LazyIterator`] pulling its elements from a standard iterator.
///
/// Created by [`elements`].
pub struct Elements<I: Iterator> {
    source: I,
    lookahead: Lookahead<I::Item>,
}

/// Lifts any [`IntoIterator`] into a [`LazyIterator`].
///
/// # Examples
///
/// ```rust
/// use threaded_tree::iter::{LazyIterator, elements};
///
/// assert_eq!(elements(vec![2, 3]).take(1).to_vec(), vec![2]);
/// ```
pub fn elements<I: IntoIterator>(iterable: I) -> Elements<I::IntoIter> {
    Elements {
        source: iterable.into_iter(),
        lookahead: Lookahead::new(),
    }
}

impl<I: Iterator> LazyIterator for Elements<I> {
    type Item = I::Item;

    fn lookahead(&self) -> &Lookahead<Self::Item> {
        &self.lookahead
    }

    fn lookahead_mut(&mut self) -> &mut Lookahead<Self::Item> {
        &mut self.lookahead
    }

    fn advance(&mut self) {
        if self.lookahead.needs_advance()
            && let Some(element) = self.source.next()
        {
            self.lookahead.fill(element);
        }
    }
}

/// A [`LazyIterator`] that never yields.
///
/// Created by [`empty`].
pub struct Empty<T> {
    lookahead: Lookahead<T>,
}

/// Returns an iterator that is exhausted from the start.
#[must_use]
pub const fn empty<T>() -> Empty<T> {
    Empty {
        lookahead: Lookahead::new(),
    }
}

impl<T> LazyIterator for Empty<T> {
    type Item = T;

    fn lookahead(&self) -> &Lookahead<T> {
        &self.lookahead
    }

    fn lookahead_mut(&mut self) -> &mut Lookahead<T> {
        &mut self.lookahead
    }

    fn advance(&mut self) {}
}

// =============================================================================
// Standard Iterator Bridge
// =============================================================================

/// A [`std::iter::Iterator`] over a [`LazyIterator`].
///
/// Created by [`LazyIterator::into_std`].
pub struct IntoStd<I> {
    inner: I,
}

impl<I> IntoStd<I> {
    /// Returns the wrapped lazy iterator.
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: LazyIterator> Iterator for IntoStd<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        LazyIterator::next(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Yields its element once.
    struct Singleton<T> {
        element: Option<T>,
        lookahead: Lookahead<T>,
    }

    impl<T> Singleton<T> {
        fn new(element: T) -> Self {
            Self {
                element: Some(element),
                lookahead: Lookahead::new(),
            }
        }
    }

    impl<T> LazyIterator for Singleton<T> {
        type Item = T;

        fn lookahead(&self) -> &Lookahead<T> {
            &self.lookahead
        }

        fn lookahead_mut(&mut self) -> &mut Lookahead<T> {
            &mut self.lookahead
        }

        fn advance(&mut self) {
            if self.lookahead.needs_advance()
                && let Some(element) = self.element.take()
            {
                self.lookahead.fill(element);
            }
        }
    }

    #[rstest]
    fn test_lookahead_starts_empty() {
        let lookahead: Lookahead<i32> = Lookahead::default();
        assert!(lookahead.needs_advance());
        assert_eq!(lookahead.pending(), None);
    }

    #[rstest]
    fn test_lookahead_fill_and_take() {
        let mut lookahead = Lookahead::new();
        lookahead.fill(7);
        assert!(!lookahead.needs_advance());
        assert_eq!(lookahead.pending(), Some(&7));
        assert_eq!(lookahead.take(), Some(7));
        assert!(lookahead.needs_advance());
    }

    #[rstest]
    fn test_map_over_singleton_is_lazy_and_stable() {
        let mut iterator = Singleton::new(2).map(|number| f64::from(number * number));

        assert!(iterator.has_next());
        assert!(iterator.has_next());
        assert_eq!(iterator.peek(), Some(&4.0));
        assert_eq!(iterator.peek(), Some(&4.0));
        assert!(iterator.has_next());
        assert_eq!(iterator.next(), Some(4.0));
        assert!(!iterator.has_next());
        assert!(!iterator.has_next());
        assert_eq!(iterator.next(), None);
    }

    #[rstest]
    fn test_each_visits_until_exhausted() {
        let mut visited = Vec::new();
        let exhausted = Singleton::new(42).each(|element| {
            visited.push(element);
            true
        });
        assert!(exhausted);
        assert_eq!(visited, vec![42]);
    }

    #[rstest]
    fn test_each_on_empty_never_calls_visitor() {
        let mut called = false;
        let exhausted = empty::<i32>().each(|_| {
            called = true;
            true
        });
        assert!(exhausted);
        assert!(!called);
    }

    #[rstest]
    fn test_count_drains() {
        assert_eq!(elements(0..5).count(), 5);
        assert_eq!(empty::<u8>().count(), 0);
    }

    #[rstest]
    fn test_boxed_pipeline() {
        let boxed: Box<dyn LazyIterator<Item = i32>> = Box::new(elements(vec![1, 2, 3]));
        assert_eq!(boxed.exclude(|number| *number == 2).to_vec(), vec![1, 3]);
    }

    #[rstest]
    fn test_into_std_round_trips() {
        let iterator = elements(vec![5, 6]).into_std();
        let collected: Vec<i32> = iterator.collect();
        assert_eq!(collected, vec![5, 6]);
    }

    #[rstest]
    fn test_skip_while_stops_at_first_failure() {
        let mut iterator = elements(vec![1, 3, 4, 5]).skip_while(|number| number % 2 == 1);
        assert_eq!(iterator.peek(), Some(&4));
        assert_eq!(iterator.to_vec(), vec![4, 5]);
    }
}
