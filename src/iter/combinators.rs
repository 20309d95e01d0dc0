//! Combinators wrapping an upstream [`LazyIterator`].
//!
//! Each combinator owns its upstream iterator and pulls from it only when
//! its own caller asks for an element.

use super::{LazyIterator, Lookahead};

// =============================================================================
// Map
// =============================================================================

/// Transforms each upstream element.
///
/// Created by [`LazyIterator::map`].
pub struct Map<I: LazyIterator, U, F> {
    upstream: I,
    transform: F,
    lookahead: Lookahead<U>,
}

impl<I: LazyIterator, U, F> Map<I, U, F> {
    pub(super) const fn new(upstream: I, transform: F) -> Self {
        Self {
            upstream,
            transform,
            lookahead: Lookahead::new(),
        }
    }
}

impl<I, U, F> LazyIterator for Map<I, U, F>
where
    I: LazyIterator,
    F: FnMut(I::Item) -> U,
{
    type Item = U;

    fn lookahead(&self) -> &Lookahead<U> {
        &self.lookahead
    }

    fn lookahead_mut(&mut self) -> &mut Lookahead<U> {
        &mut self.lookahead
    }

    fn advance(&mut self) {
        if self.lookahead.needs_advance()
            && let Some(element) = self.upstream.next()
        {
            self.lookahead.fill((self.transform)(element));
        }
    }
}

// =============================================================================
// Select / Exclude
// =============================================================================

/// Passes through the upstream elements satisfying a predicate.
///
/// Created by [`LazyIterator::select`].
pub struct Select<I: LazyIterator, F> {
    upstream: I,
    predicate: F,
    lookahead: Lookahead<I::Item>,
}

impl<I: LazyIterator, F> Select<I, F> {
    pub(super) const fn new(upstream: I, predicate: F) -> Self {
        Self {
            upstream,
            predicate,
            lookahead: Lookahead::new(),
        }
    }
}

impl<I, F> LazyIterator for Select<I, F>
where
    I: LazyIterator,
    F: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn lookahead(&self) -> &Lookahead<I::Item> {
        &self.lookahead
    }

    fn lookahead_mut(&mut self) -> &mut Lookahead<I::Item> {
        &mut self.lookahead
    }

    fn advance(&mut self) {
        if !self.lookahead.needs_advance() {
            return;
        }
        while let Some(element) = self.upstream.next() {
            if (self.predicate)(&element) {
                self.lookahead.fill(element);
                return;
            }
        }
    }
}

/// Passes through the upstream elements failing a predicate.
///
/// Created by [`LazyIterator::exclude`].
pub struct Exclude<I: LazyIterator, F> {
    upstream: I,
    predicate: F,
    lookahead: Lookahead<I::Item>,
}

impl<I: LazyIterator, F> Exclude<I, F> {
    pub(super) const fn new(upstream: I, predicate: F) -> Self {
        Self {
            upstream,
            predicate,
            lookahead: Lookahead::new(),
        }
    }
}

impl<I, F> LazyIterator for Exclude<I, F>
where
    I: LazyIterator,
    F: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn lookahead(&self) -> &Lookahead<I::Item> {
        &self.lookahead
    }

    fn lookahead_mut(&mut self) -> &mut Lookahead<I::Item> {
        &mut self.lookahead
    }

    fn advance(&mut self) {
        if !self.lookahead.needs_advance() {
            return;
        }
        while let Some(element) = self.upstream.next() {
            if !(self.predicate)(&element) {
                self.lookahead.fill(element);
                return;
            }
        }
    }
}

// =============================================================================
// Take / TakeWhile
// =============================================================================

/// Yields at most a fixed number of upstream elements.
///
/// Created by [`LazyIterator::take`].
pub struct Take<I: LazyIterator> {
    upstream: I,
    taken: usize,
    limit: usize,
    lookahead: Lookahead<I::Item>,
}

impl<I: LazyIterator> Take<I> {
    pub(super) const fn new(upstream: I, limit: usize) -> Self {
        Self {
            upstream,
            taken: 0,
            limit,
            lookahead: Lookahead::new(),
        }
    }
}

impl<I: LazyIterator> LazyIterator for Take<I> {
    type Item = I::Item;

    fn lookahead(&self) -> &Lookahead<I::Item> {
        &self.lookahead
    }

    fn lookahead_mut(&mut self) -> &mut Lookahead<I::Item> {
        &mut self.lookahead
    }

    fn advance(&mut self) {
        if self.lookahead.needs_advance()
            && self.taken < self.limit
            && let Some(element) = self.upstream.next()
        {
            self.lookahead.fill(element);
            self.taken += 1;
        }
    }
}

/// Yields upstream elements until the first one failing a predicate.
///
/// The failing element is left unconsumed in the upstream iterator.
///
/// Created by [`LazyIterator::take_while`].
pub struct TakeWhile<I: LazyIterator, F> {
    upstream: I,
    predicate: F,
    stopped: bool,
    lookahead: Lookahead<I::Item>,
}

impl<I: LazyIterator, F> TakeWhile<I, F> {
    pub(super) const fn new(upstream: I, predicate: F) -> Self {
        Self {
            upstream,
            predicate,
            stopped: false,
            lookahead: Lookahead::new(),
        }
    }
}

impl<I, F> LazyIterator for TakeWhile<I, F>
where
    I: LazyIterator,
    F: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn lookahead(&self) -> &Lookahead<I::Item> {
        &self.lookahead
    }

    fn lookahead_mut(&mut self) -> &mut Lookahead<I::Item> {
        &mut self.lookahead
    }

    fn advance(&mut self) {
        if self.stopped || !self.lookahead.needs_advance() {
            return;
        }
        let passes = match self.upstream.peek() {
            Some(element) => (self.predicate)(element),
            None => return,
        };
        if !passes {
            self.stopped = true;
        } else if let Some(element) = self.upstream.next() {
            self.lookahead.fill(element);
        }
    }
}
