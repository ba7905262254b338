// SPDX-License-Identifier: MPL-2.0
//! Bounded event storage.

use std::collections::VecDeque;

use crate::domain::feedback::BufferCapacity;

/// Ring of the most recent items; pushing past capacity evicts the oldest.
///
/// ```
/// use feedback_hub::diagnostics::EventRing;
///
/// let mut ring = EventRing::with_raw_capacity(2);
/// ring.push(1);
/// ring.push(2);
/// ring.push(3);
///
/// assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct EventRing<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> EventRing<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Creates a ring with an unvalidated capacity (at least 1).
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an item, returning the evicted one if the ring was full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Iterates oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
