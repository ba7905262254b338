// SPDX-License-Identifier: MPL-2.0
//! Floor-at-zero busy reference counter.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Result of releasing one busy claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// A claim was released; `remaining` claims are still outstanding.
    Released { remaining: usize },
    /// There was no claim to release; the count stayed at zero.
    Underflow,
}

/// Process-wide count of outstanding busy claims.
///
/// `enter` and `exit` are single atomic operations, so interleaved
/// producers always sum correctly. The count never goes below zero: an
/// unmatched `exit` is absorbed and reported as [`Release::Underflow`].
#[derive(Debug, Default)]
pub struct BusyCounter {
    count: AtomicUsize,
}

impl BusyCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a claim and returns the new count.
    pub fn enter(&self) -> usize {
        self.count.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Removes a claim, saturating at zero.
    pub fn exit(&self) -> Release {
        match self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        {
            Ok(previous) => Release::Released {
                remaining: previous - 1,
            },
            Err(_) => Release::Underflow,
        }
    }

    /// Returns the number of outstanding claims.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Returns whether the busy indicator should be shown.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.count() > 0
    }
}
