// SPDX-License-Identifier: MPL-2.0
//! Feedback newtypes.
//!
//! Type-safe wrappers that keep configuration values inside their valid
//! ranges. Out-of-range input is clamped, never rejected.

use std::time::Duration;

// =============================================================================
// Notification TTL
// =============================================================================

/// Notification lifetime bounds, in milliseconds.
pub mod ttl_bounds {
    /// Shortest lifetime a toast may have.
    pub const MIN_MS: u64 = 500;
    /// Longest lifetime a toast may have.
    pub const MAX_MS: u64 = 60_000;
    /// Lifetime used when nothing is configured (3.5 s).
    pub const DEFAULT_MS: u64 = 3_500;
}

/// How long a notification stays visible after it is posted.
///
/// The same value applies to every notification of a context; there is
/// no per-call override.
///
/// ```
/// use feedback_hub::domain::feedback::NotificationTtl;
///
/// assert_eq!(NotificationTtl::default().as_millis(), 3_500);
/// assert_eq!(NotificationTtl::from_millis(10).as_millis(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTtl(u64);

impl NotificationTtl {
    /// Creates a TTL from milliseconds, clamping to the valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(ttl_bounds::MIN_MS, ttl_bounds::MAX_MS))
    }

    /// Returns the TTL in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the TTL as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for NotificationTtl {
    fn default() -> Self {
        Self(ttl_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Buffer Capacity
// =============================================================================

/// Diagnostics ring bounds (100 to 10000 events).
pub mod buffer_capacity_bounds {
    /// Minimum buffer capacity.
    pub const MIN: usize = 100;
    /// Maximum buffer capacity.
    pub const MAX: usize = 10_000;
    /// Default buffer capacity.
    pub const DEFAULT: usize = 1_000;
}

/// Number of diagnostic events retained before the oldest is evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Creates a capacity, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================
