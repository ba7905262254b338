// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use crate::domain::feedback::NotificationTtl;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Unique identifier for a notification.
///
/// Drawn from a process-wide sequence, so two notifications posted in the
/// same tick (or by two different queues) never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw sequence number.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Operation completed successfully.
    #[default]
    Success,
    /// Operation failed.
    Error,
}

/// A notification to be displayed to the user.
///
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message: String,
    created_at: Instant,
    expires_at: Instant,
}

impl Notification {
    /// Creates a notification stamped with the current time.
    pub fn new(severity: Severity, message: impl Into<String>, ttl: NotificationTtl) -> Self {
        Self::with_created_at(severity, message, ttl, Instant::now())
    }

    /// Creates a notification with an explicit creation time.
    pub fn with_created_at(
        severity: Severity,
        message: impl Into<String>,
        ttl: NotificationTtl,
        created_at: Instant,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message: message.into(),
            created_at,
            expires_at: created_at + ttl.as_duration(),
        }
    }

    /// Creates a success notification with the default TTL.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message, NotificationTtl::default())
    }

    /// Creates an error notification with the default TTL.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message, NotificationTtl::default())
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Returns whether the notification's lifetime has elapsed at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Returns how long the notification has left at `now` (zero once expired).
    #[must_use]
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}
