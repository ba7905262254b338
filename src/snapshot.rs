// SPDX-License-Identifier: MPL-2.0
//! Read-only view handed to the presentation layer.

use crate::confirmation::PendingConfirmation;
use crate::notifications::Notification;

/// Everything the presentation layer needs to render feedback.
///
/// Rebuilt and republished after every mutation of the context; the
/// presentation layer never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackSnapshot {
    /// Live notifications, oldest first.
    pub notifications: Vec<Notification>,
    /// The confirmation waiting for an answer, if any.
    pub confirmation: Option<PendingConfirmation>,
    /// Outstanding busy claims.
    pub busy_count: usize,
    /// Incremented on every publish; lets subscribers skip duplicate renders.
    pub revision: u64,
}

impl FeedbackSnapshot {
    /// Returns whether the busy indicator should be shown.
    #[must_use]
    pub fn show_busy(&self) -> bool {
        self.busy_count > 0
    }
}
