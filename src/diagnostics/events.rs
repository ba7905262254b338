// SPDX-License-Identifier: MPL-2.0
//! Feedback event types.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::confirmation::ConfirmationId;
use crate::notifications::{NotificationId, Severity};

/// A feedback event with the moment it was recorded.
#[derive(Debug, Clone)]
pub struct FeedbackEvent {
    /// When the event occurred (monotonic clock for relative offsets)
    pub timestamp: Instant,
    /// What happened
    pub kind: FeedbackEventKind,
}

impl FeedbackEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(kind: FeedbackEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// What a coordination operation did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedbackEventKind {
    // ==========================================================================
    // Notifications
    // ==========================================================================
    NotificationPosted {
        id: NotificationId,
        severity: Severity,
    },
    NotificationExpired {
        id: NotificationId,
    },
    NotificationsCleared {
        count: usize,
    },
    /// The runtime has no timer driver; expiry falls back to sweeps.
    ExpiryTimersUnavailable,

    // ==========================================================================
    // Confirmations
    // ==========================================================================
    ConfirmationRequested {
        id: ConfirmationId,
    },
    ConfirmationSettled {
        id: ConfirmationId,
        confirmed: bool,
    },
    /// A pending request was auto-cancelled by a newer one.
    ConfirmationSuperseded {
        cancelled: ConfirmationId,
        installed: ConfirmationId,
    },
    /// A request was turned away because another was pending.
    ConfirmationRefused {
        refused: ConfirmationId,
        pending: ConfirmationId,
    },
    /// `confirm`/`cancel` arrived with nothing (or something else) pending.
    StraySettle {
        confirmed: bool,
    },

    // ==========================================================================
    // Busy
    // ==========================================================================
    BusyEntered {
        count: usize,
    },
    BusyExited {
        count: usize,
    },
    /// `exit_busy` without a matching `enter_busy`.
    BusyUnderflow,

    /// Everything was reset (test harnesses, session teardown).
    Reset,
}

impl FeedbackEventKind {
    /// Returns whether the event records a caller mistake.
    #[must_use]
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            Self::ConfirmationSuperseded { .. }
                | Self::ConfirmationRefused { .. }
                | Self::StraySettle { .. }
                | Self::BusyUnderflow
                | Self::ExpiryTimersUnavailable
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misuse_classification() {
        assert!(FeedbackEventKind::BusyUnderflow.is_misuse());
        assert!(FeedbackEventKind::StraySettle { confirmed: true }.is_misuse());
        assert!(!FeedbackEventKind::BusyEntered { count: 1 }.is_misuse());
        assert!(!FeedbackEventKind::Reset.is_misuse());
        assert!(FeedbackEventKind::ExpiryTimersUnavailable.is_misuse());
    }

    #[test]
    fn kind_serializes_with_type_tag() {
        let kind = FeedbackEventKind::BusyExited { count: 2 };
        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert_eq!(json, r#"{"type":"busy_exited","count":2}"#);
    }

    #[test]
    fn notification_event_round_trips() {
        let kind = FeedbackEventKind::NotificationPosted {
            id: NotificationId::new(),
            severity: Severity::Error,
        };
        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert!(json.contains(r#""severity":"error""#));

        let parsed: FeedbackEventKind =
            serde_json::from_str(&json).expect("deserialization should succeed");
        assert_eq!(parsed, kind);
    }
}
