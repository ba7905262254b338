// SPDX-License-Identifier: MPL-2.0
//! Active notification set and its expiry rules.
//!
//! The queue keeps every live notification in insertion order (oldest
//! first). Removal is by identity only, so a late or duplicated expiry
//! signal can never take out a different item.

use super::notification::{Notification, NotificationId, Severity};
use crate::domain::feedback::NotificationTtl;
use std::collections::VecDeque;
use tokio::time::Instant;

/// Messages that drive expiry from the host's event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// A per-notification timer fired.
    Expire(NotificationId),
    /// Periodic sweep for hosts that do not run per-item timers.
    Tick,
}

/// Insertion-ordered set of visible notifications.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    active: VecDeque<Notification>,
    ttl: NotificationTtl,
}

impl NotificationQueue {
    /// Creates an empty queue whose notifications live for `ttl`.
    #[must_use]
    pub fn new(ttl: NotificationTtl) -> Self {
        Self {
            active: VecDeque::new(),
            ttl,
        }
    }

    /// Returns the lifetime applied to every posted notification.
    #[must_use]
    pub fn ttl(&self) -> NotificationTtl {
        self.ttl
    }

    /// Posts a new notification stamped with the current time.
    pub fn post(&mut self, severity: Severity, message: impl Into<String>) -> NotificationId {
        self.post_at(severity, message, Instant::now())
    }

    /// Posts a new notification created at `now`.
    pub fn post_at(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        now: Instant,
    ) -> NotificationId {
        self.insert(Notification::with_created_at(severity, message, self.ttl, now))
    }

    /// Appends an already-built notification.
    pub fn insert(&mut self, notification: Notification) -> NotificationId {
        let id = notification.id();
        self.active.push_back(notification);
        id
    }

    /// Looks up a live notification by id.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.active.iter().find(|n| n.id() == id)
    }

    /// Removes the notification with `id`.
    ///
    /// Returns `None` when it is already gone (expired earlier, or the queue
    /// was cleared); that case is a no-op, not an error.
    pub fn expire(&mut self, id: NotificationId) -> Option<Notification> {
        let pos = self.active.iter().position(|n| n.id() == id)?;
        self.active.remove(pos)
    }

    /// Removes every notification whose lifetime has elapsed at `now`.
    ///
    /// Returns the ids that were removed, oldest first.
    pub fn expire_due(&mut self, now: Instant) -> Vec<NotificationId> {
        let mut expired = Vec::new();
        self.active.retain(|n| {
            if n.is_expired_at(now) {
                expired.push(n.id());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Handles an expiry message.
    ///
    /// Returns the ids that were actually removed.
    pub fn handle_message(&mut self, message: Message) -> Vec<NotificationId> {
        match message {
            Message::Expire(id) => self.expire(id).map(|n| n.id()).into_iter().collect(),
            Message::Tick => self.expire_due(Instant::now()),
        }
    }

    /// Returns the live notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter()
    }

    /// Returns an owned copy of the live notifications, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.active.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Drops every live notification, returning how many were removed.
    ///
    /// Timers still pending for the removed ids become no-ops.
    pub fn clear(&mut self) -> usize {
        let removed = self.active.len();
        self.active.clear();
        removed
    }
}
