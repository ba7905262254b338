// SPDX-License-Identifier: MPL-2.0
//! Toast notification queue.
//!
//! Notifications are fire-and-forget: a call site posts a message once it
//! knows the outcome of an operation, and the item disappears on its own
//! after the configured TTL. There is no manual dismissal and no
//! deduplication; posting the same text twice shows two toasts.
//!
//! # Components
//!
//! - [`notification`] - Immutable `Notification` record and `Severity`
//! - [`queue`] - `NotificationQueue` holding the active, insertion-ordered set
//!
//! # Usage
//!
//! ```
//! use feedback_hub::domain::feedback::NotificationTtl;
//! use feedback_hub::notifications::{NotificationQueue, Severity};
//!
//! let mut queue = NotificationQueue::new(NotificationTtl::default());
//! let saved = queue.post(Severity::Success, "Saved");
//! queue.post(Severity::Error, "Upload failed");
//!
//! assert_eq!(queue.len(), 2);
//! assert!(queue.expire(saved).is_some());
//! assert!(queue.expire(saved).is_none());
//! ```

mod notification;
mod queue;

pub use notification::{Notification, NotificationId, Severity};
pub use queue::{Message, NotificationQueue};
