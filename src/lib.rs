// SPDX-License-Identifier: MPL-2.0
//! `feedback_hub` coordinates user-facing feedback for a whole application.
//!
//! Independent call sites (route guards, form submitters, list loaders) use
//! one shared [`FeedbackContext`] to:
//!
//! - post toast notifications that expire on their own ([`notifications`]),
//! - ask blocking yes/no questions and await the answer ([`confirmation`]),
//! - hold the shared busy indicator ([`busy`]).
//!
//! The presentation layer subscribes to a [`FeedbackSnapshot`] and answers
//! confirmations; it never mutates state otherwise.
//!
//! ```
//! use feedback_hub::{FeedbackContext, confirmation::ConfirmationOptions};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let feedback = FeedbackContext::default();
//!
//! let loading = feedback.busy_scope();
//! assert!(feedback.show_busy());
//! drop(loading);
//!
//! let answer = feedback.request_confirmation(ConfirmationOptions::new("Delete 3 items?"));
//! feedback.confirm();
//! if answer.await {
//!     feedback.notify_success("Deleted");
//! }
//! assert_eq!(feedback.snapshot().notifications.len(), 1);
//! # });
//! ```

pub mod busy;
pub mod config;
pub mod confirmation;
pub mod context;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notifications;
pub mod snapshot;

pub use context::FeedbackContext;
pub use snapshot::FeedbackSnapshot;
