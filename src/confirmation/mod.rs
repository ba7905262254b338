// SPDX-License-Identifier: MPL-2.0
//! Blocking yes/no confirmations over cooperative suspension.
//!
//! A caller asks for confirmation and gets back a [`Confirmation`] future
//! immediately. The presentation layer reads the pending request, shows a
//! dialog, and answers through [`Broker::confirm`] or [`Broker::cancel`].
//! The answer reaches the caller through a single-use [`Resolver`], so a
//! request settles exactly once no matter how many answers arrive.
//!
//! # Components
//!
//! - [`request`] - Options, ids, the resolver and the awaitable handle
//! - [`broker`] - Single-flight `Broker` and its policy
//!
//! # Usage
//!
//! ```
//! use feedback_hub::confirmation::{Broker, ConfirmationOptions};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut broker = Broker::default();
//! let (answer, _) = broker.request(ConfirmationOptions::new("Delete this file?"));
//!
//! assert_eq!(broker.pending().map(|p| p.confirm_label), Some("Delete".to_string()));
//! broker.confirm();
//!
//! assert!(answer.await);
//! # });
//! ```

mod broker;
mod request;

pub use broker::{Admission, Broker, ConfirmationState, DefaultLabels, Message, SingleFlightPolicy};
pub use request::{
    Confirmation, ConfirmationId, ConfirmationOptions, PendingConfirmation, Resolver,
};
