// SPDX-License-Identifier: MPL-2.0
//! Confirmation request records and the single-use answer channel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Unique identifier for a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationId(u64);

impl ConfirmationId {
    /// Creates a new unique confirmation ID.
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

impl Default for ConfirmationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConfirmationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the caller wants the dialog to say.
///
/// Only the message is required; missing labels are filled in by the
/// broker's [`DefaultLabels`](super::DefaultLabels).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfirmationOptions {
    title: Option<String>,
    message: String,
    confirm_label: Option<String>,
    cancel_label: Option<String>,
}

impl ConfirmationOptions {
    /// Creates options with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Sets the dialog title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the affirmative button label.
    #[must_use]
    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = Some(label.into());
        self
    }

    /// Sets the dismissive button label.
    #[must_use]
    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn get_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn get_message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn get_confirm_label(&self) -> Option<&str> {
        self.confirm_label.as_deref()
    }

    #[must_use]
    pub fn get_cancel_label(&self) -> Option<&str> {
        self.cancel_label.as_deref()
    }
}

/// The pending request as the presentation layer should render it,
/// with default labels already substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub id: ConfirmationId,
    pub title: Option<String>,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

/// Single-use capability that settles one [`Confirmation`].
///
/// The first call to [`resolve`](Self::resolve) delivers the answer; every
/// later call does nothing. Dropping an unresolved resolver makes the
/// waiting side see `false`.
#[derive(Debug)]
pub struct Resolver {
    tx: Option<oneshot::Sender<bool>>,
}

impl Resolver {
    /// Creates a linked resolver / confirmation pair.
    #[must_use]
    pub fn channel(id: ConfirmationId) -> (Self, Confirmation) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, Confirmation { id, rx })
    }

    /// Delivers `confirmed` if this resolver has not been used yet.
    ///
    /// Returns `true` when this call settled the request. A caller that
    /// already dropped its [`Confirmation`] still counts as settled.
    pub fn resolve(&mut self, confirmed: bool) -> bool {
        match self.tx.take() {
            Some(tx) => {
                let _ = tx.send(confirmed);
                true
            }
            None => false,
        }
    }

    /// Returns whether the resolver has been consumed.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.tx.is_none()
    }
}

/// Awaitable answer to a confirmation request.
///
/// Resolves to `true` for confirm and `false` for cancel. It never fails:
/// if the request is dropped without an answer it resolves to `false`.
#[derive(Debug)]
#[must_use = "a confirmation only reports the user's answer when awaited"]
pub struct Confirmation {
    id: ConfirmationId,
    rx: oneshot::Receiver<bool>,
}

impl Confirmation {
    /// Returns the id of the request this handle answers.
    #[must_use]
    pub fn id(&self) -> ConfirmationId {
        self.id
    }

    /// Creates a confirmation that is already settled with `confirmed`.
    pub(crate) fn settled(id: ConfirmationId, confirmed: bool) -> Self {
        let (mut resolver, confirmation) = Resolver::channel(id);
        resolver.resolve(confirmed);
        confirmation
    }
}

impl Future for Confirmation {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|answer| answer.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_ids_are_unique() {
        assert_ne!(ConfirmationId::new(), ConfirmationId::new());
    }

    #[test]
    fn options_builder_sets_fields() {
        let options = ConfirmationOptions::new("Remove user?")
            .title("Users")
            .confirm_label("Remove")
            .cancel_label("Keep");

        assert_eq!(options.get_message(), "Remove user?");
        assert_eq!(options.get_title(), Some("Users"));
        assert_eq!(options.get_confirm_label(), Some("Remove"));
        assert_eq!(options.get_cancel_label(), Some("Keep"));
    }

    #[test]
    fn options_without_title_are_valid() {
        let options = ConfirmationOptions::new("Delete?");
        assert!(options.get_title().is_none());
        assert!(options.get_confirm_label().is_none());
    }

    #[tokio::test]
    async fn resolver_delivers_first_answer_only() {
        let (mut resolver, confirmation) = Resolver::channel(ConfirmationId::new());

        assert!(resolver.resolve(false));
        assert!(resolver.is_settled());
        assert!(!resolver.resolve(true));

        assert!(!confirmation.await);
    }

    #[tokio::test]
    async fn dropped_resolver_reads_as_cancel() {
        let (resolver, confirmation) = Resolver::channel(ConfirmationId::new());
        drop(resolver);
        assert!(!confirmation.await);
    }

    #[tokio::test]
    async fn resolve_after_caller_dropped_still_settles() {
        let (mut resolver, confirmation) = Resolver::channel(ConfirmationId::new());
        drop(confirmation);
        assert!(resolver.resolve(true));
        assert!(!resolver.resolve(true));
    }

    #[tokio::test]
    async fn settled_confirmation_is_ready() {
        let id = ConfirmationId::new();
        let confirmation = Confirmation::settled(id, true);
        assert_eq!(confirmation.id(), id);
        assert!(confirmation.await);
    }
}
