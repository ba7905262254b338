// SPDX-License-Identifier: MPL-2.0
//! The coordination context consumers hold.
//!
//! One [`FeedbackContext`] is built at startup and cloned into every
//! consumer; clones share the same notification queue, confirmation broker
//! and busy counter. Tests build a fresh context each.
//!
//! After each mutation the context rebuilds a [`FeedbackSnapshot`] and
//! publishes it on a `tokio::sync::watch` channel. Do not hold a borrow of
//! that channel while calling back into the context.

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::time::Instant;

use crate::busy::{BusyCounter, BusyGuard, BusySource, Release};
use crate::config::Config;
use crate::confirmation::{
    self, Admission, Broker, Confirmation, ConfirmationId, ConfirmationOptions,
    ConfirmationState, PendingConfirmation,
};
use crate::diagnostics::{DiagnosticsCollector, DiagnosticsHandle, FeedbackEventKind};
use crate::notifications::{self, Notification, NotificationId, NotificationQueue, Severity};
use crate::snapshot::FeedbackSnapshot;

/// Messages the host's event loop routes to the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Notification(notifications::Message),
    Confirmation(confirmation::Message),
}

#[derive(Debug)]
struct Shared {
    notifications: Mutex<NotificationQueue>,
    confirmation: Mutex<Broker>,
    busy: BusyCounter,
    diagnostics: Option<DiagnosticsHandle>,
    snapshot_tx: watch::Sender<FeedbackSnapshot>,
    /// Set once a runtime without a timer driver has been seen.
    timers_unavailable: AtomicBool,
}

/// Shared handle to the notification queue, confirmation broker and busy
/// counter.
///
/// Every operation is total: misuse is absorbed and reported to the
/// diagnostics handle, never raised.
#[derive(Debug, Clone)]
pub struct FeedbackContext {
    shared: Arc<Shared>,
}

impl FeedbackContext {
    /// Builds a context without diagnostics.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::build(config, None)
    }

    /// Builds a context that reports every operation to `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(config: &Config, diagnostics: DiagnosticsHandle) -> Self {
        Self::build(config, Some(diagnostics))
    }

    /// Builds a context with diagnostics wired as the `[diagnostics]`
    /// section asks.
    ///
    /// The collector is returned when diagnostics are enabled; the host owns
    /// it and drains it with
    /// [`process_pending`](DiagnosticsCollector::process_pending).
    #[must_use]
    pub fn from_config(config: &Config) -> (Self, Option<DiagnosticsCollector>) {
        let collector = DiagnosticsCollector::from_config(&config.diagnostics);
        let handle = collector.as_ref().map(DiagnosticsCollector::handle);
        (Self::build(config, handle), collector)
    }

    fn build(config: &Config, diagnostics: Option<DiagnosticsHandle>) -> Self {
        let (snapshot_tx, _) = watch::channel(FeedbackSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                notifications: Mutex::new(NotificationQueue::new(config.notifications.ttl())),
                confirmation: Mutex::new(Broker::from_config(&config.confirmation)),
                busy: BusyCounter::new(),
                diagnostics,
                snapshot_tx,
                timers_unavailable: AtomicBool::new(false),
            }),
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Shows a toast that expires on its own after the configured TTL.
    ///
    /// Inside a tokio runtime with its timer driver enabled, a one-shot timer
    /// removes it. Otherwise expired items are swept whenever the queue is
    /// read ([`active_notifications`](Self::active_notifications),
    /// [`snapshot`](Self::snapshot)) or on [`tick`](Self::tick); hosts that
    /// render from [`subscribe`](Self::subscribe) should call `tick`
    /// periodically.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        let (id, expires_at) = {
            let mut queue = self.notifications();
            let notification = Notification::new(severity, message, queue.ttl());
            let expires_at = notification.expires_at();
            (queue.insert(notification), expires_at)
        };

        self.log(FeedbackEventKind::NotificationPosted { id, severity });
        self.schedule_expiry(id, expires_at);
        self.publish();
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.notify(message, Severity::Success);
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.notify(message, Severity::Error);
    }

    /// Returns the live notifications, oldest first.
    ///
    /// Sweeps expired items first.
    #[must_use]
    pub fn active_notifications(&self) -> Vec<Notification> {
        self.tick();
        self.notifications().snapshot()
    }

    /// Removes one notification by id.
    ///
    /// Safe to call any number of times; only the first call for a live id
    /// has an effect.
    pub fn expire_notification(&self, id: NotificationId) -> bool {
        let removed = self.notifications().expire(id).map(|n| n.id());
        self.finish_expiry(removed.as_slice()) > 0
    }

    /// Removes every notification whose TTL has elapsed.
    ///
    /// Returns how many were removed.
    pub fn tick(&self) -> usize {
        let expired = self.notifications().expire_due(Instant::now());
        self.finish_expiry(&expired)
    }

    fn finish_expiry(&self, expired: &[NotificationId]) -> usize {
        for &id in expired {
            self.log(FeedbackEventKind::NotificationExpired { id });
        }
        if !expired.is_empty() {
            self.publish();
        }
        expired.len()
    }

    fn schedule_expiry(&self, id: NotificationId, at: Instant) {
        if self.shared.timers_unavailable.load(Ordering::Acquire) {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        // Building the sleep panics when the runtime lacks a timer driver.
        // Build it here, not in the task, so that case is caught once.
        let Ok(sleep) = panic::catch_unwind(move || tokio::time::sleep_until(at)) else {
            if !self.shared.timers_unavailable.swap(true, Ordering::AcqRel) {
                self.log(FeedbackEventKind::ExpiryTimersUnavailable);
            }
            return;
        };
        let shared = Arc::downgrade(&self.shared);
        runtime.spawn(async move {
            sleep.await;
            if let Some(shared) = shared.upgrade() {
                FeedbackContext { shared }.expire_notification(id);
            }
        });
    }

    // =========================================================================
    // Confirmations
    // =========================================================================

    /// Asks the user a yes/no question.
    ///
    /// Returns immediately; await the result to learn the answer. If another
    /// request is pending, the configured
    /// [`SingleFlightPolicy`](crate::confirmation::SingleFlightPolicy) decides
    /// which one survives.
    pub fn request_confirmation(&self, options: ConfirmationOptions) -> Confirmation {
        let (confirmation, admission) = self.broker().request(options);

        match admission {
            Admission::Installed(id) => {
                self.log(FeedbackEventKind::ConfirmationRequested { id });
            }
            Admission::Superseded {
                installed,
                cancelled,
            } => {
                self.log(FeedbackEventKind::ConfirmationSuperseded {
                    cancelled,
                    installed,
                });
                self.log(FeedbackEventKind::ConfirmationSettled {
                    id: cancelled,
                    confirmed: false,
                });
                self.log(FeedbackEventKind::ConfirmationRequested { id: installed });
            }
            Admission::Refused { refused, pending } => {
                self.log(FeedbackEventKind::ConfirmationRefused { refused, pending });
                return confirmation;
            }
        }

        self.publish();
        confirmation
    }

    /// Returns the pending request, labels resolved, for rendering.
    #[must_use]
    pub fn pending_confirmation(&self) -> Option<PendingConfirmation> {
        self.broker().pending()
    }

    #[must_use]
    pub fn confirmation_state(&self) -> ConfirmationState {
        self.broker().state()
    }

    /// Answers the pending request with "yes". No-op if nothing is pending.
    pub fn confirm(&self) -> bool {
        self.settle(None, true)
    }

    /// Answers the pending request with "no". No-op if nothing is pending.
    pub fn cancel(&self) -> bool {
        self.settle(None, false)
    }

    /// Answers "yes" only if `id` is still the pending request.
    pub fn confirm_request(&self, id: ConfirmationId) -> bool {
        self.settle(Some(id), true)
    }

    /// Answers "no" only if `id` is still the pending request.
    pub fn cancel_request(&self, id: ConfirmationId) -> bool {
        self.settle(Some(id), false)
    }

    fn settle(&self, target: Option<ConfirmationId>, confirmed: bool) -> bool {
        let settled = {
            let mut broker = self.broker();
            match target {
                Some(id) => broker.settle_request(id, confirmed).then_some(id),
                None => broker.settle(confirmed),
            }
        };
        self.finish_settle(settled, confirmed)
    }

    fn finish_settle(&self, settled: Option<ConfirmationId>, confirmed: bool) -> bool {
        match settled {
            Some(id) => {
                self.log(FeedbackEventKind::ConfirmationSettled { id, confirmed });
                self.publish();
                true
            }
            None => {
                self.log(FeedbackEventKind::StraySettle { confirmed });
                false
            }
        }
    }

    // =========================================================================
    // Busy
    // =========================================================================

    /// Takes a busy claim. Pair with exactly one [`exit_busy`](Self::exit_busy),
    /// or use [`busy_scope`](Self::busy_scope).
    pub fn enter_busy(&self) {
        let count = self.shared.busy.enter();
        self.log(FeedbackEventKind::BusyEntered { count });
        self.publish();
    }

    /// Releases a busy claim. An unmatched call leaves the count at zero.
    pub fn exit_busy(&self) {
        match self.shared.busy.exit() {
            Release::Released { remaining } => {
                self.log(FeedbackEventKind::BusyExited { count: remaining });
                self.publish();
            }
            Release::Underflow => self.log(FeedbackEventKind::BusyUnderflow),
        }
    }

    /// Takes a busy claim released when the returned guard drops.
    pub fn busy_scope(&self) -> BusyGuard<FeedbackContext> {
        BusyGuard::acquire(self.clone())
    }

    #[must_use]
    pub fn show_busy(&self) -> bool {
        self.shared.busy.is_busy()
    }

    #[must_use]
    pub fn busy_count(&self) -> usize {
        self.shared.busy.count()
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Returns the current snapshot, after sweeping expired notifications.
    #[must_use]
    pub fn snapshot(&self) -> FeedbackSnapshot {
        self.tick();
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Subscribes to snapshot updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FeedbackSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Routes a message from the host's event loop.
    pub fn handle_message(&self, message: Message) {
        match message {
            Message::Notification(message) => {
                let expired = self.notifications().handle_message(message);
                self.finish_expiry(&expired);
            }
            Message::Confirmation(message) => {
                let settled = self.broker().handle_message(message);
                self.finish_settle(settled, message == confirmation::Message::Confirm);
            }
        }
    }

    /// Clears notifications and cancels any pending confirmation.
    ///
    /// Busy claims are left alone; their holders still owe the release.
    pub fn reset(&self) {
        let cleared = self.notifications().clear();
        let abandoned = self.broker().cancel();

        if cleared > 0 {
            self.log(FeedbackEventKind::NotificationsCleared { count: cleared });
        }
        if let Some(id) = abandoned {
            self.log(FeedbackEventKind::ConfirmationSettled {
                id,
                confirmed: false,
            });
        }
        self.log(FeedbackEventKind::Reset);
        self.publish();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn notifications(&self) -> MutexGuard<'_, NotificationQueue> {
        self.shared
            .notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn broker(&self) -> MutexGuard<'_, Broker> {
        self.shared
            .confirmation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn log(&self, kind: FeedbackEventKind) {
        if let Some(diagnostics) = &self.shared.diagnostics {
            diagnostics.log(kind);
        }
    }

    /// Rebuilds the snapshot under the channel's write lock, so concurrent
    /// publishers cannot leave an older view in place.
    fn publish(&self) {
        self.shared.snapshot_tx.send_modify(|snapshot| {
            snapshot.notifications = self.notifications().snapshot();
            snapshot.confirmation = self.broker().pending();
            snapshot.busy_count = self.shared.busy.count();
            snapshot.revision += 1;
        });
    }
}

impl Default for FeedbackContext {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl BusySource for FeedbackContext {
    fn enter_busy(&self) {
        FeedbackContext::enter_busy(self);
    }

    fn exit_busy(&self) {
        FeedbackContext::exit_busy(self);
    }
}
