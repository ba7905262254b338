// SPDX-License-Identifier: MPL-2.0
//! Scoped busy claims.

use super::counter::BusyCounter;
use std::sync::Arc;

/// Anything that can take and release a busy claim.
///
/// Implemented by the bare [`BusyCounter`] and by
/// [`FeedbackContext`](crate::FeedbackContext), which also republishes its
/// snapshot on every change.
pub trait BusySource {
    fn enter_busy(&self);
    fn exit_busy(&self);
}

impl BusySource for BusyCounter {
    fn enter_busy(&self) {
        self.enter();
    }

    fn exit_busy(&self) {
        self.exit();
    }
}

impl<S: BusySource + ?Sized> BusySource for &S {
    fn enter_busy(&self) {
        (**self).enter_busy();
    }

    fn exit_busy(&self) {
        (**self).exit_busy();
    }
}

impl<S: BusySource + ?Sized> BusySource for Arc<S> {
    fn enter_busy(&self) {
        (**self).enter_busy();
    }

    fn exit_busy(&self) {
        (**self).exit_busy();
    }
}

/// Holds one busy claim for as long as it lives.
///
/// The claim is taken in [`acquire`](Self::acquire) and released exactly
/// once: on [`release`](Self::release), or on drop if the scope ends any
/// other way (early return, `?`, panic unwinding, a dropped future).
#[derive(Debug)]
#[must_use = "the busy claim is released as soon as the guard is dropped"]
pub struct BusyGuard<S: BusySource> {
    source: S,
    held: bool,
}

impl<S: BusySource> BusyGuard<S> {
    /// Takes a busy claim on `source`.
    pub fn acquire(source: S) -> Self {
        source.enter_busy();
        Self { source, held: true }
    }

    /// Releases the claim now rather than at end of scope.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if std::mem::take(&mut self.held) {
            self.source.exit_busy();
        }
    }
}

impl<S: BusySource> Drop for BusyGuard<S> {
    fn drop(&mut self) {
        self.release_once();
    }
}
