// SPDX-License-Identifier: MPL-2.0
//! Single-flight confirmation broker.
//!
//! At most one request is pending at a time. What happens to a second
//! request is decided by the broker's [`SingleFlightPolicy`], fixed when the
//! broker is built.

use std::collections::HashSet;

use super::request::{
    Confirmation, ConfirmationId, ConfirmationOptions, PendingConfirmation, Resolver,
};
use crate::config::{ConfirmationConfig, DEFAULT_CANCEL_LABEL, DEFAULT_CONFIRM_LABEL};
use serde::{Deserialize, Serialize};

/// Policy for a request that arrives while another is pending.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SingleFlightPolicy {
    /// Settle the pending request with `false` and install the new one.
    #[default]
    SupersedePending,
    /// Leave the pending request alone; the new one resolves `false` at once.
    RefuseNew,
}

/// Lifecycle of a request as seen from the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    /// Nothing is waiting for an answer (or the id was never issued here).
    Idle,
    /// Waiting for the user.
    Pending,
    /// Answered, superseded or refused; the record is gone.
    Settled,
}

/// How a new request was admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Installed; nothing else was pending.
    Installed(ConfirmationId),
    /// Installed after auto-cancelling the previous request.
    Superseded {
        installed: ConfirmationId,
        cancelled: ConfirmationId,
    },
    /// Not installed; the request has already resolved `false`.
    Refused {
        refused: ConfirmationId,
        pending: ConfirmationId,
    },
}

impl Admission {
    /// Returns the id of the request this admission is about.
    #[must_use]
    pub fn id(self) -> ConfirmationId {
        match self {
            Admission::Installed(id)
            | Admission::Superseded { installed: id, .. }
            | Admission::Refused { refused: id, .. } => id,
        }
    }
}

/// Answers coming from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Confirm,
    Cancel,
}

/// Button labels substituted when a request leaves them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultLabels {
    pub confirm: String,
    pub cancel: String,
}

impl Default for DefaultLabels {
    fn default() -> Self {
        Self {
            confirm: DEFAULT_CONFIRM_LABEL.to_string(),
            cancel: DEFAULT_CANCEL_LABEL.to_string(),
        }
    }
}

#[derive(Debug)]
struct PendingRequest {
    id: ConfirmationId,
    options: ConfirmationOptions,
    resolver: Resolver,
}

/// Holds the single pending confirmation and settles it exactly once.
#[derive(Debug, Default)]
pub struct Broker {
    policy: SingleFlightPolicy,
    labels: DefaultLabels,
    pending: Option<PendingRequest>,
    /// Ids are drawn from a process-wide sequence, so membership is the only
    /// way to tell this broker's requests from another's.
    issued: HashSet<ConfirmationId>,
}

impl Broker {
    /// Creates a broker with the given policy and fallback labels.
    #[must_use]
    pub fn new(policy: SingleFlightPolicy, labels: DefaultLabels) -> Self {
        Self {
            policy,
            labels,
            pending: None,
            issued: HashSet::new(),
        }
    }

    /// Creates a broker from the `[confirmation]` configuration section.
    #[must_use]
    pub fn from_config(config: &ConfirmationConfig) -> Self {
        Self::new(
            config.policy,
            DefaultLabels {
                confirm: config.confirm_label.clone(),
                cancel: config.cancel_label.clone(),
            },
        )
    }

    #[must_use]
    pub fn policy(&self) -> SingleFlightPolicy {
        self.policy
    }

    /// Registers a request and returns the handle the caller awaits.
    pub fn request(&mut self, options: ConfirmationOptions) -> (Confirmation, Admission) {
        let id = ConfirmationId::new();
        self.issued.insert(id);

        let pending_id = self.pending.as_ref().map(|request| request.id);
        let cancelled = match (self.policy, pending_id) {
            (SingleFlightPolicy::RefuseNew, Some(pending)) => {
                let admission = Admission::Refused {
                    refused: id,
                    pending,
                };
                return (Confirmation::settled(id, false), admission);
            }
            (SingleFlightPolicy::SupersedePending, Some(_)) => self.settle(false),
            (_, None) => None,
        };

        let (resolver, confirmation) = Resolver::channel(id);
        self.pending = Some(PendingRequest {
            id,
            options,
            resolver,
        });

        let admission = match cancelled {
            Some(cancelled) => Admission::Superseded {
                installed: id,
                cancelled,
            },
            None => Admission::Installed(id),
        };
        (confirmation, admission)
    }

    /// Answers the pending request with "yes".
    ///
    /// Returns the id that was settled, or `None` if nothing was pending.
    pub fn confirm(&mut self) -> Option<ConfirmationId> {
        self.settle(true)
    }

    /// Answers the pending request with "no".
    pub fn cancel(&mut self) -> Option<ConfirmationId> {
        self.settle(false)
    }

    /// Settles the pending request, whichever it is.
    pub fn settle(&mut self, confirmed: bool) -> Option<ConfirmationId> {
        let mut request = self.pending.take()?;
        request.resolver.resolve(confirmed);
        Some(request.id)
    }

    /// Settles the pending request only if it is `id`.
    ///
    /// Protects against a dialog that was opened for an older request
    /// answering a newer one.
    pub fn settle_request(&mut self, id: ConfirmationId, confirmed: bool) -> bool {
        match &self.pending {
            Some(pending) if pending.id == id => self.settle(confirmed).is_some(),
            _ => false,
        }
    }

    /// Handles an answer from the presentation layer.
    pub fn handle_message(&mut self, message: Message) -> Option<ConfirmationId> {
        match message {
            Message::Confirm => self.confirm(),
            Message::Cancel => self.cancel(),
        }
    }

    /// Returns the pending request with labels resolved, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingConfirmation> {
        self.pending.as_ref().map(|request| PendingConfirmation {
            id: request.id,
            title: request.options.get_title().map(str::to_string),
            message: request.options.get_message().to_string(),
            confirm_label: request
                .options
                .get_confirm_label()
                .unwrap_or(self.labels.confirm.as_str())
                .to_string(),
            cancel_label: request
                .options
                .get_cancel_label()
                .unwrap_or(self.labels.cancel.as_str())
                .to_string(),
        })
    }

    /// Returns the broker-wide state.
    #[must_use]
    pub fn state(&self) -> ConfirmationState {
        if self.pending.is_some() {
            ConfirmationState::Pending
        } else {
            ConfirmationState::Idle
        }
    }

    /// Returns the state of a specific request.
    ///
    /// Ids this broker never issued report [`ConfirmationState::Idle`].
    #[must_use]
    pub fn state_of(&self, id: ConfirmationId) -> ConfirmationState {
        match &self.pending {
            Some(pending) if pending.id == id => ConfirmationState::Pending,
            _ if self.issued.contains(&id) => ConfirmationState::Settled,
            _ => ConfirmationState::Idle,
        }
    }
}
