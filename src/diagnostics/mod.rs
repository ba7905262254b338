// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the feedback layer.
//!
//! Every coordination operation reports what it did as a [`FeedbackEvent`].
//! Events travel through a cheap, non-blocking [`DiagnosticsHandle`] into a
//! [`DiagnosticsCollector`], which keeps the most recent ones in a bounded
//! [`EventRing`] and can export them as a JSON report.
//!
//! Caller misuse (an unmatched `exit_busy`, a second confirmation while one
//! is pending, an answer with nothing to answer) is never an error in this
//! crate; it shows up here instead, flagged by
//! [`FeedbackEventKind::is_misuse`].
//!
//! # Privacy
//!
//! Events carry ids, severities and counts only. Notification and dialog
//! text is never recorded.

mod collector;
mod events;
mod export;
mod report;
mod ring;

pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{FeedbackEvent, FeedbackEventKind};
pub use export::{write_atomic, ExportError};
pub use report::{DiagnosticReport, ReportMetadata, SerializableEvent};
pub use ring::EventRing;
