// SPDX-License-Identifier: MPL-2.0
//! Collector that aggregates feedback events.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};

use super::export::{write_atomic, ExportError};
use super::{DiagnosticReport, EventRing, FeedbackEvent, FeedbackEventKind, ReportMetadata, SerializableEvent};
use crate::config::{DiagnosticsConfig, DIAGNOSTICS_CHANNEL_CAPACITY};
use crate::domain::feedback::BufferCapacity;

/// Handle for sending feedback events to the collector.
///
/// Cheap to clone and shareable across threads. Sending never blocks: if
/// the channel is full, or the collector is gone, the event is dropped.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<FeedbackEvent>,
}

impl DiagnosticsHandle {
    /// Records an event.
    pub fn log(&self, kind: FeedbackEventKind) {
        let _ = self.event_tx.try_send(FeedbackEvent::new(kind));
    }
}

/// Central store for feedback events.
pub struct DiagnosticsCollector {
    ring: EventRing<FeedbackEvent>,
    event_rx: Receiver<FeedbackEvent>,
    event_tx: Sender<FeedbackEvent>,
    collection_started_at: Instant,
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DIAGNOSTICS_CHANNEL_CAPACITY);

        Self {
            ring: EventRing::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a collector from the `[diagnostics]` configuration section.
    ///
    /// Returns `None` when diagnostics are disabled.
    #[must_use]
    pub fn from_config(config: &DiagnosticsConfig) -> Option<Self> {
        config.enabled.then(|| Self::new(config.capacity()))
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves every queued event into the ring.
    ///
    /// Call this periodically (e.g. once per frame). Returns how many events
    /// were drained.
    pub fn process_pending(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.ring.push(event);
            drained += 1;
        }
        drained
    }

    /// Records an event directly, bypassing the channel.
    pub fn log(&mut self, kind: FeedbackEventKind) {
        self.ring.push(FeedbackEvent::new(kind));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &FeedbackEvent> {
        self.ring.iter()
    }

    /// Returns how many stored events record caller misuse.
    #[must_use]
    pub fn misuse_count(&self) -> usize {
        self.ring.iter().filter(|e| e.kind.is_misuse()).count()
    }

    pub fn clear(&mut self) {
        self.ring.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Exports all stored events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    /// Exports the report to `path`, atomically.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if file operations fail and
    /// `ExportError::Serialization` if JSON serialization fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = path.as_ref();
        let json = self.export_json()?;
        write_atomic(path, &json)?;
        Ok(path.to_path_buf())
    }

    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    fn build_report(&self) -> DiagnosticReport {
        let collection_duration_ms = self.collection_started_at.elapsed().as_millis() as u64;

        let events: Vec<SerializableEvent> = self
            .ring
            .iter()
            .map(|event| {
                SerializableEvent::new(event.timestamp, self.collection_started_at, event.kind.clone())
            })
            .collect();

        let metadata = ReportMetadata::new(
            self.collection_started_at_utc,
            collection_duration_ms,
            events.len(),
            self.misuse_count(),
        );

        DiagnosticReport { metadata, events }
    }
}

impl std::fmt::Debug for DiagnosticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCollector")
            .field("len", &self.ring.len())
            .field("capacity", &self.ring.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn collector() -> DiagnosticsCollector {
        DiagnosticsCollector::new(BufferCapacity::default())
    }

    #[test]
    fn handle_events_arrive_after_processing() {
        let mut collector = collector();
        let handle = collector.handle();

        handle.log(FeedbackEventKind::BusyEntered { count: 1 });
        handle.log(FeedbackEventKind::BusyExited { count: 0 });
        assert!(collector.is_empty());

        assert_eq!(collector.process_pending(), 2);
        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                FeedbackEventKind::BusyEntered { count: 1 },
                FeedbackEventKind::BusyExited { count: 0 },
            ]
        );
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let mut collector = collector();
        let handle = collector.handle();

        for _ in 0..DIAGNOSTICS_CHANNEL_CAPACITY + 10 {
            handle.log(FeedbackEventKind::Reset);
        }
        assert_eq!(collector.process_pending(), DIAGNOSTICS_CHANNEL_CAPACITY);
    }

    #[test]
    fn handle_outliving_collector_is_harmless() {
        let handle = collector().handle();
        handle.log(FeedbackEventKind::BusyUnderflow);
    }

    #[test]
    fn misuse_is_counted() {
        let mut collector = collector();
        collector.log(FeedbackEventKind::BusyUnderflow);
        collector.log(FeedbackEventKind::BusyEntered { count: 1 });
        collector.log(FeedbackEventKind::StraySettle { confirmed: false });
        assert_eq!(collector.misuse_count(), 2);
    }

    #[test]
    fn disabled_config_yields_no_collector() {
        let config = DiagnosticsConfig {
            enabled: false,
            ..DiagnosticsConfig::default()
        };
        assert!(DiagnosticsCollector::from_config(&config).is_none());
        assert!(DiagnosticsCollector::from_config(&DiagnosticsConfig::default()).is_some());
    }

    #[test]
    fn export_json_contains_metadata_and_events() {
        let mut collector = collector();
        collector.log(FeedbackEventKind::BusyUnderflow);

        let json = collector.export_json().expect("export should succeed");
        let report: DiagnosticReport = serde_json::from_str(&json).expect("valid report");

        assert_eq!(report.metadata.event_count, 1);
        assert_eq!(report.metadata.misuse_count, 1);
        assert_eq!(report.events[0].kind, FeedbackEventKind::BusyUnderflow);
    }

    #[test]
    fn export_to_file_writes_report() {
        let mut collector = collector();
        collector.log(FeedbackEventKind::Reset);

        let dir = tempdir().expect("failed to create temp dir");
        let written = collector
            .export_to_file(dir.path().join("feedback.json"))
            .expect("export should succeed");

        let content = std::fs::read_to_string(written).expect("report exists");
        assert!(content.contains("\"reset\""));
    }
}
