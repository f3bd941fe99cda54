// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! Blocks log through a [`DiagnosticsHandle`]; the owner of the
//! [`DiagnosticsCollector`] drains the channel into a circular buffer and
//! can export it as JSON.

use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{
    sanitize_message, BlockTag, BufferCapacity, CircularBuffer, DiagnosticEvent,
    DiagnosticEventKind, ErrorType, WarningType,
};

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone. Every event is also forwarded to the `log` facade with
/// the block tag as target, so a handle without a collector still logs.
///
/// Sending never blocks. The channel holds at most
/// `DEFAULT_CHANNEL_CAPACITY` (100) events between two calls to
/// [`DiagnosticsCollector::process_pending`]; further events are dropped
/// from the collector but still reach `log`.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Creates a handle that only forwards to the `log` facade.
    #[must_use]
    pub fn detached() -> Self {
        let (event_tx, _) = bounded(1);
        Self { event_tx }
    }

    /// Logs a lifecycle change.
    pub fn log_state(&self, tag: BlockTag, description: impl Into<String>) {
        let description = description.into();
        log::debug!(target: tag.as_str(), "{description}");
        self.send(tag, DiagnosticEventKind::State { description });
    }

    /// Logs a warning. The message is sanitized first.
    pub fn log_warning(&self, tag: BlockTag, warning_type: WarningType, message: impl AsRef<str>) {
        let message = sanitize_message(message.as_ref());
        log::warn!(target: tag.as_str(), "{message}");
        self.send(
            tag,
            DiagnosticEventKind::Warning {
                warning_type,
                message,
            },
        );
    }

    /// Logs an error. The message is sanitized first.
    pub fn log_error(&self, tag: BlockTag, error_type: ErrorType, message: impl AsRef<str>) {
        let message = sanitize_message(message.as_ref());
        log::error!(target: tag.as_str(), "{message}");
        self.send(
            tag,
            DiagnosticEventKind::Error {
                error_type,
                message,
            },
        );
    }

    fn send(&self, tag: BlockTag, kind: DiagnosticEventKind) {
        // Non-blocking: drop the event when the channel is full or closed.
        let _ = self.event_tx.try_send(DiagnosticEvent::new(tag, kind));
    }
}

/// One event in an exported report.
#[derive(Debug, Clone, Serialize)]
pub struct SerializableEvent {
    /// Milliseconds since collection started.
    pub offset_ms: u64,
    pub tag: BlockTag,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

/// Exported diagnostic report.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub collection_started_at: DateTime<Utc>,
    pub event_count: usize,
    pub events: Vec<SerializableEvent>,
}

/// Central collector for diagnostic events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    collection_started_at: Instant,
    collection_started_at_utc: DateTime<Utc>,
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the channel into the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Returns the stored error events of one block.
    pub fn errors_for(&self, tag: BlockTag) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer
            .iter()
            .filter(move |event| event.tag == tag && event.kind.is_error())
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports all stored events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    #[allow(clippy::cast_possible_truncation)] // Offsets in ms fit comfortably in u64
    fn build_report(&self) -> DiagnosticReport {
        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| SerializableEvent {
                offset_ms: event
                    .timestamp
                    .saturating_duration_since(self.collection_started_at)
                    .as_millis() as u64,
                tag: event.tag,
                kind: event.kind.clone(),
            })
            .collect();

        DiagnosticReport {
            collection_started_at: self.collection_started_at_utc,
            event_count: events.len(),
            events,
        }
    }
}
