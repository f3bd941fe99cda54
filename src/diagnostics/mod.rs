// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for block instances.
//!
//! Blocks never surface failures to the page. Instead they record tagged
//! events through a [`DiagnosticsHandle`]; a [`DiagnosticsCollector`] keeps
//! the most recent ones in a memory-bounded [`CircularBuffer`] and can export
//! them as JSON. Every event is also forwarded to the `log` facade.
//!
//! # Privacy
//!
//! Messages are sanitized before they are stored: credential query values
//! and local file paths are masked.

mod buffer;
mod collector;
mod events;
mod sanitizer;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticReport, DiagnosticsCollector, DiagnosticsHandle, SerializableEvent};
pub use events::{BlockTag, DiagnosticEvent, DiagnosticEventKind};
pub use sanitizer::{sanitize_message, ErrorType, WarningType};
