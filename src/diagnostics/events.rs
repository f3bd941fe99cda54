// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! Every event is tagged with the block that produced it, mirroring the
//! tagged logger used by the page.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{ErrorType, WarningType};

/// Block that emitted a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockTag {
    AnimatedSlotText,
    UniversalPromoTerms,
}

impl BlockTag {
    /// Tag string used by the page logger and as the `log` target.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AnimatedSlotText => "animated-slot-text",
            Self::UniversalPromoTerms => "universal-promo-terms",
        }
    }
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    pub tag: BlockTag,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(tag: BlockTag, kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            tag,
            kind,
        }
    }

    #[must_use]
    pub fn with_timestamp(tag: BlockTag, kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self {
            timestamp,
            tag,
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// Block lifecycle change (e.g. animation finished, terms rendered).
    State { description: String },

    /// Non-critical issue; the block carried on with a fallback.
    Warning {
        warning_type: WarningType,
        message: String,
    },

    /// The block instance stopped because of this failure.
    Error {
        error_type: ErrorType,
        message: String,
    },
}

impl DiagnosticEventKind {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::State { description } => description,
            Self::Warning { message, .. } | Self::Error { message, .. } => message,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
