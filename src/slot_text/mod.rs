// SPDX-License-Identifier: MPL-2.0
//! Animated slot text block.
//!
//! A prefix followed by a "slot machine" reel that rolls through the
//! authored words and rests on the last one. The block is decorated in two
//! parts: [`SlotMarkup`] renders the static structure once, and a
//! [`SlotSequencer`] animates the reel on the host's [`ReelSurface`].
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use cc_blocks::config::SlotDefaults;
//! use cc_blocks::diagnostics::DiagnosticsHandle;
//! use cc_blocks::slot_text::{
//!     parse_slot_table, ControlLabels, Phase, RecordingSurface, SlotSequencer,
//! };
//!
//! let rows = vec![vec!["slot".to_string(), "Fast, Bold, Yours".to_string()]];
//! let config = parse_slot_table(&rows);
//!
//! let mut sequencer = SlotSequencer::new(
//!     &config,
//!     &SlotDefaults::default(),
//!     false,
//!     ControlLabels::default(),
//!     RecordingSurface::new(32.0),
//!     DiagnosticsHandle::detached(),
//! );
//! sequencer.mount();
//! sequencer.on_intersection(1.0, Instant::now());
//! assert_eq!(sequencer.phase(), Phase::Waiting);
//! ```

mod controls;
mod driver;
mod markup;
mod sequencer;
mod simulate;
mod surface;
mod table;

pub use controls::{is_activation_key, ControlAttributes, ControlLabels, PlaybackControl};
pub use driver::{SlotDriver, EVENT_CHANNEL_CAPACITY};
pub use markup::{ControlMarkup, SlotMarkup};
pub use sequencer::{
    Advance, CancelSlot, HostEvent, PendingAdvance, Phase, SlotSequencer, SlotTiming,
};
pub use simulate::{simulate, Timeline, TimelineEntry};
pub use surface::{FailOn, RecordingSurface, ReelSurface, SurfaceCall};
pub use table::parse_slot_table;
