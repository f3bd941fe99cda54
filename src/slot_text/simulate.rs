// SPDX-License-Identifier: MPL-2.0
//! Deterministic timeline of a sequencer run.
//!
//! Replays one instance against a [`RecordingSurface`] with a virtual
//! clock: the block scrolls into view at 0 ms and every transition ends
//! exactly on time.

use std::fmt;
use std::time::{Duration, Instant};

use crate::config::{SlotDefaults, SAFETY_TIMEOUT_BUFFER_MS};
use crate::diagnostics::DiagnosticsHandle;
use crate::domain::slot::SlotConfig;

use super::controls::ControlLabels;
use super::sequencer::{HostEvent, SlotSequencer};
use super::surface::{RecordingSurface, SurfaceCall};

/// Bound on simulated events, far above any real sequence length.
const MAX_EVENTS: usize = 10_000;

/// A surface operation at a point on the virtual clock.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub at: Duration,
    pub call: SurfaceCall,
}

/// Simulated run of one block.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub item_height_px: f32,
    pub entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Reel index implied by an applied offset.
    #[must_use]
    pub fn index_for(&self, offset_px: f32) -> usize {
        if self.item_height_px <= 0.0 {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (-offset_px / self.item_height_px).round().max(0.0) as usize;
        index
    }

    /// Indices shown, in order.
    #[must_use]
    pub fn visited_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.call {
                SurfaceCall::Apply(style) => Some(self.index_for(style.offset_px)),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            let at = entry.at.as_millis();
            match &entry.call {
                SurfaceCall::Apply(style) => writeln!(
                    f,
                    "{at:>6} ms  index {}  transform {}  transition {}",
                    self.index_for(style.offset_px),
                    style.transform_css(),
                    style.transition_css()
                )?,
                SurfaceCall::Finished(finished) => {
                    writeln!(f, "{at:>6} ms  finished={finished}")?;
                }
                SurfaceCall::Control(attributes) => writeln!(
                    f,
                    "{at:>6} ms  control aria-pressed={} label=\"{}\"",
                    attributes.aria_pressed, attributes.aria_label
                )?,
                SurfaceCall::Measure | SurfaceCall::StopObserving => {}
            }
        }
        Ok(())
    }
}

/// Runs a block to completion on a virtual clock.
///
/// Lifecycle events of the run are reported through `diagnostics`.
#[must_use]
pub fn simulate(
    config: &SlotConfig,
    defaults: &SlotDefaults,
    reduced_motion: bool,
    labels: ControlLabels,
    item_height_px: f32,
    diagnostics: DiagnosticsHandle,
) -> Timeline {
    let mut sequencer = SlotSequencer::new(
        config,
        defaults,
        reduced_motion,
        labels,
        RecordingSurface::new(item_height_px),
        diagnostics,
    );
    let start = Instant::now();
    let mut entries = Vec::new();
    let mut recorded = 0;
    let mut collect = |sequencer: &SlotSequencer<RecordingSurface>, now: Instant| {
        let calls = sequencer.surface().calls();
        entries.extend(calls[recorded..].iter().map(|call| TimelineEntry {
            at: now - start,
            call: call.clone(),
        }));
        recorded = calls.len();
    };

    sequencer.mount();
    let first = if reduced_motion {
        HostEvent::Frame
    } else {
        HostEvent::Intersection(1.0)
    };
    sequencer.handle(first, start);
    collect(&sequencer, start);

    for _ in 0..MAX_EVENTS {
        let Some(pending) = sequencer.pending().copied() else {
            break;
        };
        let (event, now) = if pending.awaits_transition {
            let buffer = Duration::from_millis(SAFETY_TIMEOUT_BUFFER_MS);
            (HostEvent::TransitionEnd { from_reel: true }, pending.deadline - buffer)
        } else {
            (HostEvent::Frame, pending.deadline)
        };
        sequencer.handle(event, now);
        collect(&sequencer, now);
    }

    Timeline {
        item_height_px,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{BlockTag, DiagnosticsCollector};

    fn config(items: &[&str], total_ms: u64) -> SlotConfig {
        SlotConfig {
            items: items.iter().map(|item| (*item).to_owned()).collect(),
            total_duration_ms: Some(total_ms),
            ..SlotConfig::default()
        }
    }

    fn applied_at(timeline: &Timeline) -> Vec<u128> {
        timeline
            .entries
            .iter()
            .filter(|entry| matches!(entry.call, SurfaceCall::Apply(_)))
            .map(|entry| entry.at.as_millis())
            .collect()
    }

    #[test]
    fn visits_each_index_once_in_order() {
        let timeline = simulate(
            &config(&["A", "B", "C", "D"], 9000),
            &SlotDefaults::default(),
            false,
            ControlLabels::default(),
            40.0,
            DiagnosticsHandle::detached(),
        );
        assert_eq!(timeline.visited_indices(), vec![0, 1, 2, 3]);
        assert_eq!(applied_at(&timeline), vec![0, 500, 3500, 6500]);
        let last = timeline.entries.last().expect("entries");
        assert_eq!(last.at, Duration::from_millis(9500));
    }

    #[test]
    fn reduced_motion_is_a_single_snap() {
        let timeline = simulate(
            &config(&["A", "B", "C"], 9000),
            &SlotDefaults::default(),
            true,
            ControlLabels::default(),
            40.0,
            DiagnosticsHandle::detached(),
        );
        assert_eq!(timeline.visited_indices(), vec![0]);
        assert_eq!(applied_at(&timeline), vec![0]);
        assert!(timeline
            .entries
            .iter()
            .all(|entry| !matches!(entry.call, SurfaceCall::Control(_))));
    }

    #[test]
    fn run_reports_finish_to_collector() {
        let mut collector = DiagnosticsCollector::default();
        let timeline = simulate(
            &config(&["A", "B", "C"], 2000),
            &SlotDefaults::default(),
            false,
            ControlLabels::default(),
            40.0,
            collector.handle(),
        );
        assert_eq!(timeline.visited_indices(), vec![0, 1, 2]);
        collector.process_pending();

        let messages: Vec<&str> = collector
            .iter()
            .filter(|event| event.tag == BlockTag::AnimatedSlotText)
            .map(|event| event.kind.message())
            .collect();
        assert_eq!(messages, vec!["finished"]);
    }

    #[test]
    fn display_lists_transforms() {
        let timeline = simulate(
            &config(&["A", "B"], 1000),
            &SlotDefaults::default(),
            false,
            ControlLabels::default(),
            30.0,
            DiagnosticsHandle::detached(),
        );
        let text = timeline.to_string();
        assert!(text.contains("index 1  transform translate3d(0, -30px, 0)  transition transform 1000ms var(--anim-ease)"));
        assert!(text.contains("finished=true"));
    }
}
