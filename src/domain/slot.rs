// SPDX-License-Identifier: MPL-2.0
//! Slot animation value types.

use std::time::Duration;

/// Content and styling authored for one slot text block.
///
/// Optional values fall back to the site defaults when the sequencer is
/// built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotConfig {
    /// Static text shown before the reel.
    pub prefix: String,
    /// Reel words in display order; the last one is the resting word.
    pub items: Vec<String>,
    pub total_duration_ms: Option<u64>,
    pub initial_wait_ms: Option<u64>,
    pub prefix_color: Option<String>,
    pub slot_color: Option<String>,
}

impl SlotConfig {
    /// Items the block actually shows.
    ///
    /// Under reduced motion only the final word is kept.
    #[must_use]
    pub fn effective_items(&self, reduced_motion: bool) -> Vec<String> {
        match self.items.last() {
            Some(last) if reduced_motion => vec![last.clone()],
            _ => self.items.clone(),
        }
    }
}

/// Time spent on each transition: the total split across `item_count - 1`
/// transitions, zero when there is nothing to transition to.
#[must_use]
pub fn step_duration(item_count: usize, total: Duration) -> Duration {
    if item_count <= 1 {
        return Duration::ZERO;
    }
    let transitions = u32::try_from(item_count - 1).unwrap_or(u32::MAX);
    total / transitions
}

/// Mutable animation state of one block instance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    /// Index of the reel item currently shown (or being transitioned to).
    pub current_index: usize,
    /// Measured height of one reel item; zero until measured.
    pub reel_height_px: f32,
}

impl AnimationState {
    /// Vertical reel offset that reveals `index`.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> f32 {
        if index == 0 {
            return 0.0;
        }
        -(index as f32) * self.reel_height_px
    }

    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.reel_height_px > 0.0
    }
}

/// Style written to the reel element for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelStyle {
    /// Vertical translation in pixels (`translate3d(0, offset, 0)`).
    pub offset_px: f32,
    /// Transition time; zero means an instant snap (`transition: none`).
    pub transition: Duration,
}

impl ReelStyle {
    #[must_use]
    pub fn is_snap(&self) -> bool {
        self.transition.is_zero()
    }

    /// CSS `transform` value.
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!("translate3d(0, {}px, 0)", self.offset_px)
    }

    /// CSS `transition` value.
    #[must_use]
    pub fn transition_css(&self) -> String {
        if self.is_snap() {
            "none".to_string()
        } else {
            format!("transform {}ms var(--anim-ease)", self.transition.as_millis())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, PX_EPSILON};

    #[test]
    fn step_duration_splits_total_across_transitions() {
        let total = Duration::from_millis(9000);
        assert_eq!(step_duration(4, total), Duration::from_millis(3000));
        assert_eq!(step_duration(2, total), total);
    }

    #[test]
    fn step_duration_is_zero_without_transitions() {
        assert_eq!(step_duration(1, Duration::from_millis(9000)), Duration::ZERO);
        assert_eq!(step_duration(0, Duration::from_millis(9000)), Duration::ZERO);
    }

    #[test]
    fn reduced_motion_keeps_only_last_item() {
        let config = SlotConfig {
            items: vec!["A".into(), "B".into(), "C".into()],
            ..SlotConfig::default()
        };
        assert_eq!(config.effective_items(true), vec!["C".to_string()]);
        assert_eq!(config.effective_items(false).len(), 3);
        assert!(SlotConfig::default().effective_items(true).is_empty());
    }

    #[test]
    fn offset_scales_with_height() {
        let state = AnimationState {
            current_index: 0,
            reel_height_px: 40.0,
        };
        assert_abs_diff_eq!(state.offset_for(0), 0.0, epsilon = PX_EPSILON);
        assert_abs_diff_eq!(state.offset_for(3), -120.0, epsilon = PX_EPSILON);
        assert!(state.offset_for(0).is_sign_positive());
    }

    #[test]
    fn reel_style_css() {
        let snap = ReelStyle {
            offset_px: -80.0,
            transition: Duration::ZERO,
        };
        let timed = ReelStyle {
            offset_px: -40.0,
            transition: Duration::from_millis(3000),
        };
        assert_eq!(snap.transform_css(), "translate3d(0, -80px, 0)");
        assert_eq!(snap.transition_css(), "none");
        assert_eq!(timed.transition_css(), "transform 3000ms var(--anim-ease)");
    }
}
