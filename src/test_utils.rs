// SPDX-License-Identifier: MPL-2.0
//! Test helpers for reel geometry.
//!
//! Offsets are products of measured heights, so comparisons go through the
//! `approx` macros rather than `assert_eq!`.

pub use approx::assert_abs_diff_eq;

use crate::slot_text::RecordingSurface;

/// Tolerance for pixel offsets.
pub const PX_EPSILON: f32 = 1e-4;

/// Reel offsets applied to a recording surface, in order.
pub fn applied_offsets(surface: &RecordingSurface) -> Vec<f32> {
    surface.applied().map(|style| style.offset_px).collect()
}

/// Asserts that two offset sequences match within [`PX_EPSILON`].
pub fn assert_offsets_eq(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "offsets: {actual:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*a, *e, epsilon = PX_EPSILON);
    }
}
