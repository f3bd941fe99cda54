// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Slot animation**: Timings, thresholds and colors of the slot reel
//! - **Locale**: Fallback locale when nothing else is configured
//! - **Offers API**: Default query parameters and not-found route
//! - **Diagnostics**: Event buffer bounds

// ==========================================================================
// Slot Animation Defaults
// ==========================================================================

/// Total time spread across all reel transitions.
///
/// 7000ms over 3 transitions (4 items) is ~2333ms per step.
pub const DEFAULT_TOTAL_DURATION_MS: u64 = 7000;

/// Delay between the block becoming visible and the first transition.
pub const DEFAULT_INITIAL_WAIT_MS: u64 = 500;

/// Extra time granted to a transition before the safety timer advances.
pub const SAFETY_TIMEOUT_BUFFER_MS: u64 = 50;

/// Delay after an instant (zero-duration) snap before the next step.
pub const SNAP_DELAY_MS: u64 = 50;

/// Debounce window for viewport resize events.
pub const RESIZE_DEBOUNCE_MS: u64 = 100;

/// Visible fraction of the block required to start the animation.
pub const INTERSECTION_THRESHOLD: f32 = 0.5;

/// Frame interval used when polling timers (one 60 Hz frame).
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Prefix text color when the table does not provide one.
pub const DEFAULT_PREFIX_COLOR: &str = "#000000";

/// Reel item color when the table does not provide one.
pub const DEFAULT_SLOT_COLOR: &str = "#f33";

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Locale used when neither a parameter nor a configured default exists.
pub const DEFAULT_IETF: &str = "en-US";

// ==========================================================================
// Offers API Defaults
// ==========================================================================

/// `api_key` appended to offers requests that do not carry one.
pub const DEFAULT_API_KEY: &str = "universalPromoTerm";

/// `service_providers` appended to offers requests that do not carry one.
pub const DEFAULT_SERVICE_PROVIDERS: &str = "PROMO_TERMS";

/// Hostname treated as production when no `env` parameter is given.
pub const PRODUCTION_HOSTNAME: &str = "www.adobe.com";

/// Page shown in production when no terms could be produced.
pub const NOT_FOUND_PATH: &str = "/404.html";

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_TOTAL_DURATION_MS > 0);
    assert!(SAFETY_TIMEOUT_BUFFER_MS > 0);
    assert!(SNAP_DELAY_MS > 0);
    assert!(FRAME_INTERVAL_MS > 0);
    assert!(FRAME_INTERVAL_MS < SNAP_DELAY_MS);
    assert!(INTERSECTION_THRESHOLD > 0.0);
    assert!(INTERSECTION_THRESHOLD <= 1.0);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
