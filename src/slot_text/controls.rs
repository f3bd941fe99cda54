// SPDX-License-Identifier: MPL-2.0
//! Play/pause control state and accessible labels.

use crate::i18n::I18n;

/// Message keys of the control labels in the Fluent bundles.
const PAUSE_MOTION_KEY: &str = "pause-motion";
const PLAY_MOTION_KEY: &str = "play-motion";
const PAUSE_ICON_KEY: &str = "pause-icon";
const PLAY_ICON_KEY: &str = "play-icon";

/// Localized texts of the play/pause control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlLabels {
    pub play_motion: String,
    pub pause_motion: String,
    pub play_icon: String,
    pub pause_icon: String,
}

impl Default for ControlLabels {
    fn default() -> Self {
        Self {
            play_motion: "Play".to_string(),
            pause_motion: "Pause".to_string(),
            play_icon: "Play icon".to_string(),
            pause_icon: "Pause icon".to_string(),
        }
    }
}

impl ControlLabels {
    /// Labels from the current i18n locale. Missing messages keep the
    /// English default.
    #[must_use]
    pub fn from_i18n(i18n: &I18n) -> Self {
        let fallback = Self::default();
        let lookup = |key: &str, default: String| i18n.try_tr(key).unwrap_or(default);
        Self {
            play_motion: lookup(PLAY_MOTION_KEY, fallback.play_motion),
            pause_motion: lookup(PAUSE_MOTION_KEY, fallback.pause_motion),
            play_icon: lookup(PLAY_ICON_KEY, fallback.play_icon),
            pause_icon: lookup(PAUSE_ICON_KEY, fallback.pause_icon),
        }
    }
}

/// Attributes written to the control element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlAttributes {
    /// `is-playing` class on the icon filler.
    pub is_playing: bool,
    pub aria_pressed: bool,
    pub aria_label: String,
    pub title: String,
}

/// Play/pause toggle. Starts out playing.
#[derive(Debug, Clone)]
pub struct PlaybackControl {
    is_playing: bool,
    labels: ControlLabels,
}

impl PlaybackControl {
    #[must_use]
    pub fn new(labels: ControlLabels) -> Self {
        Self {
            is_playing: true,
            labels,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Updates the flag and returns the attributes to render.
    pub fn set_playing(&mut self, playing: bool) -> ControlAttributes {
        self.is_playing = playing;
        self.attributes()
    }

    /// While playing the control offers "pause", and vice versa.
    #[must_use]
    pub fn attributes(&self) -> ControlAttributes {
        let label = if self.is_playing {
            &self.labels.pause_motion
        } else {
            &self.labels.play_motion
        };
        ControlAttributes {
            is_playing: self.is_playing,
            aria_pressed: self.is_playing,
            aria_label: label.clone(),
            title: label.clone(),
        }
    }
}

/// Whether a keyboard event code activates the control.
#[must_use]
pub fn is_activation_key(code: &str) -> bool {
    matches!(code, "Enter" | "Space")
}
