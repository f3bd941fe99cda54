// SPDX-License-Identifier: MPL-2.0
//! The rendered block as seen by the sequencer.
//!
//! The host page implements [`ReelSurface`] over its DOM nodes. Any method
//! may fail once the block has been detached; the sequencer treats such a
//! failure as the end of the instance.

use crate::domain::slot::ReelStyle;
use crate::error::SurfaceError;

use super::controls::ControlAttributes;

/// DOM operations the sequencer performs on one block instance.
pub trait ReelSurface {
    /// Rendered height of the first reel item, `0.0` when not laid out.
    fn item_height(&mut self) -> Result<f32, SurfaceError>;

    /// Writes transform and transition to the reel element.
    fn apply(&mut self, style: ReelStyle) -> Result<(), SurfaceError>;

    /// Toggles the `finished` class on the reel window.
    fn set_finished(&mut self, finished: bool) -> Result<(), SurfaceError>;

    /// Writes the play/pause control attributes.
    fn render_control(&mut self, attributes: &ControlAttributes) -> Result<(), SurfaceError>;

    /// Stops watching the block for viewport intersection.
    fn stop_observing(&mut self) {}
}

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Measure,
    Apply(ReelStyle),
    Finished(bool),
    Control(ControlAttributes),
    StopObserving,
}

/// Kind of operation a [`RecordingSurface`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Measure,
    Apply,
    Finished,
    Control,
}

/// In-memory surface that records every operation.
///
/// Used by the timeline simulation and by tests. A failure can be armed to
/// fire after a number of successful operations of one kind.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    height: f32,
    calls: Vec<SurfaceCall>,
    failure: Option<(FailOn, usize)>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(height: f32) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    /// Changes the height reported by later measurements.
    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    /// Fails the operation of kind `on` after `after` successful ones.
    pub fn fail_after(&mut self, on: FailOn, after: usize) {
        self.failure = Some((on, after));
    }

    #[must_use]
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Styles applied to the reel, in order.
    pub fn applied(&self) -> impl Iterator<Item = &ReelStyle> {
        self.calls.iter().filter_map(|call| match call {
            SurfaceCall::Apply(style) => Some(style),
            _ => None,
        })
    }

    /// Last value written to the `finished` class.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|call| match call {
                SurfaceCall::Finished(finished) => Some(*finished),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Last control attributes rendered.
    #[must_use]
    pub fn control(&self) -> Option<&ControlAttributes> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::Control(attributes) => Some(attributes),
            _ => None,
        })
    }

    fn check(&mut self, kind: FailOn) -> Result<(), SurfaceError> {
        match &mut self.failure {
            Some((on, 0)) if *on == kind => Err(match kind {
                FailOn::Measure => SurfaceError::Measurement("reel has no layout box".into()),
                FailOn::Apply | FailOn::Finished | FailOn::Control => SurfaceError::Detached,
            }),
            Some((on, remaining)) if *on == kind => {
                *remaining -= 1;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl ReelSurface for RecordingSurface {
    fn item_height(&mut self) -> Result<f32, SurfaceError> {
        self.check(FailOn::Measure)?;
        self.calls.push(SurfaceCall::Measure);
        Ok(self.height)
    }

    fn apply(&mut self, style: ReelStyle) -> Result<(), SurfaceError> {
        self.check(FailOn::Apply)?;
        self.calls.push(SurfaceCall::Apply(style));
        Ok(())
    }

    fn set_finished(&mut self, finished: bool) -> Result<(), SurfaceError> {
        self.check(FailOn::Finished)?;
        self.calls.push(SurfaceCall::Finished(finished));
        Ok(())
    }

    fn render_control(&mut self, attributes: &ControlAttributes) -> Result<(), SurfaceError> {
        self.check(FailOn::Control)?;
        self.calls.push(SurfaceCall::Control(attributes.clone()));
        Ok(())
    }

    fn stop_observing(&mut self) {
        self.calls.push(SurfaceCall::StopObserving);
    }
}
