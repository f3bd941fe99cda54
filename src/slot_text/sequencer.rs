// SPDX-License-Identifier: MPL-2.0
//! Slot reel sequencer.
//!
//! Drives one block instance through its animation:
//!
//! ```text
//! Idle ──intersect──▶ Waiting ──initial wait──▶ Stepping(1) ─▶ … ─▶ Stepping(n-1) ──▶ Finished
//!                                                   ▲                                    │
//!                                                   └──────────── resume (index 0) ◀─────┘
//! ```
//!
//! The sequencer owns no timers. The host feeds it frame callbacks with the
//! current time and due work runs from there. All scheduled work goes
//! through a single [`CancelSlot`], so at most one advance is ever pending
//! and replacing or clearing it makes older timers and transition events
//! harmless.
//!
//! A surface error stops the instance: it is logged and the sequencer goes
//! [`Phase::Inert`], ignoring everything afterwards.

use std::time::{Duration, Instant};

use crate::config::{
    SlotDefaults, INTERSECTION_THRESHOLD, RESIZE_DEBOUNCE_MS, SAFETY_TIMEOUT_BUFFER_MS,
    SNAP_DELAY_MS,
};
use crate::diagnostics::{BlockTag, DiagnosticsHandle, ErrorType, WarningType};
use crate::domain::slot::{step_duration, AnimationState, ReelStyle, SlotConfig};
use crate::error::SurfaceError;

use super::controls::{is_activation_key, ControlLabels, PlaybackControl};
use super::surface::ReelSurface;

const TAG: BlockTag = BlockTag::AnimatedSlotText;

/// Lifecycle phase of one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Mounted, waiting for the block to scroll into view.
    Idle,
    /// Snapped to the first item, waiting out the initial delay.
    Waiting,
    /// Showing (or transitioning to) the item at this index.
    Stepping(usize),
    Finished,
    /// Stopped for good: nothing to animate, a surface failure, or teardown.
    Inert,
}

/// Work scheduled for later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Leave the initial wait and step to index 1.
    Start,
    Step(usize),
    /// Mark the reel finished after the last step.
    Finish,
}

/// The one pending advance of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    /// Fires on the first frame at or after this instant.
    pub deadline: Instant,
    pub action: Advance,
    /// Also fires early on the reel's transition end.
    pub awaits_transition: bool,
}

/// Single-slot holder for the pending advance.
#[derive(Debug, Clone, Default)]
pub struct CancelSlot(Option<PendingAdvance>);

impl CancelSlot {
    /// Schedules `next`, dropping whatever was pending.
    pub fn replace(&mut self, next: PendingAdvance) {
        self.0 = Some(next);
    }

    pub fn cancel(&mut self) {
        self.0 = None;
    }

    #[must_use]
    pub fn peek(&self) -> Option<&PendingAdvance> {
        self.0.as_ref()
    }

    /// Takes the pending advance if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<PendingAdvance> {
        if self.0.is_some_and(|pending| pending.deadline <= now) {
            self.0.take()
        } else {
            None
        }
    }

    /// Takes the pending advance if it is waiting on a transition end.
    pub fn take_transition(&mut self) -> Option<PendingAdvance> {
        if self.0.is_some_and(|pending| pending.awaits_transition) {
            self.0.take()
        } else {
            None
        }
    }

    /// Stops waiting on a transition end; the deadline still applies.
    fn detach_transition(&mut self) {
        if let Some(pending) = self.0.as_mut() {
            pending.awaits_transition = false;
        }
    }
}

/// Host event delivered to one instance.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Intersection observer entry with its visible ratio.
    Intersection(f32),
    /// Animation frame.
    Frame,
    /// `transitionend`; `from_reel` is false when it bubbled up from a child.
    TransitionEnd { from_reel: bool },
    /// Viewport resize (debounced by the sequencer).
    Resize,
    /// Click on the play/pause control.
    Toggle,
    /// Keydown on the control, by event code.
    Key(String),
    Teardown,
}

/// Timing of one instance, resolved from authored values and site defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTiming {
    pub step: Duration,
    pub initial_wait: Duration,
}

impl SlotTiming {
    /// A zero or missing total duration falls back to the default; an
    /// authored initial wait of zero is kept.
    #[must_use]
    pub fn resolve(config: &SlotConfig, defaults: &SlotDefaults, item_count: usize) -> Self {
        let total_ms = config
            .total_duration_ms
            .filter(|&ms| ms > 0)
            .unwrap_or(defaults.total_duration_ms);
        let wait_ms = config.initial_wait_ms.unwrap_or(defaults.initial_wait_ms);
        Self {
            step: step_duration(item_count, Duration::from_millis(total_ms)),
            initial_wait: Duration::from_millis(wait_ms),
        }
    }
}

/// Animation state machine of one slot text block.
pub struct SlotSequencer<S> {
    surface: S,
    item_count: usize,
    timing: SlotTiming,
    reduced_motion: bool,
    state: AnimationState,
    phase: Phase,
    pending: CancelSlot,
    resize_deadline: Option<Instant>,
    /// Reduced motion renders once, on the first frame after mount.
    render_on_next_frame: bool,
    control: Option<PlaybackControl>,
    diagnostics: DiagnosticsHandle,
}

impl<S: ReelSurface> SlotSequencer<S> {
    /// Creates the sequencer for a mounted block.
    ///
    /// Under reduced motion the reel holds only the last item and no
    /// control is created.
    #[must_use]
    pub fn new(
        config: &SlotConfig,
        defaults: &SlotDefaults,
        reduced_motion: bool,
        labels: ControlLabels,
        surface: S,
        diagnostics: DiagnosticsHandle,
    ) -> Self {
        let item_count = config.effective_items(reduced_motion).len();
        let phase = if item_count == 0 {
            Phase::Inert
        } else {
            Phase::Idle
        };
        Self {
            surface,
            item_count,
            timing: SlotTiming::resolve(config, defaults, item_count),
            reduced_motion,
            state: AnimationState::default(),
            phase,
            pending: CancelSlot::default(),
            resize_deadline: None,
            render_on_next_frame: false,
            control: (!reduced_motion).then(|| PlaybackControl::new(labels)),
            diagnostics,
        }
    }

    /// Finishes mounting: renders the control, or queues the single
    /// reduced-motion render.
    pub fn mount(&mut self) {
        if self.phase == Phase::Inert {
            return;
        }
        if self.reduced_motion {
            self.state.current_index = self.item_count - 1;
            self.render_on_next_frame = true;
            return;
        }
        let result = match &self.control {
            Some(control) => self.surface.render_control(&control.attributes()),
            None => Ok(()),
        };
        self.settle(result);
    }

    /// Dispatches a host event.
    pub fn handle(&mut self, event: HostEvent, now: Instant) {
        match event {
            HostEvent::Intersection(ratio) => self.on_intersection(ratio, now),
            HostEvent::Frame => self.on_frame(now),
            HostEvent::TransitionEnd { from_reel } => self.on_transition_end(from_reel, now),
            HostEvent::Resize => self.on_resize(now),
            HostEvent::Toggle => self.toggle(now),
            HostEvent::Key(code) => {
                self.on_key(&code, now);
            }
            HostEvent::Teardown => self.teardown(),
        }
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// Starts the sequence the first time the block is at least half visible.
    pub fn on_intersection(&mut self, ratio: f32, now: Instant) {
        if self.phase != Phase::Idle || self.reduced_motion || ratio < INTERSECTION_THRESHOLD {
            return;
        }
        self.surface.stop_observing();
        let result = self.enter_waiting(now);
        self.settle(result);
    }

    /// Runs whatever is due at `now`.
    pub fn on_frame(&mut self, now: Instant) {
        if self.phase == Phase::Inert {
            return;
        }
        if self.resize_deadline.is_some_and(|deadline| deadline <= now) {
            self.resize_deadline = None;
            self.handle_resize();
        }
        if std::mem::take(&mut self.render_on_next_frame) {
            let result = self.render_reduced_motion();
            self.settle(result);
        }
        if let Some(pending) = self.pending.take_due(now) {
            let result = self.fire(pending.action, now);
            self.settle(result);
        }
    }

    /// Advances early when the reel's own transition ends.
    pub fn on_transition_end(&mut self, from_reel: bool, now: Instant) {
        if !from_reel || self.phase == Phase::Inert {
            return;
        }
        if let Some(pending) = self.pending.take_transition() {
            let result = self.fire(pending.action, now);
            self.settle(result);
        }
    }

    /// Schedules a re-measure once resizing has been quiet for a while.
    pub fn on_resize(&mut self, now: Instant) {
        if self.phase == Phase::Inert {
            return;
        }
        self.resize_deadline = Some(now + Duration::from_millis(RESIZE_DEBOUNCE_MS));
    }

    /// Pauses (jump to the last item) or resumes (restart from the first).
    pub fn toggle(&mut self, now: Instant) {
        if self.phase == Phase::Inert {
            return;
        }
        let Some(control) = self.control.as_mut() else {
            return;
        };
        let playing = !control.is_playing();
        let attributes = control.set_playing(playing);

        let result = self
            .surface
            .render_control(&attributes)
            .and_then(|()| {
                if playing {
                    self.restart(now)
                } else {
                    self.jump_to_end()
                }
            });
        self.settle(result);
    }

    /// Toggles on Enter or Space. Returns whether the key was consumed.
    pub fn on_key(&mut self, code: &str, now: Instant) -> bool {
        if self.control.is_none() || !is_activation_key(code) {
            return false;
        }
        self.toggle(now);
        true
    }

    /// Drops all scheduled work. The instance ignores later events.
    pub fn teardown(&mut self) {
        self.pending.cancel();
        self.resize_deadline = None;
        self.render_on_next_frame = false;
        if self.phase != Phase::Inert {
            self.phase = Phase::Inert;
            self.diagnostics.log_state(TAG, "torn down");
        }
    }

    // =========================================================================
    // Sequence
    // =========================================================================

    fn enter_waiting(&mut self, now: Instant) -> Result<(), SurfaceError> {
        self.state.reel_height_px = self.surface.item_height()?;
        self.state.current_index = 0;
        self.apply_index(0, Duration::ZERO)?;
        self.pending.replace(PendingAdvance {
            deadline: now + self.timing.initial_wait,
            action: Advance::Start,
            awaits_transition: false,
        });
        self.phase = Phase::Waiting;
        Ok(())
    }

    fn fire(&mut self, action: Advance, now: Instant) -> Result<(), SurfaceError> {
        match action {
            Advance::Start => self.run_step(1, now),
            Advance::Step(index) => self.run_step(index, now),
            Advance::Finish => self.finish(),
        }
    }

    fn run_step(&mut self, index: usize, now: Instant) -> Result<(), SurfaceError> {
        self.pending.cancel();
        let last = self.item_count - 1;
        if index > last {
            return self.finish();
        }

        self.state.current_index = index;
        self.phase = Phase::Stepping(index);
        if index < last {
            self.surface.set_finished(false)?;
        }

        let duration = if index == 0 {
            Duration::ZERO
        } else {
            self.timing.step
        };
        self.apply_index(index, duration)?;

        let next = if index == last {
            PendingAdvance {
                deadline: now + duration,
                action: Advance::Finish,
                awaits_transition: false,
            }
        } else if duration.is_zero() {
            PendingAdvance {
                deadline: now + Duration::from_millis(SNAP_DELAY_MS),
                action: Advance::Step(index + 1),
                awaits_transition: false,
            }
        } else {
            PendingAdvance {
                deadline: now + duration + Duration::from_millis(SAFETY_TIMEOUT_BUFFER_MS),
                action: Advance::Step(index + 1),
                awaits_transition: true,
            }
        };
        self.pending.replace(next);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SurfaceError> {
        self.pending.cancel();
        self.surface.set_finished(true)?;
        if let Some(control) = self.control.as_mut() {
            let attributes = control.set_playing(false);
            self.surface.render_control(&attributes)?;
        }
        self.phase = Phase::Finished;
        self.diagnostics.log_state(TAG, "finished");
        Ok(())
    }

    fn jump_to_end(&mut self) -> Result<(), SurfaceError> {
        self.pending.cancel();
        if self.phase == Phase::Idle {
            self.surface.stop_observing();
        }
        if !self.state.is_measured() {
            self.state.reel_height_px = self.surface.item_height()?;
        }
        let last = self.item_count - 1;
        self.state.current_index = last;
        self.apply_index(last, Duration::ZERO)?;
        self.surface.set_finished(true)?;
        self.phase = Phase::Finished;
        Ok(())
    }

    fn restart(&mut self, now: Instant) -> Result<(), SurfaceError> {
        self.pending.cancel();
        self.surface.set_finished(false)?;
        self.run_step(0, now)
    }

    fn render_reduced_motion(&mut self) -> Result<(), SurfaceError> {
        self.state.reel_height_px = self.surface.item_height()?;
        self.apply_index(self.state.current_index, Duration::ZERO)?;
        self.surface.set_finished(true)?;
        self.phase = Phase::Finished;
        Ok(())
    }

    /// Re-applies the current index when the item height changed.
    ///
    /// Failures here are logged but do not stop the instance.
    fn handle_resize(&mut self) {
        let result = self.surface.item_height().and_then(|height| {
            if height <= 0.0 || (height - self.state.reel_height_px).abs() < f32::EPSILON {
                return Ok(());
            }
            self.state.reel_height_px = height;
            // The snap interrupts any running transition; only the safety
            // timer can still advance it.
            self.pending.detach_transition();
            self.apply_index(self.state.current_index, Duration::ZERO)
        });
        if let Err(err) = result {
            self.diagnostics.log_warning(
                TAG,
                WarningType::Other,
                format!("Resize handling error: {err}"),
            );
        }
    }

    /// No-op until the reel has been measured.
    fn apply_index(&mut self, index: usize, transition: Duration) -> Result<(), SurfaceError> {
        if !self.state.is_measured() {
            return Ok(());
        }
        self.surface.apply(ReelStyle {
            offset_px: self.state.offset_for(index),
            transition,
        })
    }

    fn settle(&mut self, result: Result<(), SurfaceError>) {
        if let Err(err) = result {
            self.pending.cancel();
            self.resize_deadline = None;
            self.render_on_next_frame = false;
            self.phase = Phase::Inert;
            self.diagnostics.log_error(
                TAG,
                ErrorType::SurfaceError,
                format!("Animation sequence error: {err}"),
            );
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    #[must_use]
    pub fn timing(&self) -> SlotTiming {
        self.timing
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingAdvance> {
        self.pending.peek()
    }

    /// `None` under reduced motion, where there is no control.
    #[must_use]
    pub fn is_playing(&self) -> Option<bool> {
        self.control.as_ref().map(PlaybackControl::is_playing)
    }

    /// Earliest instant at which a frame has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let pending = self.pending.peek().map(|pending| pending.deadline);
        match (pending, self.resize_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}
