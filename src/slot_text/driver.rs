// SPDX-License-Identifier: MPL-2.0
//! Async driver for one sequencer instance.
//!
//! Frames are produced by a tokio interval; host events arrive on an mpsc
//! channel. The driver stops on teardown, when every sender is dropped, or
//! once the instance has gone inert.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::config::FRAME_INTERVAL_MS;

use super::sequencer::{HostEvent, Phase, SlotSequencer};
use super::surface::ReelSurface;

/// Capacity of the host event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Current time on the tokio clock (pausable in tests).
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Runs a sequencer on frames and host events.
pub struct SlotDriver<S> {
    sequencer: SlotSequencer<S>,
    events: mpsc::Receiver<HostEvent>,
}

impl<S: ReelSurface> SlotDriver<S> {
    /// Creates a driver and the sender the host uses to deliver events.
    #[must_use]
    pub fn new(sequencer: SlotSequencer<S>) -> (Self, mpsc::Sender<HostEvent>) {
        let (tx, events) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (Self { sequencer, events }, tx)
    }

    /// Drives the instance until it stops, then hands it back.
    pub async fn run(mut self) -> SlotSequencer<S> {
        let mut frames = tokio::time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(HostEvent::Teardown) | None => {
                        self.sequencer.teardown();
                        break;
                    }
                    Some(event) => self.sequencer.handle(event, now()),
                },
                _ = frames.tick() => self.sequencer.on_frame(now()),
            }
            if self.sequencer.phase() == Phase::Inert {
                break;
            }
        }
        self.sequencer
    }
}
