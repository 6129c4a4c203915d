use std::time::{Duration, Instant};

use winit::event_loop::ControlFlow;

/// Decides how long the event loop may sleep between frames.
///
/// Nothing is redrawn unless something asked for it: input, or a wake-up time handed in by
/// the app. Wake-ups are held back so frames never come closer than `target_delta_time`.
pub struct Sleeper {
    pub target_delta_time: Duration,
    pub last_instant: Option<Instant>,
}

impl Sleeper {
    pub fn new(target_delta_time: Duration) -> Self {
        Self {
            target_delta_time,
            last_instant: None,
        }
    }

    pub fn frame_drawn(&mut self, now: Instant) {
        self.last_instant = Some(now);
    }

    /// Earliest time the next frame may be drawn.
    pub fn next_frame(&self) -> Option<Instant> {
        self.last_instant
            .map(|last_instant| last_instant + self.target_delta_time)
    }

    /// Sleep until `wake_at` (pushed back to the next frame slot), or until an event
    /// arrives when there is nothing to wake up for.
    pub fn control_flow(&self, wake_at: Option<Instant>) -> ControlFlow {
        match wake_at {
            Some(wake_at) => {
                let wake_at = self.next_frame().map_or(wake_at, |next| next.max(wake_at));
                ControlFlow::WaitUntil(wake_at)
            }
            None => ControlFlow::Wait,
        }
    }
}
