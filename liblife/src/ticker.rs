use std::time::{Duration, Instant};

/// Deadline bookkeeping for generation ticks.
///
/// The ticker never sleeps or spawns anything. The event loop that owns the session asks
/// for [`Ticker::deadline`], waits until then, and polls. Cancelling just forgets the
/// deadline, so a stopped ticker will never report itself due again.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Schedules the next tick one interval after `now`, replacing any pending one.
    pub fn schedule(&mut self, now: Instant) {
        self.next_tick = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_tick = None;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_tick.is_some_and(|next_tick| now >= next_tick)
    }
}
