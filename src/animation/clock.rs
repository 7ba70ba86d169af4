//! Time sources and the periodic animation timer.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::frame::Frame;

/// Monotonic millisecond clock used as the animation time base.
pub trait TickSource {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since construction, from tokio's clock.
///
/// Under a paused tokio test runtime this follows the virtual clock.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for MonotonicClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl TickSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// AnimationTimer
// ---------------------------------------------------------------------------

/// Periodic tick for driving [`Frame::on_timer`] from a tokio runtime.
///
/// Must be created inside a runtime with the time driver enabled. Late ticks
/// are skipped rather than bunched up.
#[derive(Debug)]
pub struct AnimationTimer {
    interval: Interval,
}

impl AnimationTimer {
    pub fn new(period_ms: u64) -> Self {
        let mut interval = tokio::time::interval(Duration::from_millis(period_ms.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    /// A timer at the frame's configured tick period.
    pub fn for_frame(frame: &Frame) -> Self {
        Self::new(frame.config().tick_interval_ms)
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    /// Wait for the next tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Tick `frame` until it has no animations left. Returns the number of ticks.
pub async fn run_until_idle(frame: &mut Frame, timer: &mut AnimationTimer) -> usize {
    let mut ticks = 0;
    while frame.has_animations() {
        timer.tick().await;
        frame.on_timer();
        ticks += 1;
    }
    tracing::debug!(ticks, "animations idle");
    ticks
}
