//! Timing helpers driven by the UI frame loop.
//!
//! Nothing here spawns threads or timers: callers pass the current `Instant`
//! on every frame and ask whether something became due.

use std::time::{Duration, Instant};

/// Trailing-edge debounce: a burst of `trigger` calls fires once, `wait` after the last one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Record an event, pushing the deadline back.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// Fires at most once per burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the pending call fires, for scheduling a repaint.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

/// One-shot delay: armed once, reports completion once.
#[derive(Debug, Clone, Default)]
pub struct Delay {
    deadline: Option<Instant>,
}

impl Delay {
    pub fn start(&mut self, now: Instant, wait: Duration) {
        self.deadline = Some(now + wait);
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

/// Ease-out-exponential curve on `[0, 1]`.
pub fn ease_out_expo(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    if p >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * p)
    }
}

/// Animated counter for summary cards.
#[derive(Debug, Clone)]
pub struct CounterTween {
    start: f64,
    end: f64,
    duration: Duration,
    started_at: Instant,
}

impl CounterTween {
    pub fn new(start: f64, end: f64, duration: Duration, started_at: Instant) -> Self {
        Self {
            start,
            end,
            duration,
            started_at,
        }
    }

    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Rounded value to display at `now`; exactly `end` once finished.
    pub fn value_at(&self, now: Instant) -> f64 {
        let eased = ease_out_expo(self.progress(now));
        (self.start + (self.end - self.start) * eased).round()
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}
