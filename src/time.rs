//! Passive-income timer driven by the frame clock.
//!
//! `draw_web()` calls at ~60fps with variable delta. `PassiveTimer` turns
//! that stream of timestamps into whole interval fires, carrying the remainder
//! between frames, so passive accrual stays deterministic and testable.

/// Longest single-frame delta honoured; a backgrounded tab does not replay its backlog.
pub const MAX_CATCH_UP_MS: f64 = 5_000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct PassiveTimer {
    /// Milliseconds per fire (1000 = once per second)
    interval_ms: f64,
    /// Accumulated milliseconds not yet consumed as fires
    accumulator: f64,
    /// Timestamp of the last update (ms), None until the first frame after arming
    last_timestamp: Option<f64>,
    armed: bool,
}

impl PassiveTimer {
    /// Disarmed timer that fires every `interval_ms` once armed.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as f64,
            accumulator: 0.0,
            last_timestamp: None,
            armed: false,
        }
    }

    /// Start counting. The next `update` only records the baseline.
    pub fn arm(&mut self) {
        if self.armed {
            return;
        }
        self.armed = true;
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }

    /// Stop counting and drop any partial interval.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed wall-clock timestamp (from `performance.now()` or similar).
    /// Returns the number of whole intervals that elapsed; always 0 while disarmed.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        if !self.armed {
            return 0;
        }
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_CATCH_UP_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let fires = (self.accumulator / self.interval_ms) as u32;
        self.accumulator -= fires as f64 * self.interval_ms;
        fires
    }
}
