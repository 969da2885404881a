//! Frame loop scheduling and resize coalescing
//!
//! The host (browser animation frames) only knows how to call back once.
//! `FrameScheduler` decides whether each callback does work and whether the
//! next one gets requested, so pause and game over simply stop the chain.

use super::state::GamePhase;

#[derive(Debug, Default)]
pub struct FrameScheduler {
    /// A host callback is pending or the loop is mid-frame
    armed: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the loop to run. Returns true if the caller must issue a
    /// host frame request; false if a chain is already live.
    pub fn request(&mut self) -> bool {
        if self.armed {
            false
        } else {
            self.armed = true;
            true
        }
    }

    /// Call at the top of every host callback. Returns whether to update and
    /// draw; a non-running phase disarms the loop.
    pub fn on_frame(&mut self, phase: GamePhase) -> bool {
        if phase == GamePhase::Running {
            true
        } else {
            self.armed = false;
            false
        }
    }

    /// Call after updating and drawing. Returns whether to request another
    /// host frame; otherwise the loop is disarmed.
    pub fn keep_going(&mut self, phase: GamePhase) -> bool {
        if phase == GamePhase::Running {
            true
        } else {
            self.armed = false;
            false
        }
    }

    /// Drop the loop regardless of phase (a pending callback will still
    /// fire but `on_frame` decides what it does)
    pub fn cancel(&mut self) {
        self.armed = false;
    }
}

/// Coalesces bursts of events into one action after a quiet period.
///
/// Every event calls `trigger(now)` and arranges a later `poll`; only the
/// poll that finds the most recent trigger at least `delay_ms` old fires.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: f64,
    last_trigger: Option<f64>,
}

impl Debouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            last_trigger: None,
        }
    }

    #[inline]
    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    pub fn trigger(&mut self, now_ms: f64) {
        self.last_trigger = Some(now_ms);
    }

    /// True exactly once per burst, when the burst has gone quiet
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.last_trigger {
            Some(t) if now_ms - t >= self.delay_ms => {
                self.last_trigger = None;
                true
            }
            _ => false,
        }
    }

    /// Time left before a pending burst may fire; None when idle. A clock
    /// that stepped backward never stretches the wait past `delay_ms`.
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.last_trigger
            .map(|t| (self.delay_ms - (now_ms - t)).clamp(0.0, self.delay_ms))
    }
}
