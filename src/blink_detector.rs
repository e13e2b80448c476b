//! Hysteresis blink detection over the smoothed openness signal.
//!
//! A closure starts when the signal drops below the close threshold and ends
//! when it rises above the open threshold. Values in between never change
//! state. A closure becomes a [`BlinkEvent`] only if it lasted long enough
//! and the previous confirmed blink is far enough in the past.

use crate::{
    calibration::Thresholds,
    constants::{BLINK_COOLDOWN, MIN_BLINK_DURATION},
};
use log::debug;

/// Timing rules for accepting a closure as a blink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkTiming {
    /// Minimum closure duration in seconds
    pub min_duration: f64,
    /// Release-to-release spacing a new blink must exceed, in seconds
    pub cooldown: f64,
}

impl Default for BlinkTiming {
    fn default() -> Self {
        Self {
            min_duration: MIN_BLINK_DURATION,
            cooldown: BLINK_COOLDOWN,
        }
    }
}

/// Eye state tracked between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EyeState {
    /// Eyes open (or unknown)
    Open,
    /// Eyes closed since the given timestamp
    Closed {
        /// When the signal fell below the close threshold
        since: f64,
    },
}

/// A confirmed, debounced blink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkEvent {
    /// When the eyes reopened (seconds)
    pub timestamp: f64,
    /// How long the eyes were closed (seconds)
    pub closed_duration: f64,
}

/// Blink state machine
#[derive(Debug, Clone)]
pub struct BlinkDetector {
    timing: BlinkTiming,
    state: EyeState,
    last_confirmed: Option<f64>,
}

impl BlinkDetector {
    /// Create a detector in the open state
    #[must_use]
    pub const fn new(timing: BlinkTiming) -> Self {
        Self {
            timing,
            state: EyeState::Open,
            last_confirmed: None,
        }
    }

    /// Evaluate one frame of smoothed signal
    pub fn update(&mut self, signal: f64, thresholds: &Thresholds, now: f64) -> Option<BlinkEvent> {
        match self.state {
            EyeState::Open => {
                if signal < thresholds.close {
                    self.state = EyeState::Closed { since: now };
                }
                None
            }
            EyeState::Closed { since } => {
                if signal <= thresholds.open {
                    return None;
                }
                self.state = EyeState::Open;
                self.confirm(since, now)
            }
        }
    }

    fn confirm(&mut self, since: f64, now: f64) -> Option<BlinkEvent> {
        let closed_duration = now - since;
        if closed_duration < self.timing.min_duration {
            debug!("Closure of {closed_duration:.3}s too short, ignored");
            return None;
        }
        if let Some(last) = self.last_confirmed {
            if now - last <= self.timing.cooldown {
                debug!("Closure at {now:.3}s within cooldown of blink at {last:.3}s, ignored");
                return None;
            }
        }

        self.last_confirmed = Some(now);
        debug!("Blink confirmed at {now:.3}s after {closed_duration:.3}s closed");
        Some(BlinkEvent {
            timestamp: now,
            closed_duration,
        })
    }

    /// Drop any in-progress closure, used when the face is lost
    pub fn force_open(&mut self) {
        self.state = EyeState::Open;
    }

    /// Current eye state
    #[must_use]
    pub const fn state(&self) -> EyeState {
        self.state
    }

    /// Timestamp of the most recent confirmed blink
    #[must_use]
    pub const fn last_confirmed(&self) -> Option<f64> {
        self.last_confirmed
    }
}

impl Default for BlinkDetector {
    fn default() -> Self {
        Self::new(BlinkTiming::default())
    }
}
