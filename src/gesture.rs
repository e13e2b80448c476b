//! Groups confirmed blinks into gestures.
//!
//! Every blink bumps a running count. Once no blink has arrived for longer
//! than the reset interval the count is finalized into a [`Gesture`] and the
//! aggregator starts over from zero, whether or not the count means anything.

use crate::constants::RESET_TIME;
use log::debug;

/// A finalized blink count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    /// Number of blinks in the gesture
    pub count: u32,
}

/// Running blink counter with a silence timeout
#[derive(Debug, Clone)]
pub struct GestureAggregator {
    reset_time: f64,
    count: u32,
    last_event: Option<f64>,
}

impl GestureAggregator {
    /// Create an aggregator finalizing after `reset_time` seconds of silence
    #[must_use]
    pub const fn new(reset_time: f64) -> Self {
        Self {
            reset_time,
            count: 0,
            last_event: None,
        }
    }

    /// Count a confirmed blink
    pub fn record_blink(&mut self, now: f64) {
        self.count += 1;
        self.last_event = Some(now);
        debug!("Blink count now {}", self.count);
    }

    /// Finalize the gesture if the silence interval has elapsed
    pub fn poll(&mut self, now: f64) -> Option<Gesture> {
        if self.count == 0 {
            return None;
        }
        let last = self.last_event?;
        if now - last <= self.reset_time {
            return None;
        }

        let gesture = Gesture { count: self.count };
        self.count = 0;
        Some(gesture)
    }

    /// Blinks counted in the gesture still in progress
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Timestamp of the latest counted blink
    #[must_use]
    pub const fn last_event(&self) -> Option<f64> {
        self.last_event
    }
}

impl Default for GestureAggregator {
    fn default() -> Self {
        Self::new(RESET_TIME)
    }
}
