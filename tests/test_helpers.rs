//! Helper functions and utilities for tests
#![allow(dead_code)]

use blink_morse::{
    command::{Command, CommandSink},
    geometry::synthetic_pair,
    pipeline::{DecoderPipeline, FrameOutcome},
    Result,
};
use std::{cell::RefCell, rc::Rc};

/// Openness of relaxed open eyes in the synthetic scenarios
pub const OPEN: f64 = 0.30;

/// Openness of fully closed eyes
pub const CLOSED: f64 = 0.0;

/// Frame interval of the synthetic sensor (20 fps)
pub const FRAME_INTERVAL: f64 = 0.05;

/// Drives a pipeline with synthetic frames at a fixed frame rate
pub struct Scenario {
    pub pipeline: DecoderPipeline,
    pub now: f64,
    pub outcomes: Vec<FrameOutcome>,
}

impl Scenario {
    pub fn new() -> Self {
        Self::with_pipeline(DecoderPipeline::default())
    }

    pub fn with_pipeline(pipeline: DecoderPipeline) -> Self {
        Self {
            pipeline,
            now: 0.0,
            outcomes: Vec::new(),
        }
    }

    /// Feed one frame whose eyes both have the given openness
    pub fn frame(&mut self, ratio: f64) -> FrameOutcome {
        let pair = synthetic_pair(ratio);
        self.push(Some(&pair))
    }

    /// Feed one frame without a face
    pub fn no_face(&mut self) -> FrameOutcome {
        self.push(None)
    }

    fn push(&mut self, face: Option<&blink_morse::geometry::EyePair>) -> FrameOutcome {
        let outcome = self
            .pipeline
            .process_frame(face, self.now)
            .expect("monotonic timestamps");
        self.now += FRAME_INTERVAL;
        self.outcomes.push(outcome.clone());
        outcome
    }

    /// Feed frames of constant openness for roughly `seconds`
    pub fn hold(&mut self, ratio: f64, seconds: f64) {
        let frames = (seconds / FRAME_INTERVAL).round() as usize;
        for _ in 0..frames {
            self.frame(ratio);
        }
    }

    /// Thirty frames of open eyes
    pub fn calibrate(&mut self) {
        for _ in 0..30 {
            self.frame(OPEN);
        }
        assert!(self.pipeline.calibrator().is_calibrated());
    }

    /// A deliberate 0.2s closure followed by half a second of open eyes
    pub fn blink(&mut self) {
        self.hold(CLOSED, 0.2);
        self.hold(OPEN, 0.5);
    }

    pub fn blinks(&mut self, count: usize) {
        for _ in 0..count {
            self.blink();
        }
    }

    /// Open eyes long enough for the gesture to finalize
    pub fn pause(&mut self) {
        self.hold(OPEN, 3.5);
    }

    /// Blink `count` times, then pause, returning outcomes of that span
    pub fn gesture(&mut self, count: usize) -> Vec<FrameOutcome> {
        let start = self.outcomes.len();
        self.blinks(count);
        self.pause();
        self.outcomes[start..].to_vec()
    }

    pub fn blink_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.blink.is_some()).count()
    }
}

/// Outcomes that finalized a gesture
pub fn finalized(outcomes: &[FrameOutcome]) -> Vec<&FrameOutcome> {
    outcomes.iter().filter(|o| o.gesture.is_some()).collect()
}

/// Sink recording every command it receives, shareable with the test body
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub sent: Rc<RefCell<Vec<Command>>>,
}

impl RecordingSink {
    pub fn commands(&self) -> Vec<Command> {
        self.sent.borrow().clone()
    }
}

impl CommandSink for RecordingSink {
    fn send(&mut self, command: Command) -> Result<()> {
        self.sent.borrow_mut().push(command);
        Ok(())
    }
}
