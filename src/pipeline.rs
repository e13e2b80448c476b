//! Per-frame decoding pipeline.
//!
//! [`DecoderPipeline`] owns every piece of mutable decoder state: the
//! smoother, the calibrator, the blink detector, the gesture counter, the
//! current mode, the Morse buffer, the output word and the last command
//! sent. Each call to [`DecoderPipeline::process_frame`] runs one frame
//! through landmarks → openness → smoothing → calibration or detection →
//! gesture → action, and reports what happened. Performing I/O for the
//! outcome (sending commands, drawing) is left to the caller.

use crate::{
    blink_detector::{BlinkDetector, BlinkEvent, BlinkTiming},
    calibration::{CalibrationSettings, Calibrator, Thresholds},
    command::{Command, CommandDispatcher},
    constants::{DEFAULT_SMOOTHING_WINDOW, RESET_TIME},
    filters::{moving_average::MovingAverageFilter, SignalFilter},
    geometry::EyePair,
    gesture::{Gesture, GestureAggregator},
    mode::{self, Action, Mode},
    morse::{MorseBuffer, MorseTable},
    Error, Result,
};
use log::{debug, info};

/// Tunable parameters of the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    /// Warm-up parameters
    pub calibration: CalibrationSettings,
    /// Blink acceptance rules
    pub timing: BlinkTiming,
    /// Silence in seconds that finalizes a gesture
    pub reset_time: f64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            calibration: CalibrationSettings::default(),
            timing: BlinkTiming::default(),
            reset_time: RESET_TIME,
        }
    }
}

/// What a single frame produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// A face was reported for this frame
    pub face_present: bool,
    /// Smoothed openness, absent for faceless or degenerate frames
    pub smoothed: Option<f64>,
    /// This frame completed calibration
    pub calibrated_now: bool,
    /// Blink confirmed on this frame
    pub blink: Option<BlinkEvent>,
    /// Gesture finalized on this frame
    pub gesture: Option<Gesture>,
    /// Action the gesture decoded to
    pub action: Option<Action>,
    /// Command that passed deduplication and must be transmitted
    pub command: Option<Command>,
}

/// Snapshot of user-visible state for display
#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    /// Current interpretation mode
    pub mode: Mode,
    /// Buffered Morse marks
    pub morse_buffer: String,
    /// Characters decoded so far
    pub output_word: String,
    /// Blinks in the gesture in progress
    pub blink_count: u32,
    /// Frozen thresholds, once calibrated
    pub thresholds: Option<Thresholds>,
    /// Calibration samples collected so far
    pub calibration_samples: usize,
}

/// The blink-to-symbol decoder
pub struct DecoderPipeline {
    smoother: Box<dyn SignalFilter>,
    calibrator: Calibrator,
    detector: BlinkDetector,
    gestures: GestureAggregator,
    mode: Mode,
    morse_table: MorseTable,
    morse_buffer: MorseBuffer,
    output_word: String,
    dispatcher: CommandDispatcher,
    last_timestamp: Option<f64>,
}

impl DecoderPipeline {
    /// Create a pipeline with the given settings and smoother
    ///
    /// # Panics
    ///
    /// Panics if `settings.calibration.baseline_frames` is zero or
    /// `settings.calibration.open_offset` is not positive.
    /// [`Config::validate`](crate::config::Config::validate) rejects both.
    #[must_use]
    pub fn new(settings: PipelineSettings, smoother: Box<dyn SignalFilter>) -> Self {
        info!(
            "Decoder pipeline using {} smoother, {} calibration frames",
            smoother.name(),
            settings.calibration.baseline_frames
        );
        Self {
            smoother,
            calibrator: Calibrator::new(settings.calibration),
            detector: BlinkDetector::new(settings.timing),
            gestures: GestureAggregator::new(settings.reset_time),
            mode: Mode::default(),
            morse_table: MorseTable::standard(),
            morse_buffer: MorseBuffer::new(),
            output_word: String::new(),
            dispatcher: CommandDispatcher::new(),
            last_timestamp: None,
        }
    }

    /// Run one frame through the decoder
    ///
    /// `face` is `None` when no face was detected. Timestamps are seconds on
    /// a monotonic clock.
    ///
    /// # Errors
    ///
    /// Returns an error if `now` is not finite or earlier than the previous
    /// frame; the frame is then ignored entirely.
    pub fn process_frame(&mut self, face: Option<&EyePair>, now: f64) -> Result<FrameOutcome> {
        if !now.is_finite() {
            return Err(Error::InvalidInput(format!("Frame timestamp {now} is not finite")));
        }
        if let Some(previous) = self.last_timestamp {
            if now < previous {
                return Err(Error::InvalidInput(format!(
                    "Frame timestamp {now:.3} precedes previous frame at {previous:.3}"
                )));
            }
        }
        self.last_timestamp = Some(now);

        let mut outcome = FrameOutcome::default();
        let Some(face) = face else {
            self.detector.force_open();
            return Ok(outcome);
        };
        outcome.face_present = true;

        match face.openness() {
            Some(raw) => self.process_sample(raw, now, &mut outcome),
            None => debug!("Degenerate eye geometry at {now:.3}s, sample discarded"),
        }

        if let Some(gesture) = self.gestures.poll(now) {
            outcome.gesture = Some(gesture);
            outcome.action = self.apply_gesture(gesture);
            if let Some(Action::Command(command)) = outcome.action {
                outcome.command = self.dispatcher.filter(command);
            }
        }

        Ok(outcome)
    }

    fn process_sample(&mut self, raw: f64, now: f64, outcome: &mut FrameOutcome) {
        let smoothed = self.smoother.apply(raw);
        outcome.smoothed = Some(smoothed);

        let Some(thresholds) = self.calibrator.thresholds() else {
            outcome.calibrated_now = self.calibrator.observe(smoothed);
            return;
        };

        if let Some(blink) = self.detector.update(smoothed, &thresholds, now) {
            self.gestures.record_blink(now);
            outcome.blink = Some(blink);
        }
    }

    /// Interpret a finalized gesture under the current mode
    fn apply_gesture(&mut self, gesture: Gesture) -> Option<Action> {
        let Some(action) = mode::decode(self.mode, gesture.count) else {
            debug!("Gesture of {} blinks has no meaning in {} mode, discarded", gesture.count, self.mode);
            return None;
        };
        info!("Gesture of {} blinks in {} mode", gesture.count, self.mode);

        match action {
            Action::AppendSymbol(symbol) => {
                self.morse_buffer.push(symbol);
                info!("Morse input: {}", self.morse_buffer);
            }
            Action::CommitLetter => {
                let letter = self.morse_buffer.commit(&self.morse_table);
                self.output_word.push(letter);
                info!("Decoded '{}', typed word: {}", letter, self.output_word);
            }
            Action::Command(command) => info!("{command}"),
            Action::SwitchMode(mode) => {
                self.mode = mode;
                info!("Switched to {mode} MODE");
            }
        }
        Some(action)
    }

    /// Current user-visible state
    #[must_use]
    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            mode: self.mode,
            morse_buffer: self.morse_buffer.to_string(),
            output_word: self.output_word.clone(),
            blink_count: self.gestures.count(),
            thresholds: self.calibrator.thresholds(),
            calibration_samples: self.calibrator.samples_collected(),
        }
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Characters decoded so far
    #[must_use]
    pub fn output_word(&self) -> &str {
        &self.output_word
    }

    /// Symbols waiting for a commit
    #[must_use]
    pub const fn morse_buffer(&self) -> &MorseBuffer {
        &self.morse_buffer
    }

    /// Threshold calibrator
    #[must_use]
    pub const fn calibrator(&self) -> &Calibrator {
        &self.calibrator
    }

    /// Blink state machine
    #[must_use]
    pub const fn detector(&self) -> &BlinkDetector {
        &self.detector
    }

    /// Most recent command let through to the transport
    #[must_use]
    pub const fn last_sent_command(&self) -> Option<Command> {
        self.dispatcher.last_sent()
    }
}

impl Default for DecoderPipeline {
    fn default() -> Self {
        Self::new(
            PipelineSettings::default(),
            Box::new(MovingAverageFilter::new(DEFAULT_SMOOTHING_WINDOW)),
        )
    }
}
