//! Main application module: drives the decoder from a landmark source.

use crate::{
    command::{transmit, CommandSink},
    config::Config,
    error::{Error, Result},
    landmarks::LandmarkProvider,
    mode::Mode,
    pipeline::{DecoderPipeline, Telemetry},
};
use log::{info, warn};

/// Totals reported when the landmark source runs dry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Frames processed
    pub frames: usize,
    /// Frames with a face
    pub face_frames: usize,
    /// Frames skipped because the source or timestamp was invalid
    pub skipped_frames: usize,
    /// Confirmed blinks
    pub blinks: usize,
    /// Finalized gestures
    pub gestures: usize,
    /// Commands handed to the transport
    pub commands_sent: usize,
    /// Decoded text
    pub output_word: String,
    /// Mode at the end of the run
    pub final_mode: Mode,
}

/// Logs the on-screen state whenever it changes
#[derive(Debug, Default)]
pub struct StatusDisplay {
    last: Option<Telemetry>,
}

impl StatusDisplay {
    /// Report `telemetry` if it differs from what was shown last
    pub fn update(&mut self, telemetry: Telemetry) -> bool {
        if self.last.as_ref() == Some(&telemetry) {
            return false;
        }
        info!(
            "MODE: {} | Morse Input: {} | Typed Word: {} | Blinks: {}",
            telemetry.mode, telemetry.morse_buffer, telemetry.output_word, telemetry.blink_count
        );
        self.last = Some(telemetry);
        true
    }
}

/// Main application struct
pub struct BlinkApp {
    pipeline: DecoderPipeline,
    provider: Box<dyn LandmarkProvider>,
    sink: Box<dyn CommandSink>,
    display: StatusDisplay,
}

impl BlinkApp {
    /// Create a new application from configuration and collaborators
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: &Config, provider: Box<dyn LandmarkProvider>, sink: Box<dyn CommandSink>) -> Result<Self> {
        info!("Initializing blink decoder");
        config.validate()?;

        let pipeline = DecoderPipeline::new(config.pipeline_settings(), config.create_filter()?);
        info!("Calibrating... please keep your eyes open for a moment.");

        Ok(Self {
            pipeline,
            provider,
            sink,
            display: StatusDisplay::default(),
        })
    }

    /// Run until the landmark source is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error if the landmark source fails at the I/O level.
    /// Malformed frames and out-of-order timestamps are logged and skipped.
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Starting main application loop");
        let mut summary = RunSummary::default();

        loop {
            let frame = match self.provider.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    info!("End of landmark stream reached");
                    break;
                }
                Err(e @ Error::LandmarkError { .. }) => {
                    warn!("Skipping frame: {e}");
                    summary.skipped_frames += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let outcome = match self.pipeline.process_frame(frame.face.as_ref(), frame.timestamp) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Skipping frame: {e}");
                    summary.skipped_frames += 1;
                    continue;
                }
            };

            summary.frames += 1;
            if outcome.face_present {
                summary.face_frames += 1;
            }
            if outcome.blink.is_some() {
                summary.blinks += 1;
            }
            if outcome.gesture.is_some() {
                summary.gestures += 1;
            }
            if let Some(command) = outcome.command {
                transmit(self.sink.as_mut(), command);
                summary.commands_sent += 1;
            }

            if self.pipeline.calibrator().is_calibrated() {
                self.display.update(self.pipeline.telemetry());
            }
        }

        summary.output_word = self.pipeline.output_word().to_string();
        summary.final_mode = self.pipeline.mode();
        info!(
            "Application shutting down: {} frames, {} blinks, {} gestures, {} commands, typed \"{}\"",
            summary.frames, summary.blinks, summary.gestures, summary.commands_sent, summary.output_word
        );
        Ok(summary)
    }

    /// The decoder state
    #[must_use]
    pub const fn pipeline(&self) -> &DecoderPipeline {
        &self.pipeline
    }
}
