//! Adaptive threshold calibration.
//!
//! During warm-up the calibrator collects smoothed openness samples and keeps
//! a running pair of hysteresis thresholds. Once the configured number of
//! samples has been seen it moves to [`CalibrationPhase::Calibrated`] and the
//! thresholds never change again.

use crate::constants::{BASELINE_FRAMES, CLOSE_THRESHOLD_MULTIPLIER, OPEN_THRESHOLD_OFFSET};
use log::info;

/// Hysteresis thresholds for blink detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Signal below this means the eyes closed
    pub close: f64,
    /// Signal above this means the eyes reopened
    pub open: f64,
}

/// Calibration parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationSettings {
    /// Number of smoothed samples to collect before freezing
    pub baseline_frames: usize,
    /// Close threshold as a fraction of the baseline mean
    pub close_multiplier: f64,
    /// Added to the close threshold to obtain the open threshold
    pub open_offset: f64,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            baseline_frames: BASELINE_FRAMES,
            close_multiplier: CLOSE_THRESHOLD_MULTIPLIER,
            open_offset: OPEN_THRESHOLD_OFFSET,
        }
    }
}

impl CalibrationSettings {
    /// Thresholds derived from a baseline openness mean
    #[must_use]
    pub fn thresholds_for(&self, baseline_mean: f64) -> Thresholds {
        let close = baseline_mean * self.close_multiplier;
        Thresholds {
            close,
            open: close + self.open_offset,
        }
    }
}

/// Warm-up state
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationPhase {
    /// Still collecting baseline samples
    Calibrating {
        /// Smoothed samples seen so far
        samples: Vec<f64>,
        /// Thresholds derived from the samples so far
        provisional: Option<Thresholds>,
    },
    /// Thresholds frozen for the rest of the run
    Calibrated(Thresholds),
}

/// Derives and freezes the hysteresis thresholds
#[derive(Debug, Clone)]
pub struct Calibrator {
    settings: CalibrationSettings,
    phase: CalibrationPhase,
}

impl Calibrator {
    /// Create a calibrator that has seen no samples yet
    ///
    /// # Panics
    ///
    /// Panics if `baseline_frames` is zero or `open_offset` is not positive.
    #[must_use]
    pub fn new(settings: CalibrationSettings) -> Self {
        assert!(settings.baseline_frames > 0, "Baseline frames must be greater than 0");
        assert!(settings.open_offset > 0.0, "Open offset must be positive");
        Self {
            settings,
            phase: CalibrationPhase::Calibrating {
                samples: Vec::with_capacity(settings.baseline_frames),
                provisional: None,
            },
        }
    }

    /// Feed one smoothed sample
    ///
    /// Returns `true` only on the call that completes calibration. Samples
    /// arriving after that are ignored.
    pub fn observe(&mut self, smoothed: f64) -> bool {
        let CalibrationPhase::Calibrating { samples, provisional } = &mut self.phase else {
            return false;
        };

        samples.push(smoothed);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let thresholds = self.settings.thresholds_for(mean);
        *provisional = Some(thresholds);

        if samples.len() < self.settings.baseline_frames {
            return false;
        }

        info!(
            "Calibration complete after {} samples: baseline {:.4}, close {:.4}, open {:.4}",
            samples.len(),
            mean,
            thresholds.close,
            thresholds.open
        );
        self.phase = CalibrationPhase::Calibrated(thresholds);
        true
    }

    /// Frozen thresholds, once calibration has completed
    #[must_use]
    pub fn thresholds(&self) -> Option<Thresholds> {
        match &self.phase {
            CalibrationPhase::Calibrated(thresholds) => Some(*thresholds),
            CalibrationPhase::Calibrating { .. } => None,
        }
    }

    /// Thresholds derived so far, frozen or not
    #[must_use]
    pub fn current_thresholds(&self) -> Option<Thresholds> {
        match &self.phase {
            CalibrationPhase::Calibrated(thresholds) => Some(*thresholds),
            CalibrationPhase::Calibrating { provisional, .. } => *provisional,
        }
    }

    /// Whether the thresholds are frozen
    #[must_use]
    pub const fn is_calibrated(&self) -> bool {
        matches!(self.phase, CalibrationPhase::Calibrated(_))
    }

    /// Number of baseline samples collected
    #[must_use]
    pub fn samples_collected(&self) -> usize {
        match &self.phase {
            CalibrationPhase::Calibrating { samples, .. } => samples.len(),
            CalibrationPhase::Calibrated(_) => self.settings.baseline_frames,
        }
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> &CalibrationPhase {
        &self.phase
    }
}
