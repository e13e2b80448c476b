//! Configuration management for the blink decoder

use crate::{
    blink_detector::BlinkTiming,
    calibration::CalibrationSettings,
    constants::{
        BASELINE_FRAMES, BLINK_COOLDOWN, CLOSE_THRESHOLD_MULTIPLIER, DEFAULT_ACTUATOR_ADDRESS,
        DEFAULT_ACTUATOR_PORT, DEFAULT_SMOOTHING_WINDOW, EYE_LANDMARK_COUNT, LEFT_EYE_INDICES,
        MIN_BLINK_DURATION, OPEN_THRESHOLD_OFFSET, RESET_TIME, RIGHT_EYE_INDICES,
    },
    filters::SignalFilter,
    landmarks::EyeIndices,
    pipeline::PipelineSettings,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Actuator transport configuration
    pub transport: TransportConfig,

    /// Blink timing rules
    pub timing: TimingConfig,

    /// Threshold calibration
    pub calibration: CalibrationConfig,

    /// Signal smoothing
    pub smoothing: SmoothingConfig,

    /// Face mesh landmark indices
    pub landmarks: LandmarkConfig,
}

/// Where commands are sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Actuator host name or IP address
    pub address: String,

    /// Actuator UDP port
    pub port: u16,

    /// Send datagrams; when false commands are only logged
    pub enabled: bool,
}

/// Blink and gesture timing, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Minimum closure duration for a blink
    pub min_blink_duration: f64,

    /// Minimum spacing between blinks
    pub blink_cooldown: f64,

    /// Silence that finalizes a gesture
    pub reset_time: f64,
}

/// Warm-up calibration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Number of smoothed frames observed before thresholds freeze
    pub baseline_frames: usize,

    /// Close threshold as a fraction of the baseline mean
    pub close_multiplier: f64,

    /// Open threshold offset above the close threshold
    pub open_offset: f64,
}

/// Smoothing filter selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Filter name (moving_average, median, exponential, none)
    pub filter: String,

    /// Window size for windowed filters
    pub window: usize,

    /// Alpha for the exponential filter
    pub alpha: f64,
}

/// Face mesh indices of each eye's six landmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkConfig {
    /// Left eye: outer corner, upper lid x2, inner corner, lower lid x2
    pub left_eye: [usize; EYE_LANDMARK_COUNT],

    /// Right eye, same ordering
    pub right_eye: [usize; EYE_LANDMARK_COUNT],
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ACTUATOR_ADDRESS.to_string(),
            port: DEFAULT_ACTUATOR_PORT,
            enabled: true,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_blink_duration: MIN_BLINK_DURATION,
            blink_cooldown: BLINK_COOLDOWN,
            reset_time: RESET_TIME,
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            baseline_frames: BASELINE_FRAMES,
            close_multiplier: CLOSE_THRESHOLD_MULTIPLIER,
            open_offset: OPEN_THRESHOLD_OFFSET,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            filter: "moving_average".to_string(),
            window: DEFAULT_SMOOTHING_WINDOW,
            alpha: crate::constants::DEFAULT_EXPONENTIAL_ALPHA,
        }
    }
}

impl Default for LandmarkConfig {
    fn default() -> Self {
        Self {
            left_eye: LEFT_EYE_INDICES,
            right_eye: RIGHT_EYE_INDICES,
        }
    }
}

fn has_duplicates(indices: &[usize]) -> bool {
    indices
        .iter()
        .enumerate()
        .any(|(i, index)| indices[i + 1..].contains(index))
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create the smoothing filter from configuration
    pub fn create_filter(&self) -> Result<Box<dyn SignalFilter>> {
        let description = match self.smoothing.filter.to_lowercase().as_str() {
            "moving_average" | "movingaverage" | "median" => {
                format!("{}:{}", self.smoothing.filter, self.smoothing.window)
            }
            "exponential" => format!("exponential:{}", self.smoothing.alpha),
            _ => self.smoothing.filter.clone(),
        };
        crate::filters::create_filter(&description)
    }

    /// Decoder settings derived from the timing and calibration sections
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            calibration: CalibrationSettings {
                baseline_frames: self.calibration.baseline_frames,
                close_multiplier: self.calibration.close_multiplier,
                open_offset: self.calibration.open_offset,
            },
            timing: BlinkTiming {
                min_duration: self.timing.min_blink_duration,
                cooldown: self.timing.blink_cooldown,
            },
            reset_time: self.timing.reset_time,
        }
    }

    /// Eye landmark indices for mesh-based sources
    pub fn eye_indices(&self) -> EyeIndices {
        EyeIndices {
            left: self.landmarks.left_eye,
            right: self.landmarks.right_eye,
        }
    }

    /// Actuator endpoint as `address:port`
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.transport.address, self.transport.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Validate timing
        let timing = [
            ("min_blink_duration", self.timing.min_blink_duration),
            ("blink_cooldown", self.timing.blink_cooldown),
            ("reset_time", self.timing.reset_time),
        ];
        for (name, value) in timing {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::ConfigError(format!(
                    "Timing value {name} must be a non-negative number of seconds"
                )));
            }
        }

        // Validate calibration
        if self.calibration.baseline_frames == 0 {
            return Err(Error::ConfigError(
                "Baseline frames must be greater than 0".to_string(),
            ));
        }
        if !(self.calibration.close_multiplier > 0.0 && self.calibration.close_multiplier <= 1.0) {
            return Err(Error::ConfigError(
                "Close multiplier must be in (0, 1]".to_string(),
            ));
        }
        if !(self.calibration.open_offset > 0.0 && self.calibration.open_offset.is_finite()) {
            return Err(Error::ConfigError("Open offset must be positive".to_string()));
        }

        // Validate smoothing
        if self.smoothing.window == 0 {
            return Err(Error::ConfigError(
                "Smoothing window size must be greater than 0".to_string(),
            ));
        }
        self.create_filter()
            .map_err(|e| Error::ConfigError(format!("Invalid smoothing filter: {e}")))?;

        // Validate landmark indices
        if has_duplicates(&self.landmarks.left_eye) || has_duplicates(&self.landmarks.right_eye) {
            return Err(Error::ConfigError(
                "Eye landmark indices must be distinct".to_string(),
            ));
        }

        // Validate transport
        if self.transport.address.trim().is_empty() {
            return Err(Error::ConfigError("Transport address must not be empty".to_string()));
        }
        if self.transport.port == 0 {
            return Err(Error::ConfigError("Transport port must be non-zero".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Blink Morse Decoder Configuration

# Actuator endpoint
transport:
  address: "10.173.204.147"
  port: 4210
  enabled: true

# Blink timing (seconds)
timing:
  min_blink_duration: 0.15
  blink_cooldown: 0.2
  reset_time: 3.0

# Threshold calibration
calibration:
  baseline_frames: 30
  close_multiplier: 0.75
  open_offset: 0.03

# Openness smoothing (moving_average, median, exponential, none)
smoothing:
  filter: "moving_average"
  window: 5
  alpha: 0.5

# Face mesh indices: outer corner, upper lid x2, inner corner, lower lid x2
landmarks:
  left_eye: [33, 160, 158, 133, 153, 144]
  right_eye: [362, 385, 387, 263, 373, 380]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_matches_default() {
        let parsed: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = serde_yaml::from_str("timing:\n  reset_time: 2.0\n").unwrap();
        assert_eq!(parsed.timing.reset_time, 2.0);
        assert_eq!(parsed.timing.min_blink_duration, MIN_BLINK_DURATION);
        assert_eq!(parsed.calibration.baseline_frames, BASELINE_FRAMES);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.calibration.baseline_frames = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.calibration.open_offset = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.smoothing.filter = "median".to_string();
        config.smoothing.window = 4;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.landmarks.left_eye = [1, 2, 3, 4, 5, 1];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.timing.reset_time = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pipeline_settings() {
        let mut config = Config::default();
        config.timing.blink_cooldown = 0.3;
        let settings = config.pipeline_settings();
        assert_eq!(settings.timing.cooldown, 0.3);
        assert_eq!(settings.calibration.close_multiplier, CLOSE_THRESHOLD_MULTIPLIER);
        assert_eq!(config.endpoint(), "10.173.204.147:4210");
    }

    #[test]
    fn test_create_filter_from_config() {
        let mut config = Config::default();
        assert_eq!(config.create_filter().unwrap().name(), "MovingAverageFilter");
        config.smoothing.filter = "exponential".to_string();
        assert_eq!(config.create_filter().unwrap().name(), "ExponentialFilter");
        config.smoothing.filter = "kalman".to_string();
        assert!(config.create_filter().is_err());
    }
}
