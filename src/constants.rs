//! Constants used throughout the application

/// Number of landmark points describing one eye
pub const EYE_LANDMARK_COUNT: usize = 6;

/// Minimum closure duration (seconds) for a closure to count as a blink
pub const MIN_BLINK_DURATION: f64 = 0.15;

/// Minimum spacing (seconds) between two confirmed blinks
pub const BLINK_COOLDOWN: f64 = 0.2;

/// Silence (seconds) after the last blink before a gesture is finalized
pub const RESET_TIME: f64 = 3.0;

/// Number of smoothed samples collected during calibration
pub const BASELINE_FRAMES: usize = 30;

/// Default smoothing window size
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Close threshold as a fraction of the baseline openness
pub const CLOSE_THRESHOLD_MULTIPLIER: f64 = 0.75;

/// Offset added to the close threshold to obtain the open threshold
pub const OPEN_THRESHOLD_OFFSET: f64 = 0.03;

/// Default exponential filter alpha
pub const DEFAULT_EXPONENTIAL_ALPHA: f64 = 0.5;

/// Face mesh indices of the left eye (outer corner, upper lid x2, inner corner, lower lid x2)
pub const LEFT_EYE_INDICES: [usize; EYE_LANDMARK_COUNT] = [33, 160, 158, 133, 153, 144];

/// Face mesh indices of the right eye
pub const RIGHT_EYE_INDICES: [usize; EYE_LANDMARK_COUNT] = [362, 385, 387, 263, 373, 380];

/// Default actuator address
pub const DEFAULT_ACTUATOR_ADDRESS: &str = "10.173.204.147";

/// Default actuator UDP port
pub const DEFAULT_ACTUATOR_PORT: u16 = 4210;

/// Character emitted for Morse sequences with no table entry
pub const UNKNOWN_MORSE_CHAR: char = '?';

/// Smallest eye width, as a fraction of the mean lid gap, accepted as a real eye
pub const MIN_EYE_WIDTH_FRACTION: f64 = 0.1;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
