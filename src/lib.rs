//! Blink-to-symbol decoding library.
//!
//! Turns a per-frame eye landmark stream into Morse text or actuator
//! commands. The decoding pipeline consists of:
//! 1. Eye aspect ratio estimation from six landmarks per eye
//! 2. Smoothing of the two-eye openness signal
//! 3. A one-time warm-up that calibrates close/open thresholds
//! 4. Hysteresis blink detection with duration and cooldown rules
//! 5. Grouping blinks into gestures closed by a silence timeout
//! 6. Mode-dependent decoding into Morse symbols, letters, commands or a mode switch
//!
//! # Examples
//!
//! ## Decoding frames
//!
//! ```no_run
//! use blink_morse::{geometry::synthetic_pair, pipeline::DecoderPipeline};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pipeline = DecoderPipeline::default();
//!
//! // Thirty frames of open eyes calibrate the thresholds
//! let open = synthetic_pair(0.3);
//! for i in 0..30 {
//!     pipeline.process_frame(Some(&open), f64::from(i) / 30.0)?;
//! }
//!
//! let outcome = pipeline.process_frame(None, 1.0)?;
//! if let Some(command) = outcome.command {
//!     println!("Send {command}");
//! }
//! println!("Typed so far: {}", pipeline.output_word());
//! # Ok(())
//! # }
//! ```
//!
//! ## Sending commands
//!
//! ```no_run
//! use blink_morse::{
//!     command::{Command, CommandDispatcher},
//!     transport::UdpCommandSink,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sink = UdpCommandSink::new("192.168.4.1", 4210)?;
//! let mut dispatcher = CommandDispatcher::new();
//!
//! dispatcher.dispatch(Command::Forward, &mut sink);
//! // Repeats are dropped until a different command goes out
//! dispatcher.dispatch(Command::Forward, &mut sink);
//! # Ok(())
//! # }
//! ```

/// Eye landmark geometry and aspect ratio
pub mod geometry;

/// Signal filtering algorithms for smoothing the openness signal
pub mod filters;

/// Warm-up threshold calibration
pub mod calibration;

/// Hysteresis blink detection
pub mod blink_detector;

/// Blink counting into gestures
pub mod gesture;

/// Mode-dependent gesture decoding
pub mod mode;

/// Morse buffer and code table
pub mod morse;

/// Actuator commands and deduplication
pub mod command;

/// Per-frame decoding pipeline
pub mod pipeline;

/// Landmark sources
pub mod landmarks;

/// Command transports
pub mod transport;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
