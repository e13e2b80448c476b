//! Signal filters for smoothing the per-frame openness measurement.
//!
//! The decoder smooths the two-eye openness with a trailing moving average.
//! Median and exponential filters are available as alternatives for noisier
//! landmark sources.

/// Moving average filter, the default smoother
pub mod moving_average;

/// Median filter for outlier rejection
pub mod median;

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::{constants::DEFAULT_SMOOTHING_WINDOW, Error, Result};

/// Trait for all scalar signal filters
pub trait SignalFilter: Send + Sync {
    /// Feed one sample and return the filtered value
    fn apply(&mut self, value: f64) -> f64;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl SignalFilter for NoFilter {
    fn apply(&mut self, value: f64) -> f64 {
        value
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

fn parse_param<T: std::str::FromStr>(filter_type: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::FilterError(format!("Invalid parameter '{raw}' for filter {filter_type}")))
}

fn checked_window(raw: Option<&str>, filter_type: &str) -> Result<usize> {
    let window = match raw {
        Some(raw) => parse_param::<usize>(filter_type, raw)?,
        None => DEFAULT_SMOOTHING_WINDOW,
    };
    if window == 0 {
        return Err(Error::FilterError("Window size must be greater than 0".to_string()));
    }
    Ok(window)
}

/// Create a filter from a `name[:param]` description
///
/// Supported: `none`, `moving_average[:window]`, `median[:odd window]`,
/// `exponential[:alpha]`.
///
/// # Errors
///
/// Returns an error for unknown filter names or invalid parameters
pub fn create_filter(filter_type: &str) -> Result<Box<dyn SignalFilter>> {
    let lowered = filter_type.to_lowercase();
    let mut parts = lowered.split(':');
    let name = parts.next().unwrap_or_default();
    let param = parts.next();
    if parts.next().is_some() {
        return Err(Error::FilterError(format!("Too many parameters: {filter_type}")));
    }

    match name {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "moving_average" | "movingaverage" => {
            let window = checked_window(param, filter_type)?;
            Ok(Box::new(moving_average::MovingAverageFilter::new(window)))
        }
        "median" => {
            let window = checked_window(param, filter_type)?;
            if window % 2 == 0 {
                return Err(Error::FilterError("Median filter window size must be odd".to_string()));
            }
            Ok(Box::new(median::MedianFilter::new(window)))
        }
        "exponential" => {
            let alpha = match param {
                Some(raw) => parse_param::<f64>(filter_type, raw)?,
                None => crate::constants::DEFAULT_EXPONENTIAL_ALPHA,
            };
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")));
            }
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {filter_type}"))),
    }
}
