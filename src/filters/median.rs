use std::collections::VecDeque;
use super::SignalFilter;

/// Median filter
///
/// Rejects single-frame landmark glitches that a moving average would smear
/// across the whole window.
pub struct MedianFilter {
    window_size: usize,
    buffer: VecDeque<f64>,
}

impl MedianFilter {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        assert!(window_size % 2 == 1, "Median filter window size must be odd");
        Self {
            window_size,
            buffer: VecDeque::with_capacity(window_size),
        }
    }

    fn calculate_median(values: &VecDeque<f64>) -> f64 {
        let mut sorted: Vec<f64> = values.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);

        let len = sorted.len();
        if len == 0 {
            0.0
        } else if len % 2 == 0 {
            (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
        } else {
            sorted[len / 2]
        }
    }
}

impl SignalFilter for MedianFilter {
    fn apply(&mut self, value: f64) -> f64 {
        if self.buffer.len() >= self.window_size {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);

        Self::calculate_median(&self.buffer)
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn name(&self) -> &str {
        "MedianFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_filter() {
        let mut filter = MedianFilter::new(3);

        assert_eq!(filter.apply(0.10), 0.10);
        assert_eq!(filter.apply(0.30), 0.20); // median of [0.1, 0.3]
        assert_eq!(filter.apply(0.20), 0.20);
    }

    #[test]
    fn test_median_with_outlier() {
        let mut filter = MedianFilter::new(3);

        filter.apply(0.30);
        filter.apply(0.31);
        // A one-frame landmark glitch is ignored
        assert_eq!(filter.apply(5.0), 0.31);
    }
}
