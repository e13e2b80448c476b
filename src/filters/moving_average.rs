use std::collections::VecDeque;
use super::SignalFilter;

/// Moving average filter
///
/// Holds the last `window_size` samples and reports their mean. Partial
/// windows during startup are averaged over whatever is held.
pub struct MovingAverageFilter {
    window_size: usize,
    buffer: VecDeque<f64>,
}

impl MovingAverageFilter {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        Self {
            window_size,
            buffer: VecDeque::with_capacity(window_size),
        }
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether no sample has been fed yet
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl SignalFilter for MovingAverageFilter {
    fn apply(&mut self, value: f64) -> f64 {
        if self.buffer.len() >= self.window_size {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);

        self.buffer.iter().sum::<f64>() / self.buffer.len() as f64
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn name(&self) -> &str {
        "MovingAverageFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_moving_average() {
        let mut filter = MovingAverageFilter::new(3);

        assert_eq!(filter.apply(10.0), 10.0);
        assert_eq!(filter.apply(20.0), 15.0);
        assert_eq!(filter.apply(30.0), 20.0);

        // Window is full, oldest value should be dropped
        assert_eq!(filter.apply(40.0), 30.0);
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn test_constant_input_converges() {
        let mut filter = MovingAverageFilter::new(5);
        filter.apply(0.9);
        filter.apply(0.1);

        let mut last = 0.0;
        for _ in 0..5 {
            last = filter.apply(0.25);
        }
        assert_eq!(last, 0.25);
    }

    #[test]
    fn test_reset() {
        let mut filter = MovingAverageFilter::new(5);
        filter.apply(1.0);
        filter.reset();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(0.5), 0.5);
    }

    proptest! {
        #[test]
        fn prop_output_within_window_bounds(values in proptest::collection::vec(0.0f64..1.0, 1..40)) {
            let mut filter = MovingAverageFilter::new(5);
            for (i, &value) in values.iter().enumerate() {
                let out = filter.apply(value);
                let start = i.saturating_sub(4);
                let window = &values[start..=i];
                let min = window.iter().copied().fold(f64::INFINITY, f64::min);
                let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(out >= min - 1e-12 && out <= max + 1e-12);
            }
        }
    }
}
