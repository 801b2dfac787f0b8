use std::collections::VecDeque;

/// Fixed-window moving average for a single sensor channel.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: usize,
    samples: VecDeque<f32>,
}

impl MovingAverage {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self { window, samples: VecDeque::with_capacity(window) }
    }

    /// Push a sample and return the mean of the current window.
    pub fn push(&mut self, sample: f32) -> f32 {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.mean().unwrap_or(sample)
    }

    pub fn mean(&self) -> Option<f32> {
        // Summed fresh each time, no running total to drift
        (!self.samples.is_empty())
            .then(|| self.samples.iter().sum::<f32>() / self.samples.len() as f32)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_window_averages_what_it_has() {
        let mut ma = MovingAverage::new(4);
        assert_eq!(ma.mean(), None);
        assert_eq!(ma.push(2.0), 2.0);
        assert_eq!(ma.push(4.0), 3.0);
        assert_eq!(ma.len(), 2);
    }

    #[test]
    fn test_window_slides() {
        let mut ma = MovingAverage::new(3);
        ma.push(1.0);
        ma.push(2.0);
        ma.push(3.0);
        let mean = ma.push(10.0);
        assert!((mean - 5.0).abs() < 1e-6);
        assert_eq!(ma.len(), 3);
    }

    #[test]
    fn test_smooths_spike() {
        let mut ma = MovingAverage::new(5);
        for _ in 0..5 {
            ma.push(5.0);
        }
        let smoothed = ma.push(0.0);
        assert!((smoothed - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_reset_and_min_window() {
        let mut ma = MovingAverage::new(0);
        assert_eq!(ma.window(), 1);
        ma.push(3.0);
        assert_eq!(ma.push(7.0), 7.0);
        ma.reset();
        assert!(ma.is_empty());
    }
}
