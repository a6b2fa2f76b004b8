//! Rolling statistics over the close-price series.
//!
//! Trailing simple moving averages and close-to-close returns. Every value at
//! index `i` depends only on closes at indices `<= i`.

use sentiment_core::MovingAverages;
use std::collections::VecDeque;

/// Trailing simple moving average over a fixed window.
pub struct RollingMean {
    /// Window size in periods.
    window: usize,
    /// Most recent observations, oldest first.
    values: VecDeque<f64>,
}

impl RollingMean {
    /// Create a new rolling mean. `window` must be at least 1.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    /// Add an observation.
    ///
    /// Returns the mean of the last `window` observations once the window is full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.values.len() >= self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);
        self.mean()
    }

    /// Mean of the current window, if full.
    ///
    /// Summed from scratch rather than kept as a running total so that equal
    /// windows produce bit-identical means; crossover detection compares them
    /// for equality.
    pub fn mean(&self) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }
        let sum: f64 = self.values.iter().sum();
        Some(sum / self.window as f64)
    }

    /// Check if the window is full.
    pub fn is_ready(&self) -> bool {
        self.window > 0 && self.values.len() >= self.window
    }

}

/// Trailing simple moving average of a whole series.
pub fn simple_moving_average(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut sma = RollingMean::new(window);
    closes.iter().map(|&c| sma.push(c)).collect()
}

/// Close-to-close change in percent. Undefined on the first day and after a zero close.
pub fn daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut prev: Option<f64> = None;
    closes
        .iter()
        .map(|&close| {
            let ret = prev
                .filter(|p| *p != 0.0)
                .map(|p| (close / p - 1.0) * 100.0);
            prev = Some(close);
            ret
        })
        .collect()
}

/// Rolling features for the whole price series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollingSeries {
    /// Short and long moving averages per day.
    pub moving_averages: Vec<MovingAverages>,
    /// Close-to-close percent change per day.
    pub daily_returns: Vec<Option<f64>>,
}

/// Short/long moving-average calculator.
#[derive(Debug, Clone, Copy)]
pub struct RollingStatistics {
    short_window: usize,
    long_window: usize,
}

impl RollingStatistics {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
        }
    }

    /// Compute both moving averages and daily returns over the closes.
    pub fn compute(&self, closes: &[f64]) -> RollingSeries {
        let short = simple_moving_average(closes, self.short_window);
        let long = simple_moving_average(closes, self.long_window);

        RollingSeries {
            moving_averages: short
                .into_iter()
                .zip(long)
                .map(|(s, l)| MovingAverages::new(s, l))
                .collect(),
            daily_returns: daily_returns(closes),
        }
    }
}
