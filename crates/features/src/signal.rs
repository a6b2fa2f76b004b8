//! Sentiment-confirmed moving-average crossover detection.
//!
//! The only state is the previous day's pair of moving averages. Each day's
//! action depends on (previous MAs, current MAs, current sentiment) and nothing
//! else, so a crossover that happens while sentiment is undefined is not
//! replayed once sentiment appears.

use sentiment_core::{MovingAverages, Signal};

/// Classify one day from the previous and current moving averages.
///
/// The previous-day comparison is non-strict and the current-day comparison
/// is strict, so a flat prior day followed by a strict cross fires once, and
/// averages riding on top of each other never fire.
pub fn crossover_signal(
    prev: MovingAverages,
    curr: MovingAverages,
    sentiment: Option<f64>,
    threshold: f64,
) -> Signal {
    let (Some((prev_short, prev_long)), Some((curr_short, curr_long))) = (prev.both(), curr.both())
    else {
        return Signal::Hold;
    };
    let Some(sentiment) = sentiment else {
        return Signal::Hold;
    };

    if prev_short <= prev_long && curr_short > curr_long && sentiment > threshold {
        Signal::Buy
    } else if prev_short >= prev_long && curr_short < curr_long && sentiment < -threshold {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Day-by-day crossover scanner.
///
/// Feed days in ascending date order. The first day always yields HOLD.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    /// Sentiment magnitude required to confirm a crossover.
    threshold: f64,
    /// Previous day's moving averages.
    prev: Option<MovingAverages>,
}

impl SignalEngine {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            prev: None,
        }
    }

    /// Evaluate the next day and remember its averages for tomorrow.
    pub fn step(&mut self, curr: MovingAverages, sentiment: Option<f64>) -> Signal {
        let signal = match self.prev {
            Some(prev) => crossover_signal(prev, curr, sentiment, self.threshold),
            None => Signal::Hold,
        };
        self.prev = Some(curr);
        signal
    }

    /// Evaluate a whole aligned series.
    ///
    /// # Panics
    ///
    /// If `sentiment` does not have exactly one entry per day of `averages`.
    pub fn scan(&mut self, averages: &[MovingAverages], sentiment: &[Option<f64>]) -> Vec<Signal> {
        assert_eq!(
            averages.len(),
            sentiment.len(),
            "sentiment series must be aligned to the price series"
        );
        averages
            .iter()
            .zip(sentiment)
            .map(|(&ma, &s)| self.step(ma, s))
            .collect()
    }
}
