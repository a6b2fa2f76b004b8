//! Alignment of daily sentiment onto the trading calendar.
//!
//! A two-pointer merge over two ascending date sequences that carries the
//! last seen value forward. Only sentiment dated on or before a trading day
//! can reach that day.

use sentiment_core::{DailySentiment, TradingDate};
use tracing::debug;

/// Forward-fill aligner.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesAligner;

impl SeriesAligner {
    pub fn new() -> Self {
        Self
    }

    /// Produce one sentiment value per trading date.
    ///
    /// Both inputs must be ascending by date. A date gets the most recent
    /// daily value dated `<=` it, or `None` if no sentiment has been seen yet.
    /// Sentiment days missing from the trading calendar (weekends, holidays)
    /// still feed later trading days.
    pub fn align(&self, dates: &[TradingDate], daily: &[DailySentiment]) -> Vec<Option<f64>> {
        let mut aligned = Vec::with_capacity(dates.len());
        let mut next = 0usize;
        let mut last: Option<f64> = None;

        for &date in dates {
            while next < daily.len() && daily[next].date <= date {
                last = Some(daily[next].avg_score);
                next += 1;
            }
            aligned.push(last);
        }

        debug!(
            trading_days = dates.len(),
            sentiment_days = daily.len(),
            filled = aligned.iter().filter(|v| v.is_some()).count(),
            "aligned sentiment to trading calendar"
        );

        aligned
    }
}
