//! Input contract checks.
//!
//! Violations are reported as [`Error::MalformedInput`]; nothing is repaired.

use sentiment_core::{Error, PriceBar, Result, SentimentEvent};

/// Check that trading dates strictly increase and every close is finite.
pub fn validate_prices(bars: &[PriceBar]) -> Result<()> {
    for (i, bar) in bars.iter().enumerate() {
        if !bar.close.is_finite() {
            return Err(Error::malformed(format!(
                "close on {} is not finite ({})",
                bar.date, bar.close
            )));
        }
        if i > 0 {
            let prev = &bars[i - 1];
            if bar.date <= prev.date {
                return Err(Error::malformed(format!(
                    "price dates must strictly increase: {} follows {}",
                    bar.date, prev.date
                )));
            }
        }
    }
    Ok(())
}

/// Check that every sentiment score is a finite number in [-1, 1].
pub fn validate_events(events: &[SentimentEvent]) -> Result<()> {
    if let Some(bad) = events
        .iter()
        .find(|e| !e.score.is_finite() || !(-1.0..=1.0).contains(&e.score))
    {
        return Err(Error::malformed(format!(
            "sentiment score {} at {} outside [-1, 1]",
            bad.score, bad.timestamp
        )));
    }
    Ok(())
}
