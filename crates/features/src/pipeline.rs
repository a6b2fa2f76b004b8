//! Signal pipeline.
//!
//! Combines validation, sentiment aggregation and alignment, rolling
//! statistics and crossover detection into one batch run.

use crate::{
    report::{SignalReport, SignalSummary},
    rolling::RollingStatistics,
    signal::SignalEngine,
};
use sentiment_core::{AnnotatedBar, Config, PriceBar, Result, SentimentEvent, SignalParams};
use sentiment_ingestion::{validate_events, validate_prices, SentimentAggregator, SeriesAligner};
use tracing::{debug, warn};

/// Batch signal generator.
///
/// Holds only validated configuration; every run rebuilds its output from the
/// inputs, so identical inputs give identical reports.
#[derive(Debug, Clone)]
pub struct SignalPipeline {
    config: Config,
}

impl SignalPipeline {
    /// Create a pipeline, rejecting invalid configuration up front.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn params(&self) -> SignalParams {
        SignalParams::from(&self.config.signal)
    }

    /// Annotate every price bar with moving averages, sentiment and a signal.
    ///
    /// Prices must be ascending by date; events may arrive in any order.
    pub fn run(&self, prices: &[PriceBar], events: &[SentimentEvent]) -> Result<SignalReport> {
        validate_prices(prices)?;
        validate_events(events)?;

        let signal_config = &self.config.signal;
        if prices.len() < signal_config.long_window {
            warn!(
                trading_days = prices.len(),
                long_window = signal_config.long_window,
                "price history shorter than long window; all signals will be HOLD"
            );
        }

        let daily = SentimentAggregator::from_config(&self.config.sentiment).aggregate(events);
        if daily.is_empty() {
            warn!(
                events = events.len(),
                source = ?self.config.sentiment.source,
                "no sentiment available; all signals will be HOLD"
            );
        }

        let dates: Vec<_> = prices.iter().map(|b| b.date).collect();
        let sentiment = SeriesAligner::new().align(&dates, &daily);

        let closes: Vec<f64> = prices.iter().map(|b| b.close).collect();
        let rolling = RollingStatistics::new(signal_config.short_window, signal_config.long_window)
            .compute(&closes);

        let signals = SignalEngine::new(signal_config.sentiment_threshold)
            .scan(&rolling.moving_averages, &sentiment);

        let bars: Vec<AnnotatedBar> = prices
            .iter()
            .enumerate()
            .map(|(i, bar)| AnnotatedBar {
                bar: bar.clone(),
                short_ma: rolling.moving_averages[i].short,
                long_ma: rolling.moving_averages[i].long,
                daily_return: rolling.daily_returns[i],
                sentiment: sentiment[i],
                signal: signals[i],
            })
            .collect();

        let summary = SignalSummary::from_bars(&bars, daily.len(), signal_config.long_window);
        debug!(
            trading_days = summary.trading_days,
            buys = summary.buy_count,
            sells = summary.sell_count,
            "signal run complete"
        );

        Ok(SignalReport {
            params: self.params(),
            bars,
            summary,
        })
    }
}
