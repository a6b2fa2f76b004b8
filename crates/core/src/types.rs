//! Core data types for the sentiment-signal system.

use crate::config::SignalConfig;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar day on which a price bar exists.
pub type TradingDate = NaiveDate;

/// Build a UTC timestamp from milliseconds since the Unix epoch.
#[inline]
pub fn ts_from_millis(ts_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ts_ms)
}

/// Daily OHLCV bar from the market-data feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading day (unique, strictly increasing within a feed).
    pub date: TradingDate,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Total volume.
    pub volume: f64,
}

impl PriceBar {
    /// A flat bar where every price field equals `close`.
    pub fn from_close(date: TradingDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }
}

/// A single scored text event (compound polarity in [-1, 1]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentEvent {
    /// When the text was published.
    pub timestamp: DateTime<Utc>,
    /// Compound polarity score.
    pub score: f64,
    /// Feed tag (e.g. "twitter"), used by the source selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SentimentEvent {
    /// Create an untagged event.
    pub fn new(timestamp: DateTime<Utc>, score: f64) -> Self {
        Self {
            timestamp,
            score,
            source: None,
        }
    }

    /// Attach a source tag.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Calendar day the event belongs to (UTC).
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Mean sentiment of all events on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySentiment {
    /// Calendar day.
    pub date: NaiveDate,
    /// Unweighted mean of the day's event scores.
    pub avg_score: f64,
    /// Number of events averaged.
    pub event_count: usize,
}

/// Per-day trading action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(i8)]
pub enum Signal {
    /// Upward crossover confirmed by positive sentiment.
    Buy = 1,
    /// Downward crossover confirmed by negative sentiment.
    Sell = -1,
    /// No confirmed crossover.
    #[default]
    Hold = 0,
}

impl Signal {
    /// Numeric encoding: +1 buy, -1 sell, 0 hold.
    #[inline]
    pub fn sign(self) -> i8 {
        self as i8
    }

    /// Whether this signal asks for action.
    #[inline]
    pub fn is_actionable(self) -> bool {
        self != Signal::Hold
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short and long moving averages for one day. `None` means not enough history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub short: Option<f64>,
    pub long: Option<f64>,
}

impl MovingAverages {
    pub fn new(short: Option<f64>, long: Option<f64>) -> Self {
        Self { short, long }
    }

    /// Both averages, if both are defined.
    #[inline]
    pub fn both(&self) -> Option<(f64, f64)> {
        Some((self.short?, self.long?))
    }
}

/// Price bar annotated with rolling statistics, aligned sentiment and signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    /// Source bar.
    #[serde(flatten)]
    pub bar: PriceBar,
    /// Fast moving average of close.
    pub short_ma: Option<f64>,
    /// Slow moving average of close.
    pub long_ma: Option<f64>,
    /// Close-to-close change in percent.
    pub daily_return: Option<f64>,
    /// Forward-filled daily sentiment.
    pub sentiment: Option<f64>,
    /// Action for the day.
    pub signal: Signal,
}

impl AnnotatedBar {
    #[inline]
    pub fn date(&self) -> TradingDate {
        self.bar.date
    }

    #[inline]
    pub fn moving_averages(&self) -> MovingAverages {
        MovingAverages::new(self.short_ma, self.long_ma)
    }
}

/// Parameters a run was produced with, for display and audit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalParams {
    pub short_window: usize,
    pub long_window: usize,
    pub sentiment_threshold: f64,
}

impl From<&SignalConfig> for SignalParams {
    fn from(config: &SignalConfig) -> Self {
        Self {
            short_window: config.short_window,
            long_window: config.long_window,
            sentiment_threshold: config.sentiment_threshold,
        }
    }
}
