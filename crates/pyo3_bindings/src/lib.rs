//! PyO3 bindings for sentiment-signal Rust components.
//!
//! Exposes the signal pipeline to Python dashboards:
//! - Price bars and scored sentiment events as input
//! - Annotated bars (moving averages, aligned sentiment, signal) as output
//! - Standalone daily sentiment aggregation

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use chrono::NaiveDate;
use sentiment_core::{
    ts_from_millis, AnnotatedBar as RustAnnotatedBar, Config as RustConfig,
    DailySentiment as RustDailySentiment, Error as RustError, PriceBar as RustPriceBar,
    SentimentEvent as RustSentimentEvent, SignalParams as RustSignalParams,
};
use sentiment_features::SignalPipeline;
use sentiment_ingestion::SentimentAggregator;

fn to_py_err(err: RustError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_date(s: &str) -> PyResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| PyValueError::new_err(format!("invalid date {s:?}: {e}")))
}

// ============================================================================
// Python-exposed Types
// ============================================================================

/// Daily OHLCV bar.
#[pyclass]
#[derive(Clone)]
pub struct PriceBar {
    /// ISO date (YYYY-MM-DD).
    #[pyo3(get, set)]
    pub date: String,
    #[pyo3(get, set)]
    pub open: f64,
    #[pyo3(get, set)]
    pub high: f64,
    #[pyo3(get, set)]
    pub low: f64,
    #[pyo3(get, set)]
    pub close: f64,
    #[pyo3(get, set)]
    pub volume: f64,
}

#[pymethods]
impl PriceBar {
    #[new]
    #[pyo3(signature = (date, close, open=None, high=None, low=None, volume=0.0))]
    fn new(
        date: String,
        close: f64,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        volume: f64,
    ) -> Self {
        PriceBar {
            date,
            open: open.unwrap_or(close),
            high: high.unwrap_or(close),
            low: low.unwrap_or(close),
            close,
            volume,
        }
    }

    fn __repr__(&self) -> String {
        format!("PriceBar(date={}, close={})", self.date, self.close)
    }
}

impl PriceBar {
    fn to_rust(&self) -> PyResult<RustPriceBar> {
        Ok(RustPriceBar {
            date: parse_date(&self.date)?,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        })
    }
}

/// A scored text event.
#[pyclass]
#[derive(Clone)]
pub struct SentimentEvent {
    /// Milliseconds since the Unix epoch (UTC).
    #[pyo3(get, set)]
    pub ts_ms: i64,
    /// Compound polarity in [-1, 1].
    #[pyo3(get, set)]
    pub score: f64,
    #[pyo3(get, set)]
    pub source: Option<String>,
}

#[pymethods]
impl SentimentEvent {
    #[new]
    #[pyo3(signature = (ts_ms, score, source=None))]
    fn new(ts_ms: i64, score: f64, source: Option<String>) -> Self {
        SentimentEvent { ts_ms, score, source }
    }

    fn __repr__(&self) -> String {
        format!("SentimentEvent(ts_ms={}, score={:.4})", self.ts_ms, self.score)
    }
}

impl SentimentEvent {
    fn to_rust(&self) -> PyResult<RustSentimentEvent> {
        let timestamp = ts_from_millis(self.ts_ms)
            .ok_or_else(|| PyValueError::new_err(format!("timestamp out of range: {}", self.ts_ms)))?;
        Ok(RustSentimentEvent {
            timestamp,
            score: self.score,
            source: self.source.clone(),
        })
    }
}

/// Average sentiment for one calendar day.
#[pyclass]
#[derive(Clone)]
pub struct DailySentiment {
    #[pyo3(get)]
    pub date: String,
    #[pyo3(get)]
    pub avg_score: f64,
    #[pyo3(get)]
    pub event_count: usize,
}

impl From<RustDailySentiment> for DailySentiment {
    fn from(d: RustDailySentiment) -> Self {
        DailySentiment {
            date: d.date.to_string(),
            avg_score: d.avg_score,
            event_count: d.event_count,
        }
    }
}

/// Price bar with moving averages, aligned sentiment and signal.
#[pyclass]
#[derive(Clone)]
pub struct AnnotatedBar {
    #[pyo3(get)]
    pub date: String,
    #[pyo3(get)]
    pub open: f64,
    #[pyo3(get)]
    pub high: f64,
    #[pyo3(get)]
    pub low: f64,
    #[pyo3(get)]
    pub close: f64,
    #[pyo3(get)]
    pub volume: f64,
    #[pyo3(get)]
    pub short_ma: Option<f64>,
    #[pyo3(get)]
    pub long_ma: Option<f64>,
    #[pyo3(get)]
    pub daily_return: Option<f64>,
    #[pyo3(get)]
    pub sentiment: Option<f64>,
    /// "BUY", "SELL" or "HOLD".
    #[pyo3(get)]
    pub signal: String,
    /// +1, -1 or 0.
    #[pyo3(get)]
    pub signal_value: i8,
}

#[pymethods]
impl AnnotatedBar {
    fn __repr__(&self) -> String {
        format!(
            "AnnotatedBar(date={}, close={}, signal={})",
            self.date, self.close, self.signal
        )
    }
}

impl From<RustAnnotatedBar> for AnnotatedBar {
    fn from(b: RustAnnotatedBar) -> Self {
        AnnotatedBar {
            date: b.bar.date.to_string(),
            open: b.bar.open,
            high: b.bar.high,
            low: b.bar.low,
            close: b.bar.close,
            volume: b.bar.volume,
            short_ma: b.short_ma,
            long_ma: b.long_ma,
            daily_return: b.daily_return,
            sentiment: b.sentiment,
            signal: b.signal.as_str().to_string(),
            signal_value: b.signal.sign(),
        }
    }
}

/// Parameters used for a run.
#[pyclass]
#[derive(Clone)]
pub struct SignalParams {
    #[pyo3(get)]
    pub short_window: usize,
    #[pyo3(get)]
    pub long_window: usize,
    #[pyo3(get)]
    pub sentiment_threshold: f64,
}

impl From<RustSignalParams> for SignalParams {
    fn from(p: RustSignalParams) -> Self {
        SignalParams {
            short_window: p.short_window,
            long_window: p.long_window,
            sentiment_threshold: p.sentiment_threshold,
        }
    }
}

// ============================================================================
// Python-exposed Engine Classes
// ============================================================================

/// Batch signal pipeline.
#[pyclass(name = "SignalPipeline")]
pub struct PySignalPipeline {
    inner: SignalPipeline,
}

#[pymethods]
impl PySignalPipeline {
    #[new]
    #[pyo3(signature = (short_window=20, long_window=50, sentiment_threshold=0.05, sentiment_source=None))]
    fn new(
        short_window: usize,
        long_window: usize,
        sentiment_threshold: f64,
        sentiment_source: Option<String>,
    ) -> PyResult<Self> {
        let mut config = RustConfig::default();
        config.signal.short_window = short_window;
        config.signal.long_window = long_window;
        config.signal.sentiment_threshold = sentiment_threshold;
        config.sentiment.source = sentiment_source;
        Ok(PySignalPipeline {
            inner: SignalPipeline::new(config).map_err(to_py_err)?,
        })
    }

    /// Annotate price bars with moving averages, sentiment and signals.
    fn run(&self, prices: Vec<PriceBar>, events: Vec<SentimentEvent>) -> PyResult<Vec<AnnotatedBar>> {
        let prices = prices.iter().map(PriceBar::to_rust).collect::<PyResult<Vec<_>>>()?;
        let events = events
            .iter()
            .map(SentimentEvent::to_rust)
            .collect::<PyResult<Vec<_>>>()?;

        let report = self.inner.run(&prices, &events).map_err(to_py_err)?;
        Ok(report.bars.into_iter().map(|b| b.into()).collect())
    }

    /// Run and return the full report as JSON text.
    fn run_json(&self, prices: Vec<PriceBar>, events: Vec<SentimentEvent>) -> PyResult<String> {
        let prices = prices.iter().map(PriceBar::to_rust).collect::<PyResult<Vec<_>>>()?;
        let events = events
            .iter()
            .map(SentimentEvent::to_rust)
            .collect::<PyResult<Vec<_>>>()?;

        let report = self.inner.run(&prices, &events).map_err(to_py_err)?;
        report.to_json_pretty().map_err(to_py_err)
    }

    /// Parameters this pipeline runs with.
    fn params(&self) -> SignalParams {
        self.inner.params().into()
    }
}

/// Average event scores per UTC calendar day.
#[pyfunction]
#[pyo3(signature = (events, source=None))]
fn aggregate_daily_sentiment(
    events: Vec<SentimentEvent>,
    source: Option<String>,
) -> PyResult<Vec<DailySentiment>> {
    let events = events
        .iter()
        .map(SentimentEvent::to_rust)
        .collect::<PyResult<Vec<_>>>()?;
    let aggregator = match source {
        Some(s) => SentimentAggregator::with_source(s),
        None => SentimentAggregator::new(),
    };
    Ok(aggregator.aggregate(&events).into_iter().map(|d| d.into()).collect())
}

// ============================================================================
// Module Definition
// ============================================================================

/// Sentiment Signal Core - Rust signal engine for Python.
#[pymodule]
fn sentiment_signal_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Types
    m.add_class::<PriceBar>()?;
    m.add_class::<SentimentEvent>()?;
    m.add_class::<DailySentiment>()?;
    m.add_class::<AnnotatedBar>()?;
    m.add_class::<SignalParams>()?;

    // Engine classes
    m.add_class::<PySignalPipeline>()?;
    m.add_function(wrap_pyfunction!(aggregate_daily_sentiment, m)?)?;

    Ok(())
}
