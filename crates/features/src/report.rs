//! Annotated run output.

use sentiment_core::{AnnotatedBar, PriceBar, Result, Signal, SignalParams, TradingDate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Counts and data-sparsity flags for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSummary {
    /// Number of annotated trading days.
    pub trading_days: usize,
    pub buy_count: usize,
    pub sell_count: usize,
    pub hold_count: usize,
    /// Calendar days that had at least one sentiment event.
    pub sentiment_days: usize,
    /// Price series shorter than the long window; every signal is HOLD.
    pub insufficient_data: bool,
    /// No sentiment was available; every signal is HOLD.
    pub missing_sentiment: bool,
}

impl SignalSummary {
    /// Tally signals over the annotated bars.
    pub fn from_bars(bars: &[AnnotatedBar], sentiment_days: usize, long_window: usize) -> Self {
        let mut summary = SignalSummary {
            trading_days: bars.len(),
            sentiment_days,
            insufficient_data: bars.len() < long_window,
            missing_sentiment: sentiment_days == 0,
            ..Default::default()
        };
        for bar in bars {
            match bar.signal {
                Signal::Buy => summary.buy_count += 1,
                Signal::Sell => summary.sell_count += 1,
                Signal::Hold => summary.hold_count += 1,
            }
        }
        summary
    }
}

/// One annotated day as a flat CSV row.
///
/// Column order is fixed: date, OHLCV, short_ma, long_ma, daily_return,
/// sentiment, signal. Undefined values are empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRow {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub daily_return: Option<f64>,
    pub sentiment: Option<f64>,
    pub signal: Signal,
}

impl From<&AnnotatedBar> for AnnotatedRow {
    fn from(b: &AnnotatedBar) -> Self {
        AnnotatedRow {
            date: b.bar.date,
            open: b.bar.open,
            high: b.bar.high,
            low: b.bar.low,
            close: b.bar.close,
            volume: b.bar.volume,
            short_ma: b.short_ma,
            long_ma: b.long_ma,
            daily_return: b.daily_return,
            sentiment: b.sentiment,
            signal: b.signal,
        }
    }
}

impl From<AnnotatedRow> for AnnotatedBar {
    fn from(r: AnnotatedRow) -> Self {
        AnnotatedBar {
            bar: PriceBar {
                date: r.date,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
                volume: r.volume,
            },
            short_ma: r.short_ma,
            long_ma: r.long_ma,
            daily_return: r.daily_return,
            sentiment: r.sentiment,
            signal: r.signal,
        }
    }
}

/// Everything a presentation layer needs from one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    /// Parameters the run used.
    pub params: SignalParams,
    /// One row per trading day, ascending.
    pub bars: Vec<AnnotatedBar>,
    pub summary: SignalSummary,
}

impl SignalReport {
    /// Days that emitted BUY.
    pub fn buys(&self) -> impl Iterator<Item = &AnnotatedBar> {
        self.bars.iter().filter(|b| b.signal == Signal::Buy)
    }

    /// Days that emitted SELL.
    pub fn sells(&self) -> impl Iterator<Item = &AnnotatedBar> {
        self.bars.iter().filter(|b| b.signal == Signal::Sell)
    }

    /// Signals in date order.
    pub fn signals(&self) -> Vec<Signal> {
        self.bars.iter().map(|b| b.signal).collect()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Read a report previously written with [`SignalReport::write_json`].
    pub fn read_json(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the annotated bars as CSV, one row per trading day.
    ///
    /// Params and summary are not part of the table; use JSON to keep them.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for bar in &self.bars {
            writer.serialize(AnnotatedRow::from(bar))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read annotated bars back from a file written by [`SignalReport::write_csv`].
    pub fn read_csv_bars(path: impl AsRef<Path>) -> Result<Vec<AnnotatedBar>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut bars = Vec::new();
        for result in reader.deserialize() {
            let row: AnnotatedRow = result?;
            bars.push(row.into());
        }
        Ok(bars)
    }
}
