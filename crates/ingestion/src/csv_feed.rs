//! CSV readers for price and sentiment files.
//!
//! Headers are matched by name, so extra columns (dividends, splits, raw text)
//! are ignored. Both lowercase names and the capitalised names of common
//! market-data exports are accepted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sentiment_core::{Error, PriceBar, Result, SentimentEvent};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(alias = "Date")]
    date: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume", default)]
    volume: f64,
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    #[serde(alias = "date", alias = "Date")]
    timestamp: String,
    #[serde(alias = "compound")]
    score: f64,
    #[serde(default)]
    source: Option<String>,
}

/// Parse the date part of a date or datetime cell ("2024-01-02" or
/// "2024-01-02 00:00:00-05:00").
fn parse_trading_date(cell: &str) -> Result<NaiveDate> {
    let day = cell.trim().get(..10).unwrap_or(cell);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| Error::malformed(format!("invalid date {cell:?}: {e}")))
}

/// Parse an event timestamp. Offsets are converted to UTC; naive values are taken as UTC.
fn parse_timestamp(cell: &str) -> Result<DateTime<Utc>> {
    let cell = cell.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(cell) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S")
        .map(|ts| ts.and_utc())
        .map_err(|e| Error::malformed(format!("invalid timestamp {cell:?}: {e}")))
}

/// Read daily bars from CSV with `date,open,high,low,close[,volume]` columns.
pub fn read_prices_csv<R: Read>(rdr: R) -> Result<Vec<PriceBar>> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut bars = Vec::new();
    for result in reader.deserialize() {
        let record: PriceRecord = result?;
        bars.push(PriceBar {
            date: parse_trading_date(&record.date)?,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        });
    }
    debug!(bars = bars.len(), "read price csv");
    Ok(bars)
}

/// Read scored events from CSV with `timestamp,score[,source]` columns.
///
/// An empty `source` cell means the event is untagged.
pub fn read_events_csv<R: Read>(rdr: R) -> Result<Vec<SentimentEvent>> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut events = Vec::new();
    for result in reader.deserialize() {
        let record: EventRecord = result?;
        events.push(SentimentEvent {
            timestamp: parse_timestamp(&record.timestamp)?,
            score: record.score,
            source: record.source.filter(|s| !s.is_empty()),
        });
    }
    debug!(events = events.len(), "read sentiment csv");
    Ok(events)
}

pub fn load_prices_csv(path: impl AsRef<Path>) -> Result<Vec<PriceBar>> {
    read_prices_csv(File::open(path)?)
}

pub fn load_events_csv(path: impl AsRef<Path>) -> Result<Vec<SentimentEvent>> {
    read_events_csv(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_market_export_headers() {
        let data = "\
Date,Open,High,Low,Close,Volume,Dividends,Stock Splits
2024-01-02 00:00:00-05:00,10.0,11.0,9.5,10.5,1200,0.0,0.0
2024-01-03 00:00:00-05:00,10.5,12.0,10.0,11.5,900,0.0,0.0
";
        let bars = read_prices_csv(data.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[1].close, 11.5);
        assert_eq!(bars[1].volume, 900.0);
    }

    #[test]
    fn test_lowercase_headers_without_volume() {
        let data = "date,open,high,low,close\n2024-03-01,1,2,0.5,1.5\n";
        let bars = read_prices_csv(data.as_bytes()).unwrap();
        assert_eq!(bars[0].volume, 0.0);
        assert_eq!(bars[0].high, 2.0);
    }

    #[test]
    fn test_bad_price_date() {
        let data = "date,open,high,low,close\n03/01/2024,1,2,0.5,1.5\n";
        let err = read_prices_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_non_numeric_close() {
        let data = "date,open,high,low,close\n2024-03-01,1,2,0.5,n/a\n";
        assert!(matches!(read_prices_csv(data.as_bytes()), Err(Error::Csv(_))));
    }

    #[test]
    fn test_event_timestamps_and_sources() {
        let data = "\
timestamp,score,source
2024-01-01T23:30:00-02:00,0.4,twitter
2024-01-02 08:00:00,-0.2,
";
        let events = read_events_csv(data.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);
        // 23:30 at -02:00 is already the next UTC day.
        assert_eq!(events[0].timestamp, Utc.with_ymd_and_hms(2024, 1, 2, 1, 30, 0).unwrap());
        assert_eq!(events[0].source.as_deref(), Some("twitter"));
        assert_eq!(events[1].timestamp, Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap());
        assert!(events[1].source.is_none());
    }

    #[test]
    fn test_scraped_tweet_columns() {
        let data = "date,content,compound\n2024-01-05 12:00:00+00:00,\"up, up, up\",0.7\n";
        let events = read_events_csv(data.as_bytes()).unwrap();
        assert_eq!(events[0].score, 0.7);
        assert_eq!(events[0].date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        std::fs::write(&path, "timestamp,score\n2024-02-01T00:00:00Z,0.1\n").unwrap();
        assert_eq!(load_events_csv(&path).unwrap().len(), 1);
        assert!(matches!(load_events_csv(dir.path().join("absent.csv")), Err(Error::Io(_))));
    }
}
