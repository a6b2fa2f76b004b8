//! Data ingestion and normalization for the sentiment-signal system.
//!
//! This crate handles:
//! - CSV readers for price and sentiment files
//! - Input contract validation (price ordering, finite values, score range)
//! - Daily sentiment aggregation from irregular events
//! - Forward-fill alignment of daily sentiment onto the trading calendar

pub mod aggregator;
pub mod aligner;
pub mod csv_feed;
pub mod validate;

pub use aggregator::SentimentAggregator;
pub use aligner::SeriesAligner;
pub use csv_feed::{load_events_csv, load_prices_csv, read_events_csv, read_prices_csv};
pub use validate::{validate_events, validate_prices};
