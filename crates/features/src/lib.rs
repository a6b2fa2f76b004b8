//! Feature computation and signal generation for the sentiment-signal system.
//!
//! This crate handles:
//! - Rolling statistics (short/long simple moving averages, daily returns)
//! - Sentiment-confirmed crossover detection
//! - The batch pipeline that joins prices and sentiment into annotated bars
//! - Report export (JSON, CSV)

pub mod rolling;
pub mod signal;
pub mod pipeline;
pub mod report;

pub use rolling::{RollingMean, RollingStatistics};
pub use signal::SignalEngine;
pub use pipeline::SignalPipeline;
pub use report::{AnnotatedRow, SignalReport, SignalSummary};
