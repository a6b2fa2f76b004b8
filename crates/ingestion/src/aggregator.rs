//! Daily sentiment aggregation.
//!
//! Collapses irregular scored events into one unweighted mean per calendar day.

use chrono::NaiveDate;
use sentiment_core::{config::SentimentConfig, DailySentiment, SentimentEvent};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use tracing::debug;

/// Groups sentiment events by UTC calendar day and averages their scores.
#[derive(Debug, Clone, Default)]
pub struct SentimentAggregator {
    /// Only events with this tag are aggregated when set.
    source: Option<String>,
}

impl SentimentAggregator {
    /// Create an aggregator reading every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator restricted to one source tag.
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }

    pub fn from_config(config: &SentimentConfig) -> Self {
        Self {
            source: config.source.clone(),
        }
    }

    /// Whether an event passes the source selector.
    fn accepts(&self, event: &SentimentEvent) -> bool {
        match &self.source {
            Some(wanted) => event.source.as_deref() == Some(wanted.as_str()),
            None => true,
        }
    }

    /// Aggregate events into ascending daily means.
    ///
    /// Days without events produce no row. Empty input yields an empty vector.
    pub fn aggregate(&self, events: &[SentimentEvent]) -> Vec<DailySentiment> {
        let mut by_day: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        let mut accepted = 0usize;

        for event in events.iter().filter(|e| self.accepts(e)) {
            by_day.entry(event.date()).or_default().push(event.score);
            accepted += 1;
        }

        debug!(
            total = events.len(),
            accepted,
            days = by_day.len(),
            "aggregated sentiment events"
        );

        by_day
            .into_iter()
            .map(|(date, scores)| DailySentiment {
                date,
                event_count: scores.len(),
                avg_score: scores.iter().mean(),
            })
            .collect()
    }
}
