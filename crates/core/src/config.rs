//! Configuration structures for the sentiment-signal system.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the signal pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Crossover and confirmation parameters.
    pub signal: SignalConfig,
    /// Sentiment feed selection.
    pub sentiment: SentimentConfig,
}

impl Config {
    /// Parse a configuration from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check parameter consistency before any computation runs.
    pub fn validate(&self) -> Result<()> {
        self.signal.validate()
    }
}

/// Moving-average crossover configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Width of the fast moving average (trading days).
    pub short_window: usize,
    /// Width of the slow moving average (trading days). Must exceed `short_window`.
    pub long_window: usize,
    /// Sentiment magnitude required to confirm a crossover.
    pub sentiment_threshold: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            short_window: 20,
            long_window: 50,
            sentiment_threshold: 0.05,
        }
    }
}

impl SignalConfig {
    /// Validate window sizes and threshold.
    pub fn validate(&self) -> Result<()> {
        if self.short_window == 0 || self.long_window == 0 {
            return Err(Error::config(format!(
                "windows must be positive (short={}, long={})",
                self.short_window, self.long_window
            )));
        }
        if self.short_window >= self.long_window {
            return Err(Error::config(format!(
                "short_window ({}) must be less than long_window ({})",
                self.short_window, self.long_window
            )));
        }
        if !self.sentiment_threshold.is_finite() || self.sentiment_threshold < 0.0 {
            return Err(Error::config(format!(
                "sentiment_threshold must be a non-negative finite number, got {}",
                self.sentiment_threshold
            )));
        }
        Ok(())
    }
}

/// Sentiment feed selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Only aggregate events tagged with this source. `None` reads every event.
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.signal.short_window, 20);
        assert_eq!(config.signal.long_window, 50);
        assert_eq!(config.signal.sentiment_threshold, 0.05);
        assert!(config.sentiment.source.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_windows() {
        let mut config = Config::default();
        config.signal.short_window = 50;
        config.signal.long_window = 20;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.signal.short_window = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_window() {
        let mut config = Config::default();
        config.signal.short_window = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let mut config = Config::default();
        config.signal.sentiment_threshold = f64::NAN;
        assert!(config.validate().is_err());
        config.signal.sentiment_threshold = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            [signal]
            short_window = 5
            long_window = 10

            [sentiment]
            source = "twitter"
            "#,
        )
        .unwrap();
        assert_eq!(config.signal.short_window, 5);
        assert_eq!(config.signal.long_window, 10);
        assert_eq!(config.signal.sentiment_threshold, 0.05);
        assert_eq!(config.sentiment.source.as_deref(), Some("twitter"));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_shipped_config_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/signal.toml");
        assert_eq!(Config::load(path).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(Config::load("/nonexistent/signal.toml"), Err(Error::Io(_))));
    }

    #[test]
    fn test_invalid_toml_windows() {
        let err = Config::from_toml_str("[signal]\nshort_window = 9\nlong_window = 3\n").unwrap_err();
        assert!(err.is_config());
    }
}
