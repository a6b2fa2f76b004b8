//! Batch driver: annotate a daily price series with sentiment-confirmed
//! crossover signals.

use anyhow::{Context, Result};
use clap::Parser;
use sentiment_core::{Config, PriceBar, SentimentEvent};
use sentiment_features::{SignalPipeline, SignalReport};
use sentiment_ingestion::{load_events_csv, load_prices_csv};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Sentiment-confirmed moving-average crossover signals")]
struct Cli {
    /// Daily price bars, ascending by date. JSON array, or CSV when the file ends in `.csv`.
    #[arg(long, value_name = "FILE")]
    prices: PathBuf,

    /// Scored sentiment events, JSON or `.csv`. Omit to run without sentiment.
    #[arg(long, value_name = "FILE")]
    sentiment: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override signal.short_window.
    #[arg(long)]
    short_window: Option<usize>,

    /// Override signal.long_window.
    #[arg(long)]
    long_window: Option<usize>,

    /// Override signal.sentiment_threshold.
    #[arg(long)]
    threshold: Option<f64>,

    /// Only use sentiment events tagged with this source.
    #[arg(long)]
    source: Option<String>,

    /// Write the report here instead of stdout. A `.csv` path gets the annotated table only.
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Cli {
    /// Load the config file (or defaults) and apply flag overrides.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(n) = self.short_window {
            config.signal.short_window = n;
        }
        if let Some(n) = self.long_window {
            config.signal.long_window = n;
        }
        if let Some(t) = self.threshold {
            config.signal.sentiment_threshold = t;
        }
        if let Some(source) = &self.source {
            config.sentiment.source = Some(source.clone());
        }
        Ok(config)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn is_csv(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_prices(path: &Path) -> Result<Vec<PriceBar>> {
    if is_csv(path) {
        load_prices_csv(path).with_context(|| format!("reading {}", path.display()))
    } else {
        read_json(path)
    }
}

fn read_events(path: &Path) -> Result<Vec<SentimentEvent>> {
    if is_csv(path) {
        load_events_csv(path).with_context(|| format!("reading {}", path.display()))
    } else {
        read_json(path)
    }
}

fn write_report(report: &SignalReport, path: &Path) -> Result<()> {
    let written = if is_csv(path) {
        report.write_csv(path)
    } else {
        report.write_json(path)
    };
    written.with_context(|| format!("writing {}", path.display()))
}

fn run(cli: &Cli) -> Result<SignalReport> {
    let config = cli.resolve_config()?;
    let pipeline = SignalPipeline::new(config)?;

    let prices = read_prices(&cli.prices)?;
    let events = match &cli.sentiment {
        Some(path) => read_events(path)?,
        None => Vec::new(),
    };
    info!(bars = prices.len(), events = events.len(), "loaded inputs");

    Ok(pipeline.run(&prices, &events)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let report = run(&cli)?;

    let s = &report.summary;
    info!(
        trading_days = s.trading_days,
        buys = s.buy_count,
        sells = s.sell_count,
        holds = s.hold_count,
        "signals generated"
    );
    if s.missing_sentiment {
        warn!("no sentiment data; every day is HOLD");
    }

    match &cli.output {
        Some(path) => {
            write_report(&report, path)?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{}", report.to_json_pretty()?),
    }

    Ok(())
}
