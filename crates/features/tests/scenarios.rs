//! End-to-end behaviour of the signal pipeline on small synthetic series.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use sentiment_core::{Config, PriceBar, SentimentEvent, Signal};
use sentiment_features::SignalPipeline;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn prices(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceBar::from_close(start() + Duration::days(i as i64), c))
        .collect()
}

/// One event at midday on day `i` of the series.
fn event(i: i64, score: f64) -> SentimentEvent {
    let midday = Utc.from_utc_datetime(&start().and_hms_opt(12, 0, 0).unwrap());
    SentimentEvent::new(midday + Duration::days(i), score)
}

fn constant_sentiment(days: usize, score: f64) -> Vec<SentimentEvent> {
    (0..days as i64).map(|i| event(i, score)).collect()
}

fn pipeline(short: usize, long: usize) -> SignalPipeline {
    let mut config = Config::default();
    config.signal.short_window = short;
    config.signal.long_window = long;
    SignalPipeline::new(config).unwrap()
}

const STEP_UP: [f64; 10] = [10.0, 10.0, 10.0, 10.0, 10.0, 20.0, 20.0, 20.0, 20.0, 20.0];

/// Deterministic zig-zag series with several crossovers in both directions.
fn wave(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            100.0 + 10.0 * (t / 6.0).sin() + 2.0 * (t / 1.7).cos()
        })
        .collect()
}

fn alternating_sentiment(len: usize) -> Vec<SentimentEvent> {
    (0..len as i64)
        .flat_map(|i| {
            let s = if (i / 7) % 2 == 0 { 0.6 } else { -0.6 };
            [event(i, s), event(i, s / 2.0)]
        })
        .collect()
}

#[test]
fn step_up_with_positive_sentiment_buys_once() {
    let report = pipeline(2, 4).run(&prices(&STEP_UP), &constant_sentiment(10, 0.5)).unwrap();
    let signals = report.signals();

    for day in 0..=3 {
        assert_eq!(signals[day], Signal::Hold, "day {day}");
    }
    assert_eq!(signals[5], Signal::Buy);
    assert_eq!(signals.iter().filter(|s| **s == Signal::Buy).count(), 1);
    assert!(signals[6..].iter().all(|s| *s == Signal::Hold));
    assert_eq!(report.bars[9].short_ma, Some(20.0));
    assert_eq!(report.bars[9].long_ma, Some(20.0));
}

#[test]
fn neutral_sentiment_vetoes_crossover() {
    let report = pipeline(2, 4).run(&prices(&STEP_UP), &constant_sentiment(10, 0.0)).unwrap();
    assert!(report.signals().iter().all(|s| *s == Signal::Hold));
}

#[test]
fn step_down_with_negative_sentiment_sells() {
    let closes: Vec<f64> = STEP_UP.iter().map(|c| 30.0 - c).collect();
    let report = pipeline(2, 4).run(&prices(&closes), &constant_sentiment(10, -0.5)).unwrap();
    assert_eq!(report.signals()[5], Signal::Sell);
    assert_eq!(report.summary.sell_count, 1);
    assert_eq!(report.summary.buy_count, 0);
}

#[test]
fn empty_sentiment_holds_everywhere() {
    let report = pipeline(2, 4).run(&prices(&STEP_UP), &[]).unwrap();
    assert!(report.bars.iter().all(|b| b.sentiment.is_none()));
    assert!(report.bars.iter().all(|b| b.signal == Signal::Hold));
    assert!(report.summary.missing_sentiment);
    // Crossover statistics are still produced.
    assert_eq!(report.bars[5].short_ma, Some(15.0));
}

#[test]
fn forward_fill_from_single_observation() {
    let report = pipeline(2, 4).run(&prices(&[1.0; 6]), &[event(1, 0.42)]).unwrap();
    assert_eq!(report.bars[0].sentiment, None);
    for day in 1..6 {
        assert_eq!(report.bars[day].sentiment, Some(0.42), "day {day}");
    }
}

#[test]
fn window_boundary() {
    let long = 5;
    let closes: Vec<f64> = (0..long).map(|i| 10.0 + i as f64).collect();
    let report = pipeline(2, long).run(&prices(&closes), &constant_sentiment(long, 0.9)).unwrap();

    for (i, bar) in report.bars.iter().enumerate() {
        let both = bar.moving_averages().both().is_some();
        assert_eq!(both, i == long - 1, "day {i}");
        assert_eq!(bar.signal, Signal::Hold);
    }
    assert!(!report.summary.insufficient_data);
}

#[test]
fn short_history_degrades_to_hold() {
    let report = pipeline(2, 50).run(&prices(&wave(30)), &alternating_sentiment(30)).unwrap();
    assert!(report.summary.insufficient_data);
    assert!(report.bars.iter().all(|b| b.long_ma.is_none()));
    assert!(report.bars.iter().all(|b| b.signal == Signal::Hold));
    assert_eq!(report.bars.len(), 30);
}

#[test]
fn deterministic_output() {
    let bars = prices(&wave(120));
    let events = alternating_sentiment(120);
    let p = pipeline(5, 15);

    let first = p.run(&bars, &events).unwrap().to_json_pretty().unwrap();
    let second = p.run(&bars, &events).unwrap().to_json_pretty().unwrap();
    assert_eq!(first, second);
}

#[test]
fn event_order_does_not_matter() {
    let bars = prices(&wave(80));
    let events = alternating_sentiment(80);
    let mut reversed = events.clone();
    reversed.reverse();

    let p = pipeline(5, 15);
    assert_eq!(p.run(&bars, &events).unwrap(), p.run(&bars, &reversed).unwrap());
}

#[test]
fn no_look_ahead() {
    let len = 120;
    let cutoff = 70;
    let bars = prices(&wave(len));
    let events = alternating_sentiment(len);
    let p = pipeline(5, 15);
    let baseline = p.run(&bars, &events).unwrap();

    let mut future_bars = bars.clone();
    for bar in future_bars.iter_mut().skip(cutoff + 1) {
        bar.close *= 3.0;
    }
    let cutoff_date = bars[cutoff].date;
    let future_events: Vec<_> = events
        .iter()
        .cloned()
        .map(|mut e| {
            if e.date() > cutoff_date {
                e.score = -e.score;
            }
            e
        })
        .collect();

    let altered = p.run(&future_bars, &future_events).unwrap();
    assert_eq!(baseline.bars[..=cutoff], altered.bars[..=cutoff]);
}

#[test]
fn signals_only_on_confirmed_crossovers() {
    let report = pipeline(3, 8).run(&prices(&wave(150)), &alternating_sentiment(150)).unwrap();
    let threshold = report.params.sentiment_threshold;

    for pair in report.bars.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        match curr.signal {
            Signal::Buy => {
                let (ps, pl) = prev.moving_averages().both().unwrap();
                let (cs, cl) = curr.moving_averages().both().unwrap();
                assert!(ps <= pl && cs > cl);
                assert!(curr.sentiment.unwrap() > threshold);
            }
            Signal::Sell => {
                let (ps, pl) = prev.moving_averages().both().unwrap();
                let (cs, cl) = curr.moving_averages().both().unwrap();
                assert!(ps >= pl && cs < cl);
                assert!(curr.sentiment.unwrap() < -threshold);
            }
            Signal::Hold => {}
        }
    }
}
