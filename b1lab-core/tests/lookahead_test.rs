//! Look-ahead contamination tests for indicators and signals.
//!
//! Invariant: no value at bar t may depend on data from bar t+1 or later.
//!
//! Method: compute on a truncated series (bars 0..150) and the full series
//! (bars 0..300). Assert the shared prefix is identical between both runs.
//! Any difference means future data is leaking into past values.

use b1lab_core::domain::Bar;
use b1lab_core::indicators::*;
use b1lab_core::series;
use b1lab_core::signals::{SignalEngine, SignalName};
use chrono::NaiveDate;

const FULL: usize = 300;
const TRUNCATED: usize = 150;

/// N bars of synthetic OHLCV data with realistic variation.
fn make_test_bars(n: usize) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut bars = Vec::with_capacity(n);
    let mut price: f64 = 20.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.004; // -0.4 to +0.4
        price = (price + change).max(5.0);

        let open = price - 0.1;
        let close = price + 0.05;
        let high = open.max(close) + 0.3;
        let low = open.min(close) - 0.3;
        let volume = 50_000.0 + ((seed >> 16) % 40_000) as f64;

        bars.push(Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
        });
    }
    bars
}

fn same(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn assert_prefix_eq(name: &str, truncated: &[f64], full: &[f64]) {
    assert_eq!(truncated.len(), TRUNCATED, "{name}: truncated length");
    for (i, (&t, &f)) in truncated.iter().zip(full).enumerate() {
        assert!(same(t, f), "{name} leaks at bar {i}: truncated={t}, full={f}");
    }
}

/// Assert that the indicator produces identical values for the shared prefix.
fn assert_no_lookahead(indicator: &dyn Indicator) {
    let bars = make_test_bars(FULL);
    let full = indicator.compute(&bars);
    let truncated = indicator.compute(&bars[..TRUNCATED]);
    assert_eq!(full.len(), FULL);
    assert_prefix_eq(indicator.name(), &truncated, &full);
}

#[test]
fn ma_no_lookahead() {
    assert_no_lookahead(&Ma::new(5));
    assert_no_lookahead(&Ma::new(60));
}

#[test]
fn kdj_no_lookahead() {
    assert_no_lookahead(&Kdj::standard(KdjLine::K));
    assert_no_lookahead(&Kdj::standard(KdjLine::D));
    assert_no_lookahead(&Kdj::standard(KdjLine::J));
}

#[test]
fn rsi_no_lookahead() {
    assert_no_lookahead(&Rsi::new(Rsi::DEFAULT_PERIOD));
}

#[test]
fn bbi_no_lookahead() {
    assert_no_lookahead(&Bbi::new());
}

#[test]
fn trend_lines_no_lookahead() {
    assert_no_lookahead(&TrendWhiteLine::default());
    assert_no_lookahead(&BigBrotherYellowLine::new());
}

#[test]
fn oscillators_no_lookahead() {
    assert_no_lookahead(&Oscillator::short_term());
    assert_no_lookahead(&Oscillator::long_term());
}

#[test]
fn series_operators_no_lookahead() {
    let bars = make_test_bars(FULL);
    let close: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let short = &close[..TRUNCATED];

    assert_prefix_eq("ema", &series::ema(short, 12), &series::ema(&close, 12));
    assert_prefix_eq("sma", &series::sma(short, 6, 1), &series::sma(&close, 6, 1));
    assert_prefix_eq("hhv", &series::hhv(short, 20), &series::hhv(&close, 20));
    assert_prefix_eq("llv", &series::llv(short, 20), &series::llv(&close, 20));
    assert_prefix_eq("lag", &series::lag(short, 3), &series::lag(&close, 3));
}

#[test]
fn indicator_set_no_lookahead() {
    let bars = make_test_bars(FULL);
    let full = IndicatorSet::compute(&bars);
    let truncated = IndicatorSet::compute(&bars[..TRUNCATED]);

    assert_prefix_eq("k", &truncated.k, &full.k);
    assert_prefix_eq("d", &truncated.d, &full.d);
    assert_prefix_eq("j", &truncated.j, &full.j);
    assert_prefix_eq("rsi", &truncated.rsi, &full.rsi);
    assert_prefix_eq("white", &truncated.white, &full.white);
    assert_prefix_eq("yellow", &truncated.yellow, &full.yellow);
    assert_prefix_eq("bbi", &truncated.bbi, &full.bbi);
    assert_prefix_eq("short_osc", &truncated.short_osc, &full.short_osc);
    assert_prefix_eq("long_osc", &truncated.long_osc, &full.long_osc);
    assert_prefix_eq("ma60", &truncated.ma60, &full.ma60);
}

/// Board class is decided once at the latest bar, so a wide-limit board is
/// used to keep it fixed between the two runs.
#[test]
fn signals_no_lookahead() {
    let bars = make_test_bars(FULL);
    let full = SignalEngine::new(&bars, "688001").unwrap();
    let truncated = SignalEngine::new(&bars[..TRUNCATED], "688001").unwrap();

    for name in SignalName::ALL {
        assert_eq!(
            truncated.signal_series(name),
            &full.signal_series(name)[..TRUNCATED],
            "{name} leaks future data"
        );
    }
    assert_eq!(truncated.aggregate(), &full.aggregate()[..TRUNCATED]);

    let ctx_t = truncated.context();
    let ctx_f = full.context();
    assert_eq!(ctx_t.ok_bar, ctx_f.ok_bar[..TRUNCATED]);
    assert_eq!(ctx_t.washout, ctx_f.washout[..TRUNCATED]);
    assert_eq!(ctx_t.uptrend, ctx_f.uptrend[..TRUNCATED]);
    assert_prefix_eq("near_amplitude", &ctx_t.near_amplitude, &ctx_f.near_amplitude);
}

#[test]
fn latest_result_matches_result_at_on_full_series() {
    let bars = make_test_bars(FULL);
    let full = SignalEngine::new(&bars, "600000").unwrap();
    for end in [1, 30, 120, FULL] {
        let engine = SignalEngine::new(&bars[..end], "600000").unwrap();
        let latest = engine.latest_signal();
        assert_eq!(latest, engine.result_at(end - 1).unwrap());
        // Diagnostics never depend on the board class.
        assert_eq!(
            latest.diagnostics,
            full.result_at(end - 1).unwrap().diagnostics,
            "diagnostics differ at bar {}",
            end - 1
        );
    }
}
