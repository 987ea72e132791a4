//! Concrete indicator implementations.
//!
//! Every indicator implements [`Indicator`]: bar history in, one numeric
//! series out. They are computed once per evaluation and gathered into an
//! [`IndicatorSet`].
//!
//! Multi-series indicators (KDJ, the two oscillators) are exposed as separate
//! named instances per line, keeping the single-series trait unchanged.
//!
//! Unlike classic TA libraries there is no NaN warmup: windows shrink at the
//! start of the series instead of emitting missing leading values.

pub mod bbi;
pub mod kdj;
pub mod ma;
pub mod oscillator;
pub mod rsi;
pub mod set;
pub mod trend;

pub use bbi::Bbi;
pub use kdj::{Kdj, KdjLine};
pub use ma::Ma;
pub use oscillator::{Oscillator, OscillatorTerm};
pub use rsi::Rsi;
pub use set::IndicatorSet;
pub use trend::{BigBrotherYellowLine, TrendWhiteLine};

use crate::domain::Bar;

/// Value substituted wherever a range-normalised formula has a zero-width
/// range: no directional information, so the midpoint.
pub const NEUTRAL: f64 = 50.0;

/// Trait for indicators.
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ma_60", "kdj_j").
    fn name(&self) -> &str;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// `num / den * 100`, or [`NEUTRAL`] when the denominator is zero or the
/// result is missing.
pub(crate) fn percent_or_neutral(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        return NEUTRAL;
    }
    let r = num / den * 100.0;
    if r.is_nan() {
        NEUTRAL
    } else {
        r
    }
}

pub(crate) fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Bars with open = high = low = close.
#[cfg(test)]
pub fn make_flat_bars(price: f64, n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    (0..n)
        .map(|i| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open: price,
            high: price,
            low: price,
            close: price,
            volume: 1000.0,
        })
        .collect()
}
