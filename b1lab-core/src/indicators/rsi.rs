//! Relative Strength Index, formula-language variant.
//!
//! Smooths gains and absolute changes with the recursive SMA instead of
//! Wilder averages:
//! RSI = SMA(MAX(C - REF(C,1), 0), n, 1) / SMA(ABS(C - REF(C,1)), n, 1) * 100
//!
//! Edge cases: the first bar has no change, so both averages start at 0 and
//! the value is 50. Any zero denominator also yields 50.

use super::{closes, percent_or_neutral, Indicator};
use crate::domain::Bar;
use crate::series;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub const DEFAULT_PERIOD: usize = 3;

    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let close = closes(bars);
        let prev = series::lag(&close, 1);

        // NaN on bar 0 stays NaN through max/abs and seeds the SMA at 0.
        let diff: Vec<f64> = close.iter().zip(&prev).map(|(c, p)| c - p).collect();
        let gains: Vec<f64> = diff
            .iter()
            .map(|&d| if d.is_nan() { d } else { d.max(0.0) })
            .collect();
        let moves: Vec<f64> = diff.iter().map(|d| d.abs()).collect();

        let avg_gain = series::sma(&gains, self.period, 1);
        let avg_move = series::sma(&moves, self.period, 1);

        avg_gain
            .iter()
            .zip(&avg_move)
            .map(|(&g, &m)| percent_or_neutral(g, m))
            .collect()
    }
}
