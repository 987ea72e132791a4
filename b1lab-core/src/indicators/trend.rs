//! The two trend reference lines.
//!
//! - Trend white line: EMA(EMA(C, 10), 10). Fast, hugs price.
//! - Big-brother yellow line: mean of MA14, MA28, MA57 and MA114. Slow.
//!
//! Most selection rules read their relationship (white above yellow, close
//! near one of them) rather than either line alone.

use super::bbi::average_of_mas;
use super::{closes, Indicator};
use crate::domain::Bar;
use crate::series;

#[derive(Debug, Clone)]
pub struct TrendWhiteLine {
    period: usize,
    name: String,
}

impl TrendWhiteLine {
    pub const DEFAULT_PERIOD: usize = 10;

    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "white line period must be >= 1");
        Self {
            period,
            name: format!("white_line_{period}"),
        }
    }
}

impl Default for TrendWhiteLine {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}

impl Indicator for TrendWhiteLine {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let once = series::ema(&closes(bars), self.period);
        series::ema(&once, self.period)
    }
}

const YELLOW_PERIODS: [usize; 4] = [14, 28, 57, 114];

#[derive(Debug, Clone, Default)]
pub struct BigBrotherYellowLine;

impl BigBrotherYellowLine {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for BigBrotherYellowLine {
    fn name(&self) -> &str {
        "yellow_line"
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        average_of_mas(&closes(bars), &YELLOW_PERIODS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{make_bars, make_flat_bars};
    use crate::series::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn white_line_is_double_ema() {
        let bars = make_bars(&[10.0, 12.0, 11.0]);
        let out = TrendWhiteLine::default().compute(&bars);

        // alpha = 2/11; first pass: 10, 10 + 2a, ...
        let a = 2.0 / 11.0;
        let e1 = a * 12.0 + (1.0 - a) * 10.0;
        let e2 = a * 11.0 + (1.0 - a) * e1;
        let w1 = a * e1 + (1.0 - a) * 10.0;
        let w2 = a * e2 + (1.0 - a) * w1;

        assert_approx(out[0], 10.0, DEFAULT_EPSILON);
        assert_approx(out[1], w1, DEFAULT_EPSILON);
        assert_approx(out[2], w2, DEFAULT_EPSILON);
    }

    #[test]
    fn lines_equal_price_on_flat_series() {
        let bars = make_flat_bars(7.5, 150);
        for v in TrendWhiteLine::default().compute(&bars) {
            assert_approx(v, 7.5, DEFAULT_EPSILON);
        }
        for v in BigBrotherYellowLine::new().compute(&bars) {
            assert_approx(v, 7.5, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn white_leads_yellow_in_a_rally() {
        let closes: Vec<f64> = (0..150).map(|i| 10.0 + i as f64 * 0.1).collect();
        let bars = make_bars(&closes);
        let white = TrendWhiteLine::default().compute(&bars);
        let yellow = BigBrotherYellowLine::new().compute(&bars);
        assert!(white[149] > yellow[149]);
    }

    #[test]
    fn line_names() {
        assert_eq!(TrendWhiteLine::default().name(), "white_line_10");
        assert_eq!(BigBrotherYellowLine::new().name(), "yellow_line");
    }
}
