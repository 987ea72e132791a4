//! Short-term and long-term price-position oscillators.
//!
//! 100 * (C - LLV(L, n)) / (HHV(C, n) - LLV(L, n)), with n = 3 (short) or
//! n = 21 (long). The top of the range uses closes, not highs, so a close at
//! the window's highest close reads exactly 100.
//!
//! Produces two series (exposed as separate Indicator instances).
//! Lookback: period - 1.

use super::{percent_or_neutral, Indicator};
use crate::domain::{Bar, Columns};
use crate::series;

/// Which oscillator horizon to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorTerm {
    Short,
    Long,
}

impl OscillatorTerm {
    pub fn period(self) -> usize {
        match self {
            OscillatorTerm::Short => 3,
            OscillatorTerm::Long => 21,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Oscillator {
    period: usize,
    name: String,
}

impl Oscillator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "oscillator period must be >= 1");
        Self {
            period,
            name: format!("oscillator_{period}"),
        }
    }

    pub fn short_term() -> Self {
        Self::new(OscillatorTerm::Short.period())
    }

    pub fn long_term() -> Self {
        Self::new(OscillatorTerm::Long.period())
    }

    pub(crate) fn compute_columns(&self, cols: &Columns) -> Vec<f64> {
        let lowest = series::llv(&cols.low, self.period);
        let highest_close = series::hhv(&cols.close, self.period);
        (0..cols.len())
            .map(|i| percent_or_neutral(cols.close[i] - lowest[i], highest_close[i] - lowest[i]))
            .collect()
    }
}

impl Indicator for Oscillator {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        self.compute_columns(&Columns::from_bars(bars))
    }
}
