//! KDJ stochastic oscillator.
//!
//! RSV  = (C - LLV(L, 9)) / (HHV(H, 9) - LLV(L, 9)) * 100, 50 on a flat range
//! K    = SMA(RSV, 3, 1)
//! D    = SMA(K, 3, 1)
//! J    = 3K - 2D
//!
//! Produces three series (exposed as separate Indicator instances). J is not
//! clamped and routinely leaves [0, 100].

use super::{percent_or_neutral, Indicator};
use crate::domain::{Bar, Columns};
use crate::series;

/// Which line of the KDJ to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdjLine {
    K,
    D,
    J,
}

/// All three KDJ lines, computed together.
#[derive(Debug, Clone, PartialEq)]
pub struct KdjSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
    pub j: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Kdj {
    period: usize,
    smoothing: usize,
    line: KdjLine,
    name: String,
}

impl Kdj {
    pub const DEFAULT_PERIOD: usize = 9;
    pub const DEFAULT_SMOOTHING: usize = 3;

    pub fn new(period: usize, smoothing: usize, line: KdjLine) -> Self {
        assert!(period >= 1, "KDJ period must be >= 1");
        assert!(smoothing >= 1, "KDJ smoothing must be >= 1");
        let tag = match line {
            KdjLine::K => "k",
            KdjLine::D => "d",
            KdjLine::J => "j",
        };
        Self {
            period,
            smoothing,
            line,
            name: format!("kdj_{tag}_{period}"),
        }
    }

    /// The standard 9/3/3 configuration.
    pub fn standard(line: KdjLine) -> Self {
        Self::new(Self::DEFAULT_PERIOD, Self::DEFAULT_SMOOTHING, line)
    }

    /// Compute K, D and J in one pass over the inputs.
    pub fn compute_all(&self, cols: &Columns) -> KdjSeries {
        let lowest = series::llv(&cols.low, self.period);
        let highest = series::hhv(&cols.high, self.period);

        let rsv: Vec<f64> = (0..cols.len())
            .map(|i| percent_or_neutral(cols.close[i] - lowest[i], highest[i] - lowest[i]))
            .collect();

        let k = series::sma(&rsv, self.smoothing, 1);
        let d = series::sma(&k, self.smoothing, 1);
        let j = k.iter().zip(&d).map(|(k, d)| 3.0 * k - 2.0 * d).collect();

        KdjSeries { k, d, j }
    }
}

impl Indicator for Kdj {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let all = self.compute_all(&Columns::from_bars(bars));
        match self.line {
            KdjLine::K => all.k,
            KdjLine::D => all.d,
            KdjLine::J => all.j,
        }
    }
}
