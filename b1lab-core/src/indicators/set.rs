//! Every indicator a selection pass needs, computed once and kept as
//! aligned columns.

use super::kdj::Kdj;
use super::oscillator::Oscillator;
use super::{Bbi, BigBrotherYellowLine, Indicator, KdjLine, Ma, Rsi, TrendWhiteLine};
use crate::domain::{Bar, Columns};

/// Indicator columns aligned with the bar history they were computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
    pub j: Vec<f64>,
    pub rsi: Vec<f64>,
    pub white: Vec<f64>,
    pub yellow: Vec<f64>,
    pub bbi: Vec<f64>,
    pub short_osc: Vec<f64>,
    pub long_osc: Vec<f64>,
    pub ma60: Vec<f64>,
}

impl IndicatorSet {
    pub fn compute(bars: &[Bar]) -> Self {
        Self::compute_with_columns(bars, &Columns::from_bars(bars))
    }

    pub(crate) fn compute_with_columns(bars: &[Bar], cols: &Columns) -> Self {
        let kdj = Kdj::standard(KdjLine::J).compute_all(cols);
        Self {
            k: kdj.k,
            d: kdj.d,
            j: kdj.j,
            rsi: Rsi::new(Rsi::DEFAULT_PERIOD).compute(bars),
            white: TrendWhiteLine::default().compute(bars),
            yellow: BigBrotherYellowLine::new().compute(bars),
            bbi: Bbi::new().compute(bars),
            short_osc: Oscillator::short_term().compute_columns(cols),
            long_osc: Oscillator::long_term().compute_columns(cols),
            ma60: Ma::new(60).compute(bars),
        }
    }

    pub fn len(&self) -> usize {
        self.k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{make_bars, make_flat_bars};

    #[test]
    fn all_columns_aligned() {
        let closes: Vec<f64> = (0..40).map(|i| 10.0 + (i % 7) as f64 * 0.3).collect();
        let set = IndicatorSet::compute(&make_bars(&closes));
        for col in [
            &set.k, &set.d, &set.j, &set.rsi, &set.white, &set.yellow, &set.bbi, &set.short_osc,
            &set.long_osc, &set.ma60,
        ] {
            assert_eq!(col.len(), 40);
            assert!(col.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn flat_history_is_neutral_everywhere() {
        let set = IndicatorSet::compute(&make_flat_bars(10.0, 30));
        for i in 0..set.len() {
            assert_eq!(set.k[i], 50.0);
            assert_eq!(set.j[i], 50.0);
            assert_eq!(set.rsi[i], 50.0);
            assert_eq!(set.short_osc[i], 50.0);
            assert_eq!(set.long_osc[i], 50.0);
        }
    }

    #[test]
    fn empty_history() {
        let set = IndicatorSet::compute(&[]);
        assert!(set.is_empty());
        assert!(set.ma60.is_empty());
    }
}
