//! Simple moving average of closes (MA60 and friends).
//!
//! Rolling mean with a minimum of one observation: the first value equals the
//! first close and each early value is the mean of everything seen so far.

use super::{closes, Indicator};
use crate::domain::Bar;
use crate::series;

#[derive(Debug, Clone)]
pub struct Ma {
    period: usize,
    name: String,
}

impl Ma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "MA period must be >= 1");
        Self {
            period,
            name: format!("ma_{period}"),
        }
    }
}

impl Indicator for Ma {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        series::ma(&closes(bars), self.period)
    }
}
