//! Bull-and-bear index: the mean of the 3, 6, 12 and 24 bar moving averages.

use super::{closes, Indicator};
use crate::domain::Bar;
use crate::series;

const PERIODS: [usize; 4] = [3, 6, 12, 24];

#[derive(Debug, Clone, Default)]
pub struct Bbi;

impl Bbi {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for Bbi {
    fn name(&self) -> &str {
        "bbi"
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        average_of_mas(&closes(bars), &PERIODS)
    }
}

/// Element-wise mean of several moving averages of the same input.
pub(crate) fn average_of_mas(values: &[f64], periods: &[usize]) -> Vec<f64> {
    let mut total = vec![0.0; values.len()];
    for &p in periods {
        for (t, m) in total.iter_mut().zip(series::ma(values, p)) {
            *t += m;
        }
    }
    let k = periods.len() as f64;
    total.into_iter().map(|t| t / k).collect()
}
