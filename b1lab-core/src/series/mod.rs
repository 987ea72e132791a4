//! Series operators: the formula-language primitives every indicator and
//! signal is written in.
//!
//! All operators take an ordered slice and return a vector of the same length,
//! aligned to the input. Missing numeric values are `f64::NAN`; any comparison
//! against NaN is false, so missing data degrades into "condition not met"
//! rather than an error.
//!
//! Rolling windows use a minimum-periods-of-one policy: near the start of a
//! series they operate over whatever history exists instead of emitting
//! missing values. The exceptions are `lag` (nothing to look back to) and
//! `every` (a short window can never be "every bar of n").

pub mod condition;
pub mod recursive;
pub mod rolling;

pub use condition::{barslast, count, cross, cross_level, every, exist};
pub use recursive::{ema, sma};
pub use rolling::{hhv, hhvbars, lag, llv, ma};

/// Trailing window `[start, i]` of at most `n` elements ending at `i`.
#[inline]
pub(crate) fn window_start(i: usize, n: usize) -> usize {
    (i + 1).saturating_sub(n)
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for operator and indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_start_clamps_at_zero() {
        assert_eq!(window_start(0, 5), 0);
        assert_eq!(window_start(3, 5), 0);
        assert_eq!(window_start(4, 5), 0);
        assert_eq!(window_start(5, 5), 1);
        assert_eq!(window_start(9, 1), 9);
    }
}
