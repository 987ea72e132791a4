//! Recursive operators: EMA and the formula-language SMA.
//!
//! Both carry a single accumulator through a forward scan. The value at bar
//! i depends on every bar before it, so neither can be expressed as a
//! fixed-width window.

/// EMA(x, n): exponential moving average with `alpha = 2 / (n + 1)`.
///
/// Seeded with the first non-missing value (no SMA warmup, no leading NaN
/// once a value exists). A missing input carries the previous average.
pub fn ema(values: &[f64], n: usize) -> Vec<f64> {
    assert!(n >= 1, "EMA period must be >= 1");
    let alpha = 2.0 / (n as f64 + 1.0);
    let mut result = vec![f64::NAN; values.len()];
    let mut prev = f64::NAN;

    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            result[i] = prev;
            continue;
        }
        prev = if prev.is_nan() {
            v
        } else {
            alpha * v + (1.0 - alpha) * prev
        };
        result[i] = prev;
    }

    result
}

/// SMA(x, n, m): the formula-language weighted average, not a rolling mean.
///
/// Indexed recurrence:
///
/// ```text
/// sma[0] = x[0]                                 (0 when x[0] is missing)
/// sma[i] = (m * x[i] + (n - m) * sma[i-1]) / n  for i > 0
/// sma[i] = sma[i-1]                             when x[i] is missing
/// ```
///
/// The output never contains NaN.
pub fn sma(values: &[f64], n: usize, m: usize) -> Vec<f64> {
    assert!(n >= 1, "SMA n must be >= 1");
    assert!(m <= n, "SMA weight m must not exceed n");

    let len = values.len();
    let mut result = vec![0.0; len];
    if len == 0 {
        return result;
    }

    let n = n as f64;
    let m = m as f64;

    let mut acc = if values[0].is_nan() { 0.0 } else { values[0] };
    result[0] = acc;
    for i in 1..len {
        let x = values[i];
        if !x.is_nan() {
            acc = (m * x + (n - m) * acc) / n;
        }
        result[i] = acc;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_period_1_equals_input() {
        assert_eq!(ema(&[100.0, 200.0, 300.0], 1), vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn ema_3_known_values() {
        // alpha = 0.5, seed = first value
        // 10, 0.5*11 + 0.5*10 = 10.5, 0.5*12 + 0.5*10.5 = 11.25
        let out = ema(&[10.0, 11.0, 12.0], 3);
        assert_approx(out[0], 10.0, DEFAULT_EPSILON);
        assert_approx(out[1], 10.5, DEFAULT_EPSILON);
        assert_approx(out[2], 11.25, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_leading_nan_then_seed() {
        let out = ema(&[f64::NAN, 4.0, f64::NAN, 8.0], 3);
        assert!(out[0].is_nan());
        assert_eq!(out[1], 4.0);
        assert_eq!(out[2], 4.0);
        assert_approx(out[3], 6.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_known_values() {
        // n=3, m=1: s0 = 3, s1 = (6 + 2*3)/3 = 4, s2 = (9 + 2*4)/3 = 17/3
        let out = sma(&[3.0, 6.0, 9.0], 3, 1);
        assert_eq!(out[0], 3.0);
        assert_approx(out[1], 4.0, DEFAULT_EPSILON);
        assert_approx(out[2], 17.0 / 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_recurrence_holds_exactly() {
        let x = [12.5, 13.1, 12.9, 14.2, 13.7, 15.0, 14.4];
        let out = sma(&x, 3, 1);
        assert_eq!(out[0], x[0]);
        for i in 1..x.len() {
            let expected = (1.0 * x[i] + (3.0 - 1.0) * out[i - 1]) / 3.0;
            assert_eq!(out[i], expected, "recurrence broken at {i}");
        }
    }

    #[test]
    fn sma_missing_seed_is_zero() {
        let out = sma(&[f64::NAN, 3.0], 3, 1);
        assert_eq!(out[0], 0.0);
        assert_approx(out[1], 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_carries_forward_over_missing() {
        let out = sma(&[3.0, f64::NAN, f64::NAN, 6.0], 3, 1);
        assert_eq!(out[1], 3.0);
        assert_eq!(out[2], 3.0);
        assert_approx(out[3], 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_empty_input() {
        assert!(sma(&[], 3, 1).is_empty());
    }
}
