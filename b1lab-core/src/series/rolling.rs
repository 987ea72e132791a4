//! Rolling-window operators: REF, MA, HHV, LLV, HHVBARS.
//!
//! Each window is scanned directly rather than maintained incrementally, so
//! the result at bar i is the same floating-point value no matter how long
//! the series is. Windows are at most a few hundred bars.

use super::window_start;

/// REF(x, n): the value `n` bars back. NaN for the first `n` positions.
pub fn lag(values: &[f64], n: usize) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];
    for i in n..len {
        result[i] = values[i - n];
    }
    result
}

/// MA(x, n): mean of the non-missing values in the trailing window.
///
/// NaN only when the whole window is missing.
pub fn ma(values: &[f64], n: usize) -> Vec<f64> {
    assert!(n >= 1, "MA period must be >= 1");
    (0..values.len())
        .map(|i| {
            let mut sum = 0.0;
            let mut count = 0usize;
            for &v in &values[window_start(i, n)..=i] {
                if !v.is_nan() {
                    sum += v;
                    count += 1;
                }
            }
            if count == 0 {
                f64::NAN
            } else {
                sum / count as f64
            }
        })
        .collect()
}

/// HHV(x, n): highest non-missing value in the trailing window.
pub fn hhv(values: &[f64], n: usize) -> Vec<f64> {
    assert!(n >= 1, "HHV period must be >= 1");
    (0..values.len())
        .map(|i| extreme(&values[window_start(i, n)..=i], |v, best| v > best))
        .collect()
}

/// LLV(x, n): lowest non-missing value in the trailing window.
pub fn llv(values: &[f64], n: usize) -> Vec<f64> {
    assert!(n >= 1, "LLV period must be >= 1");
    (0..values.len())
        .map(|i| extreme(&values[window_start(i, n)..=i], |v, best| v < best))
        .collect()
}

/// HHVBARS(x, n): bars elapsed since the highest value in the trailing window.
///
/// Ties resolve to the earliest occurrence, so a flat window reports the
/// distance to its first bar. Missing values never count as the maximum; a
/// window with no values at all reports 0.
pub fn hhvbars(values: &[f64], n: usize) -> Vec<usize> {
    assert!(n >= 1, "HHVBARS period must be >= 1");
    (0..values.len())
        .map(|i| {
            let start = window_start(i, n);
            let mut best: Option<(usize, f64)> = None;
            for (j, &v) in values.iter().enumerate().take(i + 1).skip(start) {
                if v.is_nan() {
                    continue;
                }
                match best {
                    Some((_, b)) if v <= b => {}
                    _ => best = Some((j, v)),
                }
            }
            best.map_or(0, |(j, _)| i - j)
        })
        .collect()
}

fn extreme(window: &[f64], better: impl Fn(f64, f64) -> bool) -> f64 {
    let mut best = f64::NAN;
    for &v in window {
        if v.is_nan() {
            continue;
        }
        if best.is_nan() || better(v, best) {
            best = v;
        }
    }
    best
}
