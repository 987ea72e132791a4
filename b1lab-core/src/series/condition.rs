//! Boolean-series operators: COUNT, EVERY, EXIST, BARSLAST, CROSS.

use super::window_start;

/// COUNT(cond, n): number of true values in the trailing window.
pub fn count(cond: &[bool], n: usize) -> Vec<usize> {
    assert!(n >= 1, "COUNT period must be >= 1");
    (0..cond.len())
        .map(|i| cond[window_start(i, n)..=i].iter().filter(|&&c| c).count())
        .collect()
}

/// EVERY(cond, n): true when all of the last `n` bars are true.
///
/// False until `n` bars exist; a shorter history cannot satisfy it.
pub fn every(cond: &[bool], n: usize) -> Vec<bool> {
    count(cond, n).into_iter().map(|c| c == n).collect()
}

/// EXIST(cond, n): true when any of the last `n` bars is true.
pub fn exist(cond: &[bool], n: usize) -> Vec<bool> {
    count(cond, n).into_iter().map(|c| c > 0).collect()
}

/// BARSLAST(cond): bars since `cond` was last true.
///
/// `None` before the first true bar, 0 on a true bar, then +1 per false bar.
pub fn barslast(cond: &[bool]) -> Vec<Option<usize>> {
    let mut last_true: Option<usize> = None;
    cond.iter()
        .enumerate()
        .map(|(i, &c)| {
            if c {
                last_true = Some(i);
            }
            last_true.map(|t| i - t)
        })
        .collect()
}

/// CROSS(a, b): `a` crosses above `b` on this bar.
///
/// True exactly where `a[i-1] <= b[i-1]` and `a[i] > b[i]`. Always false at
/// bar 0 and wherever either side is missing.
pub fn cross(a: &[f64], b: &[f64]) -> Vec<bool> {
    debug_assert_eq!(a.len(), b.len(), "series must be aligned");
    (0..a.len())
        .map(|i| i > 0 && a[i - 1] <= b[i - 1] && a[i] > b[i])
        .collect()
}

/// CROSS(a, level): `a` crosses above a constant.
pub fn cross_level(a: &[f64], level: f64) -> Vec<bool> {
    cross(a, &vec![level; a.len()])
}
