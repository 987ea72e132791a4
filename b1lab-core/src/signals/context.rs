//! Intermediate conditions derived once per evaluation.
//!
//! [`EvaluationContext`] holds every column the seven selection formulas read,
//! built in one pass from the bars, the indicator set and the board
//! parameters. Nothing is mutated after construction; formulas see a bar
//! through a [`BarConditions`] snapshot.
//!
//! Comparisons that involve a missing value (the previous close on the first
//! bar, for instance) are false, as are windowed tests that need more history
//! than exists.

use super::board::BoardParams;
use super::thresholds::context as thr;
use crate::domain::Columns;
use crate::indicators::IndicatorSet;
use crate::series::{barslast, count, cross, every, hhv, hhvbars, lag, llv};

/// Near-term amplitude window.
pub const NEAR_WINDOW: usize = 20;
/// Far-term amplitude window.
pub const FAR_WINDOW: usize = 50;
/// Window searched for the heaviest-volume day.
pub const VOLUME_PEAK_WINDOW: usize = 40;
/// A heavy down day at least this many bars back no longer disqualifies.
pub const VOLUME_PEAK_MIN_AGE: usize = 15;
/// Bars since close last crossed above the yellow line, for a super bull.
pub const SUPER_BULL_MIN_BARS_SINCE_CROSS: usize = 12;

/// All per-bar conditions of one instrument.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    pub params: BoardParams,
    pub columns: Columns,
    pub indicators: IndicatorSet,

    pub prev_close: Vec<f64>,
    pub prev_volume: Vec<f64>,

    pub daily_amplitude: Vec<f64>,
    pub daily_change: Vec<f64>,
    pub rising_doji: Vec<bool>,

    pub ok_bar: Vec<bool>,
    pub shrink: Vec<bool>,
    pub pullback_shrink: Vec<bool>,
    pub moderate_shrink: Vec<bool>,
    pub extreme_shrink: Vec<bool>,

    pub near_amplitude: Vec<f64>,
    pub far_amplitude: Vec<f64>,
    pub super_abnormal: Vec<bool>,
    pub washout: Vec<bool>,
    pub abnormal: Vec<bool>,

    pub uptrend: Vec<bool>,
    pub strong_trend: Vec<bool>,
    pub super_bull: Vec<bool>,

    pub white_distance: Vec<f64>,
    pub bbi_distance: Vec<f64>,
    pub yellow_distance: Vec<f64>,
    pub white_pullback: Vec<bool>,
    pub white_support: Vec<bool>,
    pub strong_hold: Vec<bool>,
    pub yellow_pullback: Vec<bool>,

    /// RSI + J.
    pub osc_sum: Vec<f64>,
    pub osc_sum_llv15: Vec<f64>,
    pub osc_sum_llv25: Vec<f64>,
    pub j_llv20: Vec<f64>,
    pub rsi_llv14: Vec<f64>,
}

/// One bar of an [`EvaluationContext`], flattened for the signal formulas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarConditions {
    pub open: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub prev_close: f64,
    pub prev_volume: f64,

    pub j: f64,
    pub prev_j: f64,
    pub rsi: f64,
    pub prev_rsi: f64,
    pub osc_sum: f64,
    pub osc_sum_llv15: f64,
    pub j_is_20_low: bool,
    pub rsi_is_14_low: bool,
    pub osc_sum_is_25_low: bool,

    pub white: f64,
    pub yellow: f64,
    pub prev_yellow: f64,
    pub ma60: f64,
    pub prev_ma60: f64,

    pub amplitude_threshold: f64,
    pub daily_amplitude: f64,
    pub daily_change: f64,
    pub rising_doji: bool,

    pub ok_bar: bool,
    pub shrink: bool,
    pub pullback_shrink: bool,
    pub moderate_shrink: bool,
    pub extreme_shrink: bool,

    pub near_amplitude: f64,
    pub far_amplitude: f64,
    pub super_abnormal: bool,
    pub washout: bool,
    pub abnormal: bool,

    pub uptrend: bool,
    pub strong_trend: bool,
    pub super_bull: bool,

    pub white_distance: f64,
    pub bbi_distance: f64,
    pub yellow_distance: f64,
    pub white_pullback: bool,
    pub white_support: bool,
    pub strong_hold: bool,
    pub yellow_pullback: bool,
}

fn by_bar<T>(n: usize, f: impl FnMut(usize) -> T) -> Vec<T> {
    (0..n).map(f).collect()
}

fn excursion_pct(high: &[f64], low: &[f64], high_window: usize, low_window: usize) -> Vec<f64> {
    let hh = hhv(high, high_window);
    let ll = llv(low, low_window);
    by_bar(high.len(), |i| (hh[i] - ll[i]) / ll[i] * 100.0)
}

fn threshold_flags(counts: &[usize], at_least: usize) -> Vec<bool> {
    counts.iter().map(|&c| c >= at_least).collect()
}

/// Whether the heaviest-volume day of the trailing window is acceptable.
///
/// It is not when that day closed below both its open and the previous
/// close, and lies fewer than [`VOLUME_PEAK_MIN_AGE`] bars back. A peak on the
/// very first bar has no previous close and is accepted.
fn ok_bars(cols: &Columns) -> Vec<bool> {
    let peak_age = hhvbars(&cols.volume, VOLUME_PEAK_WINDOW);
    by_bar(cols.len(), |i| {
        let age = peak_age[i];
        let idx = i - age;
        if idx < 1 {
            return true;
        }
        let c = cols.close[idx];
        let heavy_down = c < cols.close[idx - 1] && c < cols.open[idx];
        !heavy_down || age >= VOLUME_PEAK_MIN_AGE
    })
}

impl EvaluationContext {
    pub fn build(columns: Columns, indicators: IndicatorSet, params: BoardParams) -> Self {
        let n = columns.len();
        debug_assert_eq!(n, indicators.len(), "indicators must align with bars");

        let (o, h, l, c, v) = (
            &columns.open,
            &columns.high,
            &columns.low,
            &columns.close,
            &columns.volume,
        );
        let ind = &indicators;
        let relax = params.relaxation;

        let prev_close = lag(c, 1);
        let prev_volume = lag(v, 1);

        // Daily shape
        let daily_amplitude = by_bar(n, |i| (h[i] - l[i]) / l[i] * 100.0);
        let daily_change = by_bar(n, |i| {
            (c[i] - prev_close[i]).abs() / prev_close[i] * 100.0 * relax
        });
        let rising_doji = by_bar(n, |i| {
            c[i] > prev_close[i] && (c[i] - o[i]).abs() / o[i] * 100.0 * relax < thr::DOJI_BODY_PCT
        });

        // Volume
        let ok_bar = ok_bars(&columns);
        let v_hhv20 = hhv(v, 20);
        let v_hhv30 = hhv(v, 30);
        let v_hhv50 = hhv(v, 50);
        let tiered = |ratio: f64| {
            by_bar(n, |i| {
                v[i] < v_hhv20[i] * ratio || v[i] < v_hhv50[i] / thr::SHRINK_DIVISOR_50
            })
        };
        let shrink = tiered(thr::SHRINK_RATIO);
        let pullback_shrink = tiered(thr::PULLBACK_SHRINK_RATIO);
        let moderate_shrink = tiered(thr::MODERATE_SHRINK_RATIO);
        let extreme_shrink = by_bar(n, |i| {
            v[i] < v_hhv30[i] / thr::EXTREME_SHRINK_DIVISOR_30
                || v[i] < v_hhv50[i] / thr::EXTREME_SHRINK_DIVISOR_50
        });

        // Abnormal move
        let near_amplitude = excursion_pct(h, l, NEAR_WINDOW, NEAR_WINDOW);
        let far_amplitude = excursion_pct(h, l, FAR_WINDOW, FAR_WINDOW);
        let tight_amplitude = excursion_pct(h, l, 12, 14);
        let near_abnormal = by_bar(n, |i| {
            near_amplitude[i] >= thr::NEAR_ABNORMAL_PCT
                || tight_amplitude[i] >= thr::TIGHT_ABNORMAL_PCT
        });
        let far_abnormal = by_bar(n, |i| far_amplitude[i] >= thr::FAR_ABNORMAL_PCT);
        let super_abnormal = by_bar(n, |i| near_amplitude[i] >= thr::SUPER_ABNORMAL_PCT);

        let short = &ind.short_osc;
        let long = &ind.long_osc;
        let long_high = by_bar(n, |i| long[i] >= thr::NEEDLE_LONG_MIN);
        let short_dip = by_bar(n, |i| short[i] <= thr::WASHOUT_SHORT_DIP_MAX);
        let short_needle = by_bar(n, |i| short[i] <= thr::NEEDLE_SHORT_MAX);
        let needle = by_bar(n, |i| {
            (short_needle[i] && long_high[i]) || long[i] - short[i] >= thr::NEEDLE_SPREAD_MIN
        });
        let short_soft = by_bar(n, |i| short[i] <= thr::BOWL_SHORT_SOFT_MAX);

        let needles_10 = threshold_flags(&count(&needle, 10), 2);
        let bowl_long = threshold_flags(&count(&long_high, 8), 6);
        let bowl_soft = threshold_flags(&count(&short_soft, 7), 4);
        let bowl_dip = threshold_flags(&count(&short_dip, 8), 1);
        let halberd_long = every(&long_high, 8);
        let halberd_dips = threshold_flags(&count(&short_dip, 6), 2);
        let halberd_needle = threshold_flags(&count(&short_needle, 7), 1);
        let washout = by_bar(n, |i| {
            let bowl = bowl_long[i] && bowl_soft[i] && bowl_dip[i];
            let halberd = halberd_long[i] && halberd_dips[i] && halberd_needle[i];
            needles_10[i] || bowl || halberd
        });
        let abnormal = by_bar(n, |i| near_abnormal[i] || far_abnormal[i] || washout[i]);

        // Trend
        let white = &ind.white;
        let yellow = &ind.yellow;
        let bbi = &ind.bbi;
        let prev_white = lag(white, 1);
        let prev_yellow = lag(yellow, 1);
        let prev_bbi = lag(bbi, 1);

        let red_candles = count(&by_bar(n, |i| c[i] >= o[i]), 15);
        let up_closes = count(&by_bar(n, |i| c[i] > prev_close[i]), 11);
        let red_dominant = by_bar(n, |i| red_candles[i] > 7 || up_closes[i] > 5);

        let uptrend = by_bar(n, |i| {
            white[i] >= yellow[i]
                && (c[i] >= yellow[i]
                    || (c[i] > yellow[i] * thr::UPTREND_YELLOW_TOLERANCE && c[i] > o[i]))
        });

        let yellow_holding = every(
            &by_bar(n, |i| yellow[i] >= prev_yellow[i] * thr::LINE_SLOPE_TOLERANCE),
            13,
        );
        let white_rising = by_bar(n, |i| white[i] >= prev_white[i]);
        let white_above = every(&by_bar(n, |i| white[i] > yellow[i]), 20);
        let white_rising_11 = every(&white_rising, 11);
        let strong_trend = by_bar(n, |i| {
            yellow_holding[i]
                && white_rising[i]
                && white_above[i]
                && white_rising_11[i]
                && red_dominant[i]
        });

        let bbi_holding = every(
            &by_bar(n, |i| bbi[i] >= prev_bbi[i] * thr::LINE_SLOPE_TOLERANCE),
            20,
        );
        let bbi_rises = count(&by_bar(n, |i| bbi[i] >= prev_bbi[i]), 25);
        let since_cross = barslast(&cross(c, yellow));
        let super_bull = by_bar(n, |i| {
            (bbi_holding[i] || bbi_rises[i] >= 23)
                && (near_amplitude[i] >= thr::SUPER_BULL_NEAR_PCT
                    || far_amplitude[i] > thr::SUPER_BULL_FAR_PCT)
                && matches!(since_cross[i], Some(b) if b > SUPER_BULL_MIN_BARS_SINCE_CROSS)
        });

        // Proximity
        let white_distance = by_bar(n, |i| (c[i] - white[i]).abs() / c[i] * 100.0);
        let low_white_distance = by_bar(n, |i| (l[i] - white[i]).abs() / white[i] * 100.0);
        let bbi_distance = by_bar(n, |i| (c[i] - bbi[i]).abs() / c[i] * 100.0);
        let low_bbi_distance = by_bar(n, |i| (l[i] - bbi[i]).abs() / bbi[i] * 100.0);
        let yellow_distance = by_bar(n, |i| (c[i] - yellow[i]).abs() / yellow[i] * 100.0);

        let white_pullback = by_bar(n, |i| {
            let dw = white_distance[i];
            (c[i] >= white[i] && dw <= thr::WHITE_PULLBACK_ABOVE_PCT)
                || (c[i] < white[i] && dw < thr::WHITE_PULLBACK_BELOW_PCT)
                || (c[i] >= bbi[i]
                    && bbi_distance[i] < thr::BBI_PULLBACK_CLOSE_PCT
                    && low_bbi_distance[i] < thr::BBI_PULLBACK_LOW_PCT
                    && dw <= thr::BBI_PULLBACK_WHITE_PCT
                    && daily_change[i] < thr::BBI_PULLBACK_CHANGE_MAX
                    && c[i] > prev_close[i])
        });
        let white_support =
            by_bar(n, |i| c[i] >= white[i] && white_distance[i] < thr::WHITE_SUPPORT_PCT);
        let strong_hold = by_bar(n, |i| {
            (low_white_distance[i] < thr::HOLD_LOW_WHITE_PCT
                || low_bbi_distance[i] < thr::HOLD_LOW_BBI_PCT)
                && c[i] > white[i]
                && white_distance[i] <= thr::HOLD_CLOSE_WHITE_PCT
        });
        let yellow_pullback = by_bar(n, |i| {
            let dy = yellow_distance[i];
            (c[i] >= yellow[i]
                && (dy <= thr::YELLOW_PULLBACK_PCT
                    || (dy <= thr::YELLOW_PULLBACK_QUIET_PCT
                        && daily_change[i] < thr::YELLOW_PULLBACK_QUIET_CHANGE)))
                || (c[i] < yellow[i] && dy <= thr::YELLOW_PULLBACK_BELOW_PCT)
        });

        // Oversold lows
        let osc_sum = by_bar(n, |i| ind.rsi[i] + ind.j[i]);
        let osc_sum_llv15 = llv(&osc_sum, 15);
        let osc_sum_llv25 = llv(&osc_sum, 25);
        let j_llv20 = llv(&ind.j, 20);
        let rsi_llv14 = llv(&ind.rsi, 14);

        Self {
            params,
            prev_close,
            prev_volume,
            daily_amplitude,
            daily_change,
            rising_doji,
            ok_bar,
            shrink,
            pullback_shrink,
            moderate_shrink,
            extreme_shrink,
            near_amplitude,
            far_amplitude,
            super_abnormal,
            washout,
            abnormal,
            uptrend,
            strong_trend,
            super_bull,
            white_distance,
            bbi_distance,
            yellow_distance,
            white_pullback,
            white_support,
            strong_hold,
            yellow_pullback,
            osc_sum,
            osc_sum_llv15,
            osc_sum_llv25,
            j_llv20,
            rsi_llv14,
            columns,
            indicators,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Conditions at bar `i`.
    ///
    /// # Panics
    /// If `i` is out of range.
    pub fn snapshot(&self, i: usize) -> BarConditions {
        let cols = &self.columns;
        let ind = &self.indicators;
        let prev = |values: &[f64]| if i == 0 { f64::NAN } else { values[i - 1] };

        BarConditions {
            open: cols.open[i],
            low: cols.low[i],
            close: cols.close[i],
            volume: cols.volume[i],
            prev_close: self.prev_close[i],
            prev_volume: self.prev_volume[i],

            j: ind.j[i],
            prev_j: prev(&ind.j),
            rsi: ind.rsi[i],
            prev_rsi: prev(&ind.rsi),
            osc_sum: self.osc_sum[i],
            osc_sum_llv15: self.osc_sum_llv15[i],
            j_is_20_low: ind.j[i] == self.j_llv20[i],
            rsi_is_14_low: ind.rsi[i] == self.rsi_llv14[i],
            osc_sum_is_25_low: self.osc_sum[i] == self.osc_sum_llv25[i],

            white: ind.white[i],
            yellow: ind.yellow[i],
            prev_yellow: prev(&ind.yellow),
            ma60: ind.ma60[i],
            prev_ma60: prev(&ind.ma60),

            amplitude_threshold: self.params.amplitude_threshold,
            daily_amplitude: self.daily_amplitude[i],
            daily_change: self.daily_change[i],
            rising_doji: self.rising_doji[i],

            ok_bar: self.ok_bar[i],
            shrink: self.shrink[i],
            pullback_shrink: self.pullback_shrink[i],
            moderate_shrink: self.moderate_shrink[i],
            extreme_shrink: self.extreme_shrink[i],

            near_amplitude: self.near_amplitude[i],
            far_amplitude: self.far_amplitude[i],
            super_abnormal: self.super_abnormal[i],
            washout: self.washout[i],
            abnormal: self.abnormal[i],

            uptrend: self.uptrend[i],
            strong_trend: self.strong_trend[i],
            super_bull: self.super_bull[i],

            white_distance: self.white_distance[i],
            bbi_distance: self.bbi_distance[i],
            yellow_distance: self.yellow_distance[i],
            white_pullback: self.white_pullback[i],
            white_support: self.white_support[i],
            strong_hold: self.strong_hold[i],
            yellow_pullback: self.yellow_pullback[i],
        }
    }
}
