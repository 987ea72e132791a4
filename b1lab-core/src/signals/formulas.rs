//! The seven selection formulas.
//!
//! Each is a conjunction over one [`BarConditions`] snapshot: an oversold
//! test, an amplitude ceiling, a volume-shrink tier, the abnormal-move and
//! heavy-volume filters, and a trend-position requirement. They are not
//! mutually exclusive.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::context::BarConditions;
use super::thresholds as thr;

/// Selection signals in declaration order.
///
/// The discriminant is the signal's position in [`SignalName::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum SignalName {
    OversoldShrinkTurn = 0,
    OversoldShrink = 1,
    OriginalB1 = 2,
    OversoldExtremeShrink = 3,
    WhiteLinePullback = 4,
    SuperBullPullback = 5,
    YellowLinePullback = 6,
}

impl SignalName {
    pub const ALL: [SignalName; 7] = [
        SignalName::OversoldShrinkTurn,
        SignalName::OversoldShrink,
        SignalName::OriginalB1,
        SignalName::OversoldExtremeShrink,
        SignalName::WhiteLinePullback,
        SignalName::SuperBullPullback,
        SignalName::YellowLinePullback,
    ];

    /// Slot of this signal in per-signal tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignalName::OversoldShrinkTurn => "oversold_shrink_turn",
            SignalName::OversoldShrink => "oversold_shrink",
            SignalName::OriginalB1 => "original_b1",
            SignalName::OversoldExtremeShrink => "oversold_extreme_shrink",
            SignalName::WhiteLinePullback => "white_line_pullback",
            SignalName::SuperBullPullback => "super_bull_pullback",
            SignalName::YellowLinePullback => "yellow_line_pullback",
        }
    }

    /// Evaluate this signal on one bar.
    pub fn triggered(self, b: &BarConditions) -> bool {
        match self {
            SignalName::OversoldShrinkTurn => oversold_shrink_turn(b),
            SignalName::OversoldShrink => oversold_shrink(b),
            SignalName::OriginalB1 => original_b1(b),
            SignalName::OversoldExtremeShrink => oversold_extreme_shrink(b),
            SignalName::WhiteLinePullback => white_line_pullback(b),
            SignalName::SuperBullPullback => super_bull_pullback(b),
            SignalName::YellowLinePullback => yellow_line_pullback(b),
        }
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names of every signal firing on this bar, in declaration order.
pub fn triggered_signals(b: &BarConditions) -> Vec<SignalName> {
    SignalName::ALL
        .into_iter()
        .filter(|s| s.triggered(b))
        .collect()
}

/// RSI turns sharply up from an oversold reading, price on or above yellow.
pub fn oversold_shrink_turn(b: &BarConditions) -> bool {
    use thr::oversold_shrink_turn::*;
    b.uptrend
        && b.rsi - RSI_JUMP >= b.prev_rsi
        && (b.prev_rsi < PREV_RSI_MAX || b.prev_j < PREV_J_MAX)
        && b.daily_amplitude < b.amplitude_threshold + AMPLITUDE_MARGIN
        && (b.daily_change < CHANGE_MAX || b.rising_doji)
        && b.ok_bar
        && b.abnormal
        && b.close >= b.yellow
}

/// Oversold in an uptrend on shrinking volume.
pub fn oversold_shrink(b: &BarConditions) -> bool {
    use thr::oversold_shrink::*;
    b.uptrend
        && (b.j < J_MAX || b.rsi < RSI_MAX)
        && (b.osc_sum < SUM_MAX || b.j_is_20_low)
        && b.daily_amplitude < b.amplitude_threshold
        && (b.daily_change < CHANGE_MAX || b.rising_doji)
        && b.ok_bar
        && (b.shrink || (b.moderate_shrink && b.daily_change < MODERATE_CHANGE_MAX))
        && b.abnormal
}

/// The classic setup: white above a rising yellow, deeply oversold, quiet
/// candle or close to one of the lines.
pub fn original_b1(b: &BarConditions) -> bool {
    use thr::original_b1::*;
    let body_pct = (b.close - b.open).abs() * 100.0 / b.open;
    let near_a_line = b.white_distance < WHITE_DISTANCE_MAX
        || b.bbi_distance < BBI_DISTANCE_MAX
        || b.yellow_distance < YELLOW_DISTANCE_MAX;

    b.white > b.yellow
        && b.close >= b.yellow * YELLOW_FLOOR
        && b.yellow >= b.prev_yellow
        && (b.j < J_MAX || b.rsi < RSI_MAX)
        && b.osc_sum < b.osc_sum_llv15 * SUM_LOW_FACTOR
        && b.moderate_shrink
        && b.ok_bar
        && (body_pct < BODY_MAX_PCT || b.extreme_shrink || (b.moderate_shrink && near_a_line))
        && b.abnormal
}

/// Oversold on extremely dry volume after a large far-term range.
pub fn oversold_extreme_shrink(b: &BarConditions) -> bool {
    use thr::oversold_extreme_shrink::*;
    let amplitude_ok = b.daily_amplitude < b.amplitude_threshold
        || (b.super_abnormal
            && b.daily_amplitude < b.amplitude_threshold + SUPER_AMPLITUDE_MARGIN
            && b.close > b.open
            && b.close > b.white);
    let candle_ok = (b.close < b.open && b.volume < b.prev_volume && b.close >= b.yellow)
        || b.close >= b.open;

    b.uptrend
        && (b.j < J_MAX || b.rsi < RSI_MAX)
        && b.osc_sum < SUM_MAX
        && b.far_amplitude >= FAR_MIN
        && amplitude_ok
        && candle_ok
        && (b.daily_change < CHANGE_MAX || b.rising_doji)
        && b.ok_bar
        && b.extreme_shrink
        && b.abnormal
}

/// A strong trend pulls back to the white line without breaking it.
pub fn white_line_pullback(b: &BarConditions) -> bool {
    use thr::white_line_pullback::*;
    b.strong_trend
        && (b.j < J_MAX || b.rsi < RSI_MAX || b.washout)
        && b.osc_sum < SUM_MAX
        && (b.daily_amplitude < b.amplitude_threshold + AMPLITUDE_MARGIN
            || b.white_distance < WHITE_DISTANCE_MAX
            || b.bbi_distance < BBI_DISTANCE_MAX)
        && b.white_pullback
        && (b.daily_change < CHANGE_MAX
            || (b.daily_change < SUPPORTED_CHANGE_MAX && b.white_support))
        && b.ok_bar
        && b.pullback_shrink
        && b.abnormal
        && b.low <= b.prev_close
}

/// A super-bull name touches its lines with RSI + J at a 25-bar low.
pub fn super_bull_pullback(b: &BarConditions) -> bool {
    use thr::super_bull_pullback::*;
    b.super_bull
        && (b.j < J_MAX || b.rsi < RSI_MAX || b.washout)
        && b.osc_sum < SUM_MAX
        && b.osc_sum_is_25_low
        && b.daily_amplitude < b.amplitude_threshold + AMPLITUDE_MARGIN
        && (b.daily_change < CHANGE_MAX || b.white_distance < WHITE_DISTANCE_MAX)
        && b.strong_hold
        && b.ok_bar
        && b.abnormal
        && b.moderate_shrink
}

/// Pull-back onto a still-rising yellow line.
///
/// The only rule that does not require an abnormal move; it asks for minimum
/// near and far amplitudes instead.
pub fn yellow_line_pullback(b: &BarConditions) -> bool {
    use thr::yellow_line_pullback::*;
    b.white >= b.yellow
        && b.close >= b.yellow * YELLOW_FLOOR
        && (b.j < J_MAX || b.rsi < RSI_MAX)
        && b.yellow_pullback
        && b.ok_bar
        && (b.shrink || (b.moderate_shrink && (b.j_is_20_low || b.rsi_is_14_low)))
        && b.yellow >= b.prev_yellow * YELLOW_SLOPE_TOLERANCE
        && b.ma60 >= b.prev_ma60
        && b.near_amplitude >= NEAR_MIN
        && b.far_amplitude >= FAR_MIN
}
