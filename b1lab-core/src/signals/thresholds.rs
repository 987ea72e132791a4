//! Tuned numeric thresholds of the selection formula.
//!
//! Values are kept exactly as tuned, including near-duplicates across
//! signals (e.g. J below 13 in one rule, 14 in another). Each group is one
//! module; [`TABLE`] lists every value by dotted name.
//!
//! Window lengths (the `n` of COUNT/EVERY/HHV) stay inline next to the
//! formula that uses them.

/// Board classification.
pub mod board {
    pub const AMPLITUDE_MAIN: f64 = 5.0;
    pub const AMPLITUDE_SPECIAL: f64 = 8.0;
    pub const RELAXATION_MAIN: f64 = 1.0;
    pub const RELAXATION_SPECIAL: f64 = 0.9;
    /// Close over previous close above this marks a wide-limit history.
    pub const BIG_GAIN_RATIO: f64 = 1.15;
}

/// Per-bar conditions shared by several signals.
pub mod context {
    pub const DOJI_BODY_PCT: f64 = 1.8;

    pub const SHRINK_RATIO: f64 = 0.416;
    pub const PULLBACK_SHRINK_RATIO: f64 = 0.45;
    pub const MODERATE_SHRINK_RATIO: f64 = 0.618;
    pub const SHRINK_DIVISOR_50: f64 = 3.0;
    pub const EXTREME_SHRINK_DIVISOR_30: f64 = 4.0;
    pub const EXTREME_SHRINK_DIVISOR_50: f64 = 6.0;

    pub const NEAR_ABNORMAL_PCT: f64 = 15.0;
    pub const TIGHT_ABNORMAL_PCT: f64 = 11.0;
    pub const FAR_ABNORMAL_PCT: f64 = 30.0;
    pub const SUPER_ABNORMAL_PCT: f64 = 60.0;

    pub const NEEDLE_SHORT_MAX: f64 = 20.0;
    pub const NEEDLE_LONG_MIN: f64 = 75.0;
    pub const NEEDLE_SPREAD_MIN: f64 = 70.0;
    pub const BOWL_SHORT_SOFT_MAX: f64 = 70.0;
    pub const WASHOUT_SHORT_DIP_MAX: f64 = 50.0;

    pub const UPTREND_YELLOW_TOLERANCE: f64 = 0.975;
    pub const LINE_SLOPE_TOLERANCE: f64 = 0.999;
    pub const SUPER_BULL_NEAR_PCT: f64 = 30.0;
    pub const SUPER_BULL_FAR_PCT: f64 = 80.0;

    pub const WHITE_PULLBACK_ABOVE_PCT: f64 = 2.0;
    pub const WHITE_PULLBACK_BELOW_PCT: f64 = 0.8;
    pub const BBI_PULLBACK_CLOSE_PCT: f64 = 2.5;
    pub const BBI_PULLBACK_LOW_PCT: f64 = 1.0;
    pub const BBI_PULLBACK_WHITE_PCT: f64 = 3.0;
    pub const BBI_PULLBACK_CHANGE_MAX: f64 = 1.0;
    pub const WHITE_SUPPORT_PCT: f64 = 1.5;
    pub const HOLD_LOW_WHITE_PCT: f64 = 1.0;
    pub const HOLD_LOW_BBI_PCT: f64 = 0.5;
    pub const HOLD_CLOSE_WHITE_PCT: f64 = 3.5;
    pub const YELLOW_PULLBACK_PCT: f64 = 1.5;
    pub const YELLOW_PULLBACK_QUIET_PCT: f64 = 2.0;
    pub const YELLOW_PULLBACK_QUIET_CHANGE: f64 = 1.0;
    pub const YELLOW_PULLBACK_BELOW_PCT: f64 = 0.8;
}

pub mod oversold_shrink_turn {
    pub const RSI_JUMP: f64 = 15.0;
    pub const PREV_RSI_MAX: f64 = 20.0;
    pub const PREV_J_MAX: f64 = 14.0;
    pub const AMPLITUDE_MARGIN: f64 = 0.5;
    pub const CHANGE_MAX: f64 = 2.3;
}

pub mod oversold_shrink {
    pub const J_MAX: f64 = 14.0;
    pub const RSI_MAX: f64 = 23.0;
    pub const SUM_MAX: f64 = 55.0;
    pub const CHANGE_MAX: f64 = 2.5;
    pub const MODERATE_CHANGE_MAX: f64 = 1.0;
}

pub mod original_b1 {
    pub const YELLOW_FLOOR: f64 = 0.99;
    pub const J_MAX: f64 = 13.0;
    pub const RSI_MAX: f64 = 21.0;
    pub const SUM_LOW_FACTOR: f64 = 1.5;
    pub const BODY_MAX_PCT: f64 = 1.5;
    pub const WHITE_DISTANCE_MAX: f64 = 1.8;
    pub const BBI_DISTANCE_MAX: f64 = 1.5;
    pub const YELLOW_DISTANCE_MAX: f64 = 2.8;
}

pub mod oversold_extreme_shrink {
    pub const J_MAX: f64 = 14.0;
    pub const RSI_MAX: f64 = 23.0;
    pub const SUM_MAX: f64 = 60.0;
    pub const FAR_MIN: f64 = 45.0;
    pub const SUPER_AMPLITUDE_MARGIN: f64 = 3.2;
    pub const CHANGE_MAX: f64 = 2.0;
}

pub mod white_line_pullback {
    pub const J_MAX: f64 = 30.0;
    pub const RSI_MAX: f64 = 40.0;
    pub const SUM_MAX: f64 = 70.0;
    pub const AMPLITUDE_MARGIN: f64 = 0.5;
    pub const WHITE_DISTANCE_MAX: f64 = 1.0;
    pub const BBI_DISTANCE_MAX: f64 = 1.0;
    pub const CHANGE_MAX: f64 = 2.0;
    pub const SUPPORTED_CHANGE_MAX: f64 = 5.0;
}

pub mod super_bull_pullback {
    pub const J_MAX: f64 = 35.0;
    pub const RSI_MAX: f64 = 45.0;
    pub const SUM_MAX: f64 = 80.0;
    pub const AMPLITUDE_MARGIN: f64 = 1.0;
    pub const CHANGE_MAX: f64 = 2.5;
    pub const WHITE_DISTANCE_MAX: f64 = 2.0;
}

pub mod yellow_line_pullback {
    pub const YELLOW_FLOOR: f64 = 0.975;
    pub const J_MAX: f64 = 13.0;
    pub const RSI_MAX: f64 = 18.0;
    pub const YELLOW_SLOPE_TOLERANCE: f64 = 0.997;
    pub const NEAR_MIN: f64 = 11.9;
    pub const FAR_MIN: f64 = 19.5;
}

macro_rules! table {
    ($($group:ident :: $name:ident),* $(,)?) => {
        /// Every threshold by `group.NAME`, in declaration order.
        pub const TABLE: &[(&str, &str, f64)] = &[
            $((stringify!($group), stringify!($name), $group::$name)),*
        ];
    };
}

table![
    board::AMPLITUDE_MAIN,
    board::AMPLITUDE_SPECIAL,
    board::RELAXATION_MAIN,
    board::RELAXATION_SPECIAL,
    board::BIG_GAIN_RATIO,
    context::DOJI_BODY_PCT,
    context::SHRINK_RATIO,
    context::PULLBACK_SHRINK_RATIO,
    context::MODERATE_SHRINK_RATIO,
    context::SHRINK_DIVISOR_50,
    context::EXTREME_SHRINK_DIVISOR_30,
    context::EXTREME_SHRINK_DIVISOR_50,
    context::NEAR_ABNORMAL_PCT,
    context::TIGHT_ABNORMAL_PCT,
    context::FAR_ABNORMAL_PCT,
    context::SUPER_ABNORMAL_PCT,
    context::NEEDLE_SHORT_MAX,
    context::NEEDLE_LONG_MIN,
    context::NEEDLE_SPREAD_MIN,
    context::BOWL_SHORT_SOFT_MAX,
    context::WASHOUT_SHORT_DIP_MAX,
    context::UPTREND_YELLOW_TOLERANCE,
    context::LINE_SLOPE_TOLERANCE,
    context::SUPER_BULL_NEAR_PCT,
    context::SUPER_BULL_FAR_PCT,
    context::WHITE_PULLBACK_ABOVE_PCT,
    context::WHITE_PULLBACK_BELOW_PCT,
    context::BBI_PULLBACK_CLOSE_PCT,
    context::BBI_PULLBACK_LOW_PCT,
    context::BBI_PULLBACK_WHITE_PCT,
    context::BBI_PULLBACK_CHANGE_MAX,
    context::WHITE_SUPPORT_PCT,
    context::HOLD_LOW_WHITE_PCT,
    context::HOLD_LOW_BBI_PCT,
    context::HOLD_CLOSE_WHITE_PCT,
    context::YELLOW_PULLBACK_PCT,
    context::YELLOW_PULLBACK_QUIET_PCT,
    context::YELLOW_PULLBACK_QUIET_CHANGE,
    context::YELLOW_PULLBACK_BELOW_PCT,
    oversold_shrink_turn::RSI_JUMP,
    oversold_shrink_turn::PREV_RSI_MAX,
    oversold_shrink_turn::PREV_J_MAX,
    oversold_shrink_turn::AMPLITUDE_MARGIN,
    oversold_shrink_turn::CHANGE_MAX,
    oversold_shrink::J_MAX,
    oversold_shrink::RSI_MAX,
    oversold_shrink::SUM_MAX,
    oversold_shrink::CHANGE_MAX,
    oversold_shrink::MODERATE_CHANGE_MAX,
    original_b1::YELLOW_FLOOR,
    original_b1::J_MAX,
    original_b1::RSI_MAX,
    original_b1::SUM_LOW_FACTOR,
    original_b1::BODY_MAX_PCT,
    original_b1::WHITE_DISTANCE_MAX,
    original_b1::BBI_DISTANCE_MAX,
    original_b1::YELLOW_DISTANCE_MAX,
    oversold_extreme_shrink::J_MAX,
    oversold_extreme_shrink::RSI_MAX,
    oversold_extreme_shrink::SUM_MAX,
    oversold_extreme_shrink::FAR_MIN,
    oversold_extreme_shrink::SUPER_AMPLITUDE_MARGIN,
    oversold_extreme_shrink::CHANGE_MAX,
    white_line_pullback::J_MAX,
    white_line_pullback::RSI_MAX,
    white_line_pullback::SUM_MAX,
    white_line_pullback::AMPLITUDE_MARGIN,
    white_line_pullback::WHITE_DISTANCE_MAX,
    white_line_pullback::BBI_DISTANCE_MAX,
    white_line_pullback::CHANGE_MAX,
    white_line_pullback::SUPPORTED_CHANGE_MAX,
    super_bull_pullback::J_MAX,
    super_bull_pullback::RSI_MAX,
    super_bull_pullback::SUM_MAX,
    super_bull_pullback::AMPLITUDE_MARGIN,
    super_bull_pullback::CHANGE_MAX,
    super_bull_pullback::WHITE_DISTANCE_MAX,
    yellow_line_pullback::YELLOW_FLOOR,
    yellow_line_pullback::J_MAX,
    yellow_line_pullback::RSI_MAX,
    yellow_line_pullback::YELLOW_SLOPE_TOLERANCE,
    yellow_line_pullback::NEAR_MIN,
    yellow_line_pullback::FAR_MIN,
];

/// Look a threshold up by group and name.
pub fn lookup(group: &str, name: &str) -> Option<f64> {
    TABLE
        .iter()
        .find(|(g, n, _)| *g == group && *n == name)
        .map(|&(_, _, v)| v)
}
