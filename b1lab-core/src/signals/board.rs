//! Main/special board classification and the parameters it fixes.

use serde::{Deserialize, Serialize};

use super::thresholds::board as thr;
use crate::domain::Board;
use crate::series;

/// How wide a daily move the instrument is allowed (or has shown) to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardClass {
    Main,
    Special,
}

impl BoardClass {
    /// Special when the board itself has a wide limit, or when the trailing
    /// 200 bars ending at the last bar contain a single-day gain above 15%.
    pub fn classify(board: Board, closes: &[f64]) -> Self {
        if board.has_wide_limit() || had_big_gain(closes) {
            BoardClass::Special
        } else {
            BoardClass::Main
        }
    }
}

fn had_big_gain(closes: &[f64]) -> bool {
    let prev = series::lag(closes, 1);
    let big: Vec<bool> = closes
        .iter()
        .zip(&prev)
        .map(|(c, p)| c / p > thr::BIG_GAIN_RATIO)
        .collect();
    series::exist(&big, 200).last().copied().unwrap_or(false)
}

/// Parameters fixed once per evaluation by the board class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardParams {
    pub board: Board,
    pub class: BoardClass,
    /// Daily amplitude ceiling in percent.
    pub amplitude_threshold: f64,
    /// Multiplier applied to daily change and candle body before comparing.
    pub relaxation: f64,
}

impl BoardParams {
    pub fn new(board: Board, class: BoardClass) -> Self {
        let (amplitude_threshold, relaxation) = match class {
            BoardClass::Main => (thr::AMPLITUDE_MAIN, thr::RELAXATION_MAIN),
            BoardClass::Special => (thr::AMPLITUDE_SPECIAL, thr::RELAXATION_SPECIAL),
        };
        Self {
            board,
            class,
            amplitude_threshold,
            relaxation,
        }
    }

    pub fn for_instrument(code: &str, closes: &[f64]) -> Self {
        let board = Board::from_code(code);
        Self::new(board, BoardClass::classify(board, closes))
    }
}
