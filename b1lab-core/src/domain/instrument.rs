use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing venue of an A-share instrument, derived from its code prefix.
///
/// Only the prefix matters. Codes are not validated beyond that, so an
/// unrecognised prefix is treated as a main-board listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Board {
    /// Shanghai and Shenzhen main boards (10% daily limit).
    Main,
    /// Shenzhen ChiNext, codes starting with `30`.
    ChiNext,
    /// Shanghai STAR Market, codes starting with `68`.
    StarMarket,
    /// Beijing Stock Exchange, codes starting with `4`, `8` or `9`.
    BeijingExchange,
}

impl Board {
    pub fn from_code(code: &str) -> Self {
        if code.starts_with("68") {
            Board::StarMarket
        } else if code.starts_with("30") {
            Board::ChiNext
        } else if code.starts_with(['4', '8', '9']) {
            Board::BeijingExchange
        } else {
            Board::Main
        }
    }

    /// Boards with a daily price limit wider than the main board's.
    pub fn has_wide_limit(self) -> bool {
        !matches!(self, Board::Main)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Board::Main => "main",
            Board::ChiNext => "chinext",
            Board::StarMarket => "star",
            Board::BeijingExchange => "bse",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_from_prefix() {
        assert_eq!(Board::from_code("688001"), Board::StarMarket);
        assert_eq!(Board::from_code("300750"), Board::ChiNext);
        assert_eq!(Board::from_code("430047"), Board::BeijingExchange);
        assert_eq!(Board::from_code("830799"), Board::BeijingExchange);
        assert_eq!(Board::from_code("920001"), Board::BeijingExchange);
        assert_eq!(Board::from_code("000001"), Board::Main);
        assert_eq!(Board::from_code("600519"), Board::Main);
        assert_eq!(Board::from_code(""), Board::Main);
    }

    #[test]
    fn prefix_6_without_8_is_main() {
        // 60xxxx is Shanghai main board, only 68xxxx is STAR
        assert_eq!(Board::from_code("601318"), Board::Main);
        assert!(!Board::Main.has_wide_limit());
        assert!(Board::StarMarket.has_wide_limit());
    }
}
