//! Errors raised by the evaluation engine.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::BarError;

/// Why a bar series cannot be evaluated.
///
/// Short histories and flat ranges are not errors; only input that breaks the
/// series contract is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    #[error("bar {index} ({date}): {source}")]
    InvalidBar {
        index: usize,
        date: NaiveDate,
        source: BarError,
    },

    #[error("dates must be strictly ascending: bar {index} is {date}, previous bar is {previous}")]
    UnorderedDates {
        index: usize,
        previous: NaiveDate,
        date: NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_bar() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let err = SignalError::InvalidBar {
            index: 3,
            date,
            source: BarError::NegativeVolume(-5.0),
        };
        assert_eq!(
            err.to_string(),
            "bar 3 (2024-05-06): volume must be non-negative, got -5"
        );

        let err = SignalError::UnorderedDates {
            index: 1,
            previous: date,
            date,
        };
        assert!(err.to_string().contains("strictly ascending"));
    }
}
