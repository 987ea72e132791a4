//! Per-instrument signal engine.
//!
//! Construction does all the work: validate the bars, compute indicators,
//! classify the board, build the evaluation context, then evaluate every
//! formula on every bar. Afterwards the engine is read-only.

use tracing::trace;

use super::board::BoardParams;
use super::context::EvaluationContext;
use super::formulas::SignalName;
use super::result::{Diagnostics, SignalResult};
use crate::domain::{Bar, Columns};
use crate::error::SignalError;
use crate::indicators::IndicatorSet;

/// Check the series contract: every bar valid, dates strictly ascending.
pub fn validate_bars(bars: &[Bar]) -> Result<(), SignalError> {
    for (index, bar) in bars.iter().enumerate() {
        bar.validate().map_err(|source| SignalError::InvalidBar {
            index,
            date: bar.date,
            source,
        })?;
        if index > 0 && bars[index - 1].date >= bar.date {
            return Err(SignalError::UnorderedDates {
                index,
                previous: bars[index - 1].date,
                date: bar.date,
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SignalEngine {
    code: String,
    context: EvaluationContext,
    /// One series per signal, indexed by [`SignalName::index`].
    signals: Vec<Vec<bool>>,
    aggregate: Vec<bool>,
}

impl SignalEngine {
    pub fn new(bars: &[Bar], code: impl Into<String>) -> Result<Self, SignalError> {
        let code = code.into();
        validate_bars(bars)?;

        let columns = Columns::from_bars(bars);
        let indicators = IndicatorSet::compute_with_columns(bars, &columns);
        let params = BoardParams::for_instrument(&code, &columns.close);
        let context = EvaluationContext::build(columns, indicators, params);

        let n = context.len();
        let mut signals = vec![vec![false; n]; SignalName::ALL.len()];
        let mut aggregate = vec![false; n];
        for i in 0..n {
            let snap = context.snapshot(i);
            for name in SignalName::ALL {
                let fired = name.triggered(&snap);
                signals[name.index()][i] = fired;
                aggregate[i] |= fired;
            }
        }

        trace!(
            code = %code,
            bars = n,
            board = %params.board,
            class = ?params.class,
            "signal engine built"
        );

        Ok(Self {
            code,
            context,
            signals,
            aggregate,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn params(&self) -> BoardParams {
        self.context.params
    }

    pub fn len(&self) -> usize {
        self.aggregate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregate.is_empty()
    }

    pub fn context(&self) -> &EvaluationContext {
        &self.context
    }

    /// Per-bar values of one signal.
    pub fn signal_series(&self, name: SignalName) -> &[bool] {
        &self.signals[name.index()]
    }

    /// Per-bar OR of all seven signals.
    pub fn aggregate(&self) -> &[bool] {
        &self.aggregate
    }

    /// Result at bar `i`, or `None` past the end.
    pub fn result_at(&self, i: usize) -> Option<SignalResult> {
        if i >= self.len() {
            return None;
        }
        let signals: Vec<SignalName> = SignalName::ALL
            .into_iter()
            .filter(|name| self.signals[name.index()][i])
            .collect();
        let ind = &self.context.indicators;

        Some(SignalResult {
            code: self.code.clone(),
            signal: self.aggregate[i],
            signals,
            diagnostics: Some(Diagnostics {
                close: self.context.columns.close[i],
                k: ind.k[i],
                d: ind.d[i],
                j: ind.j[i],
                rsi: ind.rsi[i],
                near_amplitude: self.context.near_amplitude[i],
                far_amplitude: self.context.far_amplitude[i],
            }),
            error: None,
        })
    }

    /// Result at the final bar. An empty series gives a neutral result.
    pub fn latest_signal(&self) -> SignalResult {
        self.len()
            .checked_sub(1)
            .and_then(|last| self.result_at(last))
            .unwrap_or_else(|| SignalResult::neutral(self.code.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BarError;
    use crate::indicators::{make_bars, make_flat_bars};
    use crate::signals::BoardClass;

    #[test]
    fn empty_series_is_neutral_without_error() {
        let engine = SignalEngine::new(&[], "000001").unwrap();
        let result = engine.latest_signal();
        assert!(!result.signal);
        assert!(result.signals.is_empty());
        assert!(result.error.is_none());
        assert!(result.diagnostics.is_none());
        assert_eq!(result.code, "000001");
    }

    #[test]
    fn short_series_evaluates() {
        let closes: Vec<f64> = (0..10).map(|i| 10.0 + i as f64 * 0.1).collect();
        let engine = SignalEngine::new(&make_bars(&closes), "000001").unwrap();
        let result = engine.latest_signal();
        assert!(!result.signal);
        assert_eq!(engine.len(), 10);
        let diag = result.diagnostics.unwrap();
        assert_eq!(diag.close, closes[9]);
    }

    #[test]
    fn flat_series_reports_neutral_oscillators() {
        let engine = SignalEngine::new(&make_flat_bars(10.0, 150), "000001").unwrap();
        let diag = engine.latest_signal().diagnostics.unwrap();
        assert_eq!(diag.k, 50.0);
        assert_eq!(diag.d, 50.0);
        assert_eq!(diag.j, 50.0);
        assert_eq!(diag.rsi, 50.0);
        assert!(!engine.latest_signal().signal);
    }

    #[test]
    fn aggregate_is_or_of_signals() {
        let closes: Vec<f64> = (0..200)
            .map(|i| 10.0 + i as f64 * 0.02 + (i as f64 * 0.9).sin() * 0.6)
            .collect();
        let engine = SignalEngine::new(&make_bars(&closes), "300001").unwrap();
        for i in 0..engine.len() {
            let any = SignalName::ALL
                .iter()
                .any(|&s| engine.signal_series(s)[i]);
            assert_eq!(engine.aggregate()[i], any, "bar {i}");
            let r = engine.result_at(i).unwrap();
            assert_eq!(r.signal, !r.signals.is_empty());
        }
        assert!(engine.result_at(engine.len()).is_none());
    }

    #[test]
    fn signal_series_belongs_to_its_formula() {
        let closes: Vec<f64> = (0..200)
            .map(|i| 10.0 + i as f64 * 0.03 + (i as f64 * 0.7).sin() * 0.8)
            .collect();
        let engine = SignalEngine::new(&make_bars(&closes), "600000").unwrap();
        for i in 0..engine.len() {
            let snap = engine.context().snapshot(i);
            for name in SignalName::ALL {
                assert_eq!(
                    engine.signal_series(name)[i],
                    name.triggered(&snap),
                    "{name} at bar {i}"
                );
            }
        }
    }

    #[test]
    fn board_params_follow_code() {
        let bars = make_flat_bars(10.0, 30);
        let star = SignalEngine::new(&bars, "688001").unwrap();
        assert_eq!(star.params().class, BoardClass::Special);
        assert_eq!(star.params().amplitude_threshold, 8.0);
        let main = SignalEngine::new(&bars, "000001").unwrap();
        assert_eq!(main.params().class, BoardClass::Main);
        assert_eq!(main.params().relaxation, 1.0);
    }

    #[test]
    fn rejects_invalid_bar() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0]);
        bars[1].close = f64::NAN;
        let err = SignalEngine::new(&bars, "000001").unwrap_err();
        assert!(matches!(
            err,
            SignalError::InvalidBar {
                index: 1,
                source: BarError::NonFinite { field: "close", .. },
                ..
            }
        ));
    }

    #[test]
    fn rejects_duplicate_and_descending_dates() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0]);
        bars[2].date = bars[1].date;
        assert!(matches!(
            SignalEngine::new(&bars, "000001"),
            Err(SignalError::UnorderedDates { index: 2, .. })
        ));

        let mut bars = make_bars(&[10.0, 11.0]);
        bars.swap(0, 1);
        assert!(validate_bars(&bars).is_err());
    }
}
