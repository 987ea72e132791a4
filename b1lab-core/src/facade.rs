//! One-call evaluation with failure containment.

use tracing::{debug, warn};

use crate::domain::Bar;
use crate::signals::{SignalEngine, SignalResult};

/// Evaluate an instrument at its latest bar.
///
/// Never fails: input the engine rejects yields a neutral result whose
/// `error` holds the reason, so callers can tell "nothing fired" apart from
/// "could not run".
pub fn evaluate(bars: &[Bar], code: &str) -> SignalResult {
    match SignalEngine::new(bars, code) {
        Ok(engine) => {
            let result = engine.latest_signal();
            debug!(code, bars = bars.len(), signal = result.signal, "evaluated");
            result
        }
        Err(err) => {
            warn!(code, error = %err, "evaluation failed");
            SignalResult::failed(code, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn ten_bars_do_not_signal() {
        let closes: Vec<f64> = (0..10).map(|i| 20.0 - i as f64 * 0.3).collect();
        let result = evaluate(&make_bars(&closes), "000001");
        assert!(!result.signal);
        assert!(result.error.is_none());
    }

    #[test]
    fn invalid_input_becomes_error_result() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0]);
        bars[2].volume = -1.0;
        let result = evaluate(&bars, "600000");
        assert!(!result.signal);
        assert!(result.signals.is_empty());
        assert_eq!(result.code, "600000");
        let msg = result.error.unwrap();
        assert!(msg.contains("bar 2"), "{msg}");
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let result = evaluate(&[], "000001");
        assert!(!result.signal);
        assert!(result.error.is_none());
    }
}
