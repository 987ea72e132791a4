//! Latest-bar output of an evaluation.

use serde::{Deserialize, Serialize};

use super::formulas::SignalName;

/// Indicator readings reported next to the signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub close: f64,
    pub k: f64,
    pub d: f64,
    pub j: f64,
    pub rsi: f64,
    pub near_amplitude: f64,
    pub far_amplitude: f64,
}

/// Result of evaluating one instrument at its latest bar.
///
/// `signal` is true exactly when `signals` is non-empty. Diagnostics are
/// absent when there was no bar to read them from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub code: String,
    pub signal: bool,
    pub signals: Vec<SignalName>,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SignalResult {
    /// No signal, no diagnostics, no error.
    pub fn neutral(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            signal: false,
            signals: Vec::new(),
            diagnostics: None,
            error: None,
        }
    }

    /// No signal because the engine could not run.
    pub fn failed(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::neutral(code)
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
