//! Board classification, evaluation context and the seven selection signals.
//!
//! Everything here is a pure function of one instrument's bars and code.
//! [`SignalEngine`] ties the pieces together; the formulas themselves only
//! see a [`BarConditions`] snapshot and never the raw series.

pub mod board;
pub mod context;
pub mod engine;
pub mod formulas;
pub mod result;
pub mod thresholds;

pub use board::{BoardClass, BoardParams};
pub use context::{BarConditions, EvaluationContext};
pub use engine::{validate_bars, SignalEngine};
pub use formulas::{triggered_signals, SignalName};
pub use result::{Diagnostics, SignalResult};
