//! B1Lab Core: series operators, indicators and the seven-signal selector.
//!
//! Layers, each depending only on the ones above it:
//! - Domain types (daily bars, instrument board)
//! - Series operators (REF, MA, EMA, recursive SMA, HHV/LLV, COUNT, CROSS, ...)
//! - Indicators (KDJ, RSI, BBI, trend lines, oscillators, MA60)
//! - Signals (board parameters, evaluation context, seven formulas, engine)
//! - Facade (`evaluate`, the only place failures are turned into results)
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod domain;
pub mod error;
pub mod facade;
pub mod indicators;
pub mod series;
pub mod signals;

pub use error::SignalError;
pub use facade::evaluate;
