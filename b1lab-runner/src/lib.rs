//! B1Lab Runner: screen orchestration on top of `b1lab-core`.
//!
//! This crate provides:
//! - TOML screen configuration
//! - CSV bar loading with canonicalisation and dataset hashing
//! - Parallel per-instrument evaluation on a bounded thread pool
//! - The daily selection report (JSON, schema-versioned)

pub mod config;
pub mod data_loader;
pub mod report;
pub mod screen;

pub use config::{ConfigError, ScreenConfig};
pub use data_loader::{
    canonicalize, dataset_hash, discover, load_bars, read_bars, CanonicalizeStats,
    InstrumentFile, LoadError,
};
pub use report::{Failure, ScreenReport, Selection, Skipped, SCHEMA_VERSION};
pub use screen::{run_screen, run_screen_on, screen_one, ScreenError, ScreenOutcome};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_is_send_sync() {
        assert_send::<ScreenConfig>();
        assert_sync::<ScreenConfig>();
    }

    #[test]
    fn outcome_is_send_sync() {
        assert_send::<ScreenOutcome>();
        assert_sync::<ScreenOutcome>();
    }

    #[test]
    fn report_is_send_sync() {
        assert_send::<ScreenReport>();
        assert_sync::<ScreenReport>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<ScreenError>();
        assert_sync::<ScreenError>();
        assert_send::<LoadError>();
        assert_sync::<LoadError>();
    }
}
