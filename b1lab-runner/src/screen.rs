//! Batch screening: evaluate every instrument in a directory.
//!
//! Instruments are independent, so they fan out over a private rayon pool
//! sized by `workers`. Per-instrument problems (unreadable file, too little
//! history, bars the engine rejects) are recorded in the report and never
//! stop the run.

use std::path::Path;

use b1lab_core::domain::DatasetHash;
use b1lab_core::signals::SignalResult;
use chrono::NaiveDate;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ScreenConfig;
use crate::data_loader::{dataset_hash, discover, load_bars, missing_codes, LoadError};
use crate::report::ScreenReport;

/// Errors that abort a whole screening run.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("discover bar files: {0}")]
    Discover(#[from] LoadError),

    #[error("build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("write report {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("read report {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("report schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
}

/// What happened to one instrument.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenOutcome {
    /// The engine ran (its result may still carry an error).
    Evaluated {
        result: SignalResult,
        bars: usize,
        last_date: Option<NaiveDate>,
        dataset_hash: DatasetHash,
    },
    /// Fewer than `min_bars` bars after loading.
    Skipped { code: String, bars: usize },
    /// The file could not be read.
    LoadFailed { code: String, error: String },
}

impl ScreenOutcome {
    pub fn code(&self) -> &str {
        match self {
            ScreenOutcome::Evaluated { result, .. } => &result.code,
            ScreenOutcome::Skipped { code, .. } | ScreenOutcome::LoadFailed { code, .. } => code,
        }
    }
}

/// Load, trim and evaluate one instrument.
pub fn screen_one(path: &Path, code: &str, config: &ScreenConfig) -> ScreenOutcome {
    let bars = match load_bars(path) {
        Ok(bars) => bars,
        Err(err) => {
            warn!(code, error = %err, "load failed");
            return ScreenOutcome::LoadFailed {
                code: code.to_string(),
                error: err.to_string(),
            };
        }
    };

    if bars.len() < config.min_bars {
        debug!(code, bars = bars.len(), min_bars = config.min_bars, "skipped");
        return ScreenOutcome::Skipped {
            code: code.to_string(),
            bars: bars.len(),
        };
    }

    let start = bars.len().saturating_sub(config.history_bars);
    let window = &bars[start..];
    let result = b1lab_core::evaluate(window, code);

    ScreenOutcome::Evaluated {
        bars: window.len(),
        last_date: window.last().map(|b| b.date),
        dataset_hash: dataset_hash(code, window),
        result,
    }
}

/// Screen every configured instrument, dating the report today.
pub fn run_screen(config: &ScreenConfig) -> Result<ScreenReport, ScreenError> {
    run_screen_on(config, chrono::Local::now().date_naive())
}

/// Screen every configured instrument with an explicit report date.
pub fn run_screen_on(config: &ScreenConfig, run_date: NaiveDate) -> Result<ScreenReport, ScreenError> {
    config.validate()?;

    let files = discover(&config.data_dir, &config.codes)?;
    let missing = missing_codes(&config.codes, &files);
    info!(
        data_dir = %config.data_dir.display(),
        instruments = files.len(),
        workers = config.workers,
        "screening"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()?;

    let mut outcomes: Vec<ScreenOutcome> = pool.install(|| {
        files
            .par_iter()
            .map(|f| screen_one(&f.path, &f.code, config))
            .collect()
    });

    for code in missing {
        warn!(code = %code, "requested code has no bar file");
        outcomes.push(ScreenOutcome::LoadFailed {
            error: LoadError::Missing(code.clone()).to_string(),
            code,
        });
    }

    let report = ScreenReport::from_outcomes(config.clone(), run_date, outcomes);
    info!(
        evaluated = report.evaluated,
        selected = report.selected.len(),
        skipped = report.skipped.len(),
        failed = report.failures.len(),
        "screen complete"
    );
    Ok(report)
}
