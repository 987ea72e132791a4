//! The day's selection, as persisted JSON.
//!
//! All persisted reports include a `schema_version` field. Unknown (newer)
//! versions are rejected on load.

use std::path::{Path, PathBuf};

use b1lab_core::domain::DatasetHash;
use b1lab_core::signals::SignalResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ScreenConfig;
use crate::screen::{ScreenError, ScreenOutcome};

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

/// One selected instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(flatten)]
    pub result: SignalResult,
    pub bars: usize,
    pub last_date: Option<NaiveDate>,
    pub dataset_hash: DatasetHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    pub code: String,
    pub bars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub code: String,
    pub error: String,
}

/// Outcome of one screening run. Every list is sorted by code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenReport {
    pub schema_version: u32,
    pub run_date: NaiveDate,
    /// Most recent bar date among evaluated instruments.
    pub latest_bar_date: Option<NaiveDate>,
    pub config: ScreenConfig,
    /// Instruments the engine ran on, selected or not.
    pub evaluated: usize,
    pub selected: Vec<Selection>,
    pub skipped: Vec<Skipped>,
    pub failures: Vec<Failure>,
}

impl ScreenReport {
    pub fn from_outcomes(
        config: ScreenConfig,
        run_date: NaiveDate,
        outcomes: Vec<ScreenOutcome>,
    ) -> Self {
        let mut report = Self {
            schema_version: SCHEMA_VERSION,
            run_date,
            latest_bar_date: None,
            config,
            evaluated: 0,
            selected: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        };

        for outcome in outcomes {
            match outcome {
                ScreenOutcome::Evaluated {
                    result,
                    bars,
                    last_date,
                    dataset_hash,
                } => {
                    report.evaluated += 1;
                    report.latest_bar_date = report.latest_bar_date.max(last_date);
                    if let Some(error) = result.error.clone() {
                        report.failures.push(Failure {
                            code: result.code,
                            error,
                        });
                    } else if result.signal {
                        report.selected.push(Selection {
                            result,
                            bars,
                            last_date,
                            dataset_hash,
                        });
                    }
                }
                ScreenOutcome::Skipped { code, bars } => {
                    report.skipped.push(Skipped { code, bars });
                }
                ScreenOutcome::LoadFailed { code, error } => {
                    report.failures.push(Failure { code, error });
                }
            }
        }

        report.selected.sort_by(|a, b| a.result.code.cmp(&b.result.code));
        report.skipped.sort_by(|a, b| a.code.cmp(&b.code));
        report.failures.sort_by(|a, b| a.code.cmp(&b.code));
        report
    }

    pub fn selected_codes(&self) -> Vec<&str> {
        self.selected.iter().map(|s| s.result.code.as_str()).collect()
    }

    /// `selected_<YYYYMMDD>.json`
    pub fn file_name(&self) -> String {
        format!("selected_{}.json", self.run_date.format("%Y%m%d"))
    }

    pub fn to_json(&self) -> Result<String, ScreenError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report into `dir`, creating it if needed.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ScreenError> {
        std::fs::create_dir_all(dir).map_err(|source| ScreenError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.to_json()?).map_err(|source| ScreenError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Read a saved report, rejecting newer schema versions.
    pub fn load(path: &Path) -> Result<Self, ScreenError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScreenError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let report: Self = serde_json::from_str(&json)?;
        if report.schema_version > SCHEMA_VERSION {
            return Err(ScreenError::UnsupportedSchema {
                found: report.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use b1lab_core::signals::SignalName;

    fn evaluated(code: &str, signal: bool) -> ScreenOutcome {
        let mut result = SignalResult::neutral(code);
        if signal {
            result.signal = true;
            result.signals = vec![SignalName::OversoldShrink];
        }
        ScreenOutcome::Evaluated {
            result,
            bars: 300,
            last_date: NaiveDate::from_ymd_opt(2024, 6, 28),
            dataset_hash: DatasetHash::from_hash("abc"),
        }
    }

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn outcomes_are_sorted_into_buckets() {
        let outcomes = vec![
            evaluated("600519", true),
            evaluated("000002", false),
            evaluated("000001", true),
            ScreenOutcome::Skipped {
                code: "300750".into(),
                bars: 40,
            },
            ScreenOutcome::LoadFailed {
                code: "688001".into(),
                error: "parse".into(),
            },
            ScreenOutcome::Evaluated {
                result: SignalResult::failed("430047", "bad bar"),
                bars: 150,
                last_date: None,
                dataset_hash: DatasetHash::from_hash("def"),
            },
        ];
        let report = ScreenReport::from_outcomes(ScreenConfig::default(), run_date(), outcomes);

        assert_eq!(report.evaluated, 4);
        assert_eq!(report.selected_codes(), vec!["000001", "600519"]);
        assert_eq!(report.skipped.len(), 1);
        let failed: Vec<&str> = report.failures.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(failed, vec!["430047", "688001"]);
        assert_eq!(report.latest_bar_date, NaiveDate::from_ymd_opt(2024, 6, 28));
    }

    #[test]
    fn file_name_uses_run_date() {
        let report = ScreenReport::from_outcomes(ScreenConfig::default(), run_date(), vec![]);
        assert_eq!(report.file_name(), "selected_20240701.json");
    }

    #[test]
    fn selection_json_is_flat() {
        let report = ScreenReport::from_outcomes(
            ScreenConfig::default(),
            run_date(),
            vec![evaluated("000001", true)],
        );
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        let first = &json["selected"][0];
        assert_eq!(first["code"], "000001");
        assert_eq!(first["signals"][0], "oversold_shrink");
        assert_eq!(first["dataset_hash"], "abc");
        assert_eq!(json["schema_version"], 1);
    }
}
