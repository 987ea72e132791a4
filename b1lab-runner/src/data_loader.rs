//! Bar loading from local CSV files.
//!
//! One file per instrument, `<code>.csv`, header
//! `date,open,high,low,close,volume` with ISO dates. Fetching the files is
//! someone else's job; this module only reads what is already on disk and
//! brings it into the shape the engine expects:
//! 1. sort by date
//! 2. drop duplicate dates, keeping the first row seen
//! 3. drop bars that fail the OHLCV sanity check

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use b1lab_core::domain::{Bar, DatasetHash};
use thiserror::Error;
use tracing::warn;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("no bar file for '{0}'")]
    Missing(String),
}

/// A bar file found on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct InstrumentFile {
    pub code: String,
    pub path: PathBuf,
}

/// What [`canonicalize`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalizeStats {
    pub duplicates: usize,
    pub insane: usize,
}

/// Sort by date, keep the first bar of each date, drop insane bars.
pub fn canonicalize(mut bars: Vec<Bar>) -> (Vec<Bar>, CanonicalizeStats) {
    // stable sort keeps file order within a date, so "first" means first in file
    bars.sort_by_key(|b| b.date);

    let mut stats = CanonicalizeStats::default();
    let mut out: Vec<Bar> = Vec::with_capacity(bars.len());
    let mut last_date = None;
    for bar in bars {
        if last_date == Some(bar.date) {
            stats.duplicates += 1;
            continue;
        }
        last_date = Some(bar.date);
        if !bar.is_sane() {
            stats.insane += 1;
            continue;
        }
        out.push(bar);
    }
    (out, stats)
}

/// Read raw bars from any CSV source, without canonicalising.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    rdr.deserialize().collect()
}

/// Load one instrument's bars, canonicalised.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = read_bars(file).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let (bars, stats) = canonicalize(raw);
    if stats != CanonicalizeStats::default() {
        warn!(
            path = %path.display(),
            duplicates = stats.duplicates,
            insane = stats.insane,
            "dropped bars while loading"
        );
    }
    Ok(bars)
}

/// Code of a bar file: its file stem.
pub fn code_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// List the `<code>.csv` files in `dir`, sorted by code.
///
/// When `codes` is non-empty only those codes are returned; requested codes
/// without a file are simply absent (see [`missing_codes`]).
pub fn discover(dir: &Path, codes: &[String]) -> Result<Vec<InstrumentFile>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let wanted: BTreeSet<&str> = codes.iter().map(String::as_str).collect();

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv || !path.is_file() {
            continue;
        }
        let Some(code) = code_from_path(&path) else {
            continue;
        };
        if wanted.is_empty() || wanted.contains(code.as_str()) {
            files.push(InstrumentFile { code, path });
        }
    }
    files.sort();
    Ok(files)
}

/// Requested codes that [`discover`] did not find, sorted.
pub fn missing_codes(codes: &[String], found: &[InstrumentFile]) -> Vec<String> {
    let have: BTreeSet<&str> = found.iter().map(|f| f.code.as_str()).collect();
    codes
        .iter()
        .filter(|c| !have.contains(c.as_str()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Compute a deterministic BLAKE3 hash over one instrument's bars.
///
/// Covers the code, every date and every OHLCV value, so two runs agree on
/// the hash exactly when they evaluated the same data.
pub fn dataset_hash(code: &str, bars: &[Bar]) -> DatasetHash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(code.as_bytes());
    for bar in bars {
        hasher.update(bar.date.to_string().as_bytes());
        hasher.update(&bar.open.to_le_bytes());
        hasher.update(&bar.high.to_le_bytes());
        hasher.update(&bar.low.to_le_bytes());
        hasher.update(&bar.close.to_le_bytes());
        hasher.update(&bar.volume.to_le_bytes());
    }
    DatasetHash(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const CSV: &str = "\
date,open,high,low,close,volume
2024-01-03,10.1,10.6,10.0,10.5,1200
2024-01-02,10.0,10.2,9.8,10.1,1000
2024-01-03,99.0,99.0,99.0,99.0,1
2024-01-04,10.5,10.4,10.6,10.5,900
2024-01-05,10.5,10.9,10.4,10.8,1500
";

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn read_then_canonicalize() {
        let raw = read_bars(CSV.as_bytes()).unwrap();
        assert_eq!(raw.len(), 5);

        let (bars, stats) = canonicalize(raw);
        let dates: Vec<NaiveDate> = bars.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![d(2), d(3), d(5)]);
        // first row for 01-03 wins
        assert_eq!(bars[1].close, 10.5);
        assert_eq!(
            stats,
            CanonicalizeStats {
                duplicates: 1,
                insane: 1
            }
        );
    }

    #[test]
    fn malformed_row_is_an_error() {
        let bad = "date,open,high,low,close,volume\n2024-01-02,ten,1,1,1,1\n";
        assert!(read_bars(bad.as_bytes()).is_err());
    }

    #[test]
    fn code_is_file_stem() {
        assert_eq!(
            code_from_path(Path::new("/data/600519.csv")).as_deref(),
            Some("600519")
        );
    }

    #[test]
    fn missing_codes_are_reported_once() {
        let found = vec![InstrumentFile {
            code: "000001".into(),
            path: PathBuf::from("000001.csv"),
        }];
        let codes = vec!["300750".to_string(), "000001".into(), "300750".into()];
        assert_eq!(missing_codes(&codes, &found), vec!["300750"]);
    }

    #[test]
    fn dataset_hash_is_stable_and_content_sensitive() {
        let (bars, _) = canonicalize(read_bars(CSV.as_bytes()).unwrap());
        let h1 = dataset_hash("000001", &bars);
        let h2 = dataset_hash("000001", &bars);
        assert_eq!(h1, h2);
        assert_eq!(h1.0.len(), 64);

        assert_ne!(h1, dataset_hash("000002", &bars));
        let mut changed = bars.clone();
        changed[0].volume += 1.0;
        assert_ne!(h1, dataset_hash("000001", &changed));
    }
}
