//! B1Lab CLI: single-instrument checks and the daily screen.
//!
//! Commands:
//! - `check`: evaluate one CSV bar file and print the latest-bar diagnostics
//! - `screen`: evaluate a directory of bar files and write the selection report

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use b1lab_core::signals::SignalResult;
use b1lab_runner::data_loader::code_from_path;
use b1lab_runner::{load_bars, run_screen, ScreenConfig, ScreenReport};

#[derive(Parser)]
#[command(name = "b1lab", about = "B1Lab CLI: A-share seven-signal stock screener")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one bar file at its latest bar.
    Check {
        /// CSV file with header date,open,high,low,close,volume.
        file: PathBuf,

        /// Instrument code. Defaults to the file stem.
        #[arg(long)]
        code: Option<String>,
    },
    /// Screen every bar file in a directory and write the report.
    Screen {
        /// Path to a TOML config file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory of <code>.csv files (overrides the config).
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Output directory for the report (overrides the config).
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Evaluation threads (overrides the config).
        #[arg(long)]
        workers: Option<usize>,

        /// Print the JSON report instead of the summary table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, code } => run_check(&file, code),
        Commands::Screen {
            config,
            data_dir,
            output_dir,
            workers,
            json,
        } => run_screen_cmd(config, data_dir, output_dir, workers, json),
    }
}

fn run_check(file: &Path, code: Option<String>) -> Result<()> {
    let code = match code.or_else(|| code_from_path(file)) {
        Some(code) => code,
        None => bail!("cannot derive an instrument code from {}", file.display()),
    };
    let bars = load_bars(file)?;
    let result = b1lab_core::evaluate(&bars, &code);

    if let Some(err) = &result.error {
        bail!("{code}: {err}");
    }
    print_check(&result, bars.len());
    Ok(())
}

fn run_screen_cmd(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    workers: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => ScreenConfig::from_file(path)?,
        None => ScreenConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if let Some(n) = workers {
        config.workers = n;
    }
    config.validate()?;

    let report = run_screen(&config)?;
    let path = report
        .save(&config.output_dir)
        .with_context(|| format!("saving report to {}", config.output_dir.display()))?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report);
        println!();
        println!("Report saved to: {}", path.display());
    }
    Ok(())
}

fn signal_names(result: &SignalResult) -> String {
    if result.signals.is_empty() {
        return "-".to_string();
    }
    result
        .signals
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_check(result: &SignalResult, bars: usize) {
    println!();
    println!("=== {} ===", result.code);
    println!("Bars:           {bars}");
    if let Some(d) = &result.diagnostics {
        println!("Close:          {:.2}", d.close);
        println!("K / D / J:      {:.2} / {:.2} / {:.2}", d.k, d.d, d.j);
        println!("RSI(3):         {:.2}", d.rsi);
        println!("Amplitude 20:   {:.2}%", d.near_amplitude);
        println!("Amplitude 50:   {:.2}%", d.far_amplitude);
    }
    println!();
    println!("Signal:         {}", if result.signal { "YES" } else { "no" });
    println!("Triggered:      {}", signal_names(result));
}

fn print_summary(report: &ScreenReport) {
    println!();
    println!("=== Screen {} ===", report.run_date);
    if let Some(date) = report.latest_bar_date {
        println!("Latest bar:     {date}");
    }
    println!("Evaluated:      {}", report.evaluated);
    println!("Selected:       {}", report.selected.len());
    println!("Skipped:        {}", report.skipped.len());
    println!("Failed:         {}", report.failures.len());

    if !report.selected.is_empty() {
        println!();
        println!("{:<8} {:>9} {:>8} {:>8}  Signals", "Code", "Close", "J", "RSI");
        println!("{}", "-".repeat(60));
        for sel in &report.selected {
            let (close, j, rsi) = sel
                .result
                .diagnostics
                .map(|d| (d.close, d.j, d.rsi))
                .unwrap_or((f64::NAN, f64::NAN, f64::NAN));
            println!(
                "{:<8} {:>9.2} {:>8.2} {:>8.2}  {}",
                sel.result.code,
                close,
                j,
                rsi,
                signal_names(&sel.result)
            );
        }
    }

    if !report.failures.is_empty() {
        println!();
        println!("--- Failures ---");
        for f in &report.failures {
            println!("{:<8} {}", f.code, f.error);
        }
    }
}
