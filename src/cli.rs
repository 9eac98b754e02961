//! Command-line driver
//!
//! Resolves each input path to a notebook file or a directory to scan and
//! hands the result to the batch processor.

use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;

use crate::config::Config;
use crate::notebook::{discover, process_notebooks, FixMode, Outcome};

/// Totals for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fixed: usize,
    pub unchanged: usize,
    pub failed: usize,
    /// Input paths that were neither a file nor a directory
    pub missing: usize,
}

impl RunSummary {
    fn record(&mut self, outcomes: &[Outcome]) {
        for outcome in outcomes {
            match outcome {
                Outcome::Fixed { .. } => self.fixed += 1,
                Outcome::Unchanged { .. } => self.unchanged += 1,
                Outcome::Failed { .. } => self.failed += 1,
                Outcome::Skipped { .. } => {}
            }
        }
    }
}

/// Parse the process arguments, set up logging and run to completion
pub fn run_from_args() -> Result<()> {
    let config = Config::from_args_and_env()?;
    init_logging(&config.log_level);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&config, &mut out)?;
    out.flush()?;

    Ok(())
}

/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        log::debug!("Keeping existing logger: {}", e);
    }
}

/// Process every configured path in order, reporting to `out`.
pub fn run<W: Write + ?Sized>(config: &Config, out: &mut W) -> Result<RunSummary> {
    let mode = config.fix_mode();
    let mut summary = RunSummary::default();

    for path in &config.paths {
        let outcomes = process_input(path, config.recursive, mode, out, &mut summary)?;
        summary.record(&outcomes);
    }

    log::info!(
        "Done: {} fixed, {} unchanged, {} failed, {} missing",
        summary.fixed,
        summary.unchanged,
        summary.failed,
        summary.missing
    );

    Ok(summary)
}

fn process_input<W: Write + ?Sized>(
    path: &Path,
    recursive: bool,
    mode: FixMode,
    out: &mut W,
    summary: &mut RunSummary,
) -> Result<Vec<Outcome>> {
    if path.is_file() {
        return Ok(process_notebooks([path], mode, out)?);
    }

    if path.is_dir() {
        let notebooks: Vec<_> = discover(path, recursive).iter().collect();
        log::debug!("Found {} notebook(s) in {}", notebooks.len(), path.display());
        if notebooks.is_empty() {
            writeln!(out, "No notebooks found in directory {}", path.display())?;
            return Ok(Vec::new());
        }
        return Ok(process_notebooks(notebooks, mode, out)?);
    }

    writeln!(out, "Path not found: {}", path.display())?;
    summary.missing += 1;
    Ok(Vec::new())
}
