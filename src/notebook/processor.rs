//! Batch Processor
//!
//! Reads each notebook, runs the fixer, and rewrites changed notebooks after
//! moving the original aside to a `.bak` file.

use anyhow::{Context, Result};
use serde_json::Value;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{fix_widgets_metadata, is_notebook_path, FixMode, BACKUP_SUFFIX};

/// Which step of handling a notebook failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Reading or parsing; the file was not touched
    Read,
    /// Backing up or rewriting
    Write,
}

/// Result of handling a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not a notebook by extension
    Skipped { path: PathBuf },
    /// Parsed fine, nothing to repair
    Unchanged { path: PathBuf },
    /// Rewritten; the original lives at `backup`
    Fixed { path: PathBuf, backup: PathBuf },
    Failed {
        path: PathBuf,
        stage: FailureStage,
        reason: String,
    },
}

impl Outcome {
    pub fn path(&self) -> &Path {
        match self {
            Outcome::Skipped { path }
            | Outcome::Unchanged { path }
            | Outcome::Fixed { path, .. }
            | Outcome::Failed { path, .. } => path,
        }
    }

    /// Whether this outcome produces a user-visible line
    pub fn is_reported(&self) -> bool {
        matches!(self, Outcome::Fixed { .. } | Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Skipped { path } => write!(f, "Skipped {}", path.display()),
            Outcome::Unchanged { path } => write!(f, "No changes needed in {}", path.display()),
            Outcome::Fixed { path, backup } => write!(
                f,
                "Fixed widgets metadata in {}, backup saved to {}",
                path.display(),
                backup.display()
            ),
            Outcome::Failed {
                path,
                stage: FailureStage::Read,
                reason,
            } => write!(f, "Error reading {}: {}", path.display(), reason),
            Outcome::Failed {
                path,
                stage: FailureStage::Write,
                reason,
            } => write!(f, "Error writing {}: {}", path.display(), reason),
        }
    }
}

/// Backup location for a notebook: the file name with `.bak` appended
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".");
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Process notebooks one at a time, writing a line to `out` for every fix or
/// failure. Only errors writing to `out` are returned.
pub fn process_notebooks<I, P, W>(paths: I, mode: FixMode, out: &mut W) -> io::Result<Vec<Outcome>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    W: Write + ?Sized,
{
    let mut outcomes = Vec::new();

    for path in paths {
        let outcome = process_notebook(path.as_ref(), mode);
        match &outcome {
            Outcome::Fixed { .. } => log::info!("{}", outcome),
            Outcome::Failed { .. } => log::warn!("{}", outcome),
            _ => log::debug!("{}", outcome),
        }
        if outcome.is_reported() {
            writeln!(out, "{}", outcome)?;
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Process a single notebook.
pub fn process_notebook(path: &Path, mode: FixMode) -> Outcome {
    if !is_notebook_path(path) {
        return Outcome::Skipped {
            path: path.to_path_buf(),
        };
    }

    let mut notebook = match read_notebook(path) {
        Ok(notebook) => notebook,
        Err(e) => {
            return Outcome::Failed {
                path: path.to_path_buf(),
                stage: FailureStage::Read,
                reason: format!("{:#}", e),
            };
        }
    };

    if !fix_widgets_metadata(&mut notebook, mode) {
        return Outcome::Unchanged {
            path: path.to_path_buf(),
        };
    }

    match write_with_backup(path, &notebook) {
        Ok(backup) => Outcome::Fixed {
            path: path.to_path_buf(),
            backup,
        },
        Err(e) => Outcome::Failed {
            path: path.to_path_buf(),
            stage: FailureStage::Write,
            reason: format!("{:#}", e),
        },
    }
}

fn read_notebook(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).context("failed to read file")?;
    let notebook = serde_json::from_str(&text).context("invalid notebook JSON")?;
    Ok(notebook)
}

fn write_with_backup(path: &Path, notebook: &Value) -> Result<PathBuf> {
    replace_with_backup(path, |path| {
        let text =
            serde_json::to_string_pretty(notebook).context("failed to serialize notebook")?;
        fs::write(path, text).context("failed to write notebook")
    })
}

/// Move the original aside, then let `write` produce the new file at `path`.
///
/// The rename happens before `write` runs so the original bytes survive any
/// later failure.
fn replace_with_backup<F>(path: &Path, write: F) -> Result<PathBuf>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let backup = backup_path(path);
    fs::rename(path, &backup)
        .with_context(|| format!("failed to create backup {}", backup.display()))?;

    write(path).with_context(|| format!("original preserved at {}", backup.display()))?;

    Ok(backup)
}
