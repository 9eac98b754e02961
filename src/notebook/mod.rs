//! Notebook Handling
//!
//! Widget metadata repair, notebook discovery and batch rewriting.

pub mod discovery;
pub mod fixer;
pub mod processor;

pub use discovery::{discover, NotebookPaths};
pub use fixer::{fix, fix_widgets_metadata, FixMode};
pub use processor::{backup_path, process_notebook, process_notebooks, FailureStage, Outcome};

/// File extension of notebook documents, without the leading dot
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Suffix appended to a notebook's file name for its backup copy
pub const BACKUP_SUFFIX: &str = "bak";

pub const METADATA_KEY: &str = "metadata";
pub const CELLS_KEY: &str = "cells";
pub const WIDGETS_KEY: &str = "widgets";
pub const STATE_KEY: &str = "state";

/// Whether `path` carries the notebook extension
pub fn is_notebook_path(path: &std::path::Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(NOTEBOOK_EXTENSION)
}
