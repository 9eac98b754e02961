//! Notebook Widgets Fix
//!
//! Repairs Jupyter notebooks whose `metadata.widgets` entry lacks a `state`
//! key, which some notebook previewers refuse to render.
//!
//! This library provides:
//! - In-place widget metadata repair (add an empty `state`, or drop `widgets`)
//! - Notebook discovery in directories
//! - Batch rewriting with `.bak` backups
//! - Command-line configuration

pub mod cli;
pub mod config;
pub mod notebook;

// Re-exports for clean public API
pub use cli::{run, run_from_args, RunSummary};
pub use config::Config;
pub use notebook::{discover, fix, fix_widgets_metadata, process_notebooks, FixMode, Outcome};
