//! Configuration management for the notebook widgets fixer.
//!
//! Handles:
//! - Command-line argument parsing
//! - Fix mode selection

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::notebook::FixMode;

/// Command-line arguments for the notebook widgets fixer
#[derive(Debug, Parser)]
#[command(name = "fix-notebook-widgets")]
#[command(about = "Fix the 'state' key in metadata.widgets for Jupyter notebooks")]
#[command(version)]
pub struct Args {
    /// Notebook files or directories to process
    #[arg(required = true, help = "Notebook file(s) or directory(ies) to process")]
    pub paths: Vec<PathBuf>,

    /// Search directories recursively
    #[arg(long, help = "Recursively search directories for notebooks")]
    pub recursive: bool,

    /// Drop the widgets entry instead of adding an empty state
    #[arg(
        long,
        help = "Remove the widgets metadata entirely instead of adding an empty state"
    )]
    pub remove_widgets: bool,

    /// Log level for diagnostic output
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Resolved configuration for a run
#[derive(Debug, Clone)]
pub struct Config {
    /// Files or directories given on the command line, in order
    pub paths: Vec<PathBuf>,
    /// Descend into subdirectories when a path is a directory
    pub recursive: bool,
    /// Delete `widgets` entries rather than repairing them
    pub remove_widgets: bool,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        Ok(Config {
            paths: args.paths,
            recursive: args.recursive,
            remove_widgets: args.remove_widgets,
            log_level: args.log_level,
        })
    }

    pub fn fix_mode(&self) -> FixMode {
        FixMode::from_remove_widgets(self.remove_widgets)
    }
}
