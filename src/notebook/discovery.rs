//! Notebook Discovery
//!
//! Enumerates notebook files below a directory.

use std::path::PathBuf;

use walkdir::WalkDir;

use super::is_notebook_path;

/// Notebook files below a directory.
///
/// Enumeration is lazy and happens each time the value is iterated, so the
/// same `NotebookPaths` can be walked more than once. Order follows the
/// filesystem.
#[derive(Debug, Clone)]
pub struct NotebookPaths {
    root: PathBuf,
    recursive: bool,
}

/// Discover notebooks directly inside `directory`, or at any depth when
/// `recursive` is set.
pub fn discover(directory: impl Into<PathBuf>, recursive: bool) -> NotebookPaths {
    NotebookPaths {
        root: directory.into(),
        recursive,
    }
}

impl NotebookPaths {
    /// Walk the directory, yielding matching notebook paths.
    ///
    /// Entries that cannot be read are logged and skipped.
    pub fn iter(&self) -> impl Iterator<Item = PathBuf> + use<> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable directory entry: {}", e);
                    None
                }
            })
            .filter(|entry| !entry.file_type().is_dir())
            .map(|entry| entry.into_path())
            .filter(|path| is_notebook_path(path))
    }
}

impl IntoIterator for &NotebookPaths {
    type Item = PathBuf;
    type IntoIter = Box<dyn Iterator<Item = PathBuf>>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
