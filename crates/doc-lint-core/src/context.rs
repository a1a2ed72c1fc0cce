//! Context types for rule execution.

use std::path::{Path, PathBuf};

/// Context provided to rules for one declaration tree.
#[derive(Debug, Clone)]
pub struct TreeContext<'a> {
    /// Path of the tree file the declarations were loaded from.
    pub path: &'a Path,
    /// Source file path used in diagnostic locations, relative to the
    /// project root when possible.
    pub relative_path: PathBuf,
}

impl<'a> TreeContext<'a> {
    /// Creates a context for a tree whose declarations come from `source`.
    #[must_use]
    pub fn new(path: &'a Path, source: &Path, root: &Path) -> Self {
        let relative_path = source
            .strip_prefix(root)
            .map_or_else(|_| source.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            relative_path,
        }
    }

    /// Creates a context for an in-memory tree with no backing file.
    #[must_use]
    pub fn detached(source: &'a Path) -> Self {
        Self {
            path: source,
            relative_path: source.to_path_buf(),
        }
    }
}
