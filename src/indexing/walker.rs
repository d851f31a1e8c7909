//! File system walker for discovering source files to scan
//!
//! The root is validated first: it must exist and be a directory. Below it,
//! every file whose extension marks it as source and whose name does not mark
//! it as a test file is selected. Symlinks to files are followed; directories,
//! linked or not, are never reported.

use crate::config::ExtractionConfig;
use crate::error::{ExtractError, ExtractResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Decides whether a file name is an eligible source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilter {
    extension: String,
    test_suffix: String,
}

impl Default for SourceFilter {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl SourceFilter {
    pub fn new(extension: impl Into<String>, test_suffix: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            test_suffix: test_suffix.into(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(
            config.source_extension.trim_start_matches('.'),
            config.test_suffix.clone(),
        )
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Check a single path against the extension and test-file rules
    pub fn accepts(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension);
        if !has_extension {
            return false;
        }

        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| !name.ends_with(&self.test_suffix))
    }
}

/// Walks directories to find source files to scan
#[derive(Debug, Default)]
pub struct FileWalker {
    filter: SourceFilter,
}

impl FileWalker {
    /// Create a new file walker with the given filter
    pub fn new(filter: SourceFilter) -> Self {
        Self { filter }
    }

    /// Validate `root` and collect every eligible file below it.
    ///
    /// Paths come back in traversal order. Fails with `PathNotFound`,
    /// `PathIsFile` or `NoSourceFiles` before any file is opened.
    pub fn discover(&self, root: &Path) -> ExtractResult<Vec<PathBuf>> {
        let metadata = std::fs::metadata(root).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ExtractError::PathNotFound {
                    path: root.to_path_buf(),
                }
            } else {
                ExtractError::RootAccess {
                    path: root.to_path_buf(),
                    source,
                }
            }
        })?;
        if !metadata.is_dir() {
            return Err(ExtractError::PathIsFile {
                path: root.to_path_buf(),
            });
        }

        let files: Vec<PathBuf> = self.walk(root).collect();
        if files.is_empty() {
            return Err(ExtractError::NoSourceFiles {
                path: root.to_path_buf(),
                extension: self.filter.extension.clone(),
            });
        }

        tracing::debug!(
            "discovered {} source files under {}",
            files.len(),
            root.display()
        );
        Ok(files)
    }

    /// Walk a directory and return an iterator of eligible files.
    ///
    /// Entries that cannot be read are logged and skipped.
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(move |entry| self.filter.accepts(entry.path()))
            .filter(is_source_file)
            .map(walkdir::DirEntry::into_path)
    }

    /// Count files that would be scanned
    pub fn count_files(&self, root: &Path) -> usize {
        self.walk(root).count()
    }
}

/// Regular files, and symlinks that resolve to one
fn is_source_file(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    if entry.path_is_symlink() {
        // metadata() on an unfollowed entry describes the link, so resolve it
        return match std::fs::metadata(entry.path()) {
            Ok(target) => target.is_file(),
            Err(e) => {
                tracing::warn!("skipping dangling link {}: {e}", entry.path().display());
                false
            }
        };
    }
    false
}
