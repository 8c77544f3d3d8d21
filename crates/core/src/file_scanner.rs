//! File scanning utilities
//!
//! Provides file discovery with extension filters and a stable path order.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File scanner with configurable filters
pub struct FileScanner {
    root: PathBuf,
    extensions: Vec<String>,
    max_depth: Option<usize>,
    include_hidden: bool,
}

impl FileScanner {
    /// Create a new file scanner rooted at the given path
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: Vec::new(),
            max_depth: None,
            include_hidden: false,
        }
    }

    /// Filter by file extensions (e.g., "txt", "bas"), matched case-sensitively
    #[must_use]
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Limit how deep below the root to descend (1 = direct children only)
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Whether to include dot-files and dot-directories
    #[must_use]
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Scan and return matching files, sorted by path
    ///
    /// Symlinks are followed, so a link to a file counts as a file under the
    /// link's own name. Broken links are skipped. Fails if the root is not an
    /// existing directory.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(Error::directory_not_found(&self.root));
        }

        let mut walker = WalkDir::new(&self.root).follow_links(true);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files: Vec<PathBuf> = walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || self.include_hidden || !is_hidden(e.path()))
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| self.matches_extension(path))
            .collect();

        files.sort();
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.extensions.iter().any(|e| e == ext)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') && n != "." && n != "..")
}
