//! Input discovery for `hashcmp compare`
//!
//! Turns the files and folders named on the command line into a flat,
//! deduplicated list of canonical file paths. Folders are walked
//! recursively; OS metadata files and excluded globs are skipped.

mod filter;
mod walker;

pub use filter::{FileFilter, IGNORED_FILE_NAMES, PatternMatcher};
pub use walker::{FileDiscovery, FileDiscoveryOptions, discover_files};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Result of file discovery
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Path to the discovered file
    pub path: PathBuf,
}

/// Error type for file discovery operations
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Result type for file discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Ordered set of canonical file paths; the first occurrence wins
#[derive(Debug, Default)]
pub struct FileSet {
    seen: HashSet<PathBuf>,
    files: Vec<PathBuf>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize `path` and add it unless already present.
    ///
    /// Returns whether the path was added.
    pub fn insert(&mut self, path: &Path) -> Result<bool> {
        let canonical = path.canonicalize()?;
        if self.seen.insert(canonical.clone()) {
            self.files.push(canonical);
            Ok(true)
        } else {
            log::debug!("Skipping duplicate {}", canonical.display());
            Ok(false)
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.files
    }
}

/// Collect every file named by `inputs`.
///
/// Regular files are taken as given, even when they match an exclude
/// pattern. Directories are walked with `options`. Inputs that are neither
/// are skipped with a warning.
pub fn collect_inputs(inputs: &[PathBuf], options: &FileDiscoveryOptions) -> Result<FileSet> {
    let mut files = FileSet::new();

    for input in inputs {
        if input.is_file() {
            files.insert(input)?;
        } else if input.is_dir() {
            for discovered in FileDiscovery::new(input, options.clone())? {
                files.insert(&discovered?.path)?;
            }
        } else {
            log::warn!("Skipping {}: not a file or directory", input.display());
        }
    }

    Ok(files)
}
