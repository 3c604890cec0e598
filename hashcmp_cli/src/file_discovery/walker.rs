//! Directory walker for file discovery
//!
//! Streams files out of a directory tree with walkdir, applying the
//! [`FileFilter`] as it goes.

use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use super::{DiscoveredFile, DiscoveryError, Result, filter::FileFilter};

/// Options for file discovery
#[derive(Debug, Clone, Default)]
pub struct FileDiscoveryOptions {
    /// Patterns to exclude (glob patterns)
    pub exclude_patterns: Vec<String>,
    /// Maximum depth for recursive search (None = unlimited)
    pub max_depth: Option<usize>,
}

impl FileDiscoveryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}

/// File discovery iterator for streaming file enumeration
pub struct FileDiscovery {
    walker: Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>,
    filter: FileFilter,
}

impl FileDiscovery {
    /// Create a new file discovery iterator rooted at `path`
    pub fn new(path: &Path, options: FileDiscoveryOptions) -> Result<Self> {
        if !path.exists() {
            return Err(DiscoveryError::PathNotFound(path.to_path_buf()));
        }

        let filter = FileFilter::new(&options.exclude_patterns)?;

        // Sorted so repeated runs list files in the same order
        let mut walker = WalkDir::new(path).sort_by_file_name();
        if let Some(depth) = options.max_depth {
            walker = walker.max_depth(depth);
        }

        Ok(Self {
            walker: Box::new(walker.into_iter()),
            filter,
        })
    }

    fn should_include_entry(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_file() && self.filter.should_include(entry.path())
    }
}

impl Iterator for FileDiscovery {
    type Item = Result<DiscoveredFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) if self.should_include_entry(&entry) => {
                    return Some(Ok(DiscoveredFile {
                        path: entry.into_path(),
                    }));
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Walk error: {e}");
                }
            }
        }
    }
}

/// Convenience function to discover files in a directory
pub fn discover_files(path: &Path, options: FileDiscoveryOptions) -> Result<Vec<DiscoveredFile>> {
    FileDiscovery::new(path, options)?.collect()
}
