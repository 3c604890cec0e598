//! File filtering using glob patterns and fixed ignore names

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

use super::{DiscoveryError, Result};

/// OS metadata files never worth hashing
pub const IGNORED_FILE_NAMES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Pattern matcher using GlobSet for efficient matching
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    globset: GlobSet,
    patterns: Vec<String>,
}

impl PatternMatcher {
    /// Create a new pattern matcher from glob patterns
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| DiscoveryError::InvalidPattern(format!("{pattern}: {e}")))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| DiscoveryError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            globset,
            patterns: patterns.to_vec(),
        })
    }

    /// Check if a path matches any of the patterns
    pub fn matches(&self, path: &Path) -> bool {
        self.globset.is_match(path)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Decides which walked files are kept
#[derive(Debug)]
pub struct FileFilter {
    exclude_matcher: Option<PatternMatcher>,
}

impl FileFilter {
    pub fn new(exclude_patterns: &[String]) -> Result<Self> {
        let exclude_matcher = if exclude_patterns.is_empty() {
            None
        } else {
            Some(PatternMatcher::new(exclude_patterns)?)
        };

        Ok(Self { exclude_matcher })
    }

    /// Ignored names are dropped first, then anything matching an exclude
    /// pattern. Everything else is kept.
    pub fn should_include(&self, path: &Path) -> bool {
        if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| IGNORED_FILE_NAMES.contains(&name))
        {
            return false;
        }

        match self.exclude_matcher {
            Some(ref exclude) => !exclude.matches(path),
            None => true,
        }
    }
}
