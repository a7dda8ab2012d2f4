//! File walker: Discovers candidate files in a directory tree

use std::cell::Cell;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use super::SuffixFilter;

/// A file discovered during scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
}

impl DiscoveredFile {
    /// Read the whole file as raw bytes
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

/// Counters accumulated while walking
#[derive(Debug, Default)]
pub struct WalkStats {
    errors: Cell<usize>,
}

impl WalkStats {
    /// Number of entries the walker could not visit
    #[must_use]
    pub fn errors(&self) -> usize {
        self.errors.get()
    }
}

/// Scanner for discovering source files in a directory
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    filter: SuffixFilter,
    follow_links: bool,
    respect_ignore_files: bool,
    stats: WalkStats,
}

impl Scanner {
    /// Create a new scanner for the given root directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: SuffixFilter::default(),
            follow_links: false,
            respect_ignore_files: false,
            stats: WalkStats::default(),
        }
    }

    /// Only yield files accepted by this filter
    #[must_use]
    pub fn with_filter(mut self, filter: SuffixFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Follow symbolic links; cycles are reported as walk errors
    #[must_use]
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Honour `.gitignore`, `.ignore` and git exclude files
    #[must_use]
    pub fn with_ignore_files(mut self, respect: bool) -> Self {
        self.respect_ignore_files = respect;
        self
    }

    /// Scan the directory and return matching files
    ///
    /// Every regular file is visited, hidden ones included. Entries the
    /// walker cannot read are logged and counted in [`Scanner::stats`],
    /// which starts from zero on every call.
    pub fn scan(&self) -> impl Iterator<Item = DiscoveredFile> + '_ {
        self.stats.errors.set(0);

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .hidden(false)
            .follow_links(self.follow_links);

        if self.respect_ignore_files {
            builder
                .ignore(true)
                .git_ignore(true)
                .git_global(true)
                .git_exclude(true)
                .require_git(false);
        }

        builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    self.stats.errors.set(self.stats.errors.get() + 1);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .filter_map(|entry| {
                let path = entry.into_path();
                if self.filter.matches(&path) {
                    Some(DiscoveredFile { path })
                } else {
                    tracing::trace!("Ignoring {}", path.display());
                    None
                }
            })
    }

    /// Get the root directory being scanned
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the suffix filter in use
    #[must_use]
    pub fn filter(&self) -> &SuffixFilter {
        &self.filter
    }

    /// Walk counters for the most recent scan
    #[must_use]
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }
}
