//! Run configuration

use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};

use crate::error::ConvertError;
use crate::scanner::{Scanner, SuffixFilter};

/// Everything a conversion run needs to know
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub root: PathBuf,
    pub target: &'static Encoding,
    pub filter: SuffixFilter,
    pub follow_links: bool,
    pub respect_ignore_files: bool,
    pub dry_run: bool,
    pub atomic_writes: bool,
    pub min_confidence: f32,
}

impl ConvertConfig {
    /// Convert `.cpp` and `.h` files under `root` to UTF-8
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            target: UTF_8,
            filter: SuffixFilter::default(),
            follow_links: false,
            respect_ignore_files: false,
            dry_run: false,
            atomic_writes: false,
            min_confidence: 0.0,
        }
    }

    /// Set the canonical encoding
    #[must_use]
    pub fn with_target(mut self, target: &'static Encoding) -> Self {
        self.target = target;
        self
    }

    /// Set the canonical encoding from a WHATWG label such as `utf-8` or `latin1`
    ///
    /// # Errors
    /// Returns an error if the label is not a known encoding.
    pub fn with_target_label(self, label: &str) -> Result<Self, ConvertError> {
        let target = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| ConvertError::UnknownTarget(label.to_string()))?;
        Ok(self.with_target(target))
    }

    /// Set the accepted file suffixes
    #[must_use]
    pub fn with_filter(mut self, filter: SuffixFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Follow symbolic links while walking
    #[must_use]
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Honour ignore files while walking
    #[must_use]
    pub fn with_ignore_files(mut self, respect: bool) -> Self {
        self.respect_ignore_files = respect;
        self
    }

    /// Report what would change without writing anything
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Write through a temporary sibling file and rename it into place
    #[must_use]
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    /// Refuse to rewrite files detected with lower confidence
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence.clamp(0.0, 1.0);
        self
    }

    /// Check the root and target before anything is touched
    ///
    /// # Errors
    /// Returns an error if the root is missing or not a directory, or if the
    /// target encoding cannot be written.
    pub fn validate(&self) -> Result<(), ConvertError> {
        check_target(self.target)?;
        check_root(&self.root)
    }

    /// Build the scanner described by this configuration
    #[must_use]
    pub fn scanner(&self) -> Scanner {
        Scanner::new(&self.root)
            .with_filter(self.filter.clone())
            .with_follow_links(self.follow_links)
            .with_ignore_files(self.respect_ignore_files)
    }
}

fn check_target(target: &'static Encoding) -> Result<(), ConvertError> {
    // UTF-16 and the replacement encoding encode as UTF-8
    if target.output_encoding() == target {
        Ok(())
    } else {
        Err(ConvertError::UnsupportedTarget(target.name()))
    }
}

fn check_root(root: &Path) -> Result<(), ConvertError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConvertError::RootNotDirectory(root.to_path_buf())),
        Err(_) => Err(ConvertError::RootNotFound(root.to_path_buf())),
    }
}
