//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use recode_core::detect::StatisticalDetector;
use recode_core::scanner::{DEFAULT_SUFFIXES, SuffixFilter};
use recode_core::{ConvertConfig, ConvertError};

#[derive(Debug, Parser)]
#[command(name = "recode")]
#[command(
    author,
    version,
    about = "Convert source files in a directory tree to a canonical encoding",
    long_about = None
)]
pub struct Cli {
    /// Directory to convert, searched recursively
    pub root: PathBuf,

    /// Canonical encoding to convert to (any WHATWG label)
    #[arg(short, long, default_value = "UTF-8")]
    pub encoding: String,

    /// Accepted file suffix; repeat for several (default: .cpp and .h)
    #[arg(short = 'x', long = "ext", value_name = "SUFFIX")]
    pub extensions: Vec<String>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write through a temporary file renamed into place
    #[arg(long)]
    pub atomic: bool,

    /// Follow symbolic links (cycles are detected and skipped)
    #[arg(long)]
    pub follow_links: bool,

    /// Skip files excluded by .gitignore and .ignore files
    #[arg(long)]
    pub respect_gitignore: bool,

    /// Refuse to rewrite files detected with lower confidence (0.0 - 1.0)
    #[arg(long, default_value_t = 0.0)]
    pub min_confidence: f32,

    /// Top-level domain hint for the detector, e.g. `jp` or `ru`
    #[arg(long)]
    pub tld: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the run configuration
    ///
    /// # Errors
    /// Returns an error if `--encoding` is not a known label.
    pub fn to_config(&self) -> Result<ConvertConfig, ConvertError> {
        let filter = if self.extensions.is_empty() {
            SuffixFilter::new(DEFAULT_SUFFIXES)
        } else {
            SuffixFilter::new(&self.extensions)
        };

        Ok(ConvertConfig::new(&self.root)
            .with_target_label(&self.encoding)?
            .with_filter(filter)
            .with_dry_run(self.dry_run)
            .with_atomic_writes(self.atomic)
            .with_follow_links(self.follow_links)
            .with_ignore_files(self.respect_gitignore)
            .with_min_confidence(self.min_confidence))
    }

    /// Build the encoding detector
    #[must_use]
    pub fn detector(&self) -> StatisticalDetector {
        match &self.tld {
            Some(tld) => StatisticalDetector::new().with_tld(tld),
            None => StatisticalDetector::new(),
        }
    }
}
