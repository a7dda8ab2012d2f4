//! recode-core: Core library for source tree re-encoding
//!
//! Walks a directory tree, picks out source files by suffix, detects the
//! text encoding of each one and rewrites anything that is not already in
//! the canonical encoding.
//!
//! # Pieces
//!
//! - [`scanner`] - file discovery and suffix filtering
//! - [`detect`] - encoding detection behind the [`EncodingDetector`] trait
//! - [`convert`] - per-file conversion and the tree-wide batch run

pub mod convert;
pub mod detect;
pub mod error;
pub mod scanner;

// Re-export commonly used types
pub use convert::{
    Conversion, ConvertConfig, Converter, FileReport, RunSummary, walk_and_convert,
};
pub use detect::{Detection, EncodingDetector, StatisticalDetector};
pub use error::{ConvertError, FailureKind};
pub use scanner::{DiscoveredFile, Scanner, SuffixFilter};
