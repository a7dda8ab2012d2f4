//! Scanner module: File discovery and suffix filtering
//!
//! Responsible for walking directories and deciding which files are
//! candidates for conversion.

mod filter;
mod walker;

pub use filter::{DEFAULT_SUFFIXES, SuffixFilter};
pub use walker::{DiscoveredFile, Scanner, WalkStats};
