//! Convert module: Per-file re-encoding and the tree-wide batch run
//!
//! [`Converter`] handles a single file: read, detect, compare against the
//! canonical encoding and rewrite if needed. [`walk_and_convert`] drives it
//! over every file the scanner yields and isolates per-file failures.

mod batch;
mod config;
mod converter;
mod outcome;

pub use batch::walk_and_convert;
pub use config::ConvertConfig;
pub use converter::{Converter, Plan};
pub use outcome::{Conversion, FileReport, RunSummary};

#[cfg(test)]
mod tests;
