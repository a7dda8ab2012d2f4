//! Per-file outcomes and the run summary

use std::path::PathBuf;

use encoding_rs::Encoding;

use crate::error::ConvertError;

/// Successful result of converting one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// The file was rewritten in the canonical encoding
    Converted { from: &'static Encoding },
    /// The file was left alone
    AlreadyCanonical { detected: &'static Encoding },
    /// Dry run: the file would have been rewritten
    WouldConvert { from: &'static Encoding },
}

/// Outcome of one matching file
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<Conversion, ConvertError>,
}

/// Totals for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub converted: usize,
    pub already_canonical: usize,
    pub would_convert: usize,
    pub failed: usize,
    pub walk_errors: usize,
}

impl RunSummary {
    /// Count one file outcome
    pub fn record(&mut self, report: &FileReport) {
        match &report.result {
            Ok(Conversion::Converted { .. }) => self.converted += 1,
            Ok(Conversion::AlreadyCanonical { .. }) => self.already_canonical += 1,
            Ok(Conversion::WouldConvert { .. }) => self.would_convert += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// Number of matching files seen
    #[must_use]
    pub const fn files(&self) -> usize {
        self.converted + self.already_canonical + self.would_convert + self.failed
    }

    /// True when no file failed and every directory could be read
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0 && self.walk_errors == 0
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files: {} converted, {} already canonical, {} would convert, {} failed, {} walk errors",
            self.files(),
            self.converted,
            self.already_canonical,
            self.would_convert,
            self.failed,
            self.walk_errors
        )
    }
}
