//! Suffix filtering for candidate files

use std::path::Path;

/// Suffixes accepted when none are configured: C++ sources and headers
pub const DEFAULT_SUFFIXES: &[&str] = &[".cpp", ".h"];

/// Accepts files whose name ends with one of a fixed set of suffixes
///
/// Matching is case-sensitive and done on the file name, not the full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixFilter {
    suffixes: Vec<String>,
}

impl SuffixFilter {
    /// Build a filter from suffixes; a missing leading dot is added
    #[must_use]
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for suffix in suffixes {
            let suffix = suffix.as_ref().trim();
            if suffix.is_empty() || suffix == "." {
                continue;
            }
            let suffix = if suffix.starts_with('.') {
                suffix.to_string()
            } else {
                format!(".{suffix}")
            };
            if !normalized.contains(&suffix) {
                normalized.push(suffix);
            }
        }
        Self {
            suffixes: normalized,
        }
    }

    /// Check a bare file name
    #[must_use]
    pub fn matches_name(&self, file_name: &str) -> bool {
        self.suffixes.iter().any(|s| file_name.ends_with(s.as_str()))
    }

    /// Check the file name component of a path
    ///
    /// Compared as raw bytes, so names that are not valid UTF-8 still match.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| {
            let name = name.as_encoded_bytes();
            self.suffixes.iter().any(|s| name.ends_with(s.as_bytes()))
        })
    }

    /// The normalized suffixes, each with a leading dot
    #[must_use]
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for SuffixFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIXES)
    }
}

impl std::fmt::Display for SuffixFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffixes.join(", "))
    }
}
