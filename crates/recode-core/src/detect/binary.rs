//! Binary content screening
//!
//! Statistical detectors always produce some guess. Content that is clearly
//! not text is caught here first so it can be reported instead.

/// Thresholds for deciding that a buffer is not text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryScreen {
    /// Largest tolerated share of NUL bytes; zero means any NUL is binary
    pub max_null_ratio: f64,
    /// Largest tolerated share of C0 controls other than tab, LF, CR, FF
    pub max_control_ratio: f64,
    /// Number of leading bytes inspected
    pub sample_size: usize,
}

impl Default for BinaryScreen {
    fn default() -> Self {
        Self {
            max_null_ratio: 0.0,
            max_control_ratio: 0.05,
            sample_size: 8 * 1024,
        }
    }
}

impl BinaryScreen {
    /// Check whether the leading sample of `bytes` looks like binary data
    #[must_use]
    pub fn is_binary(&self, bytes: &[u8]) -> bool {
        let sample = bytes.get(..self.sample_size).unwrap_or(bytes);
        if sample.is_empty() {
            return false;
        }

        let mut null_count = 0usize;
        let mut control_count = 0usize;
        for &b in sample {
            match b {
                0 => null_count += 1,
                b'\t' | b'\n' | b'\r' | 0x0C | 0x1A => {}
                1..=0x1F => control_count += 1,
                _ => {}
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let len = sample.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let (null_ratio, control_ratio) = (null_count as f64 / len, control_count as f64 / len);

        null_ratio > self.max_null_ratio || control_ratio > self.max_control_ratio
    }

    /// Check decoded text for a share of C0/C1 controls no source file has
    ///
    /// Single-byte code pages decode any byte sequence, so random data can
    /// pass [`BinaryScreen::is_binary`] and still decode to control soup.
    #[must_use]
    pub fn is_binary_text(&self, text: &str) -> bool {
        let mut total = 0usize;
        let mut control_count = 0usize;
        for c in text.chars().take(self.sample_size) {
            total += 1;
            if c.is_control() && !matches!(c, '\t' | '\n' | '\r' | '\x0c' | '\x1a') {
                control_count += 1;
            }
        }
        if total == 0 {
            return false;
        }

        #[allow(clippy::cast_precision_loss)]
        let control_ratio = control_count as f64 / total as f64;
        control_ratio > self.max_control_ratio
    }
}

/// [`BinaryScreen::is_binary`] with default thresholds
#[must_use]
pub fn looks_binary(bytes: &[u8]) -> bool {
    BinaryScreen::default().is_binary(bytes)
}
