//! Detect module: Guess the text encoding of raw bytes
//!
//! Detection is modelled as an injected capability so callers (and tests)
//! can substitute their own detector for the statistical default.

mod binary;
mod statistical;

pub use binary::{BinaryScreen, looks_binary};
pub use statistical::StatisticalDetector;

/// Best guess for the encoding of a byte sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Encoding label, or `None` when no usable guess exists
    pub label: Option<String>,
    /// Confidence in `[0.0, 1.0]`
    pub confidence: f32,
}

impl Detection {
    /// A guess with the given label and confidence
    #[must_use]
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: Some(label.into()),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// No usable guess
    #[must_use]
    pub const fn none() -> Self {
        Self {
            label: None,
            confidence: 0.0,
        }
    }
}

/// Something that can guess the encoding of a byte buffer
///
/// Implementations must be pure functions of the input bytes.
pub trait EncodingDetector {
    fn detect(&self, bytes: &[u8]) -> Detection;
}

impl<D: EncodingDetector + ?Sized> EncodingDetector for &D {
    fn detect(&self, bytes: &[u8]) -> Detection {
        (**self).detect(bytes)
    }
}

impl<D: EncodingDetector + ?Sized> EncodingDetector for Box<D> {
    fn detect(&self, bytes: &[u8]) -> Detection {
        (**self).detect(bytes)
    }
}

#[cfg(test)]
mod tests;
