//! Default detector: BOM, binary screen, UTF-8 validation, then chardetng

use chardetng::EncodingDetector as Chardet;
use encoding_rs::{Encoding, UTF_8};

use super::{BinaryScreen, Detection, EncodingDetector};

const CONFIDENCE_CERTAIN: f32 = 1.0;
const CONFIDENCE_STRONG: f32 = 0.9;
const CONFIDENCE_WEAK: f32 = 0.5;

/// Statistical detector backed by `chardetng`
///
/// 1. A byte-order mark decides the encoding outright.
/// 2. Binary-looking content yields no label: any NUL, or too many controls.
/// 3. Valid UTF-8 (including empty input) is UTF-8.
/// 4. Anything else goes to `chardetng`, with UTF-8 excluded. A guess whose
///    decoded text is mostly controls yields no label.
#[derive(Debug, Clone, Default)]
pub struct StatisticalDetector {
    screen: BinaryScreen,
    tld: Option<String>,
}

impl StatisticalDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the binary screening thresholds
    #[must_use]
    pub fn with_screen(mut self, screen: BinaryScreen) -> Self {
        self.screen = screen;
        self
    }

    /// Hint the top-level domain the content is associated with (e.g. `"jp"`)
    ///
    /// Hints that are not a plain ASCII label are ignored.
    #[must_use]
    pub fn with_tld(mut self, tld: &str) -> Self {
        let tld = tld.trim().trim_start_matches('.');
        self.tld = (!tld.is_empty() && tld.bytes().all(|b| b.is_ascii_alphanumeric()))
            .then(|| tld.to_ascii_lowercase());
        self
    }

    fn guess(&self, bytes: &[u8]) -> (&'static Encoding, bool) {
        let mut detector = Chardet::new();
        detector.feed(bytes, true);
        detector.guess_assess(self.tld.as_deref().map(str::as_bytes), false)
    }
}

impl EncodingDetector for StatisticalDetector {
    fn detect(&self, bytes: &[u8]) -> Detection {
        if let Some((encoding, _)) = Encoding::for_bom(bytes) {
            return Detection::new(encoding.name(), CONFIDENCE_CERTAIN);
        }

        if self.screen.is_binary(bytes) {
            tracing::debug!("Content looks binary, no encoding guessed");
            return Detection::none();
        }

        if std::str::from_utf8(bytes).is_ok() {
            return Detection::new(UTF_8.name(), CONFIDENCE_CERTAIN);
        }

        let (encoding, confident) = self.guess(bytes);
        let control_soup = encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .is_some_and(|text| self.screen.is_binary_text(&text));
        if control_soup {
            tracing::debug!("Content decodes to control characters as {}", encoding.name());
            return Detection::none();
        }

        let confidence = if confident {
            CONFIDENCE_STRONG
        } else {
            CONFIDENCE_WEAK
        };
        Detection::new(encoding.name(), confidence)
    }
}
