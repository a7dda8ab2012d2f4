//! Single-file detection and conversion

use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

use super::{Conversion, ConvertConfig};
use crate::detect::EncodingDetector;
use crate::error::ConvertError;

/// What should happen to a file's bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Leave the file as it is
    Keep { detected: &'static Encoding },
    /// Replace the file content with `bytes`
    Rewrite {
        from: &'static Encoding,
        bytes: Vec<u8>,
    },
}

/// Converts files to a canonical encoding using an injected detector
#[derive(Debug, Clone)]
pub struct Converter<D> {
    detector: D,
    target: &'static Encoding,
    min_confidence: f32,
    dry_run: bool,
    atomic_writes: bool,
}

impl<D: EncodingDetector> Converter<D> {
    /// Create a converter targeting UTF-8
    #[must_use]
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            target: UTF_8,
            min_confidence: 0.0,
            dry_run: false,
            atomic_writes: false,
        }
    }

    /// Create a converter with the per-file settings of a run configuration
    #[must_use]
    pub fn from_config(config: &ConvertConfig, detector: D) -> Self {
        Self::new(detector)
            .with_target(config.target)
            .with_min_confidence(config.min_confidence)
            .with_dry_run(config.dry_run)
            .with_atomic_writes(config.atomic_writes)
    }

    #[must_use]
    pub fn with_target(mut self, target: &'static Encoding) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    /// The canonical encoding files are converted to
    #[must_use]
    pub fn target(&self) -> &'static Encoding {
        self.target
    }

    /// Detect, compare and, if needed, rewrite one file
    ///
    /// The file is written at most once and only after its whole content has
    /// been decoded and re-encoded successfully. The read and the write are
    /// not atomic with respect to other writers.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or written, if no usable
    /// encoding is detected, or if the content does not survive decoding or
    /// re-encoding.
    pub fn convert_file(&self, path: &Path) -> Result<Conversion, ConvertError> {
        let bytes = fs::read(path).map_err(ConvertError::Read)?;

        match self.plan(&bytes)? {
            Plan::Keep { detected } => {
                debug!(
                    "{}: already {} (detected {})",
                    path.display(),
                    self.target.name(),
                    detected.name()
                );
                Ok(Conversion::AlreadyCanonical { detected })
            }
            Plan::Rewrite { from, .. } if self.dry_run => Ok(Conversion::WouldConvert { from }),
            Plan::Rewrite { from, bytes } => {
                self.write(path, &bytes)?;
                debug!(
                    "{}: {} -> {} ({} bytes)",
                    path.display(),
                    from.name(),
                    self.target.name(),
                    bytes.len()
                );
                Ok(Conversion::Converted { from })
            }
        }
    }

    /// Decide what to do with a buffer without touching the filesystem
    ///
    /// # Errors
    /// Same detection, decode and encode failures as [`Converter::convert_file`].
    pub fn plan(&self, bytes: &[u8]) -> Result<Plan, ConvertError> {
        let detected = self.resolve(bytes)?;
        if detected == self.target {
            return Ok(Plan::Keep { detected });
        }

        let text = decode_strict(detected, bytes)?;
        let converted = encode_strict(self.target, &text)?;

        if converted.as_slice() == bytes {
            Ok(Plan::Keep { detected })
        } else {
            Ok(Plan::Rewrite {
                from: detected,
                bytes: converted,
            })
        }
    }

    fn resolve(&self, bytes: &[u8]) -> Result<&'static Encoding, ConvertError> {
        let detection = self.detector.detect(bytes);
        let label = detection.label.ok_or(ConvertError::DetectionAmbiguous)?;
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| ConvertError::UnknownEncoding(label.clone()))?;

        // Confidence only gates rewrites; a canonical match writes nothing
        if encoding != self.target && detection.confidence < self.min_confidence {
            return Err(ConvertError::LowConfidence {
                label: encoding.name(),
                confidence: detection.confidence,
                threshold: self.min_confidence,
            });
        }

        Ok(encoding)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
        if self.atomic_writes {
            write_atomic(path, bytes).map_err(ConvertError::Write)
        } else {
            fs::write(path, bytes).map_err(ConvertError::Write)
        }
    }
}

/// Decode without replacement characters, rejecting lossy decodes
fn decode_strict<'a>(
    encoding: &'static Encoding,
    bytes: &'a [u8],
) -> Result<Cow<'a, str>, ConvertError> {
    let body = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) if bom_encoding == encoding => {
            bytes.get(bom_len..).unwrap_or_default()
        }
        _ => bytes,
    };

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or(ConvertError::Decode(encoding.name()))?;

    // UTF-16 cannot be re-encoded by encoding_rs; strict decoding is the check there
    if encoding.output_encoding() == encoding {
        let (roundtrip, _, unmappable) = encoding.encode(&text);
        if unmappable || roundtrip.as_ref() != body {
            return Err(ConvertError::Decode(encoding.name()));
        }
    }

    Ok(text)
}

fn encode_strict(target: &'static Encoding, text: &str) -> Result<Vec<u8>, ConvertError> {
    let (bytes, _, unmappable) = target.encode(text);
    if unmappable {
        return Err(ConvertError::Encode(target.name()));
    }
    Ok(bytes.into_owned())
}

/// Write to a sibling temp file, then rename it over `path`
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(path)?.permissions();

    let mut temp = tempfile::Builder::new()
        .prefix(".recode-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
