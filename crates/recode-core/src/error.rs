//! Error types for detection and conversion

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse category of a [`ConvertError`], used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Precondition,
    Config,
    Detection,
    Decode,
    Encode,
    Read,
    Write,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Precondition => write!(f, "precondition"),
            Self::Config => write!(f, "config"),
            Self::Detection => write!(f, "detection"),
            Self::Decode => write!(f, "decode"),
            Self::Encode => write!(f, "encode"),
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Errors that can occur while converting a tree or a single file
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("root path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("root path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("unknown encoding label: {0}")]
    UnknownTarget(String),

    #[error("cannot write {0}, pick an ASCII-compatible encoding or UTF-8")]
    UnsupportedTarget(&'static str),

    #[error("no encoding could be detected")]
    DetectionAmbiguous,

    #[error("detector returned unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("detected {label} with confidence {confidence:.2}, below {threshold:.2}")]
    LowConfidence {
        label: &'static str,
        confidence: f32,
        threshold: f32,
    },

    #[error("content is not valid {0}")]
    Decode(&'static str),

    #[error("text cannot be represented in {0}")]
    Encode(&'static str),

    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

impl ConvertError {
    /// Category used in the per-file report line
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::RootNotFound(_) | Self::RootNotDirectory(_) => FailureKind::Precondition,
            Self::UnknownTarget(_) | Self::UnsupportedTarget(_) => FailureKind::Config,
            Self::DetectionAmbiguous | Self::UnknownEncoding(_) | Self::LowConfidence { .. } => {
                FailureKind::Detection
            }
            Self::Decode(_) => FailureKind::Decode,
            Self::Encode(_) => FailureKind::Encode,
            Self::Read(_) => FailureKind::Read,
            Self::Write(_) => FailureKind::Write,
        }
    }

    /// Whether this error ends the whole run rather than a single file
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind(), FailureKind::Precondition | FailureKind::Config)
    }
}
