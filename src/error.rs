//! Error types for the wave-container tools
//!
//! This module defines all error types used throughout the crate,
//! one enum per component plus a driver-level error that wraps them.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for batch operations over files
#[derive(Debug, Error)]
pub enum WemError {
    /// Container parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Header transplant errors
    #[error("Patch error: {0}")]
    Patch(#[from] PatchError),

    /// Header byte validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A paired original/converted file does not exist
    #[error("Counterpart file not found: {}", .0.display())]
    MissingCounterpart(PathBuf),

    /// An input directory does not exist
    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// Underlying read/write failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WemError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WemError::Io {
            path: path.into(),
            source,
        }
    }
}

/// RIFF chunk walking errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Missing or malformed RIFF magic, or a buffer shorter than the RIFF header
    #[error("not a valid RIFF container")]
    InvalidContainer,

    /// No `data` chunk before the end of the buffer
    #[error("'data' chunk not found")]
    ChunkNotFound,
}

/// Which buffer a transplant precondition failed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    Reference,
    Candidate,
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Buffer::Reference => write!(f, "original"),
            Buffer::Candidate => write!(f, "input"),
        }
    }
}

/// Header transplant errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// A buffer does not cover every patched byte range
    #[error("{which} file too short (size: {actual} bytes, need at least {required})")]
    TooShort {
        which: Buffer,
        required: usize,
        actual: usize,
    },
}

/// Header byte validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Buffer ends before one of the checked offsets
    #[error("File too short to read offset 0x{offset:02x} (size: {actual} bytes)")]
    TooShort { offset: usize, actual: usize },

    /// At least one checked byte differs from its expected value
    #[error("Invalid bytes: 0x{offset_a:02x}={actual_a:02x}, 0x{offset_b:02x}={actual_b:02x}")]
    UnexpectedBytes {
        offset_a: usize,
        actual_a: u8,
        offset_b: usize,
        actual_b: u8,
    },
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// File extension filter is empty
    #[error("File extension must not be empty")]
    EmptyExtension,

    /// Worker count of zero
    #[error("Number of jobs must be at least 1")]
    NoJobs,

    /// Output directory would overwrite an input directory
    #[error("Output directory {} must differ from input directories", .0.display())]
    OutputOverlapsInput(PathBuf),

    /// Both validator offsets point at the same byte
    #[error("Validator offsets must differ (both are 0x{0:02x})")]
    DuplicateOffset(usize),

    /// Unknown patch descriptor name
    #[error("Unknown patch descriptor: {0}")]
    UnknownDescriptor(String),
}

/// Specialized result types for different modules
pub type ParseResult<T> = std::result::Result<T, ParseError>;
pub type PatchResult<T> = std::result::Result<T, PatchError>;
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type Result<T> = std::result::Result<T, WemError>;
