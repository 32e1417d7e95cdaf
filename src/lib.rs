//! # wem-tools
//!
//! Utilities for inspecting and patching RIFF-framed `.wem` game audio
//! containers: locate the audio payload, compare payload lengths between an
//! original and a re-encoded file, validate header bytes, and transplant
//! header bytes from an original onto a re-encode.
//!

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod patch;
pub mod rename;
pub mod report;
pub mod riff;
pub mod scan;
pub mod validate;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{
    Buffer, ConfigError, ParseError, PatchError, Result, ValidationError, WemError,
};
pub use patch::{
    transplant_header, PatchDescriptor, Patched, SizeAdjustment, CHANNEL_AND_LENGTH, LENGTH_FIELD,
};
pub use riff::{audio_payload_length, chunks, locate_data_chunk, trailing_nonzero_extent, ChunkHeader};
pub use validate::{validate_header_bytes, ByteExpectation};
