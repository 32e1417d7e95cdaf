//! RIFF chunk walking
//!
//! A wave container starts with a 12-byte header (`RIFF`, declared size,
//! form tag) followed by a sequence of chunks. Each chunk is a 4-byte id,
//! a little-endian `u32` size and `size` payload bytes, padded to an even
//! length. This module walks that sequence to find the `data` chunk and
//! measures how much of it is real audio rather than zero padding.

use crate::error::{ParseError, ParseResult};

/// RIFF header magic bytes
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";

/// Identifier of the chunk holding the audio payload
pub const DATA_ID: &[u8; 4] = b"data";

/// Size of the RIFF header: magic, declared size, form tag
pub const RIFF_HEADER_SIZE: usize = 12;

/// Size of a chunk header: id plus size field
pub const CHUNK_HEADER_SIZE: usize = 8;

/// A chunk header discovered while walking a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Four-character chunk identifier
    pub id: [u8; 4],
    /// Offset of the chunk header from the start of the container
    pub offset: usize,
    /// Declared payload size
    pub size: u32,
}

impl ChunkHeader {
    /// Offset of the first payload byte
    pub fn payload_offset(&self) -> usize {
        self.offset + CHUNK_HEADER_SIZE
    }

    /// Identifier as printable text, non-ASCII bytes replaced by `.`
    pub fn id_str(&self) -> String {
        self.id
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect()
    }
}

/// Iterator over the chunk headers of a container
///
/// Stops as soon as fewer than 8 bytes remain for a chunk header.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    container: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = ChunkHeader;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.offset.checked_add(CHUNK_HEADER_SIZE)?;
        if end > self.container.len() {
            return None;
        }

        let header = &self.container[self.offset..end];
        let chunk = ChunkHeader {
            id: [header[0], header[1], header[2], header[3]],
            offset: self.offset,
            size: u32::from_le_bytes([header[4], header[5], header[6], header[7]]),
        };

        log::debug!(
            "chunk '{}' at 0x{:X}, {} bytes",
            chunk.id_str(),
            chunk.offset,
            chunk.size
        );

        // Saturate so an oversized declaration ends the walk instead of wrapping
        self.offset = self
            .offset
            .saturating_add(CHUNK_HEADER_SIZE)
            .saturating_add(chunk.size as usize)
            .saturating_add((chunk.size & 1) as usize);
        Some(chunk)
    }
}

/// Check the RIFF header and return an iterator over the chunk sequence
pub fn chunks(container: &[u8]) -> ParseResult<Chunks<'_>> {
    if container.len() < RIFF_HEADER_SIZE || &container[0..4] != RIFF_MAGIC {
        return Err(ParseError::InvalidContainer);
    }

    Ok(Chunks {
        container,
        offset: RIFF_HEADER_SIZE,
    })
}

/// Read the 4-byte form tag that follows the declared size
pub fn form_tag(container: &[u8]) -> ParseResult<[u8; 4]> {
    chunks(container)?;
    Ok([container[8], container[9], container[10], container[11]])
}

/// Locate the `data` chunk
///
/// Returns the offset of the first payload byte and the declared payload
/// size. The size is reported as declared; it is not checked against the
/// buffer length.
pub fn locate_data_chunk(container: &[u8]) -> ParseResult<(usize, usize)> {
    chunks(container)?
        .find(|chunk| &chunk.id == DATA_ID)
        .map(|chunk| (chunk.payload_offset(), chunk.size as usize))
        .ok_or(ParseError::ChunkNotFound)
}

/// Length of `payload` up to and including its last non-zero byte
///
/// Trailing zero bytes are treated as padding. A payload whose real audio
/// ends in digital silence is therefore reported short; callers comparing
/// lengths accept that.
pub fn trailing_nonzero_extent(payload: &[u8]) -> usize {
    payload
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1)
}

/// Audio length of a container: its `data` payload without trailing padding
///
/// A declared size running past the end of the buffer is clamped to the
/// bytes actually present.
pub fn audio_payload_length(container: &[u8]) -> ParseResult<usize> {
    let (offset, size) = locate_data_chunk(container)?;
    let start = offset.min(container.len());
    let end = offset.saturating_add(size).min(container.len());
    Ok(trailing_nonzero_extent(&container[start..end]))
}
