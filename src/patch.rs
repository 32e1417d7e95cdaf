//! Header transplanting
//!
//! Copies a fixed set of header byte ranges from an original container onto
//! a re-encoded one, then pads or truncates the re-encoded buffer so both
//! files have the same length. Which ranges get copied depends on the
//! encoder version that produced the original and is described by a
//! [`PatchDescriptor`].

use std::fmt;
use std::ops::Range;

use crate::error::{Buffer, ConfigError, PatchError, PatchResult};

/// Named set of header byte ranges copied from the original file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchDescriptor {
    /// Short name used on the command line
    pub name: &'static str,
    /// Half-open byte ranges, in ascending order
    pub ranges: &'static [Range<usize>],
}

/// Bytes 0x28-0x2b only
pub const LENGTH_FIELD: PatchDescriptor = PatchDescriptor {
    name: "length",
    ranges: &[0x28..0x2c],
};

/// Byte 0x26 plus bytes 0x28-0x2b
pub const CHANNEL_AND_LENGTH: PatchDescriptor = PatchDescriptor {
    name: "channel-length",
    ranges: &[0x26..0x27, 0x28..0x2c],
};

/// All built-in descriptors
pub const DESCRIPTORS: &[PatchDescriptor] = &[LENGTH_FIELD, CHANNEL_AND_LENGTH];

impl PatchDescriptor {
    /// Look up a built-in descriptor by name
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        DESCRIPTORS
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| ConfigError::UnknownDescriptor(name.to_string()))
    }

    /// Minimum buffer length needed to apply every range
    pub fn required_len(&self) -> usize {
        self.ranges.iter().map(|r| r.end).max().unwrap_or(0)
    }
}

impl Default for PatchDescriptor {
    fn default() -> Self {
        LENGTH_FIELD
    }
}

impl fmt::Display for PatchDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.name)?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if range.len() == 1 {
                write!(f, "0x{:02x}", range.start)?;
            } else {
                write!(f, "0x{:02x}-0x{:02x}", range.start, range.end - 1)?;
            }
        }
        write!(f, ")")
    }
}

/// How the candidate's length was reconciled with the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub enum SizeAdjustment {
    /// Lengths already matched
    Unchanged,
    /// This many zero bytes were appended
    Padded(usize),
    /// This many trailing bytes were dropped
    Truncated(usize),
}

impl SizeAdjustment {
    /// Truncation loses candidate data and is reported as a warning
    pub fn is_warning(&self) -> bool {
        matches!(self, SizeAdjustment::Truncated(_))
    }
}

/// A fully built output buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub bytes: Vec<u8>,
    pub adjustment: SizeAdjustment,
}

impl Patched {
    /// Hex dump of the bytes covered by `descriptor`, e.g. `04000000`
    pub fn patched_hex(&self, descriptor: &PatchDescriptor) -> String {
        descriptor
            .ranges
            .iter()
            .flat_map(|r| self.bytes[r.clone()].iter())
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

/// Copy the descriptor's ranges from `reference` onto `candidate`
///
/// The returned buffer always has exactly `reference.len()` bytes. A shorter
/// candidate is zero padded; a longer one is truncated with a warning. No
/// byte outside the descriptor ranges and the length adjustment is changed.
pub fn transplant_header(
    reference: &[u8],
    candidate: &[u8],
    descriptor: &PatchDescriptor,
) -> PatchResult<Patched> {
    let required = descriptor.required_len();
    if reference.len() < required {
        return Err(PatchError::TooShort {
            which: Buffer::Reference,
            required,
            actual: reference.len(),
        });
    }
    if candidate.len() < required {
        return Err(PatchError::TooShort {
            which: Buffer::Candidate,
            required,
            actual: candidate.len(),
        });
    }

    let mut bytes = candidate.to_vec();
    for range in descriptor.ranges {
        bytes[range.clone()].copy_from_slice(&reference[range.clone()]);
    }

    let target = reference.len();
    let adjustment = match bytes.len() {
        len if len < target => {
            bytes.resize(target, 0);
            SizeAdjustment::Padded(target - len)
        }
        len if len > target => {
            log::warn!(
                "Input file larger than original ({} vs {} bytes), truncating",
                len,
                target
            );
            bytes.truncate(target);
            SizeAdjustment::Truncated(len - target)
        }
        _ => SizeAdjustment::Unchanged,
    };

    Ok(Patched { bytes, adjustment })
}
