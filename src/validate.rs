//! Fixed header byte validation
//!
//! Re-encoded containers are only accepted by the game when two header
//! bytes carry specific values. This module checks a buffer against such
//! an expected pair.

use crate::error::{ConfigError, ConfigResult, ValidationError, ValidationResult};

/// Two header bytes and the values they must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteExpectation {
    pub offset_a: usize,
    pub expected_a: u8,
    pub offset_b: usize,
    pub expected_b: u8,
}

impl Default for ByteExpectation {
    /// `0x28 = 0x04` and `0x29 = 0x00`
    fn default() -> Self {
        Self {
            offset_a: 0x28,
            expected_a: 0x04,
            offset_b: 0x29,
            expected_b: 0x00,
        }
    }
}

impl ByteExpectation {
    /// Reject pairs that check the same byte twice
    pub fn validate(&self) -> ConfigResult<()> {
        if self.offset_a == self.offset_b {
            return Err(ConfigError::DuplicateOffset(self.offset_a));
        }
        Ok(())
    }

    /// Check `container` against this expectation
    pub fn check(&self, container: &[u8]) -> ValidationResult<()> {
        validate_header_bytes(
            container,
            self.offset_a,
            self.expected_a,
            self.offset_b,
            self.expected_b,
        )
    }
}

/// Check that `container[offset_a] == expected_a` and `container[offset_b] == expected_b`
pub fn validate_header_bytes(
    container: &[u8],
    offset_a: usize,
    expected_a: u8,
    offset_b: usize,
    expected_b: u8,
) -> ValidationResult<()> {
    let furthest = offset_a.max(offset_b);
    if container.len() <= furthest {
        return Err(ValidationError::TooShort {
            offset: furthest,
            actual: container.len(),
        });
    }

    let actual_a = container[offset_a];
    let actual_b = container[offset_b];
    if actual_a == expected_a && actual_b == expected_b {
        Ok(())
    } else {
        Err(ValidationError::UnexpectedBytes {
            offset_a,
            actual_a,
            offset_b,
            actual_b,
        })
    }
}
