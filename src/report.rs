//! Batch reports
//!
//! Every batch folds its per-file results into one of the report values
//! below. Reports render to plain text, one line per flagged entry, with a
//! sentinel line when nothing was flagged.

use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "diagnostics")]
use serde::Serialize;

use crate::error::{Result, WemError};
use crate::patch::SizeAdjustment;
use crate::validate::ByteExpectation;

/// A file that could not be processed, with the reason as text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct Skipped {
    pub name: String,
    pub reason: String,
}

/// Audio payload lengths of one original/converted pair
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct LengthCheck {
    pub name: String,
    pub converted_path: PathBuf,
    pub original_len: usize,
    pub converted_len: usize,
}

impl LengthCheck {
    pub fn is_oversized(&self) -> bool {
        self.converted_len > self.original_len
    }
}

/// Result of comparing every original against its converted counterpart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct LengthReport {
    pub checked: Vec<LengthCheck>,
    pub skipped: Vec<Skipped>,
}

impl LengthReport {
    /// Pairs whose converted audio is longer than the original
    pub fn oversized(&self) -> impl Iterator<Item = &LengthCheck> {
        self.checked.iter().filter(|check| check.is_oversized())
    }

    pub fn oversized_count(&self) -> usize {
        self.oversized().count()
    }

    /// Plain-text listing of oversized converted files
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.oversized_count() == 0 {
            out.push_str(
                "No oversized converted .wem files found (all are shorter or equal to original).\n",
            );
            return out;
        }

        out.push_str("Oversized converted .wem files (audio data longer than original):\n");
        for check in self.oversized() {
            let _ = writeln!(out, "{}", check.converted_path.display());
        }
        out
    }
}

/// A file whose header bytes failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct InvalidFile {
    /// Path relative to the scanned folder
    pub path: PathBuf,
    pub error: String,
}

/// Result of validating every file under a folder
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct ValidationReport {
    #[cfg_attr(feature = "diagnostics", serde(skip))]
    pub expectation: ByteExpectation,
    pub total: usize,
    pub invalid: Vec<InvalidFile>,
}

impl ValidationReport {
    pub fn new(expectation: ByteExpectation) -> Self {
        Self {
            expectation,
            total: 0,
            invalid: Vec::new(),
        }
    }

    pub fn valid_count(&self) -> usize {
        self.total - self.invalid.len()
    }

    /// Plain-text listing of invalid files
    pub fn render(&self) -> String {
        let e = &self.expectation;
        let mut out = String::new();

        if self.total == 0 {
            out.push_str("No .wem files found in the specified folder or its subfolders.\n");
        } else if self.invalid.is_empty() {
            let _ = writeln!(
                out,
                "All .wem files have correct bytes at 0x{:02x}={:02x} and 0x{:02x}={:02x}.",
                e.offset_a, e.expected_a, e.offset_b, e.expected_b
            );
        } else {
            let _ = writeln!(
                out,
                "Found {} invalid .wem files with incorrect bytes at 0x{:02x} or 0x{:02x}:\n",
                self.invalid.len(),
                e.offset_a,
                e.offset_b
            );
            for file in &self.invalid {
                let _ = writeln!(out, "File: {}", file.path.display());
                let _ = writeln!(out, "Error: {}\n", file.error);
            }
        }
        out
    }
}

/// One successfully written patched file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct PatchedFile {
    pub name: String,
    pub output: PathBuf,
    /// Hex of the transplanted header bytes
    pub header_hex: String,
    pub size: usize,
    pub adjustment: SizeAdjustment,
}

/// Result of a batch patch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct PatchSummary {
    pub patched: Vec<PatchedFile>,
    pub failed: Vec<Skipped>,
}

impl PatchSummary {
    pub fn processed_count(&self) -> usize {
        self.patched.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Files that had to be truncated to the original length
    pub fn truncated(&self) -> impl Iterator<Item = &PatchedFile> {
        self.patched.iter().filter(|file| file.adjustment.is_warning())
    }
}

impl fmt::Display for PatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processed files: {}", self.processed_count())?;
        writeln!(f, "Failed files: {}", self.failed_count())?;
        for file in &self.failed {
            writeln!(f, "  {}: {}", file.name, file.reason)?;
        }
        Ok(())
    }
}

/// One file rename
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct Renamed {
    pub from: String,
    pub to: String,
}

/// Result of normalising file names in a folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct RenameSummary {
    pub renamed: Vec<Renamed>,
    /// Renames skipped because the target name already exists
    pub conflicts: Vec<Renamed>,
    pub failed: Vec<Skipped>,
}

impl fmt::Display for RenameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Renamed files: {}", self.renamed.len())?;
        for conflict in &self.conflicts {
            writeln!(f, "  Skipped {}: {} already exists", conflict.from, conflict.to)?;
        }
        for file in &self.failed {
            writeln!(f, "  Failed {}: {}", file.name, file.reason)?;
        }
        Ok(())
    }
}

/// Write a rendered report, creating or truncating `path`
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| WemError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| WemError::io(path, e))?;
    writer.flush().map_err(|e| WemError::io(path, e))
}

/// Pretty JSON of a report, stamped with the time it was generated
#[cfg(feature = "diagnostics")]
pub fn to_json<T: Serialize>(kind: &str, report: &T) -> serde_json::Result<String> {
    let value = serde_json::json!({
        "kind": kind,
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "report": serde_json::to_value(report)?,
    });
    serde_json::to_string_pretty(&value)
}
