//! Configuration for batch runs
//!
//! This module provides the configuration structures shared by the command
//! line tools: where the original, converted and patched files live, which
//! files to pick up, and which header bytes to copy or check.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::patch::PatchDescriptor;
use crate::validate::ByteExpectation;

/// Default report written by the length checker
pub const DEFAULT_LENGTH_REPORT: &str = "oversized_converted_files.txt";

/// Default report written by the byte checker
pub const DEFAULT_BYTES_REPORT: &str = "invalid_wem_files.txt";

/// Main configuration structure for a batch run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory layout
    pub dirs: DirConfig,
    /// File selection and scheduling
    pub scan: ScanConfig,
    /// Plain-text report destination
    pub report_path: PathBuf,
    /// Header ranges copied by the patcher
    pub descriptor: PatchDescriptor,
    /// Header bytes checked by the validator
    pub expectation: ByteExpectation,
}

/// Directory roles
#[derive(Debug, Clone)]
pub struct DirConfig {
    /// Reference files
    pub original: PathBuf,
    /// Re-encoded replacements
    pub converted: PathBuf,
    /// Output of the patcher
    pub patched: PathBuf,
}

/// Which files a batch visits and how
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Extension without the leading dot, matched case-insensitively
    pub extension: String,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Worker threads; 1 runs on the calling thread
    pub jobs: usize,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            dirs: DirConfig::default(),
            scan: ScanConfig::default(),
            report_path: PathBuf::from(DEFAULT_LENGTH_REPORT),
            descriptor: PatchDescriptor::default(),
            expectation: ByteExpectation::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.scan.validate()?;
        self.dirs.validate()?;
        self.expectation.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl DirConfig {
    /// The patcher must never write over its inputs
    pub fn validate(&self) -> ConfigResult<()> {
        if self.patched == self.original || self.patched == self.converted {
            return Err(ConfigError::OutputOverlapsInput(self.patched.clone()));
        }
        Ok(())
    }
}

impl Default for DirConfig {
    fn default() -> Self {
        Self {
            original: PathBuf::from("orig"),
            converted: PathBuf::from("converted"),
            patched: PathBuf::from("patched"),
        }
    }
}

impl ScanConfig {
    /// Validate scan configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::EmptyExtension);
        }
        if self.jobs == 0 {
            return Err(ConfigError::NoJobs);
        }
        Ok(())
    }

    /// Whether `path` carries the configured extension
    pub fn matches(&self, path: &Path) -> bool {
        let wanted = self.extension.trim_start_matches('.');
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case(wanted))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "wem".to_string(),
            recursive: false,
            jobs: 1,
        }
    }
}
