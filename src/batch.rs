//! Batch drivers
//!
//! Each driver lists the files of a directory, runs one per-file operation
//! on every entry and folds the per-file results into a report. A failing
//! file is recorded and the batch moves on; only a missing input directory
//! stops a batch before it starts.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::Config;
use crate::error::{Result, WemError};
use crate::patch::{transplant_header, PatchDescriptor, SizeAdjustment};
use crate::report::{
    InvalidFile, LengthCheck, LengthReport, PatchSummary, PatchedFile, Skipped, ValidationReport,
};
use crate::riff::audio_payload_length;
use crate::scan;
use crate::validate::ByteExpectation;

/// Run `op` over `files`, on a rayon pool when `jobs > 1`
///
/// Results come back in the order of `files`.
fn map_files<T, F>(files: &[PathBuf], jobs: usize, op: F) -> Vec<T>
where
    T: Send,
    F: Fn(&Path) -> T + Sync + Send,
{
    if jobs <= 1 {
        return files.iter().map(|path| op(path)).collect();
    }

    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool.install(|| files.par_iter().map(|path| op(path)).collect()),
        Err(e) => {
            log::warn!("Could not start {} workers ({}), running sequentially", jobs, e);
            files.iter().map(|path| op(path)).collect()
        }
    }
}

fn display_name(path: &Path, root: &Path) -> String {
    scan::relative_to(path, root).display().to_string()
}

fn skipped(name: String, err: WemError) -> Skipped {
    Skipped {
        name,
        reason: err.to_string(),
    }
}

/// Compare the audio payload lengths of one original and its converted copy
pub fn check_length_pair(original: &Path, converted: &Path) -> Result<(usize, usize)> {
    let original_len = audio_payload_length(&scan::read_file(original)?)?;
    let converted_len = audio_payload_length(&scan::read_counterpart(converted)?)?;
    Ok((original_len, converted_len))
}

/// Flag converted files whose audio payload is longer than the original's
pub fn check_lengths(config: &Config) -> Result<LengthReport> {
    let dirs = &config.dirs;
    scan::require_dir(&dirs.original)?;
    scan::require_dir(&dirs.converted)?;

    log::info!("Original directory: {}", dirs.original.display());
    log::info!("Converted directory: {}", dirs.converted.display());

    let files = scan::list_files(&dirs.original, &config.scan)?;
    let results = map_files(&files, config.scan.jobs, |original| {
        let name = display_name(original, &dirs.original);
        let converted_path = dirs.converted.join(scan::relative_to(original, &dirs.original));

        match check_length_pair(original, &converted_path) {
            Ok((original_len, converted_len)) => {
                let check = LengthCheck {
                    name,
                    converted_path,
                    original_len,
                    converted_len,
                };
                log::debug!(
                    "{}: converted {} bytes, original {} bytes",
                    check.name,
                    converted_len,
                    original_len
                );
                Ok(check)
            }
            Err(e) => {
                log::debug!("Skipping {}: {}", name, e);
                Err(skipped(name, e))
            }
        }
    });

    let mut report = LengthReport::default();
    for result in results {
        match result {
            Ok(check) => report.checked.push(check),
            Err(skip) => report.skipped.push(skip),
        }
    }
    Ok(report)
}

/// Validate the header bytes of every file under the original directory
pub fn check_bytes(config: &Config) -> Result<ValidationReport> {
    let root = &config.dirs.original;
    let files = scan::list_files(root, &config.scan)?;
    let expectation = config.expectation;

    log::info!("Found {} files under {}", files.len(), root.display());

    let results = map_files(&files, config.scan.jobs, |path| {
        let name = scan::relative_to(path, root);
        match check_file_bytes(path, &expectation) {
            Ok(()) => {
                log::debug!("Valid file: {}", name.display());
                None
            }
            Err(e) => {
                let error = match e {
                    WemError::Validation(inner) => inner.to_string(),
                    other => format!("Error reading file: {}", other),
                };
                log::debug!("Invalid file: {} - {}", name.display(), error);
                Some(InvalidFile { path: name, error })
            }
        }
    });

    let mut report = ValidationReport::new(expectation);
    report.total = files.len();
    report.invalid = results.into_iter().flatten().collect();
    Ok(report)
}

/// Validate the header bytes of a single file
pub fn check_file_bytes(path: &Path, expectation: &ByteExpectation) -> Result<()> {
    let bytes = scan::read_file(path)?;
    expectation.check(&bytes)?;
    Ok(())
}

/// Transplant the header of `original` onto `converted` and write `output`
///
/// The output buffer is complete before the file is created.
pub fn patch_file(
    original: &Path,
    converted: &Path,
    output: &Path,
    descriptor: &PatchDescriptor,
) -> Result<PatchedFile> {
    let reference = scan::read_file(original)?;
    let candidate = scan::read_counterpart(converted)?;
    let patched = transplant_header(&reference, &candidate, descriptor)?;

    if let Some(parent) = output.parent() {
        scan::ensure_dir(parent)?;
    }
    scan::write_file(output, &patched.bytes)?;

    let file = PatchedFile {
        name: scan::file_name(output),
        output: output.to_path_buf(),
        header_hex: patched.patched_hex(descriptor),
        size: patched.bytes.len(),
        adjustment: patched.adjustment,
    };

    log::info!("Successfully patched: {}", output.display());
    log::info!("Header bytes {}: {}", descriptor, file.header_hex);
    if let SizeAdjustment::Padded(n) = file.adjustment {
        log::debug!("Appended {} zero bytes", n);
    }
    log::info!("Output size: {} bytes", file.size);
    Ok(file)
}

/// Patch every original/converted pair into the patched directory
pub fn patch_all(config: &Config) -> Result<PatchSummary> {
    config.dirs.validate()?;
    let dirs = &config.dirs;
    scan::require_dir(&dirs.original)?;
    scan::require_dir(&dirs.converted)?;
    scan::ensure_dir(&dirs.patched)?;

    log::info!("Original directory: {}", dirs.original.display());
    log::info!("Converted directory: {}", dirs.converted.display());
    log::info!("Patched directory: {}", dirs.patched.display());

    let files = scan::list_files(&dirs.original, &config.scan)?;
    if files.is_empty() {
        log::warn!("No .{} files found in {}", config.scan.extension, dirs.original.display());
    }

    let results = map_files(&files, config.scan.jobs, |original| {
        let relative = scan::relative_to(original, &dirs.original);
        let name = relative.display().to_string();
        log::info!("Processing {}...", name);

        patch_file(
            original,
            &dirs.converted.join(&relative),
            &dirs.patched.join(&relative),
            &config.descriptor,
        )
        .map_err(|e| {
            log::error!("Failed to patch {}: {}", name, e);
            skipped(name, e)
        })
    });

    let mut summary = PatchSummary::default();
    for result in results {
        match result {
            Ok(file) => summary.patched.push(file),
            Err(skip) => summary.failed.push(skip),
        }
    }
    Ok(summary)
}

