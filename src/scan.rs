//! Filesystem helpers for batch runs
//!
//! Lists candidate files, reads whole containers into memory and writes
//! patched buffers back out.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::error::{Result, WemError};

/// List files under `dir` whose extension matches `scan`
///
/// Paths are sorted so reports come out in a stable order.
pub fn list_files(dir: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(WemError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    collect(dir, scan, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect(dir: &Path, scan: &ScanConfig, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| WemError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| WemError::io(dir, e))?;
        let path = entry.path();
        // Directory links are not followed
        let file_type = entry.file_type().map_err(|e| WemError::io(&path, e))?;
        if file_type.is_dir() {
            if scan.recursive {
                collect(&path, scan, files)?;
            }
        } else if file_type.is_symlink() && path.is_dir() {
            log::debug!("Not following directory link: {}", path.display());
        } else if scan.matches(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Make sure an input directory exists before a batch starts
pub fn require_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(WemError::MissingDirectory(dir.to_path_buf()))
    }
}

/// Create an output directory if it does not exist yet
///
/// Returns `true` when the directory was created.
pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|e| WemError::io(dir, e))?;
    log::info!("Created directory: {}", dir.display());
    Ok(true)
}

/// Read a whole container into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| WemError::io(path, e))
}

/// Read a counterpart file, reporting absence as [`WemError::MissingCounterpart`]
pub fn read_counterpart(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(WemError::MissingCounterpart(path.to_path_buf()));
    }
    read_file(path)
}

/// Write a finished buffer in one go
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).map_err(|e| WemError::io(path, e))?;
    file.write_all(bytes).map_err(|e| WemError::io(path, e))?;
    Ok(())
}

/// File name as UTF-8 text, lossy
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `path` relative to `root`, or `path` itself when it is not under `root`
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
