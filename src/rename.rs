//! File name normalisation
//!
//! Converters tend to append a suffix to the asset id (`1234_en.wem`).
//! The patcher pairs files by exact name, so converted files are renamed
//! back to `<id>.wem` first.

use std::fs;
use std::path::Path;

use crate::config::ScanConfig;
use crate::error::Result;
use crate::report::{RenameSummary, Renamed, Skipped};
use crate::scan;

/// Name with everything from the first `_` up to the extension removed
///
/// Returns `None` when the name has no `_` before the extension, or when
/// the extension does not match `scan`.
pub fn normalized_name(name: &str, scan: &ScanConfig) -> Option<String> {
    if !scan.matches(Path::new(name)) {
        return None;
    }
    let dot = name.rfind('.')?;
    let (stem, ext) = name.split_at(dot);
    let (base, _) = stem.split_once('_')?;
    Some(format!("{}{}", base, ext))
}

/// Rename every matching file in `dir` to its normalised name
///
/// A rename whose target already exists is recorded as a conflict and
/// skipped.
pub fn rename_all(dir: &Path, scan: &ScanConfig) -> Result<RenameSummary> {
    let mut summary = RenameSummary::default();

    for path in scan::list_files(dir, scan)? {
        let name = scan::file_name(&path);
        let Some(target_name) = normalized_name(&name, scan) else {
            continue;
        };

        let target = path.with_file_name(&target_name);
        let entry = Renamed {
            from: name,
            to: target_name,
        };

        if target.exists() {
            log::warn!("Not renaming {}: {} already exists", entry.from, entry.to);
            summary.conflicts.push(entry);
            continue;
        }

        match fs::rename(&path, &target) {
            Ok(()) => {
                log::info!("Renamed: {} -> {}", entry.from, entry.to);
                summary.renamed.push(entry);
            }
            Err(e) => {
                log::error!("Failed to rename {}: {}", entry.from, e);
                summary.failed.push(Skipped {
                    name: entry.from,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(summary)
}
