//! Integration tests for the batch drivers
//!
//! These tests build original/converted directory trees on disk and run
//! the same entry points the command line tools use.

use std::fs;
use std::path::Path;

use wem_tools::batch;
use wem_tools::config::{Config, DirConfig};
use wem_tools::report;
use wem_tools::{SizeAdjustment, WemError, CHANNEL_AND_LENGTH};

/// Minimal container: 0x2c-byte header region ending in a `data` chunk
fn wem(header_byte: u8, audio: &[u8], padding: usize) -> Vec<u8> {
    let mut out = b"RIFF\0\0\0\0WAVE".to_vec();
    // fmt chunk large enough to cover offsets 0x26..0x2c
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&24u32.to_le_bytes());
    let mut fmt = vec![0u8; 24];
    fmt[0x26 - 20] = header_byte;
    fmt[0x28 - 20] = 0x04;
    fmt[0x29 - 20] = 0x00;
    out.extend_from_slice(&fmt);

    let size = audio.len() + padding;
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(size as u32).to_le_bytes());
    out.extend_from_slice(audio);
    out.resize(out.len() + padding, 0);

    let declared = (out.len() - 8) as u32;
    out[4..8].copy_from_slice(&declared.to_le_bytes());
    out
}

fn config_in(root: &Path) -> Config {
    let mut config = Config::new();
    config.dirs = DirConfig {
        original: root.join("orig"),
        converted: root.join("converted"),
        patched: root.join("patched"),
    };
    config.report_path = root.join("report.txt");
    fs::create_dir_all(&config.dirs.original).unwrap();
    fs::create_dir_all(&config.dirs.converted).unwrap();
    config
}

#[test]
fn test_check_lengths_flags_only_longer_audio() {
    let root = tempfile::tempdir().unwrap();
    let config = config_in(root.path());
    let dirs = &config.dirs;

    fs::write(dirs.original.join("1.wem"), wem(1, &[1, 2, 3], 10)).unwrap();
    fs::write(dirs.converted.join("1.wem"), wem(1, &[1, 2, 3, 4, 5], 0)).unwrap();
    fs::write(dirs.original.join("2.wem"), wem(1, &[1, 2, 3], 0)).unwrap();
    fs::write(dirs.converted.join("2.wem"), wem(1, &[9], 40)).unwrap();
    fs::write(dirs.original.join("3.wem"), wem(1, &[1], 0)).unwrap();
    fs::write(dirs.original.join("4.wem"), b"not a riff file").unwrap();
    fs::write(dirs.converted.join("4.wem"), wem(1, &[1], 0)).unwrap();

    let report = batch::check_lengths(&config).unwrap();

    assert_eq!(report.checked.len(), 2);
    let oversized: Vec<&str> = report.oversized().map(|c| c.name.as_str()).collect();
    assert_eq!(oversized, vec!["1.wem"]);
    assert_eq!(report.checked[0].original_len, 3);
    assert_eq!(report.checked[0].converted_len, 5);

    let skipped: Vec<&str> = report.skipped.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(skipped, vec!["3.wem", "4.wem"]);
    assert!(report.skipped[0].reason.contains("Counterpart file not found"));

    report::write_text(&config.report_path, &report.render()).unwrap();
    let text = fs::read_to_string(&config.report_path).unwrap();
    assert!(text.starts_with("Oversized converted .wem files"));
    assert!(text.lines().nth(1).unwrap().ends_with("1.wem"));
}

#[test]
fn test_check_lengths_missing_directory() {
    let root = tempfile::tempdir().unwrap();
    let mut config = config_in(root.path());
    config.dirs.converted = root.path().join("missing");

    assert!(matches!(
        batch::check_lengths(&config),
        Err(WemError::MissingDirectory(_))
    ));
}

#[test]
fn test_patch_all_pads_truncates_and_copies_header() {
    let root = tempfile::tempdir().unwrap();
    let mut config = config_in(root.path());
    config.scan.jobs = 4;
    let dirs = config.dirs.clone();

    let original = wem(7, &[1, 2, 3, 4], 60);
    let mut shorter = wem(0, &[5, 6], 0);
    shorter[0x28] = 0x00;
    let longer = wem(0, &[1; 200], 0);

    fs::write(dirs.original.join("a.wem"), &original).unwrap();
    fs::write(dirs.converted.join("a.wem"), &shorter).unwrap();
    fs::write(dirs.original.join("b.wem"), &original).unwrap();
    fs::write(dirs.converted.join("b.wem"), &longer).unwrap();
    fs::write(dirs.original.join("c.wem"), &original).unwrap();
    fs::write(dirs.converted.join("c.wem"), b"RIFF").unwrap();

    let summary = batch::patch_all(&config).unwrap();

    assert_eq!(summary.processed_count(), 2);
    assert_eq!(summary.failed_count(), 1);
    assert_eq!(summary.failed[0].name, "c.wem");
    assert!(!dirs.patched.join("c.wem").exists());

    let a = fs::read(dirs.patched.join("a.wem")).unwrap();
    assert_eq!(a.len(), original.len());
    assert_eq!(&a[0x28..0x2c], &original[0x28..0x2c]);
    assert_eq!(a[0x26], 0, "length descriptor leaves 0x26 alone");
    assert!(a[shorter.len()..].iter().all(|&b| b == 0));
    assert!(matches!(summary.patched[0].adjustment, SizeAdjustment::Padded(_)));
    assert_eq!(summary.patched[0].header_hex, "04000000");

    let b = fs::read(dirs.patched.join("b.wem")).unwrap();
    assert_eq!(b.len(), original.len());
    assert_eq!(&b[..], &longer[..original.len()]);
    assert_eq!(summary.truncated().count(), 1);
}

#[test]
fn test_patch_all_with_channel_descriptor() {
    let root = tempfile::tempdir().unwrap();
    let mut config = config_in(root.path());
    config.descriptor = CHANNEL_AND_LENGTH;
    let dirs = config.dirs.clone();

    fs::write(dirs.original.join("1.wem"), wem(2, &[1], 0)).unwrap();
    fs::write(dirs.converted.join("1.wem"), wem(1, &[1], 0)).unwrap();

    let summary = batch::patch_all(&config).unwrap();

    assert_eq!(summary.processed_count(), 1);
    let patched = fs::read(dirs.patched.join("1.wem")).unwrap();
    assert_eq!(patched[0x26], 2);
}

#[test]
fn test_patch_all_refuses_to_overwrite_inputs() {
    let root = tempfile::tempdir().unwrap();
    let mut config = config_in(root.path());
    config.dirs.patched = config.dirs.converted.clone();

    assert!(matches!(batch::patch_all(&config), Err(WemError::Config(_))));
}

#[test]
fn test_check_bytes_recursive() {
    let root = tempfile::tempdir().unwrap();
    let mut config = config_in(root.path());
    config.scan.recursive = true;
    let folder = config.dirs.original.clone();
    fs::create_dir_all(folder.join("sfx")).unwrap();

    let mut bad = wem(0, &[1], 0);
    bad[0x29] = 0x01;
    fs::write(folder.join("good.wem"), wem(0, &[1], 0)).unwrap();
    fs::write(folder.join("sfx").join("bad.wem"), &bad).unwrap();
    fs::write(folder.join("sfx").join("tiny.wem"), b"RIFF").unwrap();

    let report = batch::check_bytes(&config).unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.valid_count(), 1);
    assert_eq!(report.invalid[0].path, Path::new("sfx").join("bad.wem"));
    assert_eq!(report.invalid[0].error, "Invalid bytes: 0x28=04, 0x29=01");
    assert!(report.invalid[1].error.starts_with("File too short"));

    let text = report.render();
    assert!(text.starts_with("Found 2 invalid .wem files"));
}

#[test]
fn test_check_bytes_empty_folder() {
    let root = tempfile::tempdir().unwrap();
    let config = config_in(root.path());

    let report = batch::check_bytes(&config).unwrap();

    assert_eq!(report.total, 0);
    assert!(report.render().starts_with("No .wem files found"));
}
