//! Header byte checker
//!
//! Walks a folder recursively and lists every `.wem` file whose header
//! bytes at 0x28 and 0x29 are not `04 00`.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use wem_tools::batch;
use wem_tools::cli::{self, CommonArgs};
use wem_tools::config::{DirConfig, DEFAULT_BYTES_REPORT};
use wem_tools::report;
use wem_tools::WemError;

/// Parse a byte offset or value given as decimal or `0x`-prefixed hex
fn parse_number(s: &str) -> Result<usize, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{}': {}", s, e))
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let value = parse_number(s)?;
    u8::try_from(value).map_err(|_| format!("{} does not fit in a byte", s))
}

#[derive(Parser, Debug)]
#[command(name = "wem-check-bytes", version)]
#[command(about = "Check .wem files for bytes at 0x28=04 and 0x29=00")]
struct Args {
    /// Folder containing .wem files, searched recursively
    #[arg(long, default_value = "orig")]
    folder: PathBuf,

    /// Report file listing invalid files
    #[arg(long, default_value = DEFAULT_BYTES_REPORT)]
    output_txt: PathBuf,

    /// Only look at the top level of the folder
    #[arg(long)]
    flat: bool,

    /// First checked offset
    #[arg(long, default_value = "0x28", value_parser = parse_number)]
    offset_a: usize,

    /// Expected value at the first offset
    #[arg(long, default_value = "0x04", value_parser = parse_byte)]
    expect_a: u8,

    /// Second checked offset
    #[arg(long, default_value = "0x29", value_parser = parse_number)]
    offset_b: usize,

    /// Expected value at the second offset
    #[arg(long, default_value = "0x00", value_parser = parse_byte)]
    expect_b: u8,

    #[command(flatten)]
    common: CommonArgs,
}

fn run(args: &Args) -> Result<()> {
    let dirs = DirConfig {
        original: args.folder.clone(),
        ..DirConfig::default()
    };
    let mut config = args.common.config(dirs, args.output_txt.clone(), !args.flat);
    config.expectation.offset_a = args.offset_a;
    config.expectation.expected_a = args.expect_a;
    config.expectation.offset_b = args.offset_b;
    config.expectation.expected_b = args.expect_b;
    config.scan.validate()?;
    config.expectation.validate()?;

    let report = match batch::check_bytes(&config) {
        Ok(report) => report,
        Err(WemError::MissingDirectory(dir)) => {
            let text = format!("Folder does not exist: {}\n", dir.display());
            report::write_text(&config.report_path, &text)?;
            anyhow::bail!("Folder does not exist: {}", dir.display());
        }
        Err(err) => return Err(err.into()),
    };

    report::write_text(&config.report_path, &report.render())?;

    if report.total == 0 {
        println!("No .wem files found in folder or subfolders: {}", args.folder.display());
    } else if report.invalid.is_empty() {
        println!("Checked {} files. All files are valid!", report.total);
    } else {
        for file in &report.invalid {
            println!("Invalid file: {} - {}", file.path.display(), file.error);
        }
        println!(
            "Found {} invalid files out of {}. Results written to {}",
            report.invalid.len(),
            report.total,
            config.report_path.display()
        );
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    cli::init_logger(args.common.verbose);

    let result = run(&args);
    if let Err(err) = &result {
        eprintln!("Error: {:#}", err);
    }

    cli::wait_for_enter(args.common.pause);
    if result.is_err() {
        process::exit(1);
    }
}
