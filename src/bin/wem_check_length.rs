//! Audio length checker
//!
//! Compares the audio payload of every original `.wem` file with its
//! converted counterpart and lists converted files that came out longer.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use wem_tools::batch;
use wem_tools::cli::{self, CommonArgs};
use wem_tools::config::{DirConfig, DEFAULT_LENGTH_REPORT};
use wem_tools::report;

#[derive(Parser, Debug)]
#[command(name = "wem-check-length", version)]
#[command(about = "List converted .wem files whose audio data is longer than the original")]
struct Args {
    /// Directory with the original .wem files
    #[arg(long, default_value = "orig")]
    orig_dir: PathBuf,

    /// Directory with the converted .wem files
    #[arg(long, default_value = "converted")]
    converted_dir: PathBuf,

    /// Report file listing oversized converted files
    #[arg(long, default_value = DEFAULT_LENGTH_REPORT)]
    output_txt: PathBuf,

    /// Also write the report as JSON
    #[cfg(feature = "diagnostics")]
    #[arg(long)]
    json: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn run(args: &Args) -> Result<()> {
    let dirs = DirConfig {
        original: args.orig_dir.clone(),
        converted: args.converted_dir.clone(),
        ..DirConfig::default()
    };
    let config = args.common.config(dirs, args.output_txt.clone(), false);
    config.scan.validate()?;

    println!("Scanning directories...");
    let report = batch::check_lengths(&config)?;

    for check in &report.checked {
        println!("Checking {}:", check.name);
        println!("  Original audio length: {} bytes", check.original_len);
        println!("  Converted audio length: {} bytes", check.converted_len);
        if check.is_oversized() {
            println!("  Warning: Converted file is longer than original");
        } else {
            println!("  OK: Converted file is not longer");
        }
    }
    for skip in &report.skipped {
        println!("Skipping {}: {}", skip.name, skip.reason);
    }

    report::write_text(&config.report_path, &report.render())?;
    #[cfg(feature = "diagnostics")]
    if let Some(path) = &args.json {
        report::write_text(path, &report::to_json("length", &report)?)?;
    }

    let oversized = report.oversized_count();
    if oversized > 0 {
        println!(
            "Found {} oversized files. List saved to {}",
            oversized,
            config.report_path.display()
        );
    } else {
        println!(
            "No oversized converted files found. Empty list saved to {}",
            config.report_path.display()
        );
    }
    println!("Processing complete.");
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
