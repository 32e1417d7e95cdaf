//! Batch header patcher
//!
//! For every `.wem` file in the original directory, copies the header bytes
//! selected by the patch descriptor onto the converted file of the same
//! name, pads or truncates it to the original size and writes the result
//! to the patched directory.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use wem_tools::batch;
use wem_tools::cli::{self, CommonArgs};
use wem_tools::config::DirConfig;
use wem_tools::patch::PatchDescriptor;

#[derive(Parser, Debug)]
#[command(name = "wem-patch", version)]
#[command(about = "Batch patch .wem files using original and converted directories")]
struct Args {
    /// Directory with the original .wem files
    #[arg(long, default_value = "orig")]
    orig_dir: PathBuf,

    /// Directory with the converted .wem files
    #[arg(long, default_value = "converted")]
    converted_dir: PathBuf,

    /// Output directory for patched .wem files
    #[arg(long, default_value = "patched")]
    patched_dir: PathBuf,

    /// Header ranges to copy: `length` (0x28-0x2b) or `channel-length` (0x26, 0x28-0x2b)
    #[arg(long, default_value = "length")]
    descriptor: String,

    /// Also patch files in subdirectories
    #[arg(short, long)]
    recursive: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn run(args: &Args) -> Result<()> {
    let dirs = DirConfig {
        original: args.orig_dir.clone(),
        converted: args.converted_dir.clone(),
        patched: args.patched_dir.clone(),
    };
    let mut config = args.common.config(dirs, PathBuf::new(), args.recursive);
    config.descriptor = PatchDescriptor::from_name(&args.descriptor)?;
    config.validate()?;

    println!("Starting batch patching of .wem files...");
    println!("Patching {}", config.descriptor);
    let summary = batch::patch_all(&config)?;

    for file in summary.truncated() {
        println!("Warning: {} was truncated to the original size", file.name);
    }
    println!();
    println!("Batch patching completed.");
    print!("{}", summary);
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
