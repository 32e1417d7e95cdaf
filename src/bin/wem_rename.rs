//! Strip converter suffixes from `.wem` file names
//!
//! `1234_en.wem` becomes `1234.wem` so converted files pair up with the
//! originals by name.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use wem_tools::cli;
use wem_tools::config::ScanConfig;
use wem_tools::rename;

#[derive(Parser, Debug)]
#[command(name = "wem-rename", version)]
#[command(about = "Rename <id>_<suffix>.wem files to <id>.wem")]
struct Args {
    /// Folder to rename files in
    #[arg(default_value = ".")]
    folder: PathBuf,

    /// File extension to pick up
    #[arg(long, default_value = "wem")]
    extension: String,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,

    /// Wait for Enter before exiting
    #[arg(long)]
    pause: bool,
}

fn run(args: &Args) -> Result<()> {
    let scan = ScanConfig {
        extension: args.extension.clone(),
        ..ScanConfig::default()
    };
    scan.validate()?;

    let summary = rename::rename_all(&args.folder, &scan)?;
    for entry in &summary.renamed {
        println!("Renamed: {} → {}", entry.from, entry.to);
    }
    print!("{}", summary);
    Ok(())
}

fn main() {
    let args = Args::parse();
    cli::init_logger(args.verbose);

    let result = run(&args);
    if let Err(err) = &result {
        eprintln!("Error: {:#}", err);
    }

    cli::wait_for_enter(args.pause);
    if result.is_err() {
        process::exit(1);
    }
}
