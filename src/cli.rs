//! Shared command line plumbing for the `wem-*` binaries

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;

use crate::config::{Config, DirConfig, ScanConfig};

/// Flags every batch tool accepts
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Worker threads for per-file processing
    #[arg(short = 'j', long, default_value_t = 1)]
    pub jobs: usize,

    /// File extension to pick up
    #[arg(long, default_value = "wem")]
    pub extension: String,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Wait for Enter before exiting (keeps a double-clicked console open)
    #[arg(long)]
    pub pause: bool,
}

impl CommonArgs {
    /// Base configuration for a run with these flags
    pub fn config(&self, dirs: DirConfig, report_path: PathBuf, recursive: bool) -> Config {
        Config {
            dirs,
            scan: ScanConfig {
                extension: self.extension.clone(),
                recursive,
                jobs: self.jobs,
            },
            report_path,
            ..Config::new()
        }
    }
}

/// Install `env_logger`, honouring `RUST_LOG` when set
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}

/// Block until the user presses Enter
pub fn wait_for_enter(pause: bool) {
    if !pause {
        return;
    }
    print!("Press Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
