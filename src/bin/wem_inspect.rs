//! Print the chunk layout of a single `.wem` file
//!
//! Shows every chunk with its offset and size, the `data` payload extent
//! and the header bytes the patcher and validator look at.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wem_tools::cli;
use wem_tools::patch::CHANNEL_AND_LENGTH;
use wem_tools::riff::{self, DATA_ID};
use wem_tools::validate::ByteExpectation;

#[derive(Parser, Debug)]
#[command(name = "wem-inspect", version)]
#[command(about = "Show the RIFF chunks and patchable header bytes of a .wem file")]
struct Args {
    /// File to inspect
    file: PathBuf,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    cli::init_logger(args.verbose);

    let data = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    println!("File: {}", args.file.display());
    println!("Size: {} bytes", data.len());

    let form = riff::form_tag(&data)?;
    let declared = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    println!("Form: {}", String::from_utf8_lossy(&form));
    println!("Declared RIFF size: {} (file size {})", declared, declared as usize + 8);
    println!();

    println!("Offset  Id    Size");
    println!("------  ----  ----------");
    for chunk in riff::chunks(&data)? {
        let overrun = if chunk.payload_offset() + chunk.size as usize > data.len() {
            "  (runs past end of file)"
        } else {
            ""
        };
        println!("0x{:04X}  {}  {:>10}{}", chunk.offset, chunk.id_str(), chunk.size, overrun);
    }
    println!();

    match riff::locate_data_chunk(&data) {
        Ok((offset, size)) => {
            let audio = riff::audio_payload_length(&data)?;
            println!("'{}' payload at 0x{:X}, {} bytes declared", String::from_utf8_lossy(DATA_ID), offset, size);
            println!("Audio length (without trailing padding): {} bytes", audio);
        }
        Err(err) => println!("{}", err),
    }

    if data.len() >= CHANNEL_AND_LENGTH.required_len() {
        let header: Vec<String> = CHANNEL_AND_LENGTH
            .ranges
            .iter()
            .map(|r| data[r.clone()].iter().map(|b| format!("{:02x}", b)).collect::<String>())
            .collect();
        println!("Header {}: {}", CHANNEL_AND_LENGTH, header.join(" "));
    }

    match ByteExpectation::default().check(&data) {
        Ok(()) => println!("Header check: OK"),
        Err(err) => println!("Header check: {}", err),
    }

    Ok(())
}
