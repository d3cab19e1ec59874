//! `njv`: view BJData, UBJSON and JSON files as bounded text.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bjdata::limits::{DEFAULT_MAX_ITEMS, DEFAULT_MAX_STRING_LEN};
use bjdata::{decode_value, render, ByteOrder, DecodeOptions, Reader, RenderOptions};
use clap::Parser;
use tracing::{debug, Level};

mod hex;
mod json;

/// Bytes shown by `--debug` before decoding.
const DEBUG_DUMP_LEN: usize = 256;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "BJData/JSON viewer. Use --big-endian for UBJSON/BJData Draft 1 files.")]
struct Cli {
    /// File to view
    file: PathBuf,

    /// Items shown before arrays, objects and records are previewed
    #[arg(long, default_value_t = DEFAULT_MAX_ITEMS)]
    max_data: usize,

    /// Characters shown before strings are collapsed
    #[arg(long, default_value_t = DEFAULT_MAX_STRING_LEN)]
    max_str: usize,

    /// Trace decoding to stderr and dump the first bytes
    #[arg(long)]
    debug: bool,

    /// Big-endian numbers (UBJSON / BJData Draft 1)
    #[arg(long, visible_alias = "be")]
    big_endian: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let data = fs::read(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    println!("# File: {} ({} bytes)", cli.file.display(), data.len());
    if cli.big_endian {
        println!("# Mode: Big-endian (UBJSON/BJData Draft 1)");
    }
    println!();

    if cli.debug {
        println!("# First {} bytes:", DEBUG_DUMP_LEN);
        for line in hex::lines(&data, 0, DEBUG_DUMP_LEN) {
            println!("{}", line);
        }
        println!();
    }

    let render_options = RenderOptions {
        max_items: cli.max_data,
        max_string_len: cli.max_str,
    };

    if json::looks_like_json(&data) {
        match json::parse(&data) {
            Ok(value) => {
                println!("{}", render(&value, &render_options));
                return Ok(ExitCode::SUCCESS);
            }
            Err(err) => debug!(error = %err, "JSON parse failed, decoding as BJData"),
        }
    }

    let order = if cli.big_endian { ByteOrder::Big } else { ByteOrder::Little };
    let options = DecodeOptions::default()
        .byte_order(order)
        .max_items(cli.max_data);
    let mut reader = Reader::with_byte_order(&data, order);

    match decode_value(&mut reader, &options) {
        Ok(value) => {
            println!("{}", render(&value, &render_options));
            if !reader.is_empty() {
                println!("\n# {} bytes remaining", reader.remaining_len());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let offset = err.offset();
            debug!(kind = err.kind().name(), offset, "decode failed");
            println!("Error at {}: {}", offset, err);
            let (start, end) = hex::window(data.len(), offset);
            println!("\nHex [{}:{}]:", start, end);
            for line in hex::lines(&data, start, end) {
                println!("{}", line);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::TRACE } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
