mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gcicon_core::{DecodeError, DecodeOptions, RomHeader, decode_icon};
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

use crate::error::CliError;

/// game.com icon extractor
#[derive(Parser, Debug)]
#[command(name = "gcicon")]
#[command(about = "Extract the menu icon of a game.com ROM as a PNG", long_about = None)]
struct Args {
    /// ROM image to read
    rom: PathBuf,

    /// Output PNG (defaults to `<ROM>-<title>.png`)
    output: Option<PathBuf>,

    /// Upscale the 64x64 icon to 128x128 (emoji size)
    #[arg(short, long)]
    upscale: bool,

    /// Clip compressed icons that overrun the decode buffer instead of failing
    #[arg(long)]
    lenient: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match run(&args) {
        Ok(path) => {
            info!("Done! Wrote {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("{err}");
            if matches!(err, CliError::Decode(DecodeError::CodecOverrun { .. })) {
                info!("retry with --lenient to clip the stream instead");
            }
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}

fn run(args: &Args) -> Result<PathBuf, CliError> {
    let rom = std::fs::read(&args.rom).map_err(|source| CliError::ReadRom {
        path: args.rom.clone(),
        source,
    })?;

    let header = RomHeader::locate(&rom)?;
    debug!(
        title = %header.title_str(),
        system = %header.system_str(),
        base = header.base,
        flags = header.flags,
        "read ROM header"
    );

    let options = DecodeOptions {
        upscale: args.upscale,
        lenient: args.lenient,
    };
    let icon = decode_icon(&rom, &header, options)?;

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| output::default_output_path(&args.rom, &header));
    output::write_png(&path, &icon)?;
    Ok(path)
}
