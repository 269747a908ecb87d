use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use gcicon_core::{RgbaImage, RomHeader};

use crate::error::CliError;

/// `<rom path>-<title>.png`, next to the ROM.
pub fn default_output_path(rom: &Path, header: &RomHeader) -> PathBuf {
    let mut name = rom.as_os_str().to_os_string();
    name.push("-");
    name.push(header.title_str());
    name.push(".png");
    PathBuf::from(name)
}

/// Encode `image` as an 8-bit RGBA PNG at `path`.
pub fn write_png(path: &Path, image: &RgbaImage) -> Result<(), CliError> {
    let file = File::create(path).map_err(|source| CliError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;

    let mut encoder = png::Encoder::new(
        BufWriter::new(file),
        image.width() as u32,
        image.height() as u32,
    );
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.to_rgba_bytes())?;
    writer.finish()?;
    Ok(())
}
