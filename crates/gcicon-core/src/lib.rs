//! game.com icon decoder.
//!
//! The pipeline is:
//! 1. [`RomHeader::locate`] reads the cartridge header (with bad-dump fallback).
//! 2. [`locator::locate_icon`] turns the header into an [`IconLocation`].
//! 3. Compressed icons go through [`rle::decompress_until`]; bank icons are used as stored.
//! 4. [`palette::expand_gc`] turns the packed 2bpp bitmap into upright RGBA.
//! 5. [`compositor::crop_upscale_icon`] cuts out the 64x64 icon, optionally at 2x.
//!
//! [`decode_icon`] runs all of it and returns the finished [`RgbaImage`]. File
//! I/O and image encoding are left to the caller.

pub mod bitmap;
pub mod compositor;
pub mod error;
pub mod header;
pub mod locator;
pub mod palette;
pub mod rle;

use tracing::debug;

pub use bitmap::{IndexedBitmap, Rgba, RgbaImage};
pub use compositor::{ICON_SIZE, IMAGE_BANK_SIZE, IconSource, UPSCALED_ICON_SIZE};
pub use error::DecodeError;
pub use header::{IconFlags, RomHeader};
pub use locator::{ICON_WINDOW_LEN, IconLocation};

/// Knobs for [`decode_icon`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Produce a 128x128 icon instead of 64x64.
    pub upscale: bool,
    /// Clip an RLE run that overruns the decode buffer instead of failing.
    pub lenient: bool,
}

/// Decode the icon of `rom` described by `header`.
///
/// Returns a 64x64 image, or 128x128 when [`DecodeOptions::upscale`] is set.
pub fn decode_icon(
    rom: &[u8],
    header: &RomHeader,
    options: DecodeOptions,
) -> Result<RgbaImage, DecodeError> {
    let location = locator::locate_icon(header)?;
    let window = location.window(rom)?;

    let expanded = match location {
        IconLocation::Compressed { offset } => {
            // The window usually runs past the payload; decoding ends with the icon.
            let icon_len = IndexedBitmap::packed_len(ICON_SIZE, ICON_SIZE);
            let mut decoded = vec![0u8; ICON_WINDOW_LEN];
            let written = if options.lenient {
                rle::decompress_truncating(window, &mut decoded[..icon_len])
            } else {
                rle::decompress_until(window, &mut decoded, icon_len)?
            };
            debug!(offset, written, window = window.len(), "decompressed icon");

            if written < icon_len {
                debug!(written, "short icon stream, remainder stays white");
            }
            palette::expand_gc(IndexedBitmap::new(&decoded), ICON_SIZE, ICON_SIZE)?
        }
        IconLocation::Bank { .. } => {
            palette::expand_gc(IndexedBitmap::new(window), IMAGE_BANK_SIZE, IMAGE_BANK_SIZE)?
        }
    };

    let side = compositor::output_size(options.upscale);
    let mut pixels = vec![0; side * side];
    compositor::crop_upscale_icon(&expanded, &mut pixels, options.upscale, location.source())?;

    RgbaImage::from_pixels(side, side, pixels)
}

#[cfg(test)]
mod tests {
    use ctor::ctor;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    #[ctor]
    fn init_tracing() {
        let subscriber = FmtSubscriber::builder()
            .with_file(true)
            .with_line_number(true)
            .with_max_level(Level::DEBUG)
            .pretty()
            .finish();
        tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
    }
}
