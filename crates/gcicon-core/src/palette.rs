//! 2bpp grayscale palette and the bitmap expander.

use tracing::trace;

use crate::bitmap::{IndexedBitmap, Rgba, RgbaImage};
use crate::error::DecodeError;

pub const WHITE: Rgba = 0xFFFF_FFFF;
pub const LIGHT_GRAY: Rgba = 0xFFC0_C0C0;
pub const DARK_GRAY: Rgba = 0xFF80_8080;
pub const BLACK: Rgba = 0xFF00_0000;

/// Colour for each 2-bit index.
pub const GC_PALETTE: [Rgba; 4] = [WHITE, LIGHT_GRAY, DARK_GRAY, BLACK];

/// Decode a packed 2bpp bitmap into an upright RGBA image.
///
/// Bitmaps are stored column-major relative to the screen, so after the
/// palette lookup the pixels are rotated 270 degrees and flipped
/// horizontally into regular raster order.
pub fn expand_gc(
    indexed: IndexedBitmap<'_>,
    width: usize,
    height: usize,
) -> Result<RgbaImage, DecodeError> {
    let packed_len = IndexedBitmap::packed_len(width, height);
    let bytes = indexed.bytes();
    if bytes.len() < packed_len {
        return Err(DecodeError::Truncated {
            what: "indexed bitmap",
            offset: 0,
            expected: packed_len,
            actual: bytes.len(),
        });
    }

    let scratch: Vec<Rgba> = IndexedBitmap::new(&bytes[..packed_len])
        .indices()
        .map(|index| GC_PALETTE[index as usize])
        .collect();

    let mut out = RgbaImage::new(width, height);
    rotate270_flip_into(&scratch, &mut out)?;

    trace!(width, height, "expanded 2bpp bitmap");
    Ok(out)
}

/// `out[y][w - x - 1] = src[y + (w - x - 1) * h]` for every cell of `out`.
///
/// `src` holds the pixels in storage order and must be exactly
/// `out.width() * out.height()` long. Every cell of `out` is written once.
pub fn rotate270_flip_into(src: &[Rgba], out: &mut RgbaImage) -> Result<(), DecodeError> {
    let (w, h) = (out.width(), out.height());
    if src.len() != w * h {
        return Err(DecodeError::Truncated {
            what: "unpacked bitmap",
            offset: 0,
            expected: w * h,
            actual: src.len(),
        });
    }

    let dst = out.pixels_mut();
    for y in 0..h {
        for x in 0..w {
            let col = w - x - 1;
            dst[y * w + col] = src[y + col * h];
        }
    }
    Ok(())
}
