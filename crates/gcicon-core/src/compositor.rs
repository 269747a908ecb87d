//! Icon crop and 2x nearest-neighbour upscale.

use crate::bitmap::{Rgba, RgbaImage};
use crate::error::DecodeError;

/// Side length of an icon in pixels.
pub const ICON_SIZE: usize = 64;

/// Side length of an upscaled icon.
pub const UPSCALED_ICON_SIZE: usize = ICON_SIZE * 2;

/// Side length of a decoded image bank.
pub const IMAGE_BANK_SIZE: usize = 256;

/// Where the icon pixels sit inside the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSource {
    /// The source is exactly one 64x64 icon.
    Standalone,
    /// The icon is a 64x64 window of a 256x256 image bank, origin at (`x`, `y`).
    Bank { x: u8, y: u8 },
}

/// Side length of the icon produced for the given upscale mode.
pub const fn output_size(upscale: bool) -> usize {
    if upscale {
        UPSCALED_ICON_SIZE
    } else {
        ICON_SIZE
    }
}

/// Copy the 64x64 icon out of `source` into `dest`, doubling it in both
/// directions when `upscale` is set. Returns the side length written.
///
/// `dest` may be larger than needed; only the leading `side * side` pixels
/// are written.
pub fn crop_upscale_icon(
    source: &RgbaImage,
    dest: &mut [Rgba],
    upscale: bool,
    region: IconSource,
) -> Result<usize, DecodeError> {
    let side = output_size(upscale);
    if dest.len() < side * side {
        return Err(DecodeError::OutputTooSmall {
            expected: side * side,
            actual: dest.len(),
        });
    }

    let expected = match region {
        IconSource::Standalone => ICON_SIZE,
        IconSource::Bank { .. } => IMAGE_BANK_SIZE,
    };
    if source.width() != expected || source.height() != expected {
        return Err(DecodeError::DimensionMismatch {
            expected_w: expected,
            expected_h: expected,
            actual_w: source.width(),
            actual_h: source.height(),
        });
    }

    let (ox, oy) = match region {
        IconSource::Standalone => (0u8, 0u8),
        IconSource::Bank { x, y } => (x, y),
    };
    let pixels = source.pixels();
    let stride = source.stride();
    let mut out = 0usize;

    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let src_idx = (oy as usize + y) * stride + ox as usize + x;
            let px = *pixels
                .get(src_idx)
                .ok_or(DecodeError::RegionOutOfBounds { x: ox, y: oy })?;

            if upscale {
                dest[out] = px;
                dest[out + 1] = px;
                out += 2;
            } else {
                dest[out] = px;
                out += 1;
            }
        }

        if upscale {
            dest.copy_within(out - UPSCALED_ICON_SIZE..out, out);
            out += UPSCALED_ICON_SIZE;
        }
    }

    debug_assert_eq!(out, side * side);
    Ok(side)
}
