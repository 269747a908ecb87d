//! Typed views over the flat pixel buffers that flow through the pipeline.

use crate::error::DecodeError;

/// Packed RGBA pixel; the little-endian bytes are R, G, B, A.
pub type Rgba = u32;

/// Four 2-bit palette indices per byte, most significant pair first.
#[derive(Debug, Clone, Copy)]
pub struct IndexedBitmap<'a> {
    bytes: &'a [u8],
}

impl<'a> IndexedBitmap<'a> {
    pub const PIXELS_PER_BYTE: usize = 4;

    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Packed length of a `width` x `height` bitmap.
    pub const fn packed_len(width: usize, height: usize) -> usize {
        (width * height) / Self::PIXELS_PER_BYTE
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Palette indices in storage order.
    pub fn indices(self) -> impl Iterator<Item = u8> + 'a {
        self.bytes
            .iter()
            .flat_map(|&b| [6u32, 4, 2, 0].map(move |shift| (b >> shift) & 0b11))
    }
}

/// Row-major RGBA image with the origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl RgbaImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Wrap an existing pixel buffer. `pixels.len()` must equal `width * height`.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Rgba>,
    ) -> Result<Self, DecodeError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(DecodeError::Truncated {
                what: "pixel buffer",
                offset: 0,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in pixels.
    pub fn stride(&self) -> usize {
        self.width
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    pub fn pixel(&self, row: usize, col: usize) -> Option<Rgba> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.pixels.get(row * self.width + col).copied()
    }

    /// RGBA8 bytes, ready for an image encoder.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_le_bytes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_msb_first() {
        let bitmap = IndexedBitmap::new(&[0b11_10_01_00, 0b00_00_00_11]);
        let indices: Vec<u8> = bitmap.indices().collect();
        assert_eq!(indices, vec![3, 2, 1, 0, 0, 0, 0, 3]);
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let mut img = RgbaImage::new(3, 2);
        img.pixels_mut()[5] = 7;
        assert_eq!(img.pixel(1, 2), Some(7));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 3), None);
    }

    #[test]
    fn rgba_bytes_are_channel_ordered() {
        let img = RgbaImage::filled(1, 1, 0xFF80_4020);
        assert_eq!(img.to_rgba_bytes(), vec![0x20, 0x40, 0x80, 0xFF]);
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(RgbaImage::from_pixels(2, 2, vec![0; 4]).is_ok());
        assert!(matches!(
            RgbaImage::from_pixels(2, 2, vec![0; 3]),
            Err(DecodeError::Truncated {
                expected: 4,
                actual: 3,
                ..
            })
        ));
    }
}
