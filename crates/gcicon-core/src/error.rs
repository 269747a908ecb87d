//! Decode error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Header flags say the ROM carries no icon.
    #[error("ROM has no icon")]
    NoIconPresent,

    /// A region of the ROM (or an input buffer) is shorter than the format requires.
    #[error("{what} at {offset:#x} expected {expected} bytes, got {actual}")]
    Truncated {
        what: &'static str,
        offset: usize,
        expected: usize,
        actual: usize,
    },

    /// The RLE stream expands past the supplied output capacity.
    #[error("RLE stream needs at least {required} bytes of output, capacity is {capacity}")]
    CodecOverrun { capacity: usize, required: usize },

    /// Header fields produce an address below the bank/load base.
    #[error("invalid icon offset: {0}")]
    InvalidOffset(&'static str),

    /// The icon window reaches outside the decoded image bank.
    #[error("icon region at ({x}, {y}) lies outside the image bank")]
    RegionOutOfBounds { x: u8, y: u8 },

    /// Destination buffer cannot hold the composited icon.
    #[error("output buffer holds {actual} pixels, {expected} required")]
    OutputTooSmall { expected: usize, actual: usize },

    /// Source image dimensions do not match what the stage expects.
    #[error("expected a {expected_w}x{expected_h} image, got {actual_w}x{actual_h}")]
    DimensionMismatch {
        expected_w: usize,
        expected_h: usize,
        actual_w: usize,
        actual_h: usize,
    },
}
