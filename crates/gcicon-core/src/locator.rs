//! Turns header fields into ROM offsets.
//!
//! Compressed icons are addressed the way the CPU sees them: a bank number
//! counted from [`FIRST_BANK`] plus an address inside the window the bank is
//! mapped at ([`BANK_LOAD_ADDR`]). Uncompressed icons live inside a full
//! 256x256 image bank; the header names the bank and the icon's origin in it.

use tracing::debug;

use crate::bitmap::IndexedBitmap;
use crate::compositor::{ICON_SIZE, IMAGE_BANK_SIZE, IconSource};
use crate::error::DecodeError;
use crate::header::RomHeader;

/// Size of a CPU-visible ROM bank.
pub const BANK_LEN: usize = 0x2000;

/// CPU address the icon bank is mapped at.
pub const BANK_LOAD_ADDR: usize = 0x6000;

/// Bank number of the first ROM bank.
pub const FIRST_BANK: usize = 0x20;

/// Bytes read for a compressed icon. The real compressed length is not
/// stored anywhere, so this is the raw size of a 64x64 icon at one byte per
/// pixel, which comfortably covers any payload.
pub const ICON_WINDOW_LEN: usize = ICON_SIZE * ICON_SIZE;

/// Packed size of one 256x256 image bank.
pub const IMAGE_BANK_LEN: usize = IndexedBitmap::packed_len(IMAGE_BANK_SIZE, IMAGE_BANK_SIZE);

/// Where the icon bytes are and how to interpret them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconLocation {
    /// RLE stream starting at `offset`, read through a fixed window.
    Compressed { offset: usize },
    /// Packed image bank at `offset`; the icon is the window at (`x`, `y`).
    Bank { offset: usize, x: u8, y: u8 },
}

impl IconLocation {
    pub fn offset(&self) -> usize {
        match *self {
            IconLocation::Compressed { offset } | IconLocation::Bank { offset, .. } => offset,
        }
    }

    /// Number of ROM bytes the decoder reads from [`IconLocation::offset`].
    pub(crate) fn len(&self) -> usize {
        match self {
            IconLocation::Compressed { .. } => ICON_WINDOW_LEN,
            IconLocation::Bank { .. } => IMAGE_BANK_LEN,
        }
    }

    /// Region of the decoded image holding the icon.
    pub fn source(&self) -> IconSource {
        match *self {
            IconLocation::Compressed { .. } => IconSource::Standalone,
            IconLocation::Bank { x, y, .. } => IconSource::Bank { x, y },
        }
    }

    /// Slice the bytes this location refers to out of `rom`.
    ///
    /// A compressed window is cut short by the end of the ROM; only a start
    /// past the end is an error. An image bank must be present in full.
    pub fn window<'a>(&self, rom: &'a [u8]) -> Result<&'a [u8], DecodeError> {
        let offset = self.offset();
        let len = self.len();
        let truncated = |what: &'static str| DecodeError::Truncated {
            what,
            offset,
            expected: len,
            actual: rom.len().saturating_sub(offset),
        };

        match self {
            IconLocation::Compressed { .. } => {
                if offset >= rom.len() {
                    return Err(truncated("compressed icon"));
                }
                let end = offset.saturating_add(len).min(rom.len());
                if end - offset < len {
                    debug!(
                        offset,
                        available = end - offset,
                        "compressed icon window clamped to ROM end"
                    );
                }
                Ok(&rom[offset..end])
            }
            IconLocation::Bank { .. } => offset
                .checked_add(len)
                .and_then(|end| rom.get(offset..end))
                .ok_or_else(|| truncated("image bank")),
        }
    }
}

/// Compute where the icon of `header` lives.
pub fn locate_icon(header: &RomHeader) -> Result<IconLocation, DecodeError> {
    if !header.has_icon() {
        return Err(DecodeError::NoIconPresent);
    }

    let location = if header.icon_compressed() {
        IconLocation::Compressed {
            offset: compressed_offset(header.icon_bank, header.icon_x, header.icon_y)?,
        }
    } else {
        IconLocation::Bank {
            offset: bank_offset(header.base, header.icon_bank, header.entry_bank)?,
            x: header.icon_x,
            y: header.icon_y,
        }
    };

    debug!(?location, base = header.base, "icon located");
    Ok(location)
}

/// `(bank - 0x20) * 0x2000 + ((hi << 8 | lo) - 0x6000)`
fn compressed_offset(bank: u8, hi: u8, lo: u8) -> Result<usize, DecodeError> {
    let bank_index = (bank as usize)
        .checked_sub(FIRST_BANK)
        .ok_or(DecodeError::InvalidOffset("icon bank below first ROM bank"))?;
    let address = ((hi as usize) << 8) | lo as usize;
    let in_bank = address
        .checked_sub(BANK_LOAD_ADDR)
        .ok_or(DecodeError::InvalidOffset("icon address below bank window"))?;
    Ok(bank_index * BANK_LEN + in_bank)
}

/// `base + (icon_bank - entry_bank / 2) * IMAGE_BANK_LEN`, one 16384-byte bank per step
///
/// The halving of `entry_bank` is how the format relates program banks to
/// image banks; it is kept exactly, integer truncation included.
fn bank_offset(base: usize, icon_bank: u8, entry_bank: u8) -> Result<usize, DecodeError> {
    let bank_index = (icon_bank as usize)
        .checked_sub(entry_bank as usize / 2)
        .ok_or(DecodeError::InvalidOffset("icon bank below entry bank"))?;
    Ok(base + bank_index * IMAGE_BANK_LEN)
}
