//! game.com ROM header.
//!
//! Every cartridge image starts with a 32-byte descriptor that names the
//! program entry point, the game title and where the menu icon lives. Bad
//! dumps have a blank header at offset 0 and a usable copy at
//! [`ALT_HEADER_OFFSET`]; image bank offsets in such a dump are shifted by
//! the same amount.
//!
//! # Layout
//!
//! | offset | len | field           |
//! |--------|-----|-----------------|
//! | 0x00   | 1   | `size`          |
//! | 0x01   | 1   | `entry_bank`    |
//! | 0x02   | 2   | `entry_address` (little-endian) |
//! | 0x04   | 1   | `flags`         |
//! | 0x05   | 9   | `system`        |
//! | 0x0E   | 1   | `icon_bank`     |
//! | 0x0F   | 1   | `icon_x`        |
//! | 0x10   | 1   | `icon_y`        |
//! | 0x11   | 9   | `title`         |
//! | 0x1A   | 2   | `game_id`       |
//! | 0x1C   | 1   | `security_code` |
//! | 0x1D   | 3   | padding         |

use bitflags::bitflags;
use tracing::debug;

use crate::error::DecodeError;

/// Size of one header copy in bytes.
pub const HEADER_LEN: usize = 32;

/// Location of the second header copy used by bad dumps.
pub const ALT_HEADER_OFFSET: usize = 0x40000;

const NAME_LEN: usize = 9;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IconFlags: u8 {
        const HAS_ICON        = 0b0000_0010;
        const COMPRESSED_ICON = 0b0000_1000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RomHeader {
    /// ROM offset this copy of the header was read from (0 or [`ALT_HEADER_OFFSET`]).
    pub base: usize,
    /// ROM size marker. 0x00 and 0xFF mean the copy is unusable.
    pub size: u8,
    pub entry_bank: u8,
    pub entry_address: u16,
    /// Raw flag byte; see [`RomHeader::icon_flags`].
    pub flags: u8,
    pub system: [u8; NAME_LEN],
    pub icon_bank: u8,
    /// High byte of the compressed icon address, or the icon column inside its image bank.
    pub icon_x: u8,
    /// Low byte of the compressed icon address, or the icon row inside its image bank.
    pub icon_y: u8,
    pub title: [u8; NAME_LEN],
    pub game_id: [u8; 2],
    pub security_code: u8,
}

impl RomHeader {
    /// Parse a single header copy. `base` records where `bytes` came from.
    pub fn parse(bytes: &[u8], base: usize) -> Result<Self, DecodeError> {
        if bytes.len() < HEADER_LEN {
            return Err(DecodeError::Truncated {
                what: "ROM header",
                offset: base,
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let mut system = [0u8; NAME_LEN];
        system.copy_from_slice(&bytes[0x05..0x05 + NAME_LEN]);
        let mut title = [0u8; NAME_LEN];
        title.copy_from_slice(&bytes[0x11..0x11 + NAME_LEN]);

        Ok(Self {
            base,
            size: bytes[0x00],
            entry_bank: bytes[0x01],
            entry_address: u16::from_le_bytes([bytes[0x02], bytes[0x03]]),
            flags: bytes[0x04],
            system,
            icon_bank: bytes[0x0E],
            icon_x: bytes[0x0F],
            icon_y: bytes[0x10],
            title,
            game_id: [bytes[0x1A], bytes[0x1B]],
            security_code: bytes[0x1C],
        })
    }

    /// Read the header from the start of `rom`, falling back to the copy at
    /// [`ALT_HEADER_OFFSET`] when the first one carries the bad-dump marker.
    pub fn locate(rom: &[u8]) -> Result<Self, DecodeError> {
        let primary = Self::parse(rom, 0)?;
        if !primary.is_bad_dump() {
            return Ok(primary);
        }

        debug!(
            size = primary.size,
            "bad dump marker in primary header, using copy at {ALT_HEADER_OFFSET:#x}"
        );
        let tail = rom.get(ALT_HEADER_OFFSET..).unwrap_or_default();
        Self::parse(tail, ALT_HEADER_OFFSET)
    }

    /// `size` of 0x00 or 0xFF marks a header copy that must not be used.
    pub fn is_bad_dump(&self) -> bool {
        self.size == 0x00 || self.size == 0xFF
    }

    pub fn icon_flags(&self) -> IconFlags {
        IconFlags::from_bits_truncate(self.flags)
    }

    pub fn has_icon(&self) -> bool {
        self.icon_flags().contains(IconFlags::HAS_ICON)
    }

    pub fn icon_compressed(&self) -> bool {
        self.icon_flags().contains(IconFlags::COMPRESSED_ICON)
    }

    /// Game title up to the first NUL.
    pub fn title_str(&self) -> String {
        name_field(&self.title)
    }

    /// System name up to the first NUL.
    pub fn system_str(&self) -> String {
        name_field(&self.system)
    }
}

fn name_field(raw: &[u8; NAME_LEN]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
