#![allow(dead_code)]

use gcicon_core::IMAGE_BANK_SIZE;
use gcicon_core::header::HEADER_LEN;

/// Large enough for every layout the tests build at the primary base.
pub const ROM_LEN: usize = 0x10000;

/// Header bytes with the fields the decoder cares about.
pub fn header_bytes(size: u8, entry_bank: u8, flags: u8, icon: (u8, u8, u8)) -> [u8; HEADER_LEN] {
    let mut bytes = [0u8; HEADER_LEN];
    bytes[0x00] = size;
    bytes[0x01] = entry_bank;
    bytes[0x04] = flags;
    bytes[0x05..0x0E].copy_from_slice(b"TigerDMGC");
    bytes[0x0E] = icon.0;
    bytes[0x0F] = icon.1;
    bytes[0x10] = icon.2;
    bytes[0x11..0x15].copy_from_slice(b"TEST");
    bytes
}

/// Zero-filled ROM of `len` bytes with each `(offset, bytes)` patch applied.
pub fn build_rom(len: usize, patches: &[(usize, &[u8])]) -> Vec<u8> {
    let mut rom = vec![0u8; len];
    for &(offset, bytes) in patches {
        rom[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
    rom
}

/// Storage position of the bank pixel shown at (`row`, `col`).
pub fn stored_index(row: usize, col: usize) -> usize {
    row + col * IMAGE_BANK_SIZE
}

/// Write a 2-bit palette index at storage position `i`.
pub fn set_stored_index(packed: &mut [u8], i: usize, value: u8) {
    let shift = 6 - 2 * (i % 4);
    let byte = &mut packed[i / 4];
    *byte = (*byte & !(0b11 << shift)) | ((value & 0b11) << shift);
}

/// Deterministic filler standing in for the ROM data that follows a payload.
pub fn rom_noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect()
}
