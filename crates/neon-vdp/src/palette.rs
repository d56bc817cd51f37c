//! Palette table access and the indirect address format.
//!
//! Palette entries are split across two 256-byte planes: the high byte of
//! entry `n` lives at `base + n`, the low byte at `base + n + 256`. Every
//! palette read goes through [`palette_entry`]; the planes are never read
//! as a combined word.

use emu_core::MemoryView;

use crate::colour::rgb32;

/// Distance between the high-byte plane and the low-byte plane.
pub const PLANE_OFFSET: u32 = 256;

/// Decode an indirect address from its (low, high) word pair.
///
/// The low word holds address bits 2-17 (addresses are 32-bit aligned);
/// bits 0-3 of the high word supply address bits 18-21. Used for the table
/// registers, the per-line chain heads and the segment data pointers.
#[must_use]
pub const fn decode_address(low: u16, high: u16) -> u32 {
    (low as u32) << 2 | ((high & 0x000F) as u32) << 18
}

/// Read the native 16-bit colour stored at palette address `address`.
#[must_use]
pub fn palette_entry<M: MemoryView + ?Sized>(memory: &M, address: u32) -> u16 {
    let hi = memory.byte_at(address);
    let lo = memory.byte_at(address + PLANE_OFFSET);
    u16::from(hi) << 8 | u16::from(lo)
}

/// Read the palette entry at `address` and resolve it to ARGB32.
#[must_use]
pub fn palette_colour<M: MemoryView + ?Sized>(memory: &M, address: u32) -> u32 {
    rgb32(palette_entry(memory, address))
}
