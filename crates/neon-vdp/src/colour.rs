//! Native 16-bit colour to ARGB32 conversion.
//!
//! The palette stores colours in a packed 16-bit layout with each channel
//! split across two bit groups:
//!
//! | Bits    | Channel          |
//! |---------|------------------|
//! | 0-2     | red, low 3 bits  |
//! | 3-4     | blue, low 2 bits |
//! | 5-7     | green, low 3 bits|
//! | 8-9     | red, high 2 bits |
//! | 10-12   | blue, high 3 bits|
//! | 13-15   | green, high 3 bits|
//!
//! Each 8-bit output channel is the high group, then the low group, then
//! the top bits of the high group repeated in the remaining low bits.

/// Alpha byte of every resolved pixel.
pub const OPAQUE: u32 = 0xFF00_0000;

/// Convert a native palette colour to ARGB32.
#[must_use]
pub const fn rgb32(colour: u16) -> u32 {
    let c = colour as u32;
    let r = (c & 0x0300) >> 2 | (c & 0x0007) << 3 | (c & 0x0300) >> 7;
    let g = (c & 0xE000) >> 8 | (c & 0x00E0) >> 3 | (c & 0xC000) >> 14;
    let b = (c & 0x1C00) >> 5 | (c & 0x0018) | (c & 0x1C00) >> 10;
    OPAQUE | r << 16 | g << 8 | b
}
