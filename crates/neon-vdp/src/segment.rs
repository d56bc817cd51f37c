//! Video segments: descriptors, mode selection and pixel fill.
//!
//! A segment is a run of same-mode pixel data within one scanline. Its
//! descriptor is two words in the line's segment chain:
//!
//! ```text
//! low word   A17..A2 of the pixel data address
//! high word  PB L4..L0 VD1 VD0 VN1 VN0 PN1 PN0 A21..A18
//! ```
//!
//! - `PB` selects the alternate palette bank.
//! - `L` encodes the length: `32 - L` 32-bit words.
//! - `VD` is the density (52, 104 or 208 source bytes per line).
//! - `VN` is the bits-per-pixel selector.
//! - `PN` picks one of four 16-entry palettes.

use emu_core::MemoryView;

use crate::palette::{decode_address, palette_colour};
use crate::scanline::LineWriter;
use crate::BAR_PIXELS;

/// Palette entry of the first colour in the two-colour modes.
const MONO_ENTRY: u32 = 14;

/// Palette entry offset used by the shifted four-colour modes.
const SHIFTED_QUAD_BASE: u32 = 12;

/// A decoded segment descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Address of the first byte of pixel data.
    pub data: u32,
    /// Length in 32-bit words (1-32).
    pub words: u32,
    /// Raw high descriptor word.
    control: u16,
}

impl Segment {
    /// Build a segment from its descriptor words.
    #[must_use]
    pub const fn from_words(low: u16, high: u16) -> Self {
        Self {
            data: decode_address(low, high),
            words: 32 - ((high >> 10) & 0x1F) as u32,
            control: high,
        }
    }

    /// Read the descriptor stored at `address`.
    #[must_use]
    pub fn read<M: MemoryView + ?Sized>(memory: &M, address: u32) -> Self {
        Self::from_words(memory.word_at(address), memory.word_at(address + 2))
    }

    /// Palette-bank flag (`PB`).
    #[must_use]
    pub const fn bank(&self) -> bool {
        self.control & 0x8000 != 0
    }

    /// Bits-per-pixel selector (`VN`).
    #[must_use]
    pub const fn depth(&self) -> u16 {
        (self.control >> 6) & 3
    }

    /// Palette number (`PN`).
    #[must_use]
    pub const fn palette_number(&self) -> u16 {
        (self.control >> 4) & 3
    }

    /// Combined mode number `VD1 VD0 VN1 VN0` (0-15).
    #[must_use]
    pub const fn mode_number(&self) -> u16 {
        (self.control >> 6) & 0x0F
    }

    /// Resolved video mode.
    #[must_use]
    pub const fn mode(&self) -> VideoMode {
        VideoMode::from_bits(self.mode_number(), self.bank())
    }

    /// Base address of this segment's palette, given the palette table
    /// base `VDPTAP`.
    #[must_use]
    pub const fn palette_base(&self, table: u32) -> u32 {
        if self.depth() == 3 && self.bank() {
            // 256-colour banks sit above the indexed palettes.
            if self.control & 0x10 != 0 {
                table + 1024 + 512
            } else {
                table + 1024
            }
        } else {
            let bank = if self.bank() { 512 } else { 0 };
            table + bank + self.depth() as u32 * 64 + self.palette_number() as u32 * 16
        }
    }
}

/// Pixel layout of a segment.
///
/// The suffix is the line density: how many source bytes cover the full
/// 832-pixel line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoMode {
    /// Two colours, one byte per bar, each bit two pixels wide.
    Mono52,
    /// As [`VideoMode::Mono52`], fetched through aligned word reads.
    Mono52Word,
    /// Two colours, one word per bar, one pixel per bit.
    Mono104,
    /// Four colours, one byte per bar, 4-pixel fields.
    Colour4At52 {
        /// First palette entry of the four.
        first: u32,
    },
    /// Four colours (entries 12-15), one word per bar, 2-pixel fields.
    Colour4At104,
    /// Four colours (entries 12-15), two words per bar, 1-pixel fields.
    Colour4At208,
    /// Sixteen colours, one byte per bar, 8-pixel nibbles.
    Colour16At52,
    /// Sixteen colours, one word per bar, 4-pixel nibbles.
    Colour16At104,
    /// Sixteen colours, two words per bar, 2-pixel nibbles.
    Colour16At208,
    /// Sixteen colours, two words per bar, only the low byte of each word
    /// shown as two 4-pixel nibbles.
    Colour16Split208,
    /// 256 colours, one byte per bar.
    Colour256At52,
    /// 256 colours, one word per bar, 8-pixel bytes.
    Colour256At104,
    /// Not produced by the hardware; filled with the frame border colour.
    Reserved,
}

impl VideoMode {
    /// Resolve a mode number (`VD1 VD0 VN1 VN0`) and bank flag.
    #[must_use]
    pub const fn from_bits(mode: u16, bank: bool) -> Self {
        match mode & 0x0F {
            0 => Self::Mono52,
            1 => Self::Colour4At52 { first: 0 },
            2 | 6 => Self::Colour16At52,
            3 | 7 if bank => Self::Colour256At52,
            3 | 7 => Self::Colour16At52,
            4 => Self::Mono52Word,
            5 => Self::Colour4At52 {
                first: SHIFTED_QUAD_BASE,
            },
            8 => Self::Mono104,
            9 => Self::Colour4At104,
            10 => Self::Colour16At104,
            11 if bank => Self::Colour256At104,
            11 => Self::Colour16At104,
            13 => Self::Colour4At208,
            14 => Self::Colour16At208,
            15 if bank => Self::Colour16Split208,
            15 => Self::Colour16At208,
            // 12: one bit per pixel at 208 bytes per line.
            _ => Self::Reserved,
        }
    }
}

/// Sequential reader over a segment's pixel data.
struct DataCursor<'a, M: ?Sized> {
    memory: &'a M,
    address: u32,
}

impl<M: MemoryView + ?Sized> DataCursor<'_, M> {
    fn next_byte(&mut self) -> u16 {
        let byte = self.memory.byte_at(self.address);
        self.address += 1;
        u16::from(byte)
    }

    fn next_word(&mut self) -> u16 {
        let word = self.memory.word_at(self.address);
        self.address += 2;
        word
    }

    /// Byte fetched through the word port: odd addresses take the high half.
    fn next_aligned_byte(&mut self) -> u16 {
        let mut word = self.memory.word_at(self.address & !1);
        if self.address & 1 != 0 {
            word >>= 8;
        }
        self.address += 1;
        word
    }
}

/// Emit `fields` palette-indexed fields of `field_bits` each from `bits`,
/// least-significant first, each `width` pixels wide.
fn emit_indexed<M: MemoryView + ?Sized>(
    memory: &M,
    out: &mut LineWriter<'_>,
    palette: u32,
    bits: u16,
    field_bits: u32,
    fields: u32,
    width: usize,
) {
    let mask = (1u16 << field_bits) - 1;
    for field in 0..fields {
        let index = (bits >> (field * field_bits)) & mask;
        out.fill(palette_colour(memory, palette + u32::from(index)), width);
    }
}

/// Emit `count` bits of `bits` in a two-colour mode, each `width` pixels.
fn emit_mono(out: &mut LineWriter<'_>, colours: [u32; 2], bits: u16, count: u32, width: usize) {
    for bit in 0..count {
        out.fill(colours[usize::from((bits >> bit) & 1)], width);
    }
}

/// Fill `bars` bars of a segment into `out`.
///
/// `palette` is the segment's palette base, `border` the frame border
/// colour used by the reserved mode. Exactly `bars * 16` pixels are written.
pub fn fill_segment<M: MemoryView + ?Sized>(
    memory: &M,
    segment: &Segment,
    palette: u32,
    bars: usize,
    border: u32,
    out: &mut LineWriter<'_>,
) {
    let start = out.position();
    let mut data = DataCursor {
        memory,
        address: segment.data,
    };

    match segment.mode() {
        VideoMode::Mono52 => {
            let colours = mono_colours(memory, palette);
            for _ in 0..bars {
                emit_mono(out, colours, data.next_byte(), 8, 2);
            }
        }
        VideoMode::Mono52Word => {
            let colours = mono_colours(memory, palette);
            for _ in 0..bars {
                emit_mono(out, colours, data.next_aligned_byte(), 8, 2);
            }
        }
        VideoMode::Mono104 => {
            let colours = mono_colours(memory, palette);
            for _ in 0..bars {
                emit_mono(out, colours, data.next_word(), 16, 1);
            }
        }
        VideoMode::Colour4At52 { first } => {
            for _ in 0..bars {
                emit_indexed(memory, out, palette + first, data.next_byte(), 2, 4, 4);
            }
        }
        VideoMode::Colour4At104 => {
            for _ in 0..bars {
                let bits = data.next_word();
                emit_indexed(memory, out, palette + SHIFTED_QUAD_BASE, bits, 2, 8, 2);
            }
        }
        VideoMode::Colour4At208 => {
            for _ in 0..bars * 2 {
                let bits = data.next_word();
                emit_indexed(memory, out, palette + SHIFTED_QUAD_BASE, bits, 2, 8, 1);
            }
        }
        VideoMode::Colour16At52 => {
            for _ in 0..bars {
                emit_indexed(memory, out, palette, data.next_byte(), 4, 2, 8);
            }
        }
        VideoMode::Colour16At104 => {
            for _ in 0..bars {
                emit_indexed(memory, out, palette, data.next_word(), 4, 4, 4);
            }
        }
        VideoMode::Colour16At208 => {
            for _ in 0..bars * 2 {
                emit_indexed(memory, out, palette, data.next_word(), 4, 4, 2);
            }
        }
        VideoMode::Colour16Split208 => {
            for _ in 0..bars * 2 {
                emit_indexed(memory, out, palette, data.next_word(), 4, 2, 4);
            }
        }
        VideoMode::Colour256At52 => {
            for _ in 0..bars {
                emit_indexed(memory, out, palette, data.next_byte(), 8, 1, 16);
            }
        }
        VideoMode::Colour256At104 => {
            for _ in 0..bars {
                emit_indexed(memory, out, palette, data.next_word(), 8, 2, 8);
            }
        }
        VideoMode::Reserved => out.fill(border, bars * BAR_PIXELS),
    }

    debug_assert_eq!(out.position() - start, bars * BAR_PIXELS);
}

/// Colours for bit values 0 and 1 in the two-colour modes.
fn mono_colours<M: MemoryView + ?Sized>(memory: &M, palette: u32) -> [u32; 2] {
    [
        palette_colour(memory, palette + MONO_ENTRY),
        palette_colour(memory, palette + MONO_ENTRY + 1),
    ]
}
