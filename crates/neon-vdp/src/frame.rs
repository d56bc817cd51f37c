//! Whole-frame decoding.

use emu_core::MemoryView;

use crate::palette::{decode_address, palette_colour};
use crate::scanline::decode_line;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// `VDPTAP` register pair: palette table base.
const VDPTAP_LO: u32 = 0o4;
const VDPTAP_HI: u32 = 0o6;

/// `VDPTAS` register pair: segment table base.
const VDPTAS_LO: u32 = 0o10;
const VDPTAS_HI: u32 = 0o12;

/// Raster decoder for the NEON video controller.
///
/// Owns the line buffer each scanline is assembled in before it is copied
/// to the frame.
pub struct Vdp {
    line: [u32; SCREEN_WIDTH],
}

impl Vdp {
    #[must_use]
    pub fn new() -> Self {
        Self {
            line: [0; SCREEN_WIDTH],
        }
    }

    /// Decode all 300 scanlines from `memory` into `frame`.
    ///
    /// `frame` is row-major, [`SCREEN_WIDTH`] pixels per row. Returns
    /// `false` without touching it if it is smaller than a full frame.
    pub fn render<M: MemoryView + ?Sized>(&mut self, memory: &M, frame: &mut [u32]) -> bool {
        if frame.len() < SCREEN_WIDTH * SCREEN_HEIGHT {
            return false;
        }

        let mut segment_table =
            decode_address(memory.word_at(VDPTAS_LO), memory.word_at(VDPTAS_HI));
        let palette_table = decode_address(memory.word_at(VDPTAP_LO), memory.word_at(VDPTAP_HI));
        let border = palette_colour(memory, palette_table);

        for row in frame.chunks_exact_mut(SCREEN_WIDTH).take(SCREEN_HEIGHT) {
            let low = memory.word_at(segment_table);
            let high = memory.word_at(segment_table + 2);
            segment_table += 4;

            decode_line(
                memory,
                decode_address(low, high),
                palette_table,
                border,
                &mut self.line,
            );
            row.copy_from_slice(&self.line);
        }

        true
    }
}

impl Default for Vdp {
    fn default() -> Self {
        Self::new()
    }
}
