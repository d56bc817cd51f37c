//! Scanline assembly from a chain of segments.
//!
//! A line is 52 bars of 16 pixels. Segments are read from the line's chain
//! until the bars run out. Every segment after the first is preceded by a
//! one-bar border transition:
//!
//! ```text
//! AAAAAAAAABBCCCCC
//! A = previous segment's border colour (9 px)
//! B = frame border colour (2 px)
//! C = this segment's border colour (5 px)
//! ```

use emu_core::MemoryView;

use crate::palette::palette_colour;
use crate::segment::{Segment, fill_segment};
use crate::{BAR_PIXELS, BARS_PER_LINE, SCREEN_WIDTH};

/// Bounded cursor over one scanline's pixels.
pub struct LineWriter<'a> {
    line: &'a mut [u32; SCREEN_WIDTH],
    position: usize,
}

impl<'a> LineWriter<'a> {
    #[must_use]
    pub fn new(line: &'a mut [u32; SCREEN_WIDTH]) -> Self {
        Self { line, position: 0 }
    }

    /// Write `count` pixels of `colour`. Pixels past the end of the line
    /// are dropped.
    pub fn fill(&mut self, colour: u32, count: usize) {
        debug_assert!(
            self.position + count <= SCREEN_WIDTH,
            "line overrun at pixel {} (+{count})",
            self.position
        );
        let end = (self.position + count).min(SCREEN_WIDTH);
        self.line[self.position..end].fill(colour);
        self.position = end;
    }

    /// Pixels written so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Decode one scanline whose segment chain starts at `chain`.
///
/// `palette_table` is the decoded `VDPTAP` base and `border` the frame
/// border colour. Always writes exactly [`SCREEN_WIDTH`] pixels.
pub fn decode_line<M: MemoryView + ?Sized>(
    memory: &M,
    chain: u32,
    palette_table: u32,
    border: u32,
    line: &mut [u32; SCREEN_WIDTH],
) {
    let mut out = LineWriter::new(line);
    let mut address = chain;
    let mut bars = BARS_PER_LINE;
    let mut first = true;
    let mut previous_border = 0;

    loop {
        let segment = Segment::read(memory, address);
        address += 4;

        let palette = segment.palette_base(palette_table);
        let segment_border = palette_colour(memory, palette);

        if !first {
            out.fill(previous_border, 9);
            out.fill(border, 2);
            out.fill(segment_border, 5);
            bars -= 1;
            if bars == 0 {
                break;
            }
        }
        previous_border = segment_border;

        let mut count = segment.words as usize * 2;
        if !first {
            count -= 1;
        }
        let count = count.min(bars);
        bars -= count;

        fill_segment(memory, &segment, palette, count, border, &mut out);

        if bars == 0 {
            break;
        }
        first = false;
    }

    debug_assert_eq!(out.position(), BARS_PER_LINE * BAR_PIXELS);
}
