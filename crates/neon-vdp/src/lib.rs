//! NEON video controller raster decoder.
//!
//! The controller has no framebuffer of its own. Each frame it walks a
//! per-line table of segment chains in main memory, and each segment carries
//! its own pixel format and palette selection. This crate rebuilds the
//! visible 832x300 picture from that structure.
//!
//! # Memory structures
//!
//! - `VDPTAP` (words at 0o4/0o6): palette table base. Entry 0 of the table
//!   is the frame border colour.
//! - `VDPTAS` (words at 0o10/0o12): segment table base. One two-word entry
//!   per scanline, pointing at that line's segment chain.
//! - Segment chain: two-word descriptors read in order until the line's
//!   52 bars are used up.
//!
//! All indirect addresses use the same encoding; see [`decode_address`].
//!
//! # Standalone IC
//!
//! The decoder only reads memory, through [`emu_core::MemoryView`]. It
//! never writes to it and holds no state between frames besides the line
//! buffer.

mod colour;
mod frame;
mod palette;
mod scanline;
mod segment;

pub use colour::{OPAQUE, rgb32};
pub use frame::Vdp;
pub use palette::{PLANE_OFFSET, decode_address, palette_colour, palette_entry};
pub use scanline::{LineWriter, decode_line};
pub use segment::{Segment, VideoMode, fill_segment};

/// Visible pixels per scanline.
pub const SCREEN_WIDTH: usize = 832;

/// Scanlines per frame.
pub const SCREEN_HEIGHT: usize = 300;

/// Pixels per bar, the unit segment lengths are counted in.
pub const BAR_PIXELS: usize = 16;

/// Bars per scanline.
pub const BARS_PER_LINE: usize = SCREEN_WIDTH / BAR_PIXELS;
