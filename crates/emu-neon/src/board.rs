//! The machine behind the emulator session.

use std::path::Path;

use emu_core::MemoryView;

/// A NEON board: CPU, memory and peripherals.
///
/// The session reads video memory through [`MemoryView`] and drives
/// everything else through these calls.
pub trait Board: MemoryView {
    /// Apply the configuration word (RAM size in KB).
    fn set_configuration(&mut self, word: u16);

    /// Install the system ROM.
    fn load_rom(&mut self, rom: &[u8]);

    fn reset(&mut self);

    /// Advance one frame. Returns `false` if the frame did not complete
    /// (a breakpoint was hit or the CPU halted).
    fn run_frame(&mut self) -> bool;

    /// Replace the CPU breakpoint set. An empty slice clears it.
    fn set_breakpoints(&mut self, breakpoints: &[u32]);

    /// Restore machine state from a full state image (header included).
    fn install_state_image(&mut self, image: &[u8]);

    /// Produce a full state image: 32-byte header followed by the body.
    fn save_state_image(&self) -> Vec<u8>;

    /// Latch the 8-row keyboard matrix.
    fn update_keyboard_matrix(&mut self, matrix: &[u8; 8]);

    /// Attach the media file at `path` to drive `slot`.
    fn attach_floppy(&mut self, slot: usize, path: &Path) -> bool;

    fn detach_floppy(&mut self, slot: usize);

    /// Current CPU program counter.
    fn pc(&self) -> u16;
}
