//! NEON microcomputer emulator session.
//!
//! The machine itself (CPU, bus, peripherals) sits behind the [`Board`]
//! trait. [`Emulator`] owns a board together with everything the host
//! drives it through: the frame buffer and raster decoder, the keyboard
//! matrix, uptime accounting, snapshot loading and removable media.

mod board;
pub mod capture;
mod config;
mod emulator;
mod error;
mod keyboard;
mod uptime;

pub use board::Board;
pub use config::{FLOPPY_SLOTS, NeonConfig, NeonMemory};
pub use emulator::Emulator;
pub use error::EmulatorError;
pub use keyboard::{KeyOutcome, KeyboardMatrix};
pub use neon_vdp::{SCREEN_HEIGHT, SCREEN_WIDTH};
pub use uptime::{FRAMES_PER_SECOND, Uptime};
