//! Core memory traits shared by the NEON emulator crates.
//!
//! The video decoder and the snapshot loader never own machine memory. They
//! see it through [`MemoryView`], which the board implements over whatever
//! storage it uses.

mod bus;

pub use bus::{ADDRESS_BITS, ADDRESS_MASK, FlatMemory, MemoryView};
