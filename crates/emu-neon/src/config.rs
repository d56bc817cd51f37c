//! NEON machine configuration.

use std::path::PathBuf;

/// Number of removable media slots.
pub const FLOPPY_SLOTS: usize = 4;

/// RAM fitted to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeonMemory {
    Kb512,
    #[default]
    Kb1024,
    Kb2048,
    Kb4096,
}

impl NeonMemory {
    /// The configuration word handed to the board.
    #[must_use]
    pub const fn config_word(self) -> u16 {
        match self {
            Self::Kb512 => 512,
            Self::Kb1024 => 1024,
            Self::Kb2048 => 2048,
            Self::Kb4096 => 4096,
        }
    }
}

/// Configuration for creating a NEON session.
#[derive(Debug, Clone)]
pub struct NeonConfig {
    pub memory: NeonMemory,
    /// System ROM, installed at initialization.
    pub rom: Vec<u8>,
    /// Where the host drops a snapshot to be loaded.
    pub image_path: PathBuf,
    /// Directory holding removable media files.
    pub media_dir: PathBuf,
}

impl NeonConfig {
    #[must_use]
    pub fn new(rom: Vec<u8>) -> Self {
        Self {
            memory: NeonMemory::default(),
            rom,
            image_path: PathBuf::from("/image"),
            media_dir: PathBuf::from("/"),
        }
    }

    /// Media file for `slot`: `<media_dir>/dsk<slot>`.
    #[must_use]
    pub fn media_path(&self, slot: usize) -> PathBuf {
        self.media_dir.join(format!("dsk{slot}"))
    }
}
