use std::path::PathBuf;

use format_neon_image::ImageError;
use thiserror::Error;

/// Errors from emulator session operations.
#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("bad state image: {0}")]
    Image(#[from] ImageError),

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no media slot {0}")]
    InvalidSlot(usize),

    #[error("board rejected {} in slot {slot}", .path.display())]
    Attach { slot: usize, path: PathBuf },
}
