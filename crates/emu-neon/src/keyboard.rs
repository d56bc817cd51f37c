//! NEON keyboard matrix.
//!
//! Eight rows of eight keys. The host reports keys as virtual scan codes:
//!
//! | Bits  | Meaning                  |
//! |-------|--------------------------|
//! | 0-7   | column mask within a row |
//! | 8-10  | row index                |
//!
//! A set bit in the matrix means the key is held. The whole matrix is
//! latched into the board after every change.

/// Whether a key event changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Applied,
    /// Scan code 0: no key.
    Ignored,
}

/// Keyboard state: one byte per row, 1 = pressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardMatrix {
    rows: [u8; 8],
}

impl KeyboardMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Press or release the keys named by `scan`.
    pub fn apply(&mut self, scan: u16, pressed: bool) -> KeyOutcome {
        if scan == 0 {
            return KeyOutcome::Ignored;
        }
        let row = usize::from((scan >> 8) & 7);
        let mask = scan as u8;
        if pressed {
            self.rows[row] |= mask;
        } else {
            self.rows[row] &= !mask;
        }
        KeyOutcome::Applied
    }

    #[must_use]
    pub fn rows(&self) -> &[u8; 8] {
        &self.rows
    }
}
