//! Read-only views over machine memory.

/// Width of the machine address space in bits.
pub const ADDRESS_BITS: u32 = 22;

/// Mask applied to every machine address (4 MB address space).
pub const ADDRESS_MASK: u32 = (1 << ADDRESS_BITS) - 1;

/// Read-only view of the machine's address space.
///
/// Video and state decoding only ever look at memory through this trait.
/// Reads must never have side effects: decoding a frame is a pure function
/// of memory contents.
pub trait MemoryView {
    /// Read the byte at `address`.
    fn byte_at(&self, address: u32) -> u8;

    /// Read the little-endian word at `address`.
    ///
    /// Callers pass even addresses. Implementations may ignore bit 0.
    fn word_at(&self, address: u32) -> u16;
}

impl<M: MemoryView + ?Sized> MemoryView for &M {
    fn byte_at(&self, address: u32) -> u8 {
        (**self).byte_at(address)
    }

    fn word_at(&self, address: u32) -> u16 {
        (**self).word_at(address)
    }
}

/// Flat RAM covering the whole 22-bit address space.
///
/// No banking, no ROM overlay. Used by boards that keep their RAM in one
/// block and by tests that need to lay out video memory by hand.
pub struct FlatMemory {
    data: Vec<u8>,
}

impl FlatMemory {
    /// Size of the address space in bytes.
    pub const SIZE: usize = 1 << ADDRESS_BITS;

    #[must_use]
    pub fn new() -> Self {
        Self {
            data: vec![0; Self::SIZE],
        }
    }

    /// Write a byte. The address wraps at 4 MB.
    pub fn write_byte(&mut self, address: u32, value: u8) {
        self.data[(address & ADDRESS_MASK) as usize] = value;
    }

    /// Write a little-endian word at an even address (bit 0 is ignored).
    pub fn write_word(&mut self, address: u32, value: u16) {
        let address = address & !1;
        self.write_byte(address, value as u8);
        self.write_byte(address + 1, (value >> 8) as u8);
    }

    /// Copy `bytes` into memory starting at `address`.
    pub fn load(&mut self, address: u32, bytes: &[u8]) {
        for (offset, &byte) in bytes.iter().enumerate() {
            self.write_byte(address.wrapping_add(offset as u32), byte);
        }
    }

    /// The raw backing store.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryView for FlatMemory {
    fn byte_at(&self, address: u32) -> u8 {
        self.data[(address & ADDRESS_MASK) as usize]
    }

    fn word_at(&self, address: u32) -> u16 {
        let address = address & !1;
        u16::from(self.byte_at(address)) | (u16::from(self.byte_at(address + 1)) << 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_is_little_endian() {
        let mut mem = FlatMemory::new();
        mem.write_byte(0x100, 0x34);
        mem.write_byte(0x101, 0x12);
        assert_eq!(mem.word_at(0x100), 0x1234);
    }

    #[test]
    fn word_read_ignores_bit_zero() {
        let mut mem = FlatMemory::new();
        mem.write_word(0x200, 0xBEEF);
        assert_eq!(mem.word_at(0x201), 0xBEEF);
    }

    #[test]
    fn addresses_wrap_at_22_bits() {
        let mut mem = FlatMemory::new();
        mem.write_byte(0x40_0010, 0xAA);
        assert_eq!(mem.byte_at(0x10), 0xAA);
        assert_eq!(mem.byte_at(0x3F_FFFF + 0x11), 0xAA);
    }

    #[test]
    fn load_copies_block() {
        let mut mem = FlatMemory::new();
        mem.load(0x1000, &[1, 2, 3]);
        assert_eq!(mem.byte_at(0x1000), 1);
        assert_eq!(mem.byte_at(0x1002), 3);
        assert_eq!(mem.as_bytes().len(), FlatMemory::SIZE);
    }

    #[test]
    fn view_through_reference() {
        fn first_word(view: impl MemoryView) -> u16 {
            view.word_at(0)
        }
        let mut mem = FlatMemory::new();
        mem.write_word(0, 0x0102);
        assert_eq!(first_word(&mem), 0x0102);
    }
}
