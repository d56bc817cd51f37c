//! The fixed 32-byte image header.
//!
//! Eight little-endian 32-bit fields. Only three are interpreted here; the
//! rest belong to the board (magic, version, model) and are carried
//! verbatim into the reconstituted state.
//!
//! | Offset | Field                                  |
//! |--------|----------------------------------------|
//! | 0-11   | board-defined (magic, version)         |
//! | 12-15  | state size, header included            |
//! | 16-19  | uptime in whole seconds                |
//! | 20-23  | compressed body size                   |
//! | 24-31  | reserved                               |

use crate::ImageError;

/// Header length in bytes.
pub const HEADER_SIZE: usize = 32;

const STATE_SIZE_OFFSET: usize = 12;
const UPTIME_OFFSET: usize = 16;
const COMPRESSED_SIZE_OFFSET: usize = 20;

/// Image header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    bytes: [u8; HEADER_SIZE],
}

impl ImageHeader {
    /// Take the header from the first 32 bytes of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, ImageError> {
        let bytes = data
            .get(..HEADER_SIZE)
            .and_then(|head| <[u8; HEADER_SIZE]>::try_from(head).ok())
            .ok_or(ImageError::TruncatedHeader { len: data.len() })?;
        Ok(Self { bytes })
    }

    /// Wrap raw header bytes without interpretation.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        Self { bytes }
    }

    /// Total state size in bytes, header included.
    #[must_use]
    pub fn state_size(&self) -> u32 {
        self.field(STATE_SIZE_OFFSET)
    }

    /// Recorded uptime in whole seconds.
    #[must_use]
    pub fn uptime(&self) -> u32 {
        self.field(UPTIME_OFFSET)
    }

    /// Length of the compressed body that follows the header.
    #[must_use]
    pub fn compressed_size(&self) -> u32 {
        self.field(COMPRESSED_SIZE_OFFSET)
    }

    pub fn set_state_size(&mut self, size: u32) {
        self.set_field(STATE_SIZE_OFFSET, size);
    }

    pub fn set_uptime(&mut self, seconds: u32) {
        self.set_field(UPTIME_OFFSET, seconds);
    }

    pub fn set_compressed_size(&mut self, size: u32) {
        self.set_field(COMPRESSED_SIZE_OFFSET, size);
    }

    /// Raw header bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.bytes
    }

    fn field(&self, offset: usize) -> u32 {
        u32::from_le_bytes([
            self.bytes[offset],
            self.bytes[offset + 1],
            self.bytes[offset + 2],
            self.bytes[offset + 3],
        ])
    }

    fn set_field(&mut self, offset: usize, value: u32) {
        self.bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_little_endian() {
        let mut raw = [0u8; HEADER_SIZE];
        raw[12..16].copy_from_slice(&[0x00, 0x10, 0x02, 0x00]);
        raw[16..20].copy_from_slice(&[0x2A, 0x00, 0x00, 0x00]);
        raw[20..24].copy_from_slice(&[0x34, 0x12, 0x00, 0x00]);
        let header = ImageHeader::parse(&raw).expect("32 bytes");
        assert_eq!(header.state_size(), 0x0002_1000);
        assert_eq!(header.uptime(), 42);
        assert_eq!(header.compressed_size(), 0x1234);
    }

    #[test]
    fn setters_leave_other_bytes_alone() {
        let mut header = ImageHeader::from_bytes([0xEE; HEADER_SIZE]);
        header.set_state_size(1);
        header.set_uptime(2);
        header.set_compressed_size(3);
        let bytes = header.as_bytes();
        assert_eq!(&bytes[..12], &[0xEE; 12]);
        assert_eq!(&bytes[24..], &[0xEE; 8]);
        assert_eq!(header.state_size(), 1);
        assert_eq!(header.uptime(), 2);
        assert_eq!(header.compressed_size(), 3);
    }

    #[test]
    fn short_input_is_rejected() {
        let err = ImageHeader::parse(&[0u8; 31]).expect_err("31 bytes");
        assert!(matches!(err, ImageError::TruncatedHeader { len: 31 }));
    }

    #[test]
    fn longer_input_uses_first_32_bytes() {
        let mut raw = vec![0u8; 40];
        raw[16] = 9;
        raw[36] = 0xFF;
        let header = ImageHeader::parse(&raw).expect("40 bytes");
        assert_eq!(header.uptime(), 9);
    }
}
