//! NEON state image reader and writer.
//!
//! An image is a 32-byte header followed by an LZ4 block holding the rest
//! of the machine state. Decoding yields the full state: the header bytes
//! copied to the front, the decompressed body after them.

mod header;

use std::io::Read;

use thiserror::Error;

pub use header::{HEADER_SIZE, ImageHeader};

/// Errors from reading or writing a state image.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image header truncated: {len} of 32 bytes")]
    TruncatedHeader { len: usize },

    #[error("state size {size} leaves no room for a body")]
    StateTooSmall { size: usize },

    #[error("state size {size} does not fit the header")]
    StateTooLarge { size: usize },

    #[error("could not allocate {size} bytes")]
    Allocation { size: usize },

    #[error("compressed body truncated: expected {expected} bytes, got {actual}")]
    TruncatedBody { expected: usize, actual: usize },

    #[error("body failed to decompress: {0}")]
    Decompress(#[from] lz4_flex::block::DecompressError),

    #[error("body decompressed to nothing")]
    EmptyBody,

    #[error("body decompressed to {actual} bytes, header declares {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImageError>;

/// Most output bytes one LZ4 block byte can produce (a length-extension
/// byte adds 255).
const MAX_EXPANSION: usize = 255;

/// Output a minimal sequence yields beyond the per-byte bound.
const EXPANSION_SLACK: usize = 16;

/// A decoded image: the full state buffer plus its header.
#[derive(Debug, Clone)]
pub struct StateImage {
    pub header: ImageHeader,
    /// Header bytes followed by the decompressed body.
    pub state: Vec<u8>,
}

impl StateImage {
    /// Uptime in whole seconds recorded when the image was written.
    #[must_use]
    pub fn uptime(&self) -> u32 {
        self.header.uptime()
    }
}

/// Read a complete image from `reader`.
pub fn read_image<R: Read>(reader: &mut R) -> Result<StateImage> {
    let mut raw = [0u8; HEADER_SIZE];
    let got = read_up_to(reader, &mut raw)?;
    let header = ImageHeader::parse(&raw[..got])?;

    let state_size = header.state_size() as usize;
    if state_size <= HEADER_SIZE {
        return Err(ImageError::StateTooSmall { size: state_size });
    }

    let expected = header.compressed_size() as usize;
    let mut body = Vec::new();
    body.try_reserve_exact(expected)
        .map_err(|_| ImageError::Allocation { size: expected })?;
    reader.by_ref().take(expected as u64).read_to_end(&mut body)?;
    if body.len() != expected {
        return Err(ImageError::TruncatedBody {
            expected,
            actual: body.len(),
        });
    }

    let state = inflate(&header, &body)?;
    Ok(StateImage { header, state })
}

/// Decode an image held entirely in memory.
pub fn decode_image(data: &[u8]) -> Result<StateImage> {
    read_image(&mut &data[..])
}

/// Build an image from a full state buffer.
///
/// The first 32 bytes of `state` become the header, with the state size,
/// uptime and compressed size fields overwritten.
pub fn encode_image(state: &[u8], uptime: u32) -> Result<Vec<u8>> {
    if state.len() <= HEADER_SIZE {
        return Err(ImageError::StateTooSmall { size: state.len() });
    }
    let state_size =
        u32::try_from(state.len()).map_err(|_| ImageError::StateTooLarge { size: state.len() })?;

    let body = lz4_flex::block::compress(&state[HEADER_SIZE..]);
    let compressed_size =
        u32::try_from(body.len()).map_err(|_| ImageError::StateTooLarge { size: state.len() })?;

    let mut header = ImageHeader::parse(state)?;
    header.set_state_size(state_size);
    header.set_uptime(uptime);
    header.set_compressed_size(compressed_size);

    let mut image = Vec::with_capacity(HEADER_SIZE + body.len());
    image.extend_from_slice(header.as_bytes());
    image.extend_from_slice(&body);
    Ok(image)
}

fn inflate(header: &ImageHeader, body: &[u8]) -> Result<Vec<u8>> {
    let size = header.state_size() as usize;
    let expected = size - HEADER_SIZE;

    // Refuse sizes the body cannot reach before committing memory to them.
    let reachable = body
        .len()
        .saturating_mul(MAX_EXPANSION)
        .saturating_add(EXPANSION_SLACK);
    if expected > reachable {
        return Err(ImageError::SizeMismatch {
            expected,
            actual: reachable,
        });
    }

    let mut state = Vec::new();
    state
        .try_reserve_exact(size)
        .map_err(|_| ImageError::Allocation { size })?;
    state.resize(size, 0);

    let actual = lz4_flex::block::decompress_into(body, &mut state[HEADER_SIZE..])?;
    if actual == 0 {
        return Err(ImageError::EmptyBody);
    }
    if actual != expected {
        return Err(ImageError::SizeMismatch { expected, actual });
    }

    state[..HEADER_SIZE].copy_from_slice(header.as_bytes());
    Ok(state)
}

/// Fill as much of `buf` as the reader provides. Returns the byte count.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
