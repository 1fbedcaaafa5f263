//! Minimal PNG encoder
//!
//! Writes exactly one image modality: 8-bit RGBA (color type 6), no interlacing,
//! filter type None on every scanline, and a single zlib-compressed IDAT chunk.
//! The output is a conformant PNG that any standard decoder can read.
//!
//! ```text
//! 89 50 4E 47 0D 0A 1A 0A | IHDR (13 bytes) | IDAT (zlib scanlines) | IEND
//! ```

mod chunk;

pub use chunk::{Chunk, IDAT, IEND, IHDR, MAX_CHUNK_LEN, chunk_types, read_chunks};

use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;
use std::path::Path;

/// Fixed 8-byte PNG file signature
pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Bits per channel
pub const BIT_DEPTH: u8 = 8;

/// Truecolor with alpha
pub const COLOR_TYPE_RGBA: u8 = 6;

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Filter type "None" scanline prefix
const FILTER_NONE: u8 = 0;

/// Fixed zlib level so identical input always yields identical bytes
const ZLIB_LEVEL: u32 = 6;

/// PNG encoding errors
#[derive(Debug, thiserror::Error)]
pub enum PngError {
    #[error(
        "invalid image data: {width}x{height} needs {expected} pixels, got {actual}"
    )]
    InvalidImageData {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("chunk data too large: {0} bytes")]
    ChunkTooLarge(usize),

    #[error("malformed PNG stream: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode a row-major RGBA pixel buffer as a PNG byte stream.
///
/// Pixel `(x, y)` is `pixels[y * width + x]`.
///
/// # Errors
/// [`PngError::InvalidImageData`] when either dimension is zero or
/// `pixels.len() != width * height`. No bytes are produced in that case.
pub fn encode(width: u32, height: u32, pixels: &[[u8; 4]]) -> Result<Vec<u8>, PngError> {
    let expected = pixel_count(width, height).ok_or(PngError::InvalidImageData {
        width,
        height,
        expected: 0,
        actual: pixels.len(),
    })?;
    if pixels.len() != expected {
        return Err(PngError::InvalidImageData {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    encode_validated(width, height, pixels.as_flattened())
}

/// Same as [`encode`], but takes the pixels as a flat `R,G,B,A,R,G,B,A,...` slice.
///
/// The slice length must be exactly `width * height * 4`.
pub fn encode_bytes(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, PngError> {
    let invalid = || PngError::InvalidImageData {
        width,
        height,
        expected: pixel_count(width, height).unwrap_or(0),
        actual: rgba.len() / BYTES_PER_PIXEL,
    };

    let expected = pixel_count(width, height)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(invalid)?;
    if rgba.len() != expected {
        return Err(invalid());
    }

    encode_validated(width, height, rgba)
}

/// Encode and write to `path`.
///
/// The image is fully encoded before the file is created, so an invalid image
/// never leaves a file behind.
pub fn write_png(
    path: &Path,
    width: u32,
    height: u32,
    pixels: &[[u8; 4]],
) -> Result<(), PngError> {
    let bytes = encode(width, height, pixels)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!(
        "wrote {} ({}x{}, {} bytes)",
        path.display(),
        width,
        height,
        bytes.len()
    );
    Ok(())
}

/// `width * height` if both are positive and the product fits in memory
fn pixel_count(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    (width as usize).checked_mul(height as usize)
}

fn encode_validated(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, PngError> {
    let ihdr = Chunk::new(IHDR, header_data(width, height));
    let idat = Chunk::new(IDAT, compress(&scanlines(width, rgba))?);
    let iend = Chunk::new(IEND, Vec::new());

    let mut out = Vec::with_capacity(
        SIGNATURE.len() + ihdr.serialized_len() + idat.serialized_len() + iend.serialized_len(),
    );
    out.extend_from_slice(&SIGNATURE);
    for chunk in [&ihdr, &idat, &iend] {
        chunk.write_to(&mut out)?;
    }

    Ok(out)
}

/// IHDR payload: width, height, depth 8, color type 6, compression 0, filter 0, interlace 0
fn header_data(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[BIT_DEPTH, COLOR_TYPE_RGBA, 0, 0, 0]);
    data
}

/// Prefix every row with the None filter byte.
/// Result length is `height * (1 + width * 4)`.
fn scanlines(width: u32, rgba: &[u8]) -> Vec<u8> {
    let stride = width as usize * BYTES_PER_PIXEL;
    let rows = rgba.len() / stride;

    let mut raw = Vec::with_capacity(rows * (stride + 1));
    for row in rgba.chunks_exact(stride) {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(row);
    }
    raw
}

fn compress(raw: &[u8]) -> Result<Vec<u8>, PngError> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(raw.len() / 2 + 64),
        Compression::new(ZLIB_LEVEL),
    );
    encoder.write_all(raw)?;
    Ok(encoder.finish()?)
}
