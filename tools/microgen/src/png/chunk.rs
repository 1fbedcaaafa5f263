//! PNG chunk framing
//!
//! Every chunk is serialized as `length (u32 BE) ++ type ++ data ++ crc (u32 BE)`,
//! where the CRC-32 covers the type tag and the data but not the length.

use super::{PngError, SIGNATURE};

/// Largest data length a chunk may declare (2^31 - 1).
pub const MAX_CHUNK_LEN: usize = i32::MAX as usize;

pub const IHDR: [u8; 4] = *b"IHDR";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

/// A typed, length-prefixed, checksummed block of a PNG stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Four ASCII bytes naming the chunk
    pub kind: [u8; 4],
    /// Chunk payload
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(kind: [u8; 4], data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// CRC-32 (PNG/zlib variant) of `kind ++ data`
    pub fn crc(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&self.kind);
        hasher.update(&self.data);
        hasher.finalize()
    }

    /// Chunk type as text, for logs and error messages
    pub fn kind_str(&self) -> &str {
        std::str::from_utf8(&self.kind).unwrap_or("????")
    }

    /// Number of bytes this chunk occupies once serialized
    pub fn serialized_len(&self) -> usize {
        12 + self.data.len()
    }

    /// Append the serialized chunk to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), PngError> {
        if self.data.len() > MAX_CHUNK_LEN {
            return Err(PngError::ChunkTooLarge(self.data.len()));
        }
        let length = self.data.len() as u32;

        out.reserve(self.serialized_len());
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(&self.kind);
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.crc().to_be_bytes());
        Ok(())
    }
}

/// Split a PNG byte stream back into its chunks.
///
/// Checks the signature, every length field and every checksum. Nothing after
/// the `IEND` chunk is read.
pub fn read_chunks(bytes: &[u8]) -> Result<Vec<Chunk>, PngError> {
    if bytes.len() < SIGNATURE.len() || bytes[..SIGNATURE.len()] != SIGNATURE {
        return Err(PngError::Malformed("missing PNG signature".into()));
    }

    let mut chunks = Vec::new();
    let mut rest = &bytes[SIGNATURE.len()..];

    while !rest.is_empty() {
        if rest.len() < 12 {
            return Err(PngError::Malformed(format!(
                "truncated chunk header ({} bytes left)",
                rest.len()
            )));
        }

        let length = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
        let kind = [rest[4], rest[5], rest[6], rest[7]];
        let end = 8 + length;
        if rest.len() < end + 4 {
            return Err(PngError::Malformed(format!(
                "chunk {} declares {} bytes but only {} remain",
                String::from_utf8_lossy(&kind),
                length,
                rest.len().saturating_sub(12)
            )));
        }

        let chunk = Chunk::new(kind, rest[8..end].to_vec());
        let stored = u32::from_be_bytes([rest[end], rest[end + 1], rest[end + 2], rest[end + 3]]);
        if stored != chunk.crc() {
            return Err(PngError::Malformed(format!(
                "checksum mismatch in {} chunk (stored {:#010x}, computed {:#010x})",
                chunk.kind_str(),
                stored,
                chunk.crc()
            )));
        }

        rest = &rest[end + 4..];
        let last = chunk.kind == IEND;
        chunks.push(chunk);
        if last {
            break;
        }
    }

    Ok(chunks)
}

/// Chunk type sequence of a PNG byte stream, e.g. `["IHDR", "IDAT", "IEND"]`
pub fn chunk_types(bytes: &[u8]) -> Result<Vec<String>, PngError> {
    Ok(read_chunks(bytes)?
        .iter()
        .map(|c| c.kind_str().to_string())
        .collect())
}
