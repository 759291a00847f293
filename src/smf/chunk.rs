//! Chunk framing: a 4-byte tag, a big-endian 32-bit length, then the body.

use super::error::PreconditionError;
use super::format::CHUNK_HEADER_LENGTH;

/// Frames a finalized body as `tag ++ u32be(len(body)) ++ body`.
///
/// # Errors
///
/// Returns [`PreconditionError::ChunkTooLong`] if the body length does not
/// fit in the 32-bit length field.
pub fn frame(tag: [u8; 4], body: &[u8]) -> Result<Vec<u8>, PreconditionError> {
    let length =
        u32::try_from(body.len()).map_err(|_| PreconditionError::ChunkTooLong(body.len()))?;

    let mut chunk = Vec::with_capacity(CHUNK_HEADER_LENGTH + body.len());
    chunk.extend_from_slice(&tag);
    chunk.extend_from_slice(&length.to_be_bytes());
    chunk.extend_from_slice(body);
    Ok(chunk)
}
