//! Variable-length quantities used for delta times and meta event lengths.
//!
//! VLQ encodes values using 7 bits per byte, most significant group first.
//! Every byte but the last has its top bit set to signal that more follow.
//! Standard MIDI Files limit the encoding to 4 bytes (28 bits of payload).

use super::error::PreconditionError;

/// Largest value representable in 4 encoded bytes.
pub const MAX_VALUE: u32 = (1 << 28) - 1;

const MAX_BYTES: usize = 4;

/// Appends the encoding of `value` to `buffer`.
///
/// # Errors
///
/// Returns [`PreconditionError::VlqOutOfRange`] for values above [`MAX_VALUE`].
/// Nothing is appended in that case.
pub fn encode_into(value: u32, buffer: &mut Vec<u8>) -> Result<(), PreconditionError> {
    if value > MAX_VALUE {
        return Err(PreconditionError::VlqOutOfRange(value as u64));
    }

    let mut started = false;
    for shift in [21u32, 14, 7] {
        let group = ((value >> shift) & 0x7F) as u8;
        if group != 0 || started {
            buffer.push(group | 0x80);
            started = true;
        }
    }
    // The least significant group is always written.
    buffer.push((value & 0x7F) as u8);
    Ok(())
}

/// Returns the encoding of `value` as a new buffer.
pub fn encode(value: u32) -> Result<Vec<u8>, PreconditionError> {
    let mut buffer = Vec::with_capacity(MAX_BYTES);
    encode_into(value, &mut buffer)?;
    Ok(buffer)
}

/// Number of bytes `value` occupies once encoded.
pub fn encoded_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        _ => 4,
    }
}

/// Decodes one quantity from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed, or `None` if the input
/// ends mid-quantity or runs past 4 bytes.
pub fn decode(bytes: &[u8]) -> Option<(u32, usize)> {
    let mut value = 0u32;
    for (i, &byte) in bytes.iter().take(MAX_BYTES).enumerate() {
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    None
}
