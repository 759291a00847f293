//! Byte-level constants of the Standard MIDI File container.
//!
//! Every fixed value written by the encoder lives here so the layout can be
//! checked against the published SMF 1.0 document in one place.

/// Tag of the header chunk.
pub const HEADER_TAG: [u8; 4] = *b"MThd";

/// Tag of every track chunk.
pub const TRACK_TAG: [u8; 4] = *b"MTrk";

/// Length of the header chunk body (format + track count + division).
pub const HEADER_LENGTH: u32 = 6;

/// Size of a chunk header: 4-byte tag plus 4-byte big-endian length.
pub const CHUNK_HEADER_LENGTH: usize = 8;

/// Format 1: simultaneous tracks, the first one carrying only meta events.
pub const FORMAT_SIMULTANEOUS: u16 = 1;

/// The encoder always writes a control track and a music track.
pub const TRACK_COUNT: u16 = 2;

/// Highest metrical division. Bit 15 set would mean SMPTE timing.
pub const MAX_DIVISION: u16 = 0x7FFF;

/// Marker byte that introduces a meta event inside a track body.
pub const META_EVENT: u8 = 0xFF;

/// Free-text annotation.
pub const META_TEXT: u8 = 0x01;
/// End of track marker.
pub const META_END_OF_TRACK: u8 = 0x2F;
/// Set tempo, in microseconds per quarter note.
pub const META_TEMPO: u8 = 0x51;
/// Time signature.
pub const META_TIME_SIGNATURE: u8 = 0x58;
/// Key signature.
pub const META_KEY_SIGNATURE: u8 = 0x59;

/// Microseconds in one minute; tempo payload is this divided by BPM.
pub const MICROS_PER_MINUTE: u32 = 60_000_000;

/// Largest value a 3-byte tempo payload can carry.
pub const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;

/// MIDI clocks per metronome click written in every time signature.
pub const CLOCKS_PER_CLICK: u8 = 24;

/// Notated 32nd notes per MIDI quarter note written in every time signature.
pub const THIRTY_SECONDS_PER_QUARTER: u8 = 8;

/// Largest denominator exponent accepted (2^7 = 128th note).
pub const MAX_DENOMINATOR_POWER: u8 = 7;

/// Channel voice status nibbles.
pub const STATUS_NOTE_OFF: u8 = 0x80;
pub const STATUS_NOTE_ON: u8 = 0x90;
pub const STATUS_CONTROL_CHANGE: u8 = 0xB0;
pub const STATUS_PROGRAM_CHANGE: u8 = 0xC0;

/// Low nibble of a channel status byte.
pub const CHANNEL_MASK: u8 = 0x0F;

/// Data bytes carry 7 bits; bit 7 marks a status byte.
pub const DATA_MASK: u8 = 0x7F;

/// Controller numbers used by the playback walker.
pub const CC_VOLUME: u8 = 7;
pub const CC_PAN: u8 = 10;
