//! Timed events consumed by the track builder.
//!
//! An event is either a raw channel message, copied verbatim into the track,
//! or one of the meta events the exporter knows how to encode.

use super::error::PreconditionError;
use super::format::*;
use super::vlq;

/// Raw status and data bytes of a channel message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiMessage(Vec<u8>);

impl MidiMessage {
    /// Wraps raw bytes. They are written as-is, without validation.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Note on: channel (0-15), pitch, velocity.
    ///
    /// Data bytes are masked to 7 bits so they can never read as a status byte.
    pub fn note_on(channel: u8, pitch: u8, velocity: u8) -> Self {
        Self(vec![
            STATUS_NOTE_ON | (channel & CHANNEL_MASK),
            pitch & DATA_MASK,
            velocity & DATA_MASK,
        ])
    }

    /// Note off: channel (0-15), pitch, velocity
    pub fn note_off(channel: u8, pitch: u8, velocity: u8) -> Self {
        Self(vec![
            STATUS_NOTE_OFF | (channel & CHANNEL_MASK),
            pitch & DATA_MASK,
            velocity & DATA_MASK,
        ])
    }

    /// Control change: channel, controller, value
    pub fn control_change(channel: u8, controller: u8, value: u8) -> Self {
        Self(vec![
            STATUS_CONTROL_CHANGE | (channel & CHANNEL_MASK),
            controller & DATA_MASK,
            value & DATA_MASK,
        ])
    }

    /// Program change: channel, program number
    pub fn program_change(channel: u8, program: u8) -> Self {
        Self(vec![
            STATUS_PROGRAM_CHANGE | (channel & CHANNEL_MASK),
            program & DATA_MASK,
        ])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Non-performance events embedded in a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaEvent {
    /// Tempo in beats (quarter notes) per minute.
    Tempo(u32),
    /// Numerator and note value of the denominator (4 = quarter, 8 = eighth).
    TimeSignature { numerator: u8, denominator: u8 },
    /// Sharps (positive) or flats (negative), and major/minor mode.
    KeySignature { sharps_flats: i8, minor: bool },
    /// Free-text annotation.
    Text(String),
    /// End of track marker.
    EndOfTrack,
}

impl MetaEvent {
    /// Meta event type byte.
    pub fn type_byte(&self) -> u8 {
        match self {
            MetaEvent::Tempo(_) => META_TEMPO,
            MetaEvent::TimeSignature { .. } => META_TIME_SIGNATURE,
            MetaEvent::KeySignature { .. } => META_KEY_SIGNATURE,
            MetaEvent::Text(_) => META_TEXT,
            MetaEvent::EndOfTrack => META_END_OF_TRACK,
        }
    }

    /// Payload bytes, without marker, type or length.
    pub fn payload(&self) -> Result<Vec<u8>, PreconditionError> {
        let payload = match self {
            MetaEvent::Tempo(bpm) => {
                let micros = tempo_to_micros(*bpm)?;
                micros.to_be_bytes()[1..].to_vec()
            }
            MetaEvent::TimeSignature {
                numerator,
                denominator,
            } => vec![
                *numerator,
                denominator_to_power(*denominator),
                CLOCKS_PER_CLICK,
                THIRTY_SECONDS_PER_QUARTER,
            ],
            MetaEvent::KeySignature {
                sharps_flats,
                minor,
            } => vec![*sharps_flats as u8, u8::from(*minor)],
            MetaEvent::Text(text) => text.as_bytes().to_vec(),
            MetaEvent::EndOfTrack => Vec::new(),
        };
        Ok(payload)
    }

    /// Writes `FF type len payload` (no delta time) to the buffer.
    ///
    /// The buffer is left untouched on error.
    pub fn write(&self, buffer: &mut Vec<u8>) -> Result<(), PreconditionError> {
        let payload = self.payload()?;
        let length = u32::try_from(payload.len())
            .map_err(|_| PreconditionError::VlqOutOfRange(payload.len() as u64))?;
        let length = vlq::encode(length)?;

        buffer.push(META_EVENT);
        buffer.push(self.type_byte());
        buffer.extend_from_slice(&length);
        buffer.extend_from_slice(&payload);
        Ok(())
    }
}

/// What an event carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Midi(MidiMessage),
    Meta(MetaEvent),
}

/// An event at an absolute tick position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEvent {
    /// Absolute tick position
    pub time: u32,
    pub payload: Payload,
}

impl TimedEvent {
    pub fn new(time: u32, payload: Payload) -> Self {
        Self { time, payload }
    }

    pub fn midi(time: u32, message: MidiMessage) -> Self {
        Self::new(time, Payload::Midi(message))
    }

    pub fn meta(time: u32, event: MetaEvent) -> Self {
        Self::new(time, Payload::Meta(event))
    }
}

/// Converts BPM to microseconds per quarter note, truncating.
pub fn tempo_to_micros(bpm: u32) -> Result<u32, PreconditionError> {
    if bpm == 0 {
        return Err(PreconditionError::ZeroTempo);
    }
    let micros = MICROS_PER_MINUTE / bpm;
    if micros > MAX_TEMPO_MICROS {
        return Err(PreconditionError::TempoOutOfRange(bpm));
    }
    Ok(micros)
}

/// Smallest power of two at least as large as the denominator note value.
///
/// E.g., 4 -> 2 (2^2 = 4), 8 -> 3, 6 -> 3. Saturates at the 128th note.
pub fn denominator_to_power(denominator: u8) -> u8 {
    (0..MAX_DENOMINATOR_POWER)
        .find(|&power| (1u16 << power) >= denominator as u16)
        .unwrap_or(MAX_DENOMINATOR_POWER)
}
