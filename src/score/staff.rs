//! Staves and their voices.
//!
//! A staff plays on one MIDI channel with one instrument. Its voices hold
//! the notes, each voice kept sorted by start tick.

use super::note::Note;
use super::{clamp_channel, clamp_data_byte};
use serde::{Deserialize, Serialize};

/// One melodic line within a staff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Notes sorted by start_tick.
    notes: Vec<Note>,
}

impl Voice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a note, keeping notes sorted by start_tick.
    ///
    /// Notes with equal start ticks keep their insertion order.
    pub fn add_note(&mut self, note: Note) {
        let pos = self.notes.partition_point(|n| n.start_tick <= note.start_tick);
        self.notes.insert(pos, note);
    }

    pub fn create_note(&mut self, pitch: u8, velocity: u8, start_tick: u32, duration_ticks: u32) {
        self.add_note(Note::new(pitch, velocity, start_tick, duration_ticks));
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

/// A staff with its instrument and mixing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    /// Human-readable name.
    pub name: String,

    /// MIDI channel (0-15). Channel 9 is reserved for drums in General MIDI.
    #[serde(deserialize_with = "clamp_channel")]
    pub channel: u8,

    /// MIDI program number (0-127).
    #[serde(deserialize_with = "clamp_data_byte")]
    pub program: u8,

    /// Volume (0-127), sent as controller 7.
    #[serde(deserialize_with = "clamp_data_byte")]
    pub volume: u8,

    /// Pan position (0=left, 64=center, 127=right), sent as controller 10.
    #[serde(deserialize_with = "clamp_data_byte")]
    pub pan: u8,

    #[serde(default)]
    voices: Vec<Voice>,
}

impl Staff {
    /// Creates a staff with piano, full volume and centered pan.
    pub fn new(name: impl Into<String>, channel: u8) -> Self {
        Self {
            name: name.into(),
            channel: channel.min(15),
            program: 0,
            volume: 100,
            pan: 64,
            voices: Vec::new(),
        }
    }

    pub fn add_voice(&mut self, voice: Voice) {
        self.voices.push(voice);
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_notes_sorted() {
        let mut voice = Voice::new();
        voice.create_note(60, 100, 480, 240);
        voice.create_note(62, 100, 0, 240);
        voice.create_note(64, 100, 960, 240);
        voice.create_note(65, 100, 480, 240);

        let starts: Vec<_> = voice.notes().iter().map(|n| (n.start_tick, n.pitch)).collect();
        assert_eq!(starts, vec![(0, 62), (480, 60), (480, 65), (960, 64)]);
    }

    #[test]
    fn test_out_of_range_json_is_clamped() {
        let json = r#"{
            "name": "Loud",
            "channel": 20,
            "program": 130,
            "volume": 200,
            "pan": 255,
            "voices": [{"notes": [
                {"pitch": 200, "velocity": 150, "start_tick": 0, "duration_ticks": 480}
            ]}]
        }"#;
        let staff: Staff = serde_json::from_str(json).unwrap();
        assert_eq!(staff.channel, 15);
        assert_eq!((staff.program, staff.volume, staff.pan), (127, 127, 127));
        let note = &staff.voices()[0].notes()[0];
        assert_eq!((note.pitch, note.velocity), (127, 127));
    }

    #[test]
    fn test_channel_clamped() {
        assert_eq!(Staff::new("Test", 20).channel, 15);
    }
}
