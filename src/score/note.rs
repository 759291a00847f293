//! A single note: pitch, velocity and its position in ticks.

use super::clamp_data_byte;
use serde::{Deserialize, Serialize};

/// Represents a single MIDI note with timing and dynamics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI note number (0-127). 60 = Middle C (C4).
    #[serde(deserialize_with = "clamp_data_byte")]
    pub pitch: u8,

    /// Note velocity (0-127).
    #[serde(deserialize_with = "clamp_data_byte")]
    pub velocity: u8,

    /// Start time in ticks from the beginning of the sheet.
    pub start_tick: u32,

    /// Duration in ticks.
    pub duration_ticks: u32,
}

impl Note {
    /// Creates a new note, clamping pitch and velocity to 0-127.
    ///
    /// # Examples
    ///
    /// ```
    /// use smfexport::score::Note;
    ///
    /// // Middle C, quarter note at beat 1
    /// let note = Note::new(60, 100, 0, 480);
    /// assert_eq!(note.end_tick(), 480);
    /// ```
    pub fn new(pitch: u8, velocity: u8, start_tick: u32, duration_ticks: u32) -> Self {
        Self {
            pitch: pitch.min(127),
            velocity: velocity.min(127),
            start_tick,
            duration_ticks,
        }
    }

    /// Returns the end tick of this note (start + duration).
    pub fn end_tick(&self) -> u32 {
        self.start_tick.saturating_add(self.duration_ticks)
    }
}
