//! A sheet: one exportable piece with its global tempo and signatures.

use super::playback;
use super::staff::Staff;
use super::{DEFAULT_TEMPO, TICKS_PER_BEAT};
use crate::smf::{EventSource, TimedEvent};
use serde::{Deserialize, Serialize};

/// Represents a sheet with staves and global settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,

    /// Tempo in beats per minute.
    pub tempo: u32,

    /// Time signature numerator (beats per measure).
    pub time_sig_numerator: u8,

    /// Time signature denominator as a note value.
    /// 4 means quarter note, 8 means eighth note, etc.
    pub time_sig_denominator: u8,

    /// Sharps (positive) or flats (negative) of the key signature.
    #[serde(default)]
    pub key_sharps_flats: i8,

    /// Minor mode.
    #[serde(default)]
    pub minor: bool,

    #[serde(default)]
    staves: Vec<Staff>,
}

impl Sheet {
    /// Creates an empty sheet at 120 BPM in 4/4, C major.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tempo: DEFAULT_TEMPO,
            time_sig_numerator: 4,
            time_sig_denominator: 4,
            key_sharps_flats: 0,
            minor: false,
            staves: Vec::new(),
        }
    }

    pub fn add_staff(&mut self, staff: Staff) {
        self.staves.push(staff);
    }

    pub fn staves(&self) -> &[Staff] {
        &self.staves
    }
}

impl EventSource for Sheet {
    fn has_content(&self) -> bool {
        true
    }

    fn division(&self) -> u16 {
        TICKS_PER_BEAT as u16
    }

    fn music_events(&self) -> Vec<TimedEvent> {
        playback::sheet_events(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::staff::Voice;

    #[test]
    fn test_sheet_defaults() {
        let sheet = Sheet::new("Test");
        assert_eq!(sheet.tempo, 120);
        assert_eq!((sheet.time_sig_numerator, sheet.time_sig_denominator), (4, 4));
        assert!(sheet.staves().is_empty());
    }

    #[test]
    fn test_sheet_exports_with_its_own_events() {
        let mut voice = Voice::new();
        voice.create_note(60, 100, 0, 480);
        let mut staff = Staff::new("Staff", 0);
        staff.add_voice(voice);
        let mut sheet = Sheet::new("Test");
        sheet.add_staff(staff);

        assert!(sheet.has_content());
        assert_eq!(sheet.division(), 480);
        assert_eq!(sheet.music_events().len(), 3 + 3 + 2);
    }
}
