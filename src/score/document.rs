//! Score document container and its JSON persistence.

use super::sheet::Sheet;
use super::{ScoreError, TICKS_PER_BEAT};
use crate::smf::{EventSource, TimedEvent};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A document holding one or more sheets.
///
/// Exporting a document exports its first sheet; the other sheets are
/// reachable through [`Document::sheet_at`] and can be exported on their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,

    #[serde(default)]
    sheets: Vec<Sheet>,
}

impl Document {
    /// Creates an empty document with no sheets.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sheets: Vec::new(),
        }
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_at(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    pub fn to_json(&self) -> Result<String, ScoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ScoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Saves the document to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file writing fails
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ScoreError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Loads a document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if file reading or parsing fails
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScoreError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl EventSource for Document {
    fn has_content(&self) -> bool {
        !self.sheets.is_empty()
    }

    fn division(&self) -> u16 {
        TICKS_PER_BEAT as u16
    }

    fn music_events(&self) -> Vec<TimedEvent> {
        self.sheets
            .first()
            .map(|sheet| sheet.music_events())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::staff::{Staff, Voice};
    use crate::smf::{ExportError, SmfEncoder};

    fn one_note_document() -> Document {
        let mut voice = Voice::new();
        voice.create_note(60, 100, 0, 480);
        let mut staff = Staff::new("Piano", 0);
        staff.add_voice(voice);
        let mut sheet = Sheet::new("Sheet 1");
        sheet.add_staff(staff);
        let mut document = Document::new("Test");
        document.add_sheet(sheet);
        document
    }

    #[test]
    fn test_serialization() {
        let document = one_note_document();
        let json = document.to_json().unwrap();
        let loaded = Document::from_json(&json).unwrap();
        assert_eq!(loaded, document);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{
            "title": "Minimal",
            "sheets": [{
                "name": "S",
                "tempo": 90,
                "time_sig_numerator": 3,
                "time_sig_denominator": 4
            }]
        }"#;
        let document = Document::from_json(json).unwrap();
        let sheet = document.sheet_at(0).unwrap();
        assert_eq!(sheet.tempo, 90);
        assert_eq!(sheet.key_sharps_flats, 0);
        assert!(sheet.staves().is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Document::from_json("{"),
            Err(ScoreError::Json(_))
        ));
    }

    #[test]
    fn test_exports_first_sheet_only() {
        let mut document = one_note_document();
        document.add_sheet(Sheet::new("Sheet 2"));
        assert_eq!(
            document.music_events(),
            document.sheet_at(0).unwrap().music_events()
        );
    }

    #[test]
    fn test_no_sheets_is_no_content() {
        let document = Document::new("Empty");
        let mut out = Vec::new();
        let err = SmfEncoder::default().export_source(&document, &mut out).unwrap_err();
        assert!(matches!(err, ExportError::NoContent));
        assert!(out.is_empty());
    }
}
