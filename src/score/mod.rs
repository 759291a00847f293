//! Score model and playback.
//!
//! A minimal document model (document → sheets → staves → voices → notes)
//! and the playback walker that turns a sheet into the event stream the SMF
//! encoder consumes.

mod document;
mod note;
pub mod playback;
mod sheet;
mod staff;

pub use document::Document;
pub use note::Note;
pub use sheet::Sheet;
pub use staff::{Staff, Voice};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Ticks per beat (quarter note), written as the file's division.
pub const TICKS_PER_BEAT: u32 = 480;

/// Default tempo in beats per minute.
pub const DEFAULT_TEMPO: u32 = 120;

/// Errors loading or saving a score document.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to access score file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid score JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Deserializes a 7-bit MIDI data value, clamping to 0-127 like the
/// constructors do.
pub(crate) fn clamp_data_byte<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    Ok(u8::deserialize(deserializer)?.min(127))
}

/// Deserializes a MIDI channel, clamping to 0-15.
pub(crate) fn clamp_channel<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    Ok(u8::deserialize(deserializer)?.min(15))
}
