//! smfexport - Exports scores to Standard MIDI Files.
//!
//! The [`smf`] module is the encoder: it turns an ordered stream of timed
//! events into a byte-exact SMF Format 1 file. The [`score`] module provides
//! a small document model and the playback walker that feeds the encoder.

pub mod score;
pub mod smf;

// Re-export commonly used types
pub use score::{Document, Note, Sheet, Staff, Voice, TICKS_PER_BEAT};
pub use smf::{
    export, ClockPolicy, EventSource, ExportError, ExportOptions, MetaEvent, MidiMessage,
    PreconditionError, SmfEncoder, TimedEvent,
};
