//! Standard MIDI File (SMF) encoding.
//!
//! This module turns an ordered stream of timed events into a byte-exact
//! Format 1 file: one header chunk, a control track with text banners and a
//! music track. It only writes; reading MIDI files is not supported.

pub mod chunk;
mod encoder;
mod error;
mod event;
pub mod format;
mod track;
pub mod vlq;

pub use encoder::{default_banner, export, EventSource, ExportOptions, SmfEncoder, BANNER_NOTICE};
pub use error::{ExportError, PreconditionError};
pub use event::{denominator_to_power, tempo_to_micros, MetaEvent, MidiMessage, Payload, TimedEvent};
pub use track::{advance, build_track, ClockPolicy};
