//! Standard MIDI File assembly.
//!
//! # Format Details
//!
//! Exports as SMF Format 1 (multi-track) with exactly two tracks:
//! - Track 0: control track carrying only text meta events (the banner)
//! - Track 1: music track with the producer's events
//!
//! The whole file is encoded in memory before anything is written, so input
//! errors never leave bytes on the sink. Once writing starts, a sink failure
//! may leave partial output behind.

use super::chunk::frame;
use super::error::{ExportError, PreconditionError};
use super::event::{MetaEvent, TimedEvent};
use super::format::*;
use super::track::{build_track, ClockPolicy};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Second banner line written under the version line.
pub const BANNER_NOTICE: &str = "It's still a work in progress.";

/// Banner written to the control track unless overridden.
pub fn default_banner() -> Vec<String> {
    vec![
        format!(
            "{} Version {} generated. ",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
        BANNER_NOTICE.to_string(),
    ]
}

/// Producer of the data an export needs, typically a score walked by playback.
pub trait EventSource {
    /// False if there is nothing to export at all.
    fn has_content(&self) -> bool;

    /// Ticks per quarter note.
    fn division(&self) -> u16;

    /// Music track events in time order.
    fn music_events(&self) -> Vec<TimedEvent>;

    /// Control track text lines.
    fn banner(&self) -> Vec<String> {
        default_banner()
    }
}

/// Settings for one export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Replaces the source's banner lines when set.
    pub banner: Option<Vec<String>>,

    /// Handling of events earlier than the track clock.
    pub clock_policy: ClockPolicy,
}

/// Encodes header and track chunks and writes them to a sink.
#[derive(Debug, Clone, Default)]
pub struct SmfEncoder {
    options: ExportOptions,
}

impl SmfEncoder {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Builds the three framed chunks: header, control track, music track.
    pub fn encode_chunks(
        &self,
        division: u16,
        banner: &[String],
        events: &[TimedEvent],
    ) -> Result<[Vec<u8>; 3], PreconditionError> {
        let header = frame(HEADER_TAG, &header_body(division)?)?;

        let banner_events: Vec<TimedEvent> = banner
            .iter()
            .map(|line| TimedEvent::meta(0, MetaEvent::Text(line.clone())))
            .collect();
        let control_body = build_track(&banner_events, ClockPolicy::ClampAndAdvance)?;
        let control = frame(TRACK_TAG, &control_body)?;

        let music_body = build_track(events, self.options.clock_policy)?;
        let music = frame(TRACK_TAG, &music_body)?;

        tracing::debug!(
            header = header.len(),
            control = control.len(),
            music = music.len(),
            "encoded chunks"
        );
        Ok([header, control, music])
    }

    /// Encodes a complete file into memory.
    pub fn encode(
        &self,
        division: u16,
        banner: &[String],
        events: &[TimedEvent],
    ) -> Result<Vec<u8>, PreconditionError> {
        Ok(self.encode_chunks(division, banner, events)?.concat())
    }

    /// Encodes a file and writes header, control and music chunks to `sink`.
    ///
    /// # Errors
    ///
    /// [`ExportError::Precondition`] leaves the sink untouched.
    /// [`ExportError::Io`] aborts the remaining writes.
    pub fn export<W: Write>(
        &self,
        division: u16,
        banner: &[String],
        events: &[TimedEvent],
        sink: &mut W,
    ) -> Result<(), ExportError> {
        let chunks = self.encode_chunks(division, banner, events)?;
        for chunk in &chunks {
            sink.write_all(chunk)?;
        }
        sink.flush()?;

        tracing::info!(
            division,
            events = events.len(),
            bytes = chunks.iter().map(Vec::len).sum::<usize>(),
            "exported standard MIDI file"
        );
        Ok(())
    }

    /// Exports everything `source` produces.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoContent`] without touching the sink if the
    /// source has nothing to export.
    pub fn export_source<S: EventSource + ?Sized, W: Write>(
        &self,
        source: &S,
        sink: &mut W,
    ) -> Result<(), ExportError> {
        if !source.has_content() {
            tracing::warn!("nothing to export");
            return Err(ExportError::NoContent);
        }

        let banner = match &self.options.banner {
            Some(lines) => lines.clone(),
            None => source.banner(),
        };
        self.export(source.division(), &banner, &source.music_events(), sink)
    }
}

/// Exports with default options.
pub fn export<W: Write>(
    division: u16,
    banner: &[String],
    events: &[TimedEvent],
    sink: &mut W,
) -> Result<(), ExportError> {
    SmfEncoder::default().export(division, banner, events, sink)
}

/// Format, track count and division, each big-endian 16-bit.
fn header_body(division: u16) -> Result<Vec<u8>, PreconditionError> {
    if division == 0 || division > MAX_DIVISION {
        return Err(PreconditionError::InvalidDivision(division));
    }

    let mut body = Vec::with_capacity(HEADER_LENGTH as usize);
    body.extend_from_slice(&FORMAT_SIMULTANEOUS.to_be_bytes());
    body.extend_from_slice(&TRACK_COUNT.to_be_bytes());
    body.extend_from_slice(&division.to_be_bytes());
    Ok(body)
}
