//! Non-real-time playback of a sheet into the music track event stream.
//!
//! Events are collected with a priority and stable-sorted by tick, so the
//! encoder receives them in time order. At equal ticks, sheet-wide meta
//! events come first, then staff setup, then note offs before note ons so a
//! repeated pitch is released before it is struck again.

use super::sheet::Sheet;
use crate::smf::format::{CC_PAN, CC_VOLUME};
use crate::smf::{MetaEvent, MidiMessage, TimedEvent};

const PRIORITY_META: u8 = 0;
const PRIORITY_SETUP: u8 = 1;
const PRIORITY_NOTE_OFF: u8 = 10;
const PRIORITY_NOTE_ON: u8 = 11;

/// Walks every voice of every staff and returns the sheet's events.
pub fn sheet_events(sheet: &Sheet) -> Vec<TimedEvent> {
    let mut events: Vec<(u8, TimedEvent)> = vec![
        (PRIORITY_META, TimedEvent::meta(0, MetaEvent::Tempo(sheet.tempo))),
        (
            PRIORITY_META,
            TimedEvent::meta(
                0,
                MetaEvent::TimeSignature {
                    numerator: sheet.time_sig_numerator,
                    denominator: sheet.time_sig_denominator,
                },
            ),
        ),
        (
            PRIORITY_META,
            TimedEvent::meta(
                0,
                MetaEvent::KeySignature {
                    sharps_flats: sheet.key_sharps_flats,
                    minor: sheet.minor,
                },
            ),
        ),
    ];

    for staff in sheet.staves() {
        let channel = staff.channel;
        events.push((
            PRIORITY_SETUP,
            TimedEvent::midi(0, MidiMessage::program_change(channel, staff.program)),
        ));
        events.push((
            PRIORITY_SETUP,
            TimedEvent::midi(0, MidiMessage::control_change(channel, CC_VOLUME, staff.volume)),
        ));
        events.push((
            PRIORITY_SETUP,
            TimedEvent::midi(0, MidiMessage::control_change(channel, CC_PAN, staff.pan)),
        ));

        for note in staff.voices().iter().flat_map(|voice| voice.notes()) {
            events.push((
                PRIORITY_NOTE_ON,
                TimedEvent::midi(
                    note.start_tick,
                    MidiMessage::note_on(channel, note.pitch, note.velocity),
                ),
            ));
            events.push((
                PRIORITY_NOTE_OFF,
                TimedEvent::midi(note.end_tick(), MidiMessage::note_off(channel, note.pitch, 0)),
            ));
        }
    }

    events.sort_by_key(|(priority, event)| (event.time, *priority));
    tracing::debug!(sheet = %sheet.name, events = events.len(), "played back sheet");
    events.into_iter().map(|(_, event)| event).collect()
}
