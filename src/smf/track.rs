//! Serialization of one track body.
//!
//! Each event is written as a delta-time VLQ followed by either its raw
//! channel bytes or its meta encoding. The running clock is threaded through
//! a fold so the delta computation stays a pure function of
//! `(clock, event.time)`.

use super::error::PreconditionError;
use super::event::{MetaEvent, Payload, TimedEvent};
use super::vlq;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the track builder treats an event that is earlier than the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClockPolicy {
    /// Write a zero delta and move the clock to the event's time anyway.
    /// Byte-compatible with files written by earlier exporters.
    #[default]
    ClampAndAdvance,
    /// Fail with [`PreconditionError::OutOfOrder`].
    Strict,
    /// Stable-sort events by time first. Equal times keep their order.
    StableSort,
}

impl FromStr for ClockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clamp" | "clamp-and-advance" => Ok(ClockPolicy::ClampAndAdvance),
            "strict" => Ok(ClockPolicy::Strict),
            "sort" | "stable-sort" => Ok(ClockPolicy::StableSort),
            other => Err(format!("unknown clock policy: {}", other)),
        }
    }
}

/// Delta time for an event at `time` and the clock value after it.
///
/// A late event gets delta 0 and still sets the clock to its own time.
pub fn advance(clock: u32, time: u32) -> (u32, u32) {
    (time.saturating_sub(clock), time)
}

/// Builds a track body from `events`, followed by an end-of-track marker.
///
/// The end-of-track marker is always appended with delta 0, even when the
/// last event already was one. Channel messages with no bytes are skipped
/// and do not move the clock.
///
/// # Errors
///
/// Fails on meta events with invalid parameters, deltas beyond the VLQ range,
/// and, under [`ClockPolicy::Strict`], events earlier than the clock.
pub fn build_track(
    events: &[TimedEvent],
    policy: ClockPolicy,
) -> Result<Vec<u8>, PreconditionError> {
    let mut ordered: Vec<&TimedEvent> = events.iter().collect();
    if policy == ClockPolicy::StableSort {
        ordered.sort_by_key(|event| event.time);
    }

    let mut body = Vec::new();
    ordered.into_iter().try_fold(0u32, |clock, event| {
        write_event(event, clock, policy, &mut body)
    })?;

    vlq::encode_into(0, &mut body)?;
    MetaEvent::EndOfTrack.write(&mut body)?;
    Ok(body)
}

/// Writes one event and returns the new clock.
fn write_event(
    event: &TimedEvent,
    clock: u32,
    policy: ClockPolicy,
    body: &mut Vec<u8>,
) -> Result<u32, PreconditionError> {
    if let Payload::Midi(message) = &event.payload {
        if message.is_empty() {
            return Ok(clock);
        }
    }

    if event.time < clock {
        if policy == ClockPolicy::Strict {
            return Err(PreconditionError::OutOfOrder {
                time: event.time,
                clock,
            });
        }
        tracing::warn!(
            time = event.time,
            clock,
            "event earlier than track clock, writing zero delta"
        );
    }

    let (delta, clock) = advance(clock, event.time);
    vlq::encode_into(delta, body)?;
    match &event.payload {
        Payload::Midi(message) => body.extend_from_slice(message.as_bytes()),
        Payload::Meta(meta) => meta.write(body)?,
    }
    Ok(clock)
}
