//! # Note Events
//!
//! The canonical timed note record shared by the parser, external MIDI
//! decoders and the playback cursor.
//!
//! External decoders may hand over events as JSON. Older front ends keyed
//! events by keyboard character instead of MIDI number; [`RawNoteEvent`]
//! accepts both shapes and normalizes them to [`NoteEvent`].
//!
//! ## Example
//! ```rust
//! use vpiano::event::events_from_json;
//!
//! let events = events_from_json(r#"[
//!     {"code": 60, "start": 0.0, "end": 0.5},
//!     {"char": "y", "start": 0.5, "end": 1.0}
//! ]"#).unwrap();
//!
//! assert_eq!(events[0].code, 60);
//! assert_eq!(events[1].code, 62); // 'y' is D4
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PianoError, Result};
use crate::keymap::midi_for;

/// A note with start and end time in seconds.
///
/// `code` is the MIDI number, or 0 when the source symbol did not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub code: u8,
    pub start: f64,
    pub end: f64,
}

impl NoteEvent {
    /// Build an event, clamping `end` so it never precedes `start`
    pub fn new(code: u8, start: f64, end: f64) -> Self {
        Self {
            code,
            start,
            end: end.max(start),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// False for events whose symbol did not resolve to a note
    pub fn is_resolved(&self) -> bool {
        self.code != 0
    }
}

/// Event as handed over by an external decoder or legacy front end
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNoteEvent {
    Code { code: u8, start: f64, end: f64 },
    Char {
        #[serde(rename = "char")]
        symbol: char,
        start: f64,
        end: f64,
    },
}

impl RawNoteEvent {
    pub fn normalize(&self) -> NoteEvent {
        match *self {
            RawNoteEvent::Code { code, start, end } => NoteEvent::new(code, start, end),
            RawNoteEvent::Char { symbol, start, end } => NoteEvent::new(midi_for(symbol), start, end),
        }
    }
}

/// Parse a JSON array of raw events into canonical note events
pub fn events_from_json(json: &str) -> Result<Vec<NoteEvent>> {
    let raw: Vec<RawNoteEvent> =
        serde_json::from_str(json).map_err(|e| PianoError::EventFormat(e.to_string()))?;
    let events: Vec<NoteEvent> = raw.iter().map(RawNoteEvent::normalize).collect();

    let unresolved = events.iter().filter(|e| !e.is_resolved()).count();
    if unresolved > 0 {
        log::warn!("{} of {} imported events did not resolve to a note", unresolved, events.len());
    }
    Ok(events)
}

pub fn events_to_json(events: &[NoteEvent]) -> Result<String> {
    serde_json::to_string_pretty(events).map_err(|e| PianoError::EventFormat(e.to_string()))
}

/// Length of a score: the end of its last event
pub fn total_duration(events: &[NoteEvent]) -> f64 {
    events.last().map(|e| e.end).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_clamps_end() {
        let e = NoteEvent::new(60, 2.0, 1.0);
        assert_eq!(e.end, 2.0);
        assert_eq!(e.duration(), 0.0);
    }

    #[test]
    fn test_json_code_and_legacy_char() {
        let events = events_from_json(
            r#"[{"code": 64, "start": 0, "end": 0.5}, {"char": "t", "start": 1, "end": 2}]"#,
        )
        .unwrap();
        assert_eq!(
            events,
            vec![NoteEvent::new(64, 0.0, 0.5), NoteEvent::new(60, 1.0, 2.0)]
        );
    }

    #[test]
    fn test_unmapped_char_becomes_zero() {
        let events = events_from_json(r#"[{"char": "~", "start": 0, "end": 1}]"#).unwrap();
        assert_eq!(events[0].code, 0);
        assert!(!events[0].is_resolved());
    }

    #[test]
    fn test_invalid_json() {
        let err = events_from_json(r#"[{"start": 0}]"#).unwrap_err();
        assert!(matches!(err, PianoError::EventFormat(_)));
        assert!(matches!(events_from_json("not json"), Err(PianoError::EventFormat(_))));
    }

    #[test]
    fn test_json_output_shape() {
        let json = events_to_json(&[NoteEvent::new(60, 0.0, 0.5)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["code"], 60);
        assert_eq!(value[0]["end"], 0.5);
    }

    #[test]
    fn test_total_duration() {
        assert_eq!(total_duration(&[]), 0.0);
        let events = [NoteEvent::new(60, 0.0, 0.5), NoteEvent::new(61, 0.5, 1.0)];
        assert_eq!(total_duration(&events), 1.0);
    }
}
