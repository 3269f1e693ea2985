//! # Text Score Parser
//!
//! Converts a virtual-piano text score into timed note events.
//!
//! ## Format
//! - Every character of [`ALPHABET`] is one note. The first symbol (`0`) is
//!   MIDI 60 and each following symbol is one semitone higher.
//! - `[...]` is a chord: all notes inside start and end together.
//! - Whitespace and any other character are skipped and take no time.
//!
//! ## Timing
//! Each note (or chord) occupies one step of [`NOTE_DURATION`] seconds.
//! A chord advances time once, however many notes it holds.
//!
//! ## Example
//! ```rust
//! use vpiano::parse;
//!
//! let events = parse("[ab] c").unwrap();
//! assert_eq!(events.len(), 3);
//! assert_eq!(events[0].start, events[1].start);
//! assert_eq!(events[2].start, 0.5);
//! ```

use crate::error::{PianoError, Result};
use crate::event::NoteEvent;

/// Recognized note symbols, in ascending pitch order
pub const ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!@$%^*(";

/// MIDI note of the first alphabet symbol
pub const FIRST_NOTE: u8 = 60;

/// Length of one note step in seconds
pub const NOTE_DURATION: f64 = 0.5;

const CHORD_OPEN: char = '[';
const CHORD_CLOSE: char = ']';

/// MIDI note for a score symbol, `None` if the character is not a note
pub fn symbol_to_midi(c: char) -> Option<u8> {
    ALPHABET
        .chars()
        .position(|a| a == c)
        .map(|i| FIRST_NOTE + i as u8)
}

/// Single-pass scanner over the score text
struct Scanner<'a> {
    chars: std::str::Chars<'a>,
    line: usize,
    column: usize,
    time: f64,
    step: f64,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, step: f64) -> Self {
        Self {
            chars: input.chars(),
            line: 1,
            column: 1,
            time: 0.0,
            step,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn note_at_current_time(&self, midi: u8) -> NoteEvent {
        NoteEvent::new(midi, self.time, self.time + self.step)
    }

    fn scan(&mut self) -> Result<Vec<NoteEvent>> {
        let mut events = Vec::new();

        loop {
            let (line, column) = (self.line, self.column);
            let Some(c) = self.advance() else { break };

            if c == CHORD_OPEN {
                self.scan_chord(&mut events, line, column)?;
                self.time += self.step;
            } else if let Some(midi) = symbol_to_midi(c) {
                events.push(self.note_at_current_time(midi));
                self.time += self.step;
            }
            // Whitespace, `]` and unknown symbols take no time
        }

        Ok(events)
    }

    /// Consume a chord body after its `[`, up to and including the `]`
    fn scan_chord(&mut self, events: &mut Vec<NoteEvent>, line: usize, column: usize) -> Result<()> {
        while let Some(c) = self.advance() {
            if c == CHORD_CLOSE {
                return Ok(());
            }
            if let Some(midi) = symbol_to_midi(c) {
                events.push(self.note_at_current_time(midi));
            }
        }

        Err(PianoError::MalformedInput {
            line,
            column,
            message: format!("unterminated chord: '{}' has no matching '{}'", CHORD_OPEN, CHORD_CLOSE),
        })
    }
}

/// Parse a text score with the default note duration
pub fn parse(text: &str) -> Result<Vec<NoteEvent>> {
    parse_with_step(text, NOTE_DURATION)
}

/// Parse a text score where every note step lasts `step` seconds
pub fn parse_with_step(text: &str, step: f64) -> Result<Vec<NoteEvent>> {
    let events = Scanner::new(text, step).scan()?;
    log::debug!("parsed {} note events from {} chars", events.len(), text.chars().count());
    Ok(events)
}
