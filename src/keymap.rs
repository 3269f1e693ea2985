//! # Keymap
//!
//! Mapping between MIDI note numbers and the characters of a computer
//! keyboard, as used by virtual piano sheets.
//!
//! The mapping is a hand-curated table keyed by note name. Physical key rows
//! do not follow the chromatic scale, so no formula can replace it. The
//! digits `1`-`7` appear twice (C2-B2 region and D7-C8 region); lookups from
//! character to note return the lowest matching key.
//!
//! ## Example
//! ```rust
//! use vpiano::keymap::{char_for, midi_for};
//!
//! assert_eq!(char_for(60), Some('t'));   // C4
//! assert_eq!(midi_for('t'), 60);
//! assert_eq!(midi_for('1'), 36);         // C2 wins over D7
//! assert_eq!(midi_for('~'), 0);          // unmapped
//! ```

use crate::keys::{all_keys, note_name};

/// Note name -> keyboard character for all 88 keys
const CHAR_TABLE: [(&str, char); 88] = [
    // White keys
    ("A0", '-'),
    ("B0", '='),
    ("C1", '['),
    ("D1", ']'),
    ("E1", '\\'),
    ("F1", ';'),
    ("G1", '\''),
    ("A1", ','),
    ("B1", '.'),
    ("C2", '1'),
    ("D2", '2'),
    ("E2", '3'),
    ("F2", '4'),
    ("G2", '5'),
    ("A2", '6'),
    ("B2", '7'),
    ("C3", '8'),
    ("D3", '9'),
    ("E3", '0'),
    ("F3", 'q'),
    ("G3", 'w'),
    ("A3", 'e'),
    ("B3", 'r'),
    ("C4", 't'),
    ("D4", 'y'),
    ("E4", 'u'),
    ("F4", 'i'),
    ("G4", 'o'),
    ("A4", 'p'),
    ("B4", 'a'),
    ("C5", 's'),
    ("D5", 'd'),
    ("E5", 'f'),
    ("F5", 'g'),
    ("G5", 'h'),
    ("A5", 'j'),
    ("B5", 'k'),
    ("C6", 'l'),
    ("D6", 'z'),
    ("E6", 'x'),
    ("F6", 'c'),
    ("G6", 'v'),
    ("A6", 'b'),
    ("B6", 'n'),
    ("C7", 'm'),
    ("D7", '1'),
    ("E7", '2'),
    ("F7", '3'),
    ("G7", '4'),
    ("A7", '5'),
    ("B7", '6'),
    ("C8", '7'),
    // Black keys
    ("A#0", '_'),
    ("C#1", '{'),
    ("D#1", '}'),
    ("F#1", ':'),
    ("G#1", '"'),
    ("A#1", '<'),
    ("C#2", '!'),
    ("D#2", '@'),
    ("F#2", '$'),
    ("G#2", '%'),
    ("A#2", '^'),
    ("C#3", '*'),
    ("D#3", '('),
    ("F#3", 'Q'),
    ("G#3", 'W'),
    ("A#3", 'E'),
    ("C#4", 'T'),
    ("D#4", 'Y'),
    ("F#4", 'I'),
    ("G#4", 'O'),
    ("A#4", 'P'),
    ("C#5", 'S'),
    ("D#5", 'D'),
    ("F#5", 'G'),
    ("G#5", 'H'),
    ("A#5", 'J'),
    ("C#6", 'L'),
    ("D#6", 'Z'),
    ("F#6", 'C'),
    ("G#6", 'V'),
    ("A#6", 'B'),
    ("C#7", '1'),
    ("D#7", '2'),
    ("F#7", '3'),
    ("G#7", '4'),
    ("A#7", '5'),
];

/// Keyboard character for a note name such as "C#4"
pub fn char_for_name(name: &str) -> Option<char> {
    CHAR_TABLE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
}

/// Keyboard character that plays the given MIDI note, if any
pub fn char_for(midi: u8) -> Option<char> {
    char_for_name(&note_name(midi))
}

/// MIDI note played by a keyboard character, or 0 when unmapped.
///
/// Scans the keys in ascending MIDI order, so duplicated characters
/// resolve to the lowest key.
pub fn midi_for(c: char) -> u8 {
    all_keys()
        .iter()
        .find(|key| char_for(key.midi) == Some(c))
        .map(|key| key.midi)
        .unwrap_or(0)
}

/// Resolve the `key` string of a keyboard event (e.g. `"t"`, `"Shift"`).
///
/// Only single-character keys can map to a note.
pub fn event_to_midi(key: &str) -> Option<u8> {
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match midi_for(c) {
        0 => None,
        midi => Some(midi),
    }
}
